//! Connection lifecycle manager.
//!
//! One spawned task owns the WebSocket, the reconnect state machine, and the
//! retry bookkeeping. User-issued operations arrive as [`Control`] messages
//! over an unbounded channel, so every state transition happens on this task
//! and nothing else ever touches the socket handle.
//!
//! # Phases
//!
//! | Phase | Meaning | Wakes on |
//! |-------|---------|----------|
//! | `Idle` | disconnected, nothing pending | control message |
//! | `Backoff` | disconnected, retry timer armed | timer or control |
//! | `Dialing` | connect in flight | dial result or control |
//! | `Open` | socket established | inbound frame or control |
//!
//! Each phase owns its live resources. Dropping a phase is the cancel path:
//! dropping `Backoff` disarms the retry timer, dropping `Dialing` aborts the
//! in-flight handshake, and `Open` closes its sink before being replaced.
//!
//! # Retry Policy
//!
//! Retries use a flat delay, not exponential backoff, and are capped at
//! [`MAX_RETRIES`]. Once the budget is exhausted the manager stays
//! disconnected until a user-issued connect resets it.

// ============================================================================
// Imports
// ============================================================================

use std::pin::Pin;
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{Sleep, sleep, timeout};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, trace, warn};

use crate::client::state::{ConnectionState, StateSinks};
use crate::error::{Error, Result};
use crate::protocol::{self, CommandFrame};

use super::target::ConnectionTarget;

// ============================================================================
// Constants
// ============================================================================

/// Flat delay between reconnect attempts.
pub(crate) const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Maximum automatic reconnect attempts before waiting for a manual connect.
pub(crate) const MAX_RETRIES: u32 = 5;

/// Bound on a single dial (TCP connect plus WebSocket handshake).
pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Types
// ============================================================================

/// Socket type produced by `connect_async`.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Write half of a split socket.
type WsSink = SplitSink<WsStream, Message>;

/// Read half of a split socket.
type WsSource = SplitStream<WsStream>;

// ============================================================================
// RetryPolicy
// ============================================================================

/// Reconnect policy knobs, configurable through the client builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Retry budget per connect sequence.
    pub max_retries: u32,
    /// Flat delay between retries.
    pub retry_delay: Duration,
    /// Bound on a single dial.
    pub connect_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            retry_delay: RETRY_DELAY,
            connect_timeout: CONNECT_TIMEOUT,
        }
    }
}

// ============================================================================
// Control
// ============================================================================

/// User-issued operations, marshaled onto the manager task.
#[derive(Debug)]
pub(crate) enum Control {
    /// Supersede any current socket or pending retry and dial this target.
    Connect(ConnectionTarget),
    /// Send a command if a socket is open; silently drop otherwise.
    Send(String),
    /// Close the socket, cancel any pending retry, forget the target.
    Close,
}

// ============================================================================
// RetryState
// ============================================================================

/// Reconnect bookkeeping.
///
/// `attempt` counts retries scheduled since the last success or user-issued
/// connect; it is incremented when a retry is scheduled, not when it fires.
#[derive(Debug, Default)]
struct RetryState {
    /// Target to re-dial; cleared by an explicit close.
    last_target: Option<ConnectionTarget>,
    /// Retries consumed from the budget.
    attempt: u32,
}

// ============================================================================
// Phase
// ============================================================================

/// What the manager task is currently doing, owning the phase's resources.
enum Phase {
    /// Disconnected with nothing pending; only a control message wakes us.
    Idle,
    /// Disconnected, retry timer armed. Dropping the timer cancels it.
    Backoff { timer: Pin<Box<Sleep>> },
    /// Dial in flight. Dropping the future aborts the handshake.
    Dialing { dial: BoxFuture<'static, Result<WsStream>> },
    /// Socket open; frames flow until close, failure, or supersession.
    Open { sink: WsSink, source: WsSource },
}

// ============================================================================
// ConnectionManager
// ============================================================================

/// The task body that owns one logical connection.
///
/// Constructed by the client builder, which holds the sending half of the
/// control channel and the receiving halves of the state streams.
pub(crate) struct ConnectionManager {
    /// Control messages from client handles.
    control_rx: mpsc::UnboundedReceiver<Control>,
    /// State streams published to client handles.
    sinks: StateSinks,
    /// Reconnect policy.
    policy: RetryPolicy,
    /// Reconnect bookkeeping.
    retry: RetryState,
}

impl ConnectionManager {
    /// Creates a manager ready to be spawned.
    pub(crate) fn new(
        control_rx: mpsc::UnboundedReceiver<Control>,
        sinks: StateSinks,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            control_rx,
            sinks,
            policy,
            retry: RetryState::default(),
        }
    }

    /// Runs until every client handle has been dropped.
    pub(crate) async fn run(mut self) {
        let mut phase = Phase::Idle;

        loop {
            phase = match phase {
                Phase::Idle => match self.control_rx.recv().await {
                    None => break,
                    Some(ctrl) => self.handle_idle(ctrl),
                },

                Phase::Backoff { mut timer } => {
                    tokio::select! {
                        ctrl = self.control_rx.recv() => match ctrl {
                            None => break,
                            Some(Control::Connect(target)) => self.start_connect(target),
                            Some(Control::Close) => self.handle_close(),
                            Some(Control::Send(command)) => {
                                trace!(command = %command, "dropping command, not connected");
                                Phase::Backoff { timer }
                            }
                        },
                        _ = &mut timer => self.redial(),
                    }
                }

                Phase::Dialing { mut dial } => {
                    tokio::select! {
                        ctrl = self.control_rx.recv() => match ctrl {
                            None => break,
                            Some(Control::Connect(target)) => self.start_connect(target),
                            Some(Control::Close) => self.handle_close(),
                            Some(Control::Send(command)) => {
                                trace!(command = %command, "dropping command, not connected");
                                Phase::Dialing { dial }
                            }
                        },
                        result = &mut dial => match result {
                            Ok(stream) => self.on_open(stream),
                            Err(err) => self.on_lost(Some(err)),
                        },
                    }
                }

                Phase::Open { mut sink, mut source } => {
                    tokio::select! {
                        ctrl = self.control_rx.recv() => match ctrl {
                            None => {
                                let _ = sink.close().await;
                                break;
                            }
                            Some(Control::Connect(target)) => {
                                let _ = sink.close().await;
                                self.start_connect(target)
                            }
                            Some(Control::Close) => {
                                let _ = sink.close().await;
                                self.handle_close()
                            }
                            Some(Control::Send(command)) => {
                                match Self::write_command(&mut sink, &command).await {
                                    Ok(()) => Phase::Open { sink, source },
                                    Err(err) => self.on_lost(Some(err)),
                                }
                            }
                        },
                        frame = source.next() => match frame {
                            Some(Ok(Message::Text(text))) => {
                                self.on_frame(text.as_str());
                                Phase::Open { sink, source }
                            }
                            Some(Ok(Message::Close(_))) | None => {
                                debug!("socket closed by daemon");
                                self.on_lost(None)
                            }
                            Some(Err(err)) => self.on_lost(Some(err.into())),
                            // Binary, Ping, Pong
                            Some(Ok(_)) => Phase::Open { sink, source },
                        },
                    }
                }
            };
        }

        debug!("connection manager terminated");
    }

    // ========================================================================
    // Control Handling
    // ========================================================================

    /// Handles a control message while disconnected with nothing pending.
    fn handle_idle(&mut self, ctrl: Control) -> Phase {
        match ctrl {
            Control::Connect(target) => self.start_connect(target),
            Control::Close => self.handle_close(),
            Control::Send(command) => {
                trace!(command = %command, "dropping command, not connected");
                Phase::Idle
            }
        }
    }

    /// User-issued connect: supersedes everything and resets the budget.
    fn start_connect(&mut self, target: ConnectionTarget) -> Phase {
        debug!(target = %target, "connect requested");
        self.retry.attempt = 0;
        self.retry.last_target = Some(target.clone());
        self.dial(target)
    }

    /// Retry-timer connect: same dial, attempt accounting untouched.
    fn redial(&mut self) -> Phase {
        match self.retry.last_target.clone() {
            Some(target) => {
                debug!(
                    target = %target,
                    attempt = self.retry.attempt,
                    "retry timer fired"
                );
                self.dial(target)
            }
            None => Phase::Idle,
        }
    }

    /// User-issued close: cancel retries, forget the target, go idle.
    fn handle_close(&mut self) -> Phase {
        debug!("close requested");
        self.retry.last_target = None;
        self.retry.attempt = 0;
        self.sinks.set_connection(ConnectionState::Disconnected);
        Phase::Idle
    }

    // ========================================================================
    // Lifecycle Transitions
    // ========================================================================

    /// Starts a dial bounded by the connect timeout.
    fn dial(&mut self, target: ConnectionTarget) -> Phase {
        self.sinks.set_connection(ConnectionState::Connecting);

        let connect_timeout = self.policy.connect_timeout;
        let dial: BoxFuture<'static, Result<WsStream>> = Box::pin(async move {
            let url = target.url()?;
            let (stream, _response) = timeout(connect_timeout, connect_async(url.as_str()))
                .await
                .map_err(|_| Error::connection_timeout(connect_timeout.as_millis() as u64))??;
            Ok(stream)
        });

        Phase::Dialing { dial }
    }

    /// Dial succeeded: reset the budget, clear the error, start reading.
    fn on_open(&mut self, stream: WsStream) -> Phase {
        if let Some(target) = &self.retry.last_target {
            info!(target = %target, "connection established");
        }

        self.retry.attempt = 0;
        self.sinks.clear_error();
        self.sinks.set_connection(ConnectionState::Connected);

        let (sink, source) = stream.split();
        Phase::Open { sink, source }
    }

    /// Socket ended: peer close (`err` = `None`) or transport failure.
    ///
    /// Schedules a retry while the budget lasts; the attempt counter is
    /// incremented here, at schedule time.
    fn on_lost(&mut self, err: Option<Error>) -> Phase {
        self.sinks.set_connection(ConnectionState::Disconnected);

        let can_retry =
            self.retry.last_target.is_some() && self.retry.attempt < self.policy.max_retries;

        if can_retry {
            self.retry.attempt += 1;
            if let Some(err) = err {
                let kind = if err.is_timeout() { "timeout" } else { "transport" };
                warn!(
                    kind,
                    error = %err,
                    attempt = self.retry.attempt,
                    max = self.policy.max_retries,
                    "connection lost, retry scheduled"
                );
                self.sinks.record_error(format!(
                    "{err} (attempt {}/{})",
                    self.retry.attempt, self.policy.max_retries
                ));
            } else {
                debug!(attempt = self.retry.attempt, "connection closed, retry scheduled");
            }

            Phase::Backoff {
                timer: Box::pin(sleep(self.policy.retry_delay)),
            }
        } else {
            if let Some(err) = err {
                let kind = if err.is_timeout() { "timeout" } else { "transport" };
                warn!(kind, error = %err, "connection lost, retry budget exhausted");
                self.sinks
                    .record_error(format!("{err} (retry budget exhausted)"));
            } else {
                debug!("connection closed, no retry budget left");
            }

            Phase::Idle
        }
    }

    // ========================================================================
    // Frame Handling
    // ========================================================================

    /// Serializes and writes one outbound command frame.
    async fn write_command(sink: &mut WsSink, command: &str) -> Result<()> {
        let json = serde_json::to_string(&CommandFrame::new(command))?;
        sink.send(Message::Text(json.into())).await?;
        trace!(command, "command sent");
        Ok(())
    }

    /// Decodes one inbound frame and dispatches it to the state sinks.
    ///
    /// A bad frame becomes one error event; it never touches the connection.
    fn on_frame(&mut self, text: &str) {
        match protocol::decode(text) {
            Ok(Some(inbound)) => self.sinks.apply(inbound),
            Ok(None) => trace!("ignoring frame without a known status"),
            Err(err) => {
                warn!(error = %err, "undecodable frame");
                self.sinks.record_error(err.to_string());
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
