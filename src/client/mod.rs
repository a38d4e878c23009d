//! Client facade.
//!
//! [`Client`] is the handle the presentation layer holds: three
//! fire-and-forget operations (`connect`, `send`, `close`) and a set of
//! watch streams that carry everything the daemon pushes back. All real work
//! happens on the connection manager task; the handle only passes messages.
//!
//! # Example
//!
//! ```no_run
//! use hearthlink::{Client, Command, ConnectionTarget};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = Client::new();
//! client.connect(ConnectionTarget::new("deck.local", 8765, "/ws"));
//!
//! let mut now_playing = client.now_playing();
//! client.send(Command::PlayerToggle);
//!
//! while now_playing.changed().await.is_ok() {
//!     if let Some(now) = now_playing.borrow().as_ref() {
//!         println!("{:?} - {:?}", now.media.artist, now.media.title);
//!     }
//! }
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Builder for client configuration.
pub mod builder;

/// Client-visible state streams.
pub mod state;

// ============================================================================
// Imports
// ============================================================================

use tokio::sync::{mpsc, watch};

use crate::protocol::{BluetoothDevice, NowPlaying, WifiInfo};
use crate::transport::manager::Control;
use crate::transport::target::ConnectionTarget;

use self::state::{ConnectionState, ErrorEvent, StateStreams};

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientBuilder;

// ============================================================================
// Client
// ============================================================================

/// Handle to one managed daemon connection.
///
/// Cloning is cheap; all clones talk to the same connection manager task.
/// The task (and any open socket) shuts down when the last clone is dropped.
///
/// # Thread Safety
///
/// `Client` is `Send + Sync`. No method blocks: effects of `connect`,
/// `send`, and `close` become observable through the state streams.
#[derive(Debug, Clone)]
pub struct Client {
    /// Control channel into the manager task.
    control_tx: mpsc::UnboundedSender<Control>,
    /// Receiving halves of the state streams.
    streams: StateStreams,
}

impl Client {
    /// Creates a client with the default retry policy.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for a client with a custom retry policy.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_parts(
        control_tx: mpsc::UnboundedSender<Control>,
        streams: StateStreams,
    ) -> Self {
        Self {
            control_tx,
            streams,
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Connects to the given target, superseding any current connection or
    /// pending retry and resetting the retry budget.
    ///
    /// Fire-and-forget: progress is observable on [`connection_state`]
    /// (`Connecting`, then `Connected` or back to `Disconnected`).
    ///
    /// [`connection_state`]: Self::connection_state
    pub fn connect(&self, target: ConnectionTarget) {
        let _ = self.control_tx.send(Control::Connect(target));
    }

    /// Sends a command string to the daemon.
    ///
    /// The command is wrapped as `{"command": "<string>"}` and sent
    /// verbatim; no vocabulary validation happens here. While disconnected
    /// this is a silent no-op.
    pub fn send(&self, command: impl Into<String>) {
        let _ = self.control_tx.send(Control::Send(command.into()));
    }

    /// Closes the connection, cancels any pending retry, and forgets the
    /// last target. The client stays usable; issue a new `connect` to dial
    /// again.
    pub fn close(&self) {
        let _ = self.control_tx.send(Control::Close);
    }

    // ========================================================================
    // State Streams
    // ========================================================================

    /// Current connection state, sampled now.
    #[must_use]
    pub fn status(&self) -> ConnectionState {
        *self.streams.connection.borrow()
    }

    /// Stream of connection lifecycle states.
    #[must_use]
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.streams.connection.clone()
    }

    /// Stream of now-playing pushes; `None` until the first push arrives.
    #[must_use]
    pub fn now_playing(&self) -> watch::Receiver<Option<NowPlaying>> {
        self.streams.now_playing.clone()
    }

    /// Stream of connected Bluetooth devices.
    #[must_use]
    pub fn bluetooth_devices(&self) -> watch::Receiver<Vec<BluetoothDevice>> {
        self.streams.bluetooth.clone()
    }

    /// Stream of WiFi status pushes.
    #[must_use]
    pub fn wifi_info(&self) -> watch::Receiver<Option<WifiInfo>> {
        self.streams.wifi.clone()
    }

    /// Stream of console output from issued commands.
    #[must_use]
    pub fn console_output(&self) -> watch::Receiver<String> {
        self.streams.console.clone()
    }

    /// Stream of transient errors; cleared on the next successful
    /// connection.
    #[must_use]
    pub fn last_error(&self) -> watch::Receiver<Option<ErrorEvent>> {
        self.streams.error.clone()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use futures_util::{SinkExt, StreamExt};
    use tokio::net::TcpListener;
    use tokio::time::timeout;
    use tokio_tungstenite::accept_async;
    use tokio_tungstenite::tungstenite::Message;

    const WAIT: Duration = Duration::from_secs(5);

    async fn bind() -> (TcpListener, ConnectionTarget) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        (listener, ConnectionTarget::new("127.0.0.1", port, "/"))
    }

    #[tokio::test]
    async fn test_full_session_through_public_api() {
        let (listener, target) = bind().await;
        let client = Client::builder()
            .retry_delay(Duration::from_millis(50))
            .build();

        client.connect(target);
        let (tcp, _) = listener.accept().await.expect("accept");
        let mut server_ws = accept_async(tcp).await.expect("handshake");

        let mut connection = client.connection_state();
        timeout(WAIT, connection.wait_for(|s| *s == ConnectionState::Connected))
            .await
            .expect("timed out")
            .expect("manager gone");

        // Outbound command crosses the wire framed.
        client.send("git_status");
        let frame = timeout(WAIT, server_ws.next())
            .await
            .expect("timed out")
            .expect("stream open")
            .expect("frame ok");
        assert_eq!(frame, Message::Text(r#"{"command":"git_status"}"#.into()));

        // Inbound player push lands in the now-playing stream.
        server_ws
            .send(Message::Text(
                r#"{"status":"player","output":{"Title":"Holocene","Status":"Playing"}}"#.into(),
            ))
            .await
            .expect("send player");
        let mut now_playing = client.now_playing();
        let now = timeout(WAIT, now_playing.wait_for(|n| n.is_some()))
            .await
            .expect("timed out")
            .expect("manager gone")
            .clone()
            .expect("now playing set");
        assert_eq!(now.media.title.as_deref(), Some("Holocene"));

        // Close tears the socket down and goes quiet.
        client.close();
        let closed = timeout(WAIT, async {
            loop {
                match server_ws.next().await {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    Some(Ok(_)) => continue,
                }
            }
        })
        .await;
        assert!(closed.is_ok(), "server never saw the close");
        timeout(
            WAIT,
            connection.wait_for(|s| *s == ConnectionState::Disconnected),
        )
        .await
        .expect("timed out")
        .expect("manager gone");
    }

    #[tokio::test]
    async fn test_send_accepts_typed_commands() {
        let client = Client::builder().build();
        // Opaque strings and the typed vocabulary both go through; while
        // disconnected both are silent no-ops.
        client.send(crate::protocol::Command::PlayerToggle);
        client.send("anything_at_all");
        assert_eq!(client.status(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_clones_share_the_connection() {
        let (listener, target) = bind().await;
        let client = Client::builder().build();
        let observer = client.clone();

        client.connect(target);
        let (tcp, _) = listener.accept().await.expect("accept");
        let _server_ws = accept_async(tcp).await.expect("handshake");

        let mut connection = observer.connection_state();
        timeout(WAIT, connection.wait_for(|s| *s == ConnectionState::Connected))
            .await
            .expect("timed out")
            .expect("manager gone");
    }
}
