//! Client-visible state streams.
//!
//! The connection manager publishes everything it learns through `watch`
//! channels: the presentation layer holds the receiving halves and re-renders
//! whenever a value changes. The manager owns the sending halves
//! ([`StateSinks`]) and is the only writer.
//!
//! # Streams
//!
//! | Stream | Type | Initial |
//! |--------|------|---------|
//! | connection | [`ConnectionState`] | `Disconnected` |
//! | now playing | `Option<NowPlaying>` | `None` ("no track") |
//! | bluetooth | `Vec<BluetoothDevice>` | empty |
//! | wifi | `Option<WifiInfo>` | `None` |
//! | console | `String` | empty |
//! | error | `Option<ErrorEvent>` | `None` |

// ============================================================================
// Imports
// ============================================================================

use tokio::sync::watch;

use crate::protocol::{BluetoothDevice, Inbound, NowPlaying, WifiInfo};

// ============================================================================
// ConnectionState
// ============================================================================

/// Lifecycle state of the managed connection.
///
/// Exactly one value holds at any time; the connection manager's transitions
/// are the only way it changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No socket, and no dial in flight.
    #[default]
    Disconnected,

    /// A dial is in flight (initial connect or scheduled retry).
    Connecting,

    /// The socket is open and frames are flowing.
    Connected,
}

// ============================================================================
// ErrorEvent
// ============================================================================

/// A transient, human-readable error surfaced to the presentation layer.
///
/// Cleared (reset to `None`) on the next successful connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    /// Human-readable description of what went wrong.
    pub message: String,
}

impl ErrorEvent {
    /// Creates an error event.
    #[inline]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// StateStreams
// ============================================================================

/// Receiving halves of every state stream, held by client handles.
///
/// Cloning is cheap; each clone observes updates independently.
#[derive(Debug, Clone)]
pub struct StateStreams {
    /// Connection lifecycle state.
    pub connection: watch::Receiver<ConnectionState>,
    /// Latest now-playing push, `None` until the first one arrives.
    pub now_playing: watch::Receiver<Option<NowPlaying>>,
    /// Connected Bluetooth devices.
    pub bluetooth: watch::Receiver<Vec<BluetoothDevice>>,
    /// Latest WiFi status push.
    pub wifi: watch::Receiver<Option<WifiInfo>>,
    /// Latest console output block.
    pub console: watch::Receiver<String>,
    /// Most recent error, `None` while healthy.
    pub error: watch::Receiver<Option<ErrorEvent>>,
}

// ============================================================================
// StateSinks
// ============================================================================

/// Sending halves of every state stream, owned by the connection manager.
#[derive(Debug)]
pub(crate) struct StateSinks {
    connection: watch::Sender<ConnectionState>,
    now_playing: watch::Sender<Option<NowPlaying>>,
    bluetooth: watch::Sender<Vec<BluetoothDevice>>,
    wifi: watch::Sender<Option<WifiInfo>>,
    console: watch::Sender<String>,
    error: watch::Sender<Option<ErrorEvent>>,
}

impl StateSinks {
    /// Creates the paired sink/stream halves with initial values.
    pub(crate) fn channel() -> (Self, StateStreams) {
        let (connection_tx, connection_rx) = watch::channel(ConnectionState::default());
        let (now_playing_tx, now_playing_rx) = watch::channel(None);
        let (bluetooth_tx, bluetooth_rx) = watch::channel(Vec::new());
        let (wifi_tx, wifi_rx) = watch::channel(None);
        let (console_tx, console_rx) = watch::channel(String::new());
        let (error_tx, error_rx) = watch::channel(None);

        let sinks = Self {
            connection: connection_tx,
            now_playing: now_playing_tx,
            bluetooth: bluetooth_tx,
            wifi: wifi_tx,
            console: console_tx,
            error: error_tx,
        };

        let streams = StateStreams {
            connection: connection_rx,
            now_playing: now_playing_rx,
            bluetooth: bluetooth_rx,
            wifi: wifi_rx,
            console: console_rx,
            error: error_rx,
        };

        (sinks, streams)
    }

    /// Publishes a connection state transition.
    pub(crate) fn set_connection(&self, state: ConnectionState) {
        self.connection.send_replace(state);
    }

    /// Dispatches one decoded status push to its stream.
    pub(crate) fn apply(&self, inbound: Inbound) {
        match inbound {
            Inbound::Player(now) => {
                self.now_playing.send_replace(Some(now));
            }
            Inbound::Bluetooth(devices) => {
                self.bluetooth.send_replace(devices);
            }
            Inbound::Wifi(info) => {
                self.wifi.send_replace(Some(info));
            }
            Inbound::CommandOutput(text) => {
                self.console.send_replace(text);
            }
        }
    }

    /// Publishes an error event.
    pub(crate) fn record_error(&self, message: impl Into<String>) {
        self.error.send_replace(Some(ErrorEvent::new(message)));
    }

    /// Clears the current error, if any.
    pub(crate) fn clear_error(&self) {
        self.error.send_replace(None);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::protocol::MediaInfo;

    #[test]
    fn test_initial_values() {
        let (_sinks, streams) = StateSinks::channel();

        assert_eq!(*streams.connection.borrow(), ConnectionState::Disconnected);
        assert_eq!(*streams.now_playing.borrow(), None);
        assert!(streams.bluetooth.borrow().is_empty());
        assert_eq!(*streams.wifi.borrow(), None);
        assert!(streams.console.borrow().is_empty());
        assert_eq!(*streams.error.borrow(), None);
    }

    #[test]
    fn test_apply_routes_player_push() {
        let (sinks, streams) = StateSinks::channel();

        sinks.apply(Inbound::Player(NowPlaying {
            media: MediaInfo {
                title: Some("Holocene".into()),
                ..MediaInfo::default()
            },
            artwork: None,
        }));

        let now = streams.now_playing.borrow().clone().expect("now playing set");
        assert_eq!(now.media.title.as_deref(), Some("Holocene"));
        // Other streams untouched.
        assert!(streams.bluetooth.borrow().is_empty());
        assert_eq!(*streams.wifi.borrow(), None);
    }

    #[test]
    fn test_apply_routes_bluetooth_push() {
        let (sinks, streams) = StateSinks::channel();

        sinks.apply(Inbound::Bluetooth(vec![BluetoothDevice {
            name: Some("Speaker".into()),
            connected: true,
            ..BluetoothDevice::default()
        }]));

        assert_eq!(streams.bluetooth.borrow().len(), 1);
    }

    #[test]
    fn test_apply_routes_console_output() {
        let (sinks, streams) = StateSinks::channel();

        sinks.apply(Inbound::CommandOutput("On branch main".into()));
        assert_eq!(*streams.console.borrow(), "On branch main");
    }

    #[test]
    fn test_error_record_and_clear() {
        let (sinks, streams) = StateSinks::channel();

        sinks.record_error("connection failed");
        assert_eq!(
            streams.error.borrow().as_ref().map(|e| e.message.clone()),
            Some("connection failed".to_string())
        );

        sinks.clear_error();
        assert_eq!(*streams.error.borrow(), None);
    }

    #[test]
    fn test_connection_state_round_trip() {
        let (sinks, streams) = StateSinks::channel();

        sinks.set_connection(ConnectionState::Connecting);
        assert_eq!(*streams.connection.borrow(), ConnectionState::Connecting);
        sinks.set_connection(ConnectionState::Connected);
        assert_eq!(*streams.connection.borrow(), ConnectionState::Connected);
    }
}
