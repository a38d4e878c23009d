//! Typed status payloads.
//!
//! Each struct mirrors one payload shape pushed by the Hearth daemon. Wire
//! key casing differs per payload kind and must be preserved exactly:
//!
//! | Payload | Wire keys |
//! |---------|-----------|
//! | [`MediaInfo`] | Capitalized (`Title`, `Artist`, `Album`, `Artwork`, `Length`, `Position`, `Status`) |
//! | [`BluetoothDevice`] | lowerCamelCase (`name`, `macAddress`, `connected`, …) |
//! | [`WifiInfo`] | lowerCamelCase (`ssid`, `downloadSpeed`, `uploadSpeed`, …) |

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use serde::Deserialize;

// ============================================================================
// MediaInfo
// ============================================================================

/// Now-playing track metadata pushed by the daemon's player module.
///
/// Every field is optional; a payload with nothing set means the consumer
/// should render a "no track" placeholder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaInfo {
    /// Track title.
    #[serde(rename = "Title")]
    pub title: Option<String>,

    /// Track artist.
    #[serde(rename = "Artist")]
    pub artist: Option<String>,

    /// Album name.
    #[serde(rename = "Album")]
    pub album: Option<String>,

    /// Remote album-art URL, when the daemon serves one.
    #[serde(rename = "Artwork")]
    pub artwork: Option<String>,

    /// Track length in microseconds.
    #[serde(rename = "Length")]
    pub duration_micros: Option<u64>,

    /// Playback position in microseconds.
    #[serde(rename = "Position")]
    pub position_micros: Option<u64>,

    /// Playback status string, `"Playing"` while active.
    #[serde(rename = "Status")]
    pub status: Option<String>,
}

impl MediaInfo {
    /// Returns `true` while the player reports active playback.
    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status.as_deref() == Some("Playing")
    }

    /// Track length as a [`Duration`], when reported.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration_micros.map(Duration::from_micros)
    }

    /// Playback position as a [`Duration`], when reported.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<Duration> {
        self.position_micros.map(Duration::from_micros)
    }
}

// ============================================================================
// NowPlaying
// ============================================================================

/// A decoded player push: track metadata paired with the sibling artwork
/// reference from the same frame.
///
/// The daemon sends artwork two ways: a data-URI string beside the player
/// payload (`"artwork"`) or a remote URL inside it (`"Artwork"`). Both
/// survive decoding; [`NowPlaying::artwork_ref`] picks the best one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NowPlaying {
    /// Track metadata.
    pub media: MediaInfo,

    /// Data-URI artwork sent beside the track metadata, if any.
    pub artwork: Option<String>,
}

impl NowPlaying {
    /// Returns the artwork reference to render, preferring the embedded
    /// data URI over the remote URL.
    #[inline]
    #[must_use]
    pub fn artwork_ref(&self) -> Option<&str> {
        self.artwork.as_deref().or(self.media.artwork.as_deref())
    }
}

// ============================================================================
// BluetoothDevice
// ============================================================================

/// A Bluetooth device known to the daemon.
///
/// Only devices with `connected == true` are forwarded to consumers;
/// filtering happens at decode time, not render time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BluetoothDevice {
    /// Device display name.
    pub name: Option<String>,

    /// Hardware address.
    pub mac_address: Option<String>,

    /// Whether the device is currently connected.
    #[serde(default)]
    pub connected: bool,

    /// Battery level in percent, when the device reports one.
    pub battery_percent: Option<u8>,

    /// Icon name hint for rendering.
    pub icon_ref: Option<String>,
}

// ============================================================================
// WifiInfo
// ============================================================================

/// WiFi link status and throughput pushed by the daemon's network module.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiInfo {
    /// Network name.
    pub ssid: Option<String>,

    /// Signal strength in dBm.
    pub signal_strength: Option<i32>,

    /// Negotiated link speed in Mbps.
    #[serde(rename = "linkSpeed")]
    pub link_speed_mbps: Option<f64>,

    /// Channel frequency in MHz.
    pub frequency: Option<i32>,

    /// Security mode (e.g. `WPA2`).
    pub security: Option<String>,

    /// Assigned IP address.
    pub ip_address: Option<String>,

    /// Whether the interface is associated.
    pub connected: Option<bool>,

    /// Measured download throughput in Mbps.
    #[serde(rename = "downloadSpeed")]
    pub download_speed_mbps: Option<f64>,

    /// Measured upload throughput in Mbps.
    #[serde(rename = "uploadSpeed")]
    pub upload_speed_mbps: Option<f64>,

    /// Interface name (e.g. `wlan0`).
    pub interface_name: Option<String>,

    /// Unit label the daemon used for the speed figures.
    pub speed_unit: Option<String>,
}

impl WifiInfo {
    /// Returns `true` when the interface reports an association.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.unwrap_or(false)
    }
}

// ============================================================================
// Tests
// ============================================================================
