//! Inbound frame decoding.
//!
//! The daemon pushes JSON objects over the WebSocket, discriminated by a
//! `"status"` field. [`decode`] turns one raw text frame into a typed
//! [`Inbound`] value, or reports why it could not.
//!
//! # Dispatch
//!
//! | `status` | Payload field | Decoded as |
//! |----------|---------------|------------|
//! | `player` | `output` (+ sibling `artwork`) | [`Inbound::Player`] |
//! | `bluetooth` | `bluetooth` | [`Inbound::Bluetooth`] (connected only) |
//! | `wifi` | `wifi` | [`Inbound::Wifi`] |
//! | `command_output` | `output` | [`Inbound::CommandOutput`] |
//! | anything else / absent | (none) | ignored (`Ok(None)`) |
//!
//! # Failure Policy
//!
//! Malformed JSON, a missing payload field, or a type mismatch yields
//! [`Error::BadFrame`] quoting the offending text. One bad frame never
//! interrupts the socket or the frames behind it.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;

use crate::error::{Error, Result};

use super::status::{BluetoothDevice, MediaInfo, NowPlaying, WifiInfo};

// ============================================================================
// Inbound
// ============================================================================

/// One decoded status push from the daemon.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Now-playing update with paired artwork reference.
    Player(NowPlaying),

    /// Bluetooth device list, already filtered to connected devices.
    Bluetooth(Vec<BluetoothDevice>),

    /// WiFi link status update.
    Wifi(WifiInfo),

    /// Console text from a previously issued command.
    CommandOutput(String),
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes one raw text frame.
///
/// Returns `Ok(None)` for frames that carry no known `"status"`
/// discriminator; those are dropped without an error.
///
/// # Errors
///
/// [`Error::BadFrame`] when the frame is malformed JSON or its payload does
/// not match the schema for its `status` kind.
pub fn decode(text: &str) -> Result<Option<Inbound>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::bad_frame(format!("malformed JSON: {e}"), text))?;

    let Some(status) = value.get("status").and_then(Value::as_str) else {
        return Ok(None);
    };

    match status {
        "player" => decode_player(&value, text).map(Some),
        "bluetooth" => decode_bluetooth(&value, text).map(Some),
        "wifi" => decode_wifi(&value, text).map(Some),
        "command_output" => decode_command_output(&value, text).map(Some),
        _ => Ok(None),
    }
}

/// Decodes a `player` frame: `output` payload plus the sibling `artwork`.
fn decode_player(value: &Value, text: &str) -> Result<Inbound> {
    let output = value
        .get("output")
        .ok_or_else(|| Error::bad_frame("missing field `output`", text))?;

    let media: MediaInfo = serde_json::from_value(output.clone())
        .map_err(|e| Error::bad_frame(format!("invalid player payload: {e}"), text))?;

    let artwork = value
        .get("artwork")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Inbound::Player(NowPlaying { media, artwork }))
}

/// Decodes a `bluetooth` frame, dropping disconnected devices.
fn decode_bluetooth(value: &Value, text: &str) -> Result<Inbound> {
    let list = value
        .get("bluetooth")
        .ok_or_else(|| Error::bad_frame("missing field `bluetooth`", text))?;

    let devices: Vec<BluetoothDevice> = serde_json::from_value(list.clone())
        .map_err(|e| Error::bad_frame(format!("invalid bluetooth payload: {e}"), text))?;

    let connected = devices.into_iter().filter(|d| d.connected).collect();
    Ok(Inbound::Bluetooth(connected))
}

/// Decodes a `wifi` frame.
fn decode_wifi(value: &Value, text: &str) -> Result<Inbound> {
    let wifi = value
        .get("wifi")
        .ok_or_else(|| Error::bad_frame("missing field `wifi`", text))?;

    let info: WifiInfo = serde_json::from_value(wifi.clone())
        .map_err(|e| Error::bad_frame(format!("invalid wifi payload: {e}"), text))?;

    Ok(Inbound::Wifi(info))
}

/// Decodes a `command_output` frame.
fn decode_command_output(value: &Value, text: &str) -> Result<Inbound> {
    let output = value
        .get("output")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::bad_frame("missing string field `output`", text))?;

    Ok(Inbound::CommandOutput(output.to_string()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_player_frame() {
        let frame = r#"{
            "status": "player",
            "output": {
                "Title": "Holocene",
                "Artist": "Bon Iver",
                "Status": "Playing"
            },
            "artwork": "data:image/png;base64,AAAA"
        }"#;

        let inbound = decode(frame).expect("decode").expect("dispatched");
        match inbound {
            Inbound::Player(now) => {
                assert_eq!(now.media.title.as_deref(), Some("Holocene"));
                assert!(now.media.is_playing());
                assert_eq!(now.artwork_ref(), Some("data:image/png;base64,AAAA"));
            }
            other => panic!("unexpected inbound: {other:?}"),
        }
    }

    #[test]
    fn test_decode_player_frame_without_artwork() {
        let frame = r#"{"status":"player","output":{"Title":"Holocene"}}"#;

        let inbound = decode(frame).expect("decode").expect("dispatched");
        match inbound {
            Inbound::Player(now) => {
                assert_eq!(now.artwork, None);
                assert_eq!(now.artwork_ref(), None);
            }
            other => panic!("unexpected inbound: {other:?}"),
        }
    }

    #[test]
    fn test_decode_player_frame_missing_output_is_error() {
        let err = decode(r#"{"status":"player"}"#).unwrap_err();
        assert!(err.is_frame_error());
        assert!(err.to_string().contains("output"));
    }

    #[test]
    fn test_decode_bluetooth_drops_disconnected() {
        let frame = r#"{
            "status": "bluetooth",
            "bluetooth": [
                {"name": "Buds", "macAddress": "AA:BB", "connected": false},
                {"name": "Speaker", "macAddress": "CC:DD", "connected": true}
            ]
        }"#;

        let inbound = decode(frame).expect("decode").expect("dispatched");
        match inbound {
            Inbound::Bluetooth(devices) => {
                assert_eq!(devices.len(), 1);
                assert_eq!(devices[0].name.as_deref(), Some("Speaker"));
            }
            other => panic!("unexpected inbound: {other:?}"),
        }
    }

    #[test]
    fn test_decode_bluetooth_all_disconnected_yields_empty_list() {
        let frame = r#"{
            "status": "bluetooth",
            "bluetooth": [{"name": "Buds", "macAddress": "AA:BB", "connected": false}]
        }"#;

        let inbound = decode(frame).expect("decode").expect("dispatched");
        assert_eq!(inbound, Inbound::Bluetooth(Vec::new()));
    }

    #[test]
    fn test_decode_wifi_frame() {
        let frame = r#"{
            "status": "wifi",
            "wifi": {"ssid": "Home", "connected": true, "downloadSpeed": 12.5, "uploadSpeed": 1.2}
        }"#;

        let inbound = decode(frame).expect("decode").expect("dispatched");
        match inbound {
            Inbound::Wifi(wifi) => {
                assert_eq!(wifi.connected, Some(true));
                assert_eq!(wifi.download_speed_mbps, Some(12.5));
                assert_eq!(wifi.upload_speed_mbps, Some(1.2));
            }
            other => panic!("unexpected inbound: {other:?}"),
        }
    }

    #[test]
    fn test_decode_command_output_frame() {
        let frame = r#"{"status":"command_output","output":"On branch main\nnothing to commit"}"#;

        let inbound = decode(frame).expect("decode").expect("dispatched");
        assert_eq!(
            inbound,
            Inbound::CommandOutput("On branch main\nnothing to commit".to_string())
        );
    }

    #[test]
    fn test_decode_command_output_non_string_is_error() {
        let err = decode(r#"{"status":"command_output","output":42}"#).unwrap_err();
        assert!(err.is_frame_error());
    }

    #[test]
    fn test_unknown_status_is_ignored() {
        let result = decode(r#"{"status":"volume","volume":30}"#).expect("decode");
        assert_eq!(result, None);
    }

    #[test]
    fn test_missing_status_is_ignored() {
        let result = decode(r#"{"output":"stray"}"#).expect("decode");
        assert_eq!(result, None);
    }

    #[test]
    fn test_non_string_status_is_ignored() {
        let result = decode(r#"{"status":7}"#).expect("decode");
        assert_eq!(result, None);
    }

    #[test]
    fn test_malformed_json_is_frame_error() {
        let err = decode("{not json").unwrap_err();
        assert!(err.is_frame_error());
        assert!(err.to_string().contains("{not json"));
    }

    #[test]
    fn test_type_mismatch_is_frame_error() {
        let err = decode(r#"{"status":"wifi","wifi":{"signalStrength":"strong"}}"#).unwrap_err();
        assert!(err.is_frame_error());
    }

    mod properties {
        use proptest::prelude::*;

        use super::decode;

        proptest! {
            // Arbitrary input must decode, error, or be ignored - never panic.
            #[test]
            fn decode_never_panics(text in ".{0,512}") {
                let _ = decode(&text);
            }

            #[test]
            fn decode_never_panics_on_json_objects(
                key in "[a-z_]{1,16}",
                value in "[a-zA-Z0-9 ]{0,32}",
            ) {
                let frame = format!(r#"{{"status":"{key}","{key}":"{value}"}}"#);
                let _ = decode(&frame);
            }
        }
    }
}
