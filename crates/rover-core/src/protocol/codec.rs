//! JSON codec for control-link frames.
//!
//! Encoding never produces anything but a one-key object, so the interesting
//! work is on the decode side: a frame that fails to parse is *classified*,
//! not discarded. A one-key object whose key matches no known variant is an
//! [`ProtocolError::UnknownTag`]; everything else (invalid JSON, a known tag
//! with the wrong payload shape, a multi-key object) is
//! [`ProtocolError::Malformed`]. Callers log unknown tags at error level:
//! a peer speaking a newer protocol revision should be visible, not silent.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::protocol::messages::{Command, RobotMessage};

/// Variant tags accepted in robot → remote frames.
const MESSAGE_TAGS: [&str; 3] = ["Text", "Ultra", "Track"];

/// Variant tags accepted in remote → robot frames.
const COMMAND_TAGS: [&str; 5] = ["Buzzer", "LED", "Servo", "Motor", "ControlState"];

/// Errors that can occur while encoding or decoding a frame.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The frame is a one-key object, but the key names no known variant.
    #[error("unknown message tag: {tag}")]
    UnknownTag { tag: String },

    /// The frame is not valid JSON, or a known variant carried a payload of
    /// the wrong shape.
    #[error("malformed frame: {reason}")]
    Malformed { reason: String },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`Command`] into the JSON text of one wire frame.
///
/// # Errors
///
/// Returns [`ProtocolError::Malformed`] if serialization fails; with the
/// closed [`Command`] set this cannot happen in practice, but the codec does
/// not panic on principle.
pub fn encode_command(command: &Command) -> Result<String, ProtocolError> {
    serde_json::to_string(command).map_err(|e| ProtocolError::Malformed {
        reason: e.to_string(),
    })
}

/// Decodes one robot → remote frame.
///
/// # Errors
///
/// Returns [`ProtocolError::UnknownTag`] for an unrecognized variant key and
/// [`ProtocolError::Malformed`] for anything else that fails to parse.
pub fn decode_message(raw: &str) -> Result<RobotMessage, ProtocolError> {
    decode_tagged(raw, &MESSAGE_TAGS)
}

/// Decodes one remote → robot frame. This is the robot-side direction of the
/// codec; the remote uses it in tests to play the peer.
///
/// # Errors
///
/// Same classification as [`decode_message`].
pub fn decode_command(raw: &str) -> Result<Command, ProtocolError> {
    decode_tagged(raw, &COMMAND_TAGS)
}

// ── Classification ────────────────────────────────────────────────────────────

fn decode_tagged<T: DeserializeOwned>(raw: &str, known: &[&str]) -> Result<T, ProtocolError> {
    serde_json::from_str::<T>(raw).map_err(|e| classify(raw, known, e))
}

/// Distinguishes "peer sent a variant we don't know" from "peer sent
/// garbage". Serde reports both as the same error type, so we re-parse the
/// frame as a generic value and inspect its shape.
fn classify(raw: &str, known: &[&str], err: serde_json::Error) -> ProtocolError {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) {
        if map.len() == 1 {
            if let Some(tag) = map.keys().next() {
                if !known.contains(&tag.as_str()) {
                    return ProtocolError::UnknownTag { tag: tag.clone() };
                }
            }
        }
    }
    ProtocolError::Malformed {
        reason: err.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::DriveMode;

    #[test]
    fn test_encode_motor_command() {
        let json = encode_command(&Command::Motor((1.0, -0.5))).unwrap();
        assert_eq!(json, r#"{"Motor":[1.0,-0.5]}"#);
    }

    #[test]
    fn test_decode_message_round_trips_track() {
        let msg = decode_message(r#"{"Track":[false,true,true,false]}"#).unwrap();
        assert_eq!(msg, RobotMessage::Track([false, true, true, false]));
    }

    #[test]
    fn test_decode_message_ultra_null_is_absent_reading() {
        let msg = decode_message(r#"{"Ultra":null}"#).unwrap();
        assert_eq!(msg, RobotMessage::Ultra(None));
    }

    #[test]
    fn test_unknown_message_tag_is_classified() {
        // An unrecognized variant must surface as UnknownTag, never Malformed
        // and never a silent drop.
        let err = decode_message(r#"{"Gyro":[0.1,0.2,0.3]}"#).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::UnknownTag {
                tag: "Gyro".to_string()
            }
        );
    }

    #[test]
    fn test_known_tag_with_wrong_payload_is_malformed() {
        // "Track" is a known tag; a two-element payload is a shape error,
        // not an unknown variant.
        let err = decode_message(r#"{"Track":[true,false]}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed { .. }));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = decode_message("not json at all").unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed { .. }));
    }

    #[test]
    fn test_multi_key_object_is_malformed_not_unknown() {
        // Two keys means the frame is not a tagged union at all.
        let err = decode_message(r#"{"Text":"hi","Ultra":1.0}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed { .. }));
    }

    #[test]
    fn test_decode_command_accepts_every_variant() {
        let frames = [
            (r#"{"Buzzer":880}"#, Command::Buzzer(880)),
            (r#"{"LED":[1,2,3]}"#, Command::Led((1, 2, 3))),
            (r#"{"Servo":90}"#, Command::Servo(90)),
            (r#"{"Motor":[0.25,0.25]}"#, Command::Motor((0.25, 0.25))),
            (
                r#"{"ControlState":"KeepDistance"}"#,
                Command::ControlState(DriveMode::KeepDistance),
            ),
        ];
        for (raw, expected) in frames {
            assert_eq!(decode_command(raw).unwrap(), expected);
        }
    }

    #[test]
    fn test_decode_command_unknown_tag_is_classified() {
        let err = decode_command(r#"{"Winch":1}"#).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::UnknownTag {
                tag: "Winch".to_string()
            }
        );
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let original = Command::ControlState(DriveMode::ManualControl);
        let json = encode_command(&original).unwrap();
        assert_eq!(decode_command(&json).unwrap(), original);
    }
}
