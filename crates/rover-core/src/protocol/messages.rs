//! All rover control-link message types.
//!
//! Serde's externally-tagged enum representation produces exactly the wire
//! shape the robot expects: a JSON object with a single key naming the
//! variant, e.g. `{"Buzzer":440}` or `{"Track":[true,false,false,true]}`.

use serde::{Deserialize, Serialize};

// ── Outbound commands ─────────────────────────────────────────────────────────

/// All commands the remote can send to the robot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Buzzer frequency in Hz; 0 silences it.
    Buzzer(u16),
    /// RGB color, each channel 0–255.
    #[serde(rename = "LED")]
    Led((u8, u8, u8)),
    /// Servo rotation in degrees relative to the midpoint, -90 to 90.
    Servo(i8),
    /// Motor duty cycle per wheel, each -1.0 to 1.0.
    Motor((f32, f32)),
    /// Operating mode switch.
    ControlState(DriveMode),
}

/// Robot operating mode, serialized as its variant name
/// (`"ManualControl"`, `"FollowLine"`, `"KeepDistance"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveMode {
    ManualControl,
    FollowLine,
    KeepDistance,
}

// ── Inbound messages ──────────────────────────────────────────────────────────

/// All messages the robot can send to the remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RobotMessage {
    /// Free-form status text, surfaced to the operator log only.
    Text(String),
    /// Ultrasonic distance reading. `None` means the sensor had no echo;
    /// receivers keep their previous reading in that case.
    Ultra(Option<f32>),
    /// The four line-tracking photo sensors, left to right.
    Track([bool; 4]),
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buzzer_serializes_as_one_key_object() {
        let json = serde_json::to_string(&Command::Buzzer(440)).unwrap();
        assert_eq!(json, r#"{"Buzzer":440}"#);
    }

    #[test]
    fn test_led_serializes_under_upper_case_tag() {
        // The wire tag is "LED", not the Rust variant name "Led".
        let json = serde_json::to_string(&Command::Led((255, 128, 0))).unwrap();
        assert_eq!(json, r#"{"LED":[255,128,0]}"#);
    }

    #[test]
    fn test_servo_serializes_signed_offset() {
        let json = serde_json::to_string(&Command::Servo(-45)).unwrap();
        assert_eq!(json, r#"{"Servo":-45}"#);
    }

    #[test]
    fn test_motor_serializes_as_pair() {
        let json = serde_json::to_string(&Command::Motor((0.5, -0.5))).unwrap();
        assert_eq!(json, r#"{"Motor":[0.5,-0.5]}"#);
    }

    #[test]
    fn test_control_state_serializes_mode_name() {
        let json =
            serde_json::to_string(&Command::ControlState(DriveMode::FollowLine)).unwrap();
        assert_eq!(json, r#"{"ControlState":"FollowLine"}"#);
    }

    #[test]
    fn test_text_message_deserializes() {
        let msg: RobotMessage = serde_json::from_str(r#"{"Text":"battery low"}"#).unwrap();
        assert_eq!(msg, RobotMessage::Text("battery low".to_string()));
    }

    #[test]
    fn test_ultra_message_with_reading_deserializes() {
        let msg: RobotMessage = serde_json::from_str(r#"{"Ultra":23.5}"#).unwrap();
        assert_eq!(msg, RobotMessage::Ultra(Some(23.5)));
    }

    #[test]
    fn test_ultra_message_null_deserializes_to_none() {
        let msg: RobotMessage = serde_json::from_str(r#"{"Ultra":null}"#).unwrap();
        assert_eq!(msg, RobotMessage::Ultra(None));
    }

    #[test]
    fn test_track_message_deserializes_four_booleans() {
        let msg: RobotMessage =
            serde_json::from_str(r#"{"Track":[true,false,false,true]}"#).unwrap();
        assert_eq!(msg, RobotMessage::Track([true, false, false, true]));
    }

    #[test]
    fn test_unknown_tag_is_a_deserialization_error() {
        let result: Result<RobotMessage, _> = serde_json::from_str(r#"{"Sonar":12}"#);
        assert!(result.is_err(), "unknown variant must not deserialize");
    }
}
