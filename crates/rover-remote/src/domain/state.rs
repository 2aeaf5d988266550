//! The control-state aggregate.
//!
//! One instance lives for the whole process and is mutated only through the
//! [`crate::application::controller::Controller`] entry points; everything
//! else reads snapshots.

use rover_core::DriveMode;

/// An RGB color, each channel 0–255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The wire representation used by `{"LED":[r,g,b]}` frames.
    pub fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Desired actuator state plus the last reported sensor state.
///
/// `left_speed_normal` / `right_speed_normal` hold the *normalized* wheel
/// intents (pre-multiplier); the speed multiplier is applied only when a
/// Motor frame is built. Sensor fields are `None` until the rover has
/// reported at least once.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    /// Global throttle scaling in [0, 1].
    pub speed_multiplier: f32,
    /// Last-dispatched normalized left wheel intent, in [-1, 1].
    pub left_speed_normal: f32,
    /// Last-dispatched normalized right wheel intent, in [-1, 1].
    pub right_speed_normal: f32,
    /// Absolute servo angle in UI degrees (0–180, 90 = straight ahead).
    pub servo_angle: i16,
    /// Buzzer frequency in Hz used when the buzzer is switched on.
    pub buzzer_freq: u16,
    /// Desired LED color.
    pub led: Rgb,
    /// Operating mode.
    pub mode: DriveMode,
    /// Last reported line-tracking reading, left to right.
    pub track_sensor: Option<[bool; 4]>,
    /// Last reported ultrasonic distance. Never cleared by an absent
    /// reading; see [`rover_core::RobotMessage::Ultra`].
    pub ultra_sensor: Option<f32>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            speed_multiplier: 0.9,
            left_speed_normal: 0.0,
            right_speed_normal: 0.0,
            servo_angle: 90,
            buzzer_freq: 440,
            led: Rgb::default(),
            mode: DriveMode::ManualControl,
            track_sensor: None,
            ultra_sensor: None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_power_on_state() {
        let state = ControlState::default();
        assert_eq!(state.speed_multiplier, 0.9);
        assert_eq!(state.left_speed_normal, 0.0);
        assert_eq!(state.right_speed_normal, 0.0);
        assert_eq!(state.servo_angle, 90);
        assert_eq!(state.buzzer_freq, 440);
        assert_eq!(state.led, Rgb::default());
        assert_eq!(state.mode, DriveMode::ManualControl);
        assert!(state.track_sensor.is_none());
        assert!(state.ultra_sensor.is_none());
    }

    #[test]
    fn test_rgb_tuple_order_is_r_g_b() {
        assert_eq!(Rgb::new(1, 2, 3).as_tuple(), (1, 2, 3));
    }
}
