//! Gamepad reducer: raw pad frames, normalized into stable named maps.
//!
//! Every polled frame is reduced to pressed-analog-value-or-zero per button
//! and a deadzone-filtered, 3-decimal-rounded value per axis. The maps are
//! what the presentation layer reads; the reducer additionally derives a
//! tank drive intent from the two stick Y axes and reports it only when it
//! differs from the previous frame's, so an idle pad produces no dispatch
//! traffic at 60 polls per second.

use rover_core::{clamp_unit, deadzone, DriveIntent};

/// Button names, in the order the backend reports them.
pub const BUTTONS: [&str; 17] = [
    "a", "b", "x", "y", "lb", "rb", "lt", "rt", "map", "menu", "lstick", "rstick", "du", "dd",
    "dl", "dr", "xbox",
];

/// Axis names: left stick X/Y, right stick X/Y. Stick up is positive.
pub const AXES: [&str; 4] = ["lx", "ly", "rx", "ry"];

/// One raw frame read from a pad device, before filtering.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PadSample {
    /// Whether each button currently registers as pressed.
    pub pressed: [bool; BUTTONS.len()],
    /// The analog value of each button (1.0 for digital buttons).
    pub values: [f32; BUTTONS.len()],
    /// Raw axis deflections in [-1, 1].
    pub axes: [f32; AXES.len()],
}

/// Normalized button/axis state plus frame-over-frame intent detection.
#[derive(Debug, Default)]
pub struct GamepadReducer {
    buttons: [f32; BUTTONS.len()],
    axes: [f32; AXES.len()],
    last_intent: DriveIntent,
}

impl GamepadReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one polled frame.
    ///
    /// Returns the derived drive intent when it changed since the previous
    /// frame, `None` when the sticks are where they were.
    pub fn apply_sample(&mut self, sample: &PadSample) -> Option<DriveIntent> {
        for i in 0..BUTTONS.len() {
            self.buttons[i] = if sample.pressed[i] { sample.values[i] } else { 0.0 };
        }
        for i in 0..AXES.len() {
            self.axes[i] = deadzone(sample.axes[i]);
        }

        // Tank mapping: left stick Y drives the left wheel, right stick Y
        // the right wheel (up = forward).
        let intent = DriveIntent {
            left: clamp_unit(self.axis("ly")),
            right: clamp_unit(self.axis("ry")),
        };

        if intent == self.last_intent {
            return None;
        }
        self.last_intent = intent;
        Some(intent)
    }

    /// Current filtered value of a named button, 0.0 when not pressed or
    /// unknown.
    pub fn button(&self, name: &str) -> f32 {
        BUTTONS
            .iter()
            .position(|&b| b == name)
            .map_or(0.0, |i| self.buttons[i])
    }

    /// Current filtered deflection of a named axis, 0.0 when unknown.
    pub fn axis(&self, name: &str) -> f32 {
        AXES.iter()
            .position(|&a| a == name)
            .map_or(0.0, |i| self.axes[i])
    }

    /// The full button map in [`BUTTONS`] order, for the presentation layer.
    pub fn buttons(&self) -> [f32; BUTTONS.len()] {
        self.buttons
    }

    /// The full axis map in [`AXES`] order, for the presentation layer.
    pub fn axes(&self) -> [f32; AXES.len()] {
        self.axes
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_with_axes(lx: f32, ly: f32, rx: f32, ry: f32) -> PadSample {
        PadSample {
            axes: [lx, ly, rx, ry],
            ..PadSample::default()
        }
    }

    #[test]
    fn test_unpressed_button_records_zero_even_with_residual_value() {
        let mut pad = GamepadReducer::new();
        let mut sample = PadSample::default();
        sample.values[0] = 0.7; // stale analog value
        sample.pressed[0] = false;
        pad.apply_sample(&sample);
        assert_eq!(pad.button("a"), 0.0);
    }

    #[test]
    fn test_pressed_button_records_analog_value() {
        let mut pad = GamepadReducer::new();
        let mut sample = PadSample::default();
        let rt = BUTTONS.iter().position(|&b| b == "rt").unwrap();
        sample.pressed[rt] = true;
        sample.values[rt] = 0.35;
        pad.apply_sample(&sample);
        assert_eq!(pad.button("rt"), 0.35);
    }

    #[test]
    fn test_axis_deadzone_and_rounding() {
        let mut pad = GamepadReducer::new();
        pad.apply_sample(&sample_with_axes(0.004, -0.452, 0.4523456, 0.0));
        assert_eq!(pad.axis("lx"), 0.0);
        assert_eq!(pad.axis("ly"), -0.452);
        assert_eq!(pad.axis("rx"), 0.452);
    }

    #[test]
    fn test_unknown_names_read_as_zero() {
        let pad = GamepadReducer::new();
        assert_eq!(pad.button("turbo"), 0.0);
        assert_eq!(pad.axis("z"), 0.0);
    }

    #[test]
    fn test_stick_deflection_yields_tank_intent() {
        let mut pad = GamepadReducer::new();
        let intent = pad.apply_sample(&sample_with_axes(0.0, 0.8, 0.0, -0.3));
        assert_eq!(intent, Some(DriveIntent { left: 0.8, right: -0.3 }));
    }

    #[test]
    fn test_idle_pad_reports_no_intent() {
        let mut pad = GamepadReducer::new();
        assert_eq!(pad.apply_sample(&PadSample::default()), None);
        assert_eq!(pad.apply_sample(&PadSample::default()), None);
    }

    #[test]
    fn test_held_deflection_reports_intent_once() {
        let mut pad = GamepadReducer::new();
        let sample = sample_with_axes(0.0, 0.5, 0.0, 0.5);
        assert!(pad.apply_sample(&sample).is_some());
        // Same deflection next frame: change-detected away.
        assert_eq!(pad.apply_sample(&sample), None);
    }

    #[test]
    fn test_return_to_center_reports_standstill() {
        let mut pad = GamepadReducer::new();
        pad.apply_sample(&sample_with_axes(0.0, 0.5, 0.0, 0.5));
        let intent = pad.apply_sample(&PadSample::default());
        assert_eq!(intent, Some(DriveIntent { left: 0.0, right: 0.0 }));
    }

    #[test]
    fn test_jitter_within_rounding_does_not_retrigger() {
        let mut pad = GamepadReducer::new();
        pad.apply_sample(&sample_with_axes(0.0, 0.4521, 0.0, 0.0));
        // 0.4524 rounds to the same 0.452, so no new intent.
        assert_eq!(pad.apply_sample(&sample_with_axes(0.0, 0.4524, 0.0, 0.0)), None);
    }
}
