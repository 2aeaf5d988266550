//! gilrs-backed pad device.
//!
//! Reads the first connected gamepad. The button and axis orderings match
//! the named maps in [`crate::application::gamepad`]; `gilrs` reports stick
//! up as positive, which is the convention the reducer's tank mapping
//! expects.

use gilrs::{Axis, Button, Gilrs};

use crate::application::gamepad::{PadSample, AXES, BUTTONS};

use super::PadDevice;

/// Buttons in [`BUTTONS`] order.
const BUTTON_IDS: [Button; BUTTONS.len()] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

/// Axes in [`AXES`] order.
const AXIS_IDS: [Axis; AXES.len()] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::RightStickX,
    Axis::RightStickY,
];

/// The production [`PadDevice`], reading the first connected pad.
pub struct GilrsPad {
    gilrs: Gilrs,
}

impl GilrsPad {
    /// Opens the gamepad subsystem.
    ///
    /// # Errors
    ///
    /// Returns the underlying `gilrs` error when the platform backend
    /// cannot be initialized (e.g. no input subsystem available).
    pub fn new() -> Result<Self, gilrs::Error> {
        Ok(Self { gilrs: Gilrs::new()? })
    }
}

impl PadDevice for GilrsPad {
    fn sample(&mut self) -> Option<PadSample> {
        // Drain pending events so gamepad state is current; the poll reads
        // state, it does not consume events.
        while self.gilrs.next_event().is_some() {}

        let (_id, pad) = self.gilrs.gamepads().next()?;

        let mut sample = PadSample::default();
        for (i, &button) in BUTTON_IDS.iter().enumerate() {
            if let Some(data) = pad.button_data(button) {
                sample.pressed[i] = data.is_pressed();
                sample.values[i] = data.value();
            }
        }
        for (i, &axis) in AXIS_IDS.iter().enumerate() {
            sample.axes[i] = pad.value(axis);
        }
        Some(sample)
    }
}
