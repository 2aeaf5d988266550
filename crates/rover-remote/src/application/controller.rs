//! The control-state store and dispatch policy.
//!
//! Every mutation of [`ControlState`] happens through a [`Controller`]
//! method, and each method decides on the spot whether a command goes out.
//! There is no implicit reactivity: a mutation that should reach the rover
//! calls the dispatch explicitly.
//!
//! Dispatch rules:
//!
//! - **Motor**: change-detected against the stored *normalized* intents.
//!   The speed multiplier is applied only when the frame is built, so a
//!   multiplier change re-sends from unchanged normals.
//! - **LED**: change-detected against the last *transmitted* triple
//!   (component-wise), not against the store.
//! - **Servo / Buzzer / ControlState**: unconditional; the operator
//!   touching those controls implies a likely change.
//! - **Resync**: after every (re)connect, the full actuator state is
//!   pushed in a fixed order so the rover matches local intent even if it
//!   rebooted while the link was down.
//!
//! The controller is deliberately synchronous: callers hold its mutex for
//! the duration of one mutate-and-maybe-dispatch sequence, which keeps the
//! read-modify-write change detection atomic under concurrent input
//! sources. Sends are fire-and-forget through [`CommandSink`].

use std::sync::Arc;

use rover_core::{servo_offset, Command, DriveIntent, DriveMode, RobotMessage};

use crate::application::gamepad::{GamepadReducer, PadSample, AXES, BUTTONS};
use crate::application::keyboard::KeyboardReducer;
use crate::domain::logbook::{LogLevel, Logbook};
use crate::domain::state::{ControlState, Rgb};

/// Outbound seam of the dispatch policy.
///
/// The production implementation is the connection outbox (which silently
/// drops commands while the link is down); tests substitute recording
/// doubles or mocks.
#[cfg_attr(test, mockall::automock)]
pub trait CommandSink: Send + Sync {
    /// Hands one command to the transport. Fire-and-forget: no result, no
    /// backpressure.
    fn send(&self, command: Command);
}

/// Owns the control state, the input reducers, and the dispatch rules.
pub struct Controller {
    state: ControlState,
    /// The last LED triple actually handed to the sink, if any.
    led_sent: Option<(u8, u8, u8)>,
    keys: KeyboardReducer,
    pad: GamepadReducer,
    sink: Arc<dyn CommandSink>,
    logbook: Arc<Logbook>,
}

impl Controller {
    pub fn new(sink: Arc<dyn CommandSink>, logbook: Arc<Logbook>) -> Self {
        Self {
            state: ControlState::default(),
            led_sent: None,
            keys: KeyboardReducer::new(),
            pad: GamepadReducer::new(),
            sink,
            logbook,
        }
    }

    // ── Input entry points ────────────────────────────────────────────────────

    /// A drive key went down. Auto-repeat and non-drive keys are no-ops.
    pub fn key_pressed(&mut self, c: char) {
        if let Some(intent) = self.keys.press(c) {
            self.update_drive(intent);
        }
    }

    /// A drive key came up.
    pub fn key_released(&mut self, c: char) {
        if let Some(intent) = self.keys.release(c) {
            self.update_drive(intent);
        }
    }

    /// Focus loss: drop every held key and stop.
    pub fn keys_cleared(&mut self) {
        if let Some(intent) = self.keys.release_all() {
            self.update_drive(intent);
        }
    }

    /// One polled gamepad frame. The reducer updates the named maps every
    /// frame and only reports a drive intent when it changed.
    pub fn pad_frame(&mut self, sample: PadSample) {
        if let Some(intent) = self.pad.apply_sample(&sample) {
            self.update_drive(intent);
        }
    }

    // ── Dispatch policy ───────────────────────────────────────────────────────

    /// Stores a new normalized intent and dispatches Motor, unless it equals
    /// the stored one. Returns whether a command was sent.
    pub fn update_drive(&mut self, intent: DriveIntent) -> bool {
        if intent.left == self.state.left_speed_normal
            && intent.right == self.state.right_speed_normal
        {
            return false;
        }
        self.state.left_speed_normal = intent.left;
        self.state.right_speed_normal = intent.right;
        self.dispatch_motor();
        true
    }

    /// Changes the global throttle scaling and immediately re-sends Motor
    /// from the unchanged normalized intents.
    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.state.speed_multiplier = multiplier.clamp(0.0, 1.0);
        self.dispatch_motor();
    }

    /// Stores an absolute servo angle and dispatches the clamped offset.
    pub fn set_servo_angle(&mut self, angle: i16) {
        self.state.servo_angle = angle;
        self.handle_servo();
    }

    /// Dispatches the servo offset for the current angle, unconditionally.
    pub fn handle_servo(&self) {
        self.sink
            .send(Command::Servo(servo_offset(self.state.servo_angle)));
    }

    /// Switches the buzzer on at the stored frequency, or silences it.
    /// Unconditional.
    pub fn handle_buzzer(&self, on: bool) {
        let freq = if on { self.state.buzzer_freq } else { 0 };
        self.sink.send(Command::Buzzer(freq));
    }

    /// Stores a new buzzer frequency. Takes effect on the next
    /// [`Controller::handle_buzzer`] call.
    pub fn set_buzzer_freq(&mut self, freq: u16) {
        self.state.buzzer_freq = freq;
    }

    /// Stores a new LED color and dispatches it if it differs from the last
    /// transmitted triple. Returns whether a command was sent.
    pub fn set_led(&mut self, led: Rgb) -> bool {
        self.state.led = led;
        self.handle_led()
    }

    /// Dispatches the stored LED color under change-detection against the
    /// last *sent* triple, compared component-wise.
    pub fn handle_led(&mut self) -> bool {
        let rgb = self.state.led.as_tuple();
        if self.led_sent == Some(rgb) {
            return false;
        }
        self.led_sent = Some(rgb);
        self.sink.send(Command::Led(rgb));
        true
    }

    /// Stores and dispatches a new operating mode, unconditionally.
    pub fn set_mode(&mut self, mode: DriveMode) {
        self.state.mode = mode;
        self.sink.send(Command::ControlState(mode));
    }

    /// Full resynchronization after (re)connect: silence the buzzer, then
    /// push LED, servo, motor, and mode so the rover's actuators match
    /// local intent regardless of what it remembers.
    ///
    /// The LED snapshot is cleared first: the peer may have rebooted, so
    /// the change-detection baseline is void.
    pub fn send_local_settings(&mut self) {
        self.handle_buzzer(false);
        self.led_sent = None;
        self.handle_led();
        self.handle_servo();
        self.dispatch_motor();
        self.sink.send(Command::ControlState(self.state.mode));
        self.logbook.append(LogLevel::Trace, "sent local settings");
    }

    /// Applies one decoded robot message to local state.
    pub fn apply_message(&mut self, message: RobotMessage) {
        match message {
            RobotMessage::Text(text) => {
                self.logbook.append(LogLevel::Info, format!("rover: {text}"));
            }
            // An absent reading never clears a known value.
            RobotMessage::Ultra(None) => {}
            RobotMessage::Ultra(Some(distance)) => {
                self.state.ultra_sensor = Some(distance);
            }
            RobotMessage::Track(track) => {
                self.state.track_sensor = Some(track);
            }
        }
    }

    // ── Read surface (presentation only) ──────────────────────────────────────

    /// Snapshot of the control state for rendering.
    pub fn snapshot(&self) -> ControlState {
        self.state.clone()
    }

    /// Filtered gamepad button map, for rendering.
    pub fn pad_buttons(&self) -> [f32; BUTTONS.len()] {
        self.pad.buttons()
    }

    /// Filtered gamepad axis map, for rendering.
    pub fn pad_axes(&self) -> [f32; AXES.len()] {
        self.pad.axes()
    }

    fn dispatch_motor(&self) {
        let m = self.state.speed_multiplier;
        self.sink.send(Command::Motor((
            self.state.left_speed_normal * m,
            self.state.right_speed_normal * m,
        )));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
