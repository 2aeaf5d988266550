//! Application layer: input reducers and the dispatch policy.
//!
//! The two reducers turn raw input (key transitions, polled pad frames)
//! into normalized [`rover_core::DriveIntent`]s; the [`controller`] applies
//! every mutation to the control state and decides which commands actually
//! go out. All network access happens through the [`controller::CommandSink`]
//! trait, so this whole layer runs in unit tests without a socket.

pub mod controller;
pub mod gamepad;
pub mod keyboard;

pub use controller::{CommandSink, Controller};
pub use gamepad::{GamepadReducer, PadSample, AXES, BUTTONS};
pub use keyboard::KeyboardReducer;
