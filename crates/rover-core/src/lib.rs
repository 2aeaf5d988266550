//! # rover-core
//!
//! Shared library for the rover remote control containing the JSON wire
//! protocol (command and sensor-message types plus their codec) and the pure
//! drive math used to turn operator input into motor intents.
//!
//! This crate is usable from both the remote-control client and the robot
//! side of the link. It has zero dependencies on sockets, async runtimes, or
//! input devices.
//!
//! - **`protocol`** – the closed sets of outbound commands and inbound robot
//!   messages, and their tagged-union JSON encoding. Every frame on the wire
//!   is a one-key object whose key names the variant.
//!
//! - **`domain`** – pure control math: tank-style differential mixing of the
//!   held direction keys, unit-range clamping, the servo angle→offset
//!   mapping, and the analog deadzone filter.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `rover_core::Command` instead of `rover_core::protocol::messages::Command`.
pub use domain::drive::{clamp_unit, deadzone, mix_keys, servo_offset, DriveIntent};
pub use protocol::codec::{decode_command, decode_message, encode_command, ProtocolError};
pub use protocol::messages::{Command, DriveMode, RobotMessage};
