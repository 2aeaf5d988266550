//! Wire protocol for the rover control link.
//!
//! The link is a persistent WebSocket carrying JSON text frames in both
//! directions. Every frame is a tagged-union object with exactly one key:
//! the key identifies the variant, the value carries the payload.
//!
//! ```text
//! remote → robot:  {"Motor":[0.9,0.9]}   {"Servo":-15}   {"Buzzer":440}
//! robot  → remote: {"Ultra":23.5}        {"Track":[true,false,false,true]}
//! ```
//!
//! `messages` defines the closed variant sets; `codec` converts them to and
//! from frame text and classifies everything that does not parse.

pub mod codec;
pub mod messages;

pub use codec::{decode_command, decode_message, encode_command, ProtocolError};
pub use messages::{Command, DriveMode, RobotMessage};
