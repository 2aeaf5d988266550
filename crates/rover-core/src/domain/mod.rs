//! Pure control math shared by every input source.
//!
//! Nothing in this module performs I/O or allocates; it is the part of the
//! control pipeline that is trivially unit-testable.

pub mod drive;

pub use drive::{clamp_unit, deadzone, mix_keys, servo_offset, DriveIntent};
