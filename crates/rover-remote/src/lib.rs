//! rover-remote library crate.
//!
//! A real-time remote-control client for a small tracked rover: it keeps a
//! local picture of the desired actuator state (motors, servo, buzzer, LED,
//! operating mode) and the last reported sensor state, and keeps the robot
//! synchronized over a WebSocket link with as little redundant traffic as
//! the protocol allows.
//!
//! # Architecture
//!
//! ```text
//! keyboard / gamepad
//!         ↓
//! [rover-remote]
//!   ├── domain/           ControlState, RemoteConfig, the operator Logbook
//!   ├── application/      Reducers + Controller (change-detected dispatch)
//!   └── infrastructure/
//!         ├── connection/ WebSocket session to the rover (tokio-tungstenite)
//!         ├── pad/        Gamepad device trait, gilrs backend, poll task
//!         └── keys/       Raw-mode terminal key capture thread
//!         ↓
//! rover  (tagged JSON frames over ws://host:9001, see rover-core)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` and `rover-core`; its only seam to
//!   the network is the [`application::controller::CommandSink`] trait, so
//!   every dispatch rule is testable against a recording double.
//! - `infrastructure` owns the sockets, devices, and tasks.

/// Domain layer: pure state, configuration, and the diagnostic logbook.
pub mod domain;

/// Application layer: input reducers and the dispatch policy.
pub mod application;

/// Infrastructure layer: WebSocket connection, gamepad poller, key capture.
pub mod infrastructure;
