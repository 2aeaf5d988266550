//! rover-remote entry point.
//!
//! A terminal remote control for the rover: WASD drives, a gamepad drives,
//! and everything the operator changes is mirrored to the robot over one
//! WebSocket link with change-detected dispatch.
//!
//! # Usage
//!
//! ```text
//! rover-remote [OPTIONS]
//!
//! Options:
//!   --robot-host <HOST>  rover hostname or IP [default: 192.168.4.1]
//!   --robot-port <PORT>  rover WebSocket port [default: 9001]
//!   --poll-hz <HZ>       gamepad poll rate   [default: 60]
//! ```
//!
//! Environment overrides: `ROVER_ROBOT_HOST`, `ROVER_ROBOT_PORT`,
//! `ROVER_POLL_HZ`. Log verbosity via `RUST_LOG` (e.g. `RUST_LOG=debug`).
//!
//! # Key bindings
//!
//! | Key        | Action                                   |
//! |------------|------------------------------------------|
//! | w a s d    | drive (hold where the terminal supports key releases) |
//! | space      | stop                                     |
//! | b          | buzzer on/off                            |
//! | [ / ]      | servo left / right                       |
//! | - / =      | speed multiplier down / up               |
//! | 1 2 3 4    | LED off / red / green / blue             |
//! | m          | cycle operating mode                     |
//! | r / o      | reconnect / disconnect                   |
//! | Esc, Ctrl+C| quit                                     |

use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rover_core::DriveMode;
use rover_remote::application::controller::{CommandSink, Controller};
use rover_remote::domain::config::RemoteConfig;
use rover_remote::domain::logbook::{LogLevel, Logbook};
use rover_remote::domain::state::Rgb;
use rover_remote::infrastructure::connection::ConnectionManager;
use rover_remote::infrastructure::keys::{spawn_key_source, KeyInput};
use rover_remote::infrastructure::pad::backend::GilrsPad;
use rover_remote::infrastructure::pad::PadPoller;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Remote-control client for the rover.
#[derive(Debug, Parser)]
#[command(
    name = "rover-remote",
    about = "Drive the rover over WebSocket from a terminal or gamepad",
    version
)]
struct Cli {
    /// Hostname or IP address of the rover.
    #[arg(long, default_value = "192.168.4.1", env = "ROVER_ROBOT_HOST")]
    robot_host: String,

    /// WebSocket port of the rover's control server.
    #[arg(long, default_value_t = 9001, env = "ROVER_ROBOT_PORT")]
    robot_port: u16,

    /// Gamepad poll rate in frames per second.
    #[arg(long, default_value_t = 60, env = "ROVER_POLL_HZ")]
    poll_hz: u32,
}

impl Cli {
    fn into_remote_config(self) -> RemoteConfig {
        RemoteConfig {
            robot_host: self.robot_host,
            robot_port: self.robot_port,
            poll_hz: self.poll_hz,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_remote_config();
    info!("rover remote starting — robot at {}", config.ws_url());

    let logbook = Arc::new(Logbook::new());
    let manager = ConnectionManager::new(Arc::clone(&logbook));
    let controller = Arc::new(Mutex::new(Controller::new(
        manager.outbox() as Arc<dyn CommandSink>,
        Arc::clone(&logbook),
    )));

    manager.connect(config.ws_url(), Arc::clone(&controller));

    // The gamepad is optional: without one the keyboard still drives.
    let poller = match GilrsPad::new() {
        Ok(pad) => Some(PadPoller::spawn(
            Box::new(pad),
            Arc::clone(&controller),
            config.poll_period(),
        )),
        Err(e) => {
            logbook.append(LogLevel::Warn, format!("gamepad unavailable: {e}"));
            None
        }
    };

    let mut keys = spawn_key_source().context("failed to open terminal input")?;
    let mut buzzer_on = false;

    while let Some(input) = keys.recv().await {
        match input {
            KeyInput::Quit => break,
            KeyInput::Release(c) => lock(&controller).key_released(c),
            KeyInput::Press(c) => match c {
                'w' | 'a' | 's' | 'd' | 'W' | 'A' | 'S' | 'D' => lock(&controller).key_pressed(c),
                ' ' => lock(&controller).keys_cleared(),
                'b' => {
                    buzzer_on = !buzzer_on;
                    lock(&controller).handle_buzzer(buzzer_on);
                }
                '[' => nudge_servo(&controller, -5),
                ']' => nudge_servo(&controller, 5),
                '-' => nudge_multiplier(&controller, -0.1),
                '=' => nudge_multiplier(&controller, 0.1),
                '1' => set_led(&controller, Rgb::new(0, 0, 0)),
                '2' => set_led(&controller, Rgb::new(255, 0, 0)),
                '3' => set_led(&controller, Rgb::new(0, 255, 0)),
                '4' => set_led(&controller, Rgb::new(0, 0, 255)),
                'm' => cycle_mode(&controller),
                'r' => manager.connect(config.ws_url(), Arc::clone(&controller)),
                'o' => manager.disconnect(),
                _ => {}
            },
        }
    }

    if let Some(poller) = poller {
        poller.cancel().await;
    }
    manager.disconnect();
    info!("rover remote stopped");
    Ok(())
}

// ── Key handlers ──────────────────────────────────────────────────────────────

fn lock(controller: &Arc<Mutex<Controller>>) -> std::sync::MutexGuard<'_, Controller> {
    controller.lock().expect("controller lock poisoned")
}

fn set_led(controller: &Arc<Mutex<Controller>>, led: Rgb) {
    lock(controller).set_led(led);
}

fn nudge_servo(controller: &Arc<Mutex<Controller>>, delta: i16) {
    let mut c = lock(controller);
    let angle = (c.snapshot().servo_angle + delta).clamp(0, 180);
    c.set_servo_angle(angle);
}

fn nudge_multiplier(controller: &Arc<Mutex<Controller>>, delta: f32) {
    let mut c = lock(controller);
    let multiplier = c.snapshot().speed_multiplier + delta;
    c.set_speed_multiplier(multiplier);
}

fn cycle_mode(controller: &Arc<Mutex<Controller>>) {
    let mut c = lock(controller);
    let next = match c.snapshot().mode {
        DriveMode::ManualControl => DriveMode::FollowLine,
        DriveMode::FollowLine => DriveMode::KeepDistance,
        DriveMode::KeepDistance => DriveMode::ManualControl,
    };
    c.set_mode(next);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["rover-remote"]);
        assert_eq!(cli.robot_host, "192.168.4.1");
        assert_eq!(cli.robot_port, 9001);
        assert_eq!(cli.poll_hz, 60);
    }

    #[test]
    fn test_cli_host_and_port_override() {
        let cli = Cli::parse_from([
            "rover-remote",
            "--robot-host",
            "10.0.0.40",
            "--robot-port",
            "9002",
        ]);
        let config = cli.into_remote_config();
        assert_eq!(config.ws_url(), "ws://10.0.0.40:9002");
    }

    #[test]
    fn test_cli_poll_hz_override() {
        let cli = Cli::parse_from(["rover-remote", "--poll-hz", "120"]);
        assert_eq!(cli.into_remote_config().poll_hz, 120);
    }
}
