//! Runtime configuration for the remote.
//!
//! The rover's address is operator-editable at runtime (there is no
//! persisted config file); `main.rs` populates this struct from CLI
//! arguments and environment variables and reconnects use whatever value is
//! current.

use std::time::Duration;

/// All runtime settings of the remote-control client.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Hostname or IP address of the rover.
    pub robot_host: String,

    /// WebSocket port the rover's control server listens on.
    pub robot_port: u16,

    /// Gamepad poll rate in frames per second.
    pub poll_hz: u32,
}

impl RemoteConfig {
    /// The WebSocket endpoint for the current host/port pair.
    pub fn ws_url(&self) -> String {
        format!("ws://{}:{}", self.robot_host, self.robot_port)
    }

    /// The gamepad poll period derived from [`RemoteConfig::poll_hz`].
    ///
    /// A zero rate is treated as the default 60 Hz rather than a division
    /// by zero.
    pub fn poll_period(&self) -> Duration {
        let hz = if self.poll_hz == 0 { 60 } else { self.poll_hz };
        Duration::from_micros(1_000_000 / u64::from(hz))
    }
}

impl Default for RemoteConfig {
    /// Defaults suitable for a rover joined to the local network.
    fn default() -> Self {
        Self {
            robot_host: "192.168.4.1".to_string(),
            robot_port: 9001,
            poll_hz: 60,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_is_9001() {
        assert_eq!(RemoteConfig::default().robot_port, 9001);
    }

    #[test]
    fn test_ws_url_formats_host_and_port() {
        let cfg = RemoteConfig {
            robot_host: "10.0.0.7".to_string(),
            robot_port: 9001,
            poll_hz: 60,
        };
        assert_eq!(cfg.ws_url(), "ws://10.0.0.7:9001");
    }

    #[test]
    fn test_poll_period_at_60_hz() {
        let cfg = RemoteConfig::default();
        assert_eq!(cfg.poll_period(), Duration::from_micros(16_666));
    }

    #[test]
    fn test_poll_period_zero_rate_falls_back() {
        let cfg = RemoteConfig { poll_hz: 0, ..RemoteConfig::default() };
        assert_eq!(cfg.poll_period(), Duration::from_micros(16_666));
    }
}
