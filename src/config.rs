//! Configuration loading for the bridge and the headless host runner.

use anyhow::Context;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use crate::bridge::MAX_DATAGRAM_LEN;

/// Default UDP port the autopilot's JSON backend talks to.
pub const DEFAULT_PORT: u16 = 9002;

/// Default `SO_RCVTIMEO` safety net.
pub const DEFAULT_RECEIVE_TIMEOUT_MS: u64 = 2000;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub host: HostConfig,
}

/// Socket and protocol settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct BridgeConfig {
    /// Local address to bind.
    pub bind_address: IpAddr,
    /// Local UDP port to bind.
    pub port: u16,
    /// Socket receive timeout (ms).
    pub receive_timeout_ms: u64,
    /// Largest inbound datagram read in one step; longer ones are cut.
    pub max_datagram_len: usize,
    /// Run without a socket. Steps never see data and output the initial state.
    pub offline: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            receive_timeout_ms: DEFAULT_RECEIVE_TIMEOUT_MS,
            max_datagram_len: MAX_DATAGRAM_LEN,
            offline: false,
        }
    }
}

impl BridgeConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    pub fn receive_timeout(&self) -> Duration {
        Duration::from_millis(self.receive_timeout_ms)
    }
}

/// Pacing for the headless host runner.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct HostConfig {
    /// Wall-clock and simulated time between steps (ms).
    pub step_interval_ms: u64,
    /// Stop after this many steps; 0 runs until killed.
    pub max_steps: u64,
    /// Log a summary every this many steps; 0 disables it.
    pub summary_interval_steps: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: 1,
            max_steps: 0,
            summary_interval_steps: 1000,
        }
    }
}

impl HostConfig {
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the config.toml file
    ///
    /// # Returns
    /// * `Ok(Config)` with defaults filled in for any missing key
    /// * `Err` if the file cannot be read, fails to parse, has unknown keys,
    ///   or sets `max-datagram-len` below the actuator frame length
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.bridge.max_datagram_len < crate::protocol::ACTUATOR_FRAME_LEN {
            anyhow::bail!(
                "max-datagram-len {} is shorter than an actuator frame ({} bytes)",
                config.bridge.max_datagram_len,
                crate::protocol::ACTUATOR_FRAME_LEN
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.bridge.bind_addr(), "0.0.0.0:9002".parse().unwrap());
        assert_eq!(config.bridge.receive_timeout(), Duration::from_millis(2000));
        assert_eq!(config.bridge.max_datagram_len, 256);
        assert!(!config.bridge.offline);
        assert_eq!(config.host.max_steps, 0);
    }

    #[test]
    fn parses_kebab_case_keys() {
        let config = Config::from_toml(
            r#"
            [bridge]
            bind-address = "127.0.0.1"
            port = 9003
            receive-timeout-ms = 500
            offline = true

            [host]
            step-interval-ms = 4
            max-steps = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.bridge.bind_addr(), "127.0.0.1:9003".parse().unwrap());
        assert_eq!(config.bridge.receive_timeout_ms, 500);
        assert!(config.bridge.offline);
        assert_eq!(config.host.step_interval(), Duration::from_millis(4));
        assert_eq!(config.host.max_steps, 250);
        assert_eq!(config.host.summary_interval_steps, 1000);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Config::from_toml("[bridge]\nprot = 1\n").is_err());
    }

    #[test]
    fn rejects_datagram_cap_below_frame_len() {
        assert!(Config::from_toml("[bridge]\nmax-datagram-len = 16\n").is_err());
    }
}
