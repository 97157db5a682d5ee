//! Configuration for the rig pipeline
//!
//! All tunables live in [`RigConfig`], grouped by concern. Protocol
//! fixings that must never drift from the device firmware (baud rate,
//! channel count, command grammar) are crate constants instead.
//!
//! Configurations round-trip through TOML so a deployment can pin its
//! port and timing without recompiling:
//!
//! ```ignore
//! use pressure_rig::config::RigConfig;
//!
//! let config = RigConfig::load("rig.toml").unwrap_or_default();
//! config.save("rig.toml")?;
//! ```

use crate::error::{Result, RigError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Fixed baud rate expected by the rig firmware
pub const BAUD_RATE: u32 = 115_200;

/// Settle delay after opening the port, allowing the device to reset
pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Period at which the consumption pump should be driven
pub const PUMP_PERIOD: Duration = Duration::from_millis(50);

/// Default rolling history capacity (60 s at 10 Hz)
pub const DEFAULT_HISTORY_CAPACITY: usize = 600;

/// Default span of the history time axis in seconds
pub const DEFAULT_HISTORY_SPAN_SECS: f64 = 60.0;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Serial connection settings
    pub connection: ConnectionConfig,
    /// Acquisition loop settings
    pub acquisition: AcquisitionConfig,
    /// Rolling history settings
    pub history: HistoryConfig,
    /// Event log retention settings
    pub event_log: EventLogConfig,
}

impl RigConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RigError::Config(format!("Failed to read config file: {}", e)))?;
        toml::from_str(&text)
            .map_err(|e| RigError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| RigError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), text)
            .map_err(|e| RigError::Config(format!("Failed to write config file: {}", e)))
    }
}

/// Serial connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Default device path, e.g. `/dev/ttyUSB0` or `COM3`
    pub device: Option<String>,

    /// Per-call read timeout in milliseconds
    pub read_timeout_ms: u64,

    /// Settle delay after open in milliseconds
    pub settle_delay_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            device: None,
            read_timeout_ms: 20,
            settle_delay_ms: SETTLE_DELAY.as_millis() as u64,
        }
    }
}

impl ConnectionConfig {
    /// Read timeout as a [`Duration`]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Settle delay as a [`Duration`]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Acquisition loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// Poll interval while connected, in milliseconds
    pub poll_interval_ms: u64,

    /// Poll interval while disconnected (idle), in milliseconds
    pub idle_interval_ms: u64,

    /// Capacity of the line queue between the acquisition thread and
    /// the pump. Overflow drops the newest line and counts it.
    pub line_queue_capacity: usize,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5,
            idle_interval_ms: 200,
            line_queue_capacity: 4096,
        }
    }
}

impl AcquisitionConfig {
    /// Connected poll interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Idle poll interval as a [`Duration`]
    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_interval_ms)
    }
}

/// Rolling history settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of samples retained per channel
    pub capacity: usize,

    /// Span of the time axis in seconds (newest sample sits at 0.0)
    pub span_secs: f64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
            span_secs: DEFAULT_HISTORY_SPAN_SECS,
        }
    }
}

/// Event log retention settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventLogConfig {
    /// Maximum retained entries before trimming kicks in
    pub max_entries: usize,

    /// Number of oldest entries removed per trim
    pub trim_block: usize,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            max_entries: 200,
            trim_block: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RigConfig::default();
        assert_eq!(config.history.capacity, 600);
        assert_eq!(config.event_log.max_entries, 200);
        assert_eq!(config.connection.settle_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = RigConfig::default();
        config.connection.device = Some("/dev/ttyUSB0".to_string());
        config.acquisition.poll_interval_ms = 2;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rig.toml");
        config.save(&path).unwrap();

        let loaded = RigConfig::load(&path).unwrap();
        assert_eq!(loaded.connection.device.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(loaded.acquisition.poll_interval_ms, 2);
        assert_eq!(loaded.history.capacity, 600);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: RigConfig = toml::from_str("[acquisition]\npoll_interval_ms = 1\n").unwrap();
        assert_eq!(parsed.acquisition.poll_interval_ms, 1);
        assert_eq!(parsed.acquisition.line_queue_capacity, 4096);
        assert_eq!(parsed.history.capacity, 600);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = RigConfig::load("/nonexistent/rig.toml").unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }
}
