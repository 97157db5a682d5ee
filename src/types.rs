//! Core data types shared across the pipeline
//!
//! # Main Types
//!
//! - [`ConnectionState`] - Explicit transport state consulted by every
//!   operation that requires a live link
//! - [`TelemetrySample`] - One row of parsed channel readings
//! - [`PumpStats`] - Counters maintained by the consumption pump

use serde::{Deserialize, Serialize};

/// Number of pressure/motor channels on the rig
pub const CHANNEL_COUNT: usize = 6;

/// Connection state of the serial transport
///
/// Every operation requiring a live transport consults this value
/// rather than inferring connectivity from anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No transport is open
    Disconnected,
    /// The transport is open and settled
    Connected,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "Disconnected"),
            ConnectionState::Connected => write!(f, "Connected"),
        }
    }
}

/// One parsed telemetry row: six ordered channel readings
///
/// Only constructed from a wire line with exactly six tab-separated
/// numeric fields. Arrival order is the implicit timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    /// Channel values in wire order (P1..P6)
    pub values: [f64; CHANNEL_COUNT],
}

impl TelemetrySample {
    /// Create a sample from parsed channel values
    pub fn new(values: [f64; CHANNEL_COUNT]) -> Self {
        Self { values }
    }
}

impl From<[f64; CHANNEL_COUNT]> for TelemetrySample {
    fn from(values: [f64; CHANNEL_COUNT]) -> Self {
        Self { values }
    }
}

/// Counters maintained by the consumption pump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    /// Lines classified as telemetry
    pub telemetry_lines: u64,
    /// Lines classified as events
    pub event_lines: u64,
    /// Lines dropped as unclassifiable
    pub ignored_lines: u64,
    /// Lines lost to queue overflow in the acquisition thread
    pub dropped_lines: u64,
}

impl PumpStats {
    /// Total lines that reached the classifier
    pub fn total_classified(&self) -> u64 {
        self.telemetry_lines + self.event_lines + self.ignored_lines
    }
}
