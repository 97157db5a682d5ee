//! Fixed-capacity rolling telemetry history
//!
//! The history holds the most recent N samples per channel (default
//! 600, nominally 60 s at 10 Hz) as a ring buffer with an O(1) write
//! index. Its length is always exactly N; slots that never received a
//! sample read as 0.0 and the oldest slot is evicted on every admit.
//!
//! # Capture and snapshots
//!
//! A capture flag gates whether admits advance the ring. Disabling
//! capture takes a full frozen copy at that instant, which
//! [`snapshot_for_export`](TelemetryHistory::snapshot_for_export)
//! serves while paused so an export is internally consistent even as
//! new lines keep arriving. Re-enabling capture discards the frozen
//! copy and the live ring resumes from its own last state.
//!
//! The latest-per-channel readout is deliberately NOT gated by
//! capture: the live numeric display keeps tracking the newest parsed
//! sample while the plot is paused.

use crate::types::{TelemetrySample, CHANNEL_COUNT};

/// Rolling per-channel sample history with pause/snapshot semantics
#[derive(Debug, Clone)]
pub struct TelemetryHistory {
    /// Ring of sample rows; `head` is the index of the oldest row
    ring: Vec<[f64; CHANNEL_COUNT]>,
    head: usize,
    latest: [f64; CHANNEL_COUNT],
    capture_enabled: bool,
    /// Full copy taken when capture was disabled, oldest to newest
    frozen: Option<Vec<[f64; CHANNEL_COUNT]>>,
    /// Samples admitted while capture was enabled
    admitted: u64,
    span_secs: f64,
}

impl TelemetryHistory {
    /// Create a zero-filled history of `capacity` slots spanning
    /// `span_secs` seconds
    ///
    /// The time axis needs both endpoints, so capacities below 2 are
    /// clamped up rather than rejected, matching how the event log
    /// treats degenerate retention settings.
    pub fn new(capacity: usize, span_secs: f64) -> Self {
        let capacity = capacity.max(2);
        Self {
            ring: vec![[0.0; CHANNEL_COUNT]; capacity],
            head: 0,
            latest: [0.0; CHANNEL_COUNT],
            capture_enabled: true,
            frozen: None,
            admitted: 0,
            span_secs,
        }
    }

    /// Number of slots per channel; constant for the lifetime
    pub fn capacity(&self) -> usize {
        self.ring.len()
    }

    /// Admit a parsed sample
    ///
    /// Always refreshes the latest-per-channel readout. Advances the
    /// ring (evicting exactly the oldest slot) only while capture is
    /// enabled.
    pub fn admit(&mut self, sample: &TelemetrySample) {
        self.latest = sample.values;
        if !self.capture_enabled {
            return;
        }
        // Overwrite the oldest slot and move the head past it
        self.ring[self.head] = sample.values;
        self.head = (self.head + 1) % self.ring.len();
        self.admitted += 1;
    }

    /// Newest parsed value per channel, never gated by capture
    pub fn latest_per_channel(&self) -> [f64; CHANNEL_COUNT] {
        self.latest
    }

    /// Whether admits currently advance the ring
    pub fn capture_enabled(&self) -> bool {
        self.capture_enabled
    }

    /// Enable or disable capture
    ///
    /// Disabling takes the frozen snapshot used for consistent export
    /// while paused; enabling discards it.
    pub fn set_capture_enabled(&mut self, enabled: bool) {
        if enabled == self.capture_enabled {
            return;
        }
        self.capture_enabled = enabled;
        if enabled {
            self.frozen = None;
        } else {
            self.frozen = Some(self.rows());
        }
    }

    /// Rows for export: the frozen snapshot while paused, otherwise a
    /// copy of the live ring. Oldest to newest; never an alias of the
    /// live buffer.
    pub fn snapshot_for_export(&self) -> Vec<[f64; CHANNEL_COUNT]> {
        match (&self.frozen, self.capture_enabled) {
            (Some(frozen), false) => frozen.clone(),
            _ => self.rows(),
        }
    }

    /// One channel's live samples, oldest to newest
    ///
    /// Read-only view material for renderers; allocates a fresh Vec.
    pub fn channel(&self, index: usize) -> Vec<f64> {
        assert!(index < CHANNEL_COUNT, "channel index out of range");
        let mut out = Vec::with_capacity(self.ring.len());
        for i in 0..self.ring.len() {
            out.push(self.ring[(self.head + i) % self.ring.len()][index]);
        }
        out
    }

    /// The fixed time axis: `capacity` points from `-span_secs` up to
    /// 0.0 inclusive, newest sample at 0.0
    pub fn time_axis(&self) -> Vec<f64> {
        let n = self.ring.len();
        let last = (n - 1) as f64;
        // Scale the exact integer offset so both endpoints land on
        // -span_secs and 0.0 without rounding residue
        (0..n)
            .map(|i| (i as f64 - last) * self.span_secs / last)
            .collect()
    }

    /// Samples admitted while capture was enabled
    pub fn sample_count(&self) -> u64 {
        self.admitted
    }

    /// Live ring contents, oldest to newest
    fn rows(&self) -> Vec<[f64; CHANNEL_COUNT]> {
        let mut out = Vec::with_capacity(self.ring.len());
        for i in 0..self.ring.len() {
            out.push(self.ring[(self.head + i) % self.ring.len()]);
        }
        out
    }
}

impl Default for TelemetryHistory {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_HISTORY_CAPACITY,
            crate::config::DEFAULT_HISTORY_SPAN_SECS,
        )
    }
}
