//! CSV export of a history snapshot
//!
//! Pure serialization: takes the rows produced by
//! [`TelemetryHistory::snapshot_for_export`](crate::history::TelemetryHistory::snapshot_for_export)
//! and renders a tabular byte buffer plus a suggested filename. The
//! save dialog and filesystem write belong to an external
//! collaborator; nothing here touches disk.

use crate::error::{Result, RigError};
use crate::types::CHANNEL_COUNT;
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Render a history snapshot as CSV bytes
///
/// Header row `Time (s),P1 (psi),…,P6 (psi)`, then one row per slot,
/// oldest to newest: the time-axis value at 1 decimal followed by six
/// channel values at 3 decimals.
pub fn write_csv(rows: &[[f64; CHANNEL_COUNT]], time_axis: &[f64]) -> Result<Vec<u8>> {
    if rows.len() != time_axis.len() {
        return Err(RigError::Export(format!(
            "row count {} does not match time axis length {}",
            rows.len(),
            time_axis.len()
        )));
    }

    let mut out = String::with_capacity(rows.len() * 48 + 64);
    out.push_str("Time (s)");
    for ch in 1..=CHANNEL_COUNT {
        let _ = write!(out, ",P{} (psi)", ch);
    }
    out.push('\n');

    for (t, row) in time_axis.iter().zip(rows) {
        let _ = write!(out, "{:.1}", t);
        for value in row {
            let _ = write!(out, ",{:.3}", value);
        }
        out.push('\n');
    }

    Ok(out.into_bytes())
}

/// Suggested filename for an export taken now:
/// `<sanitized title>_<YYYYMMDD_HHMMSS>.csv`
pub fn suggested_filename(title: &str) -> String {
    suggested_filename_at(title, Local::now())
}

/// Filename for an explicit timestamp (tests)
pub fn suggested_filename_at(title: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.csv", sanitize_title(title), at.format("%Y%m%d_%H%M%S"))
}

/// Keep alphanumerics, `-` and `_`; everything else becomes `_`
fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "export".to_string()
    } else {
        cleaned
    }
}
