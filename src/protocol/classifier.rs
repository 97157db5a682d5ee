//! Incoming line classification

use crate::types::CHANNEL_COUNT;

/// Tag tokens that mark a line as a human-relevant event
pub const EVENT_TAGS: [&str; 7] = ["SET:", "DONE:", "ERR:", "STOP:", "OK:", "MOV:", ">"];

/// Classification of one framed line
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    /// Six parsed channel readings in wire order
    Telemetry([f64; CHANNEL_COUNT]),
    /// Tagged status/acknowledgement text, kept verbatim
    Event(String),
    /// Neither shape; dropped silently
    Ignored,
}

/// Classify a trimmed wire line
///
/// The telemetry shape check runs first and wins: a line of exactly
/// six tab-separated signed decimals is telemetry even if it also
/// happens to contain an event tag substring. Everything else is an
/// event if any tag token appears, and ignored otherwise.
pub fn classify(line: &str) -> LineClass {
    if let Some(values) = parse_telemetry(line) {
        return LineClass::Telemetry(values);
    }
    if EVENT_TAGS.iter().any(|tag| line.contains(tag)) {
        return LineClass::Event(line.to_string());
    }
    LineClass::Ignored
}

fn parse_telemetry(line: &str) -> Option<[f64; CHANNEL_COUNT]> {
    let mut values = [0.0; CHANNEL_COUNT];
    let mut count = 0;
    for field in line.split('\t') {
        if count == CHANNEL_COUNT {
            return None;
        }
        values[count] = parse_decimal(field.trim())?;
        count += 1;
    }
    (count == CHANNEL_COUNT).then_some(values)
}

/// Parse a plain signed decimal, rejecting the exotic float spellings
/// (`inf`, `nan`, exponent notation) the firmware never emits.
fn parse_decimal(field: &str) -> Option<f64> {
    if field.is_empty() || !field.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    field.parse().ok()
}
