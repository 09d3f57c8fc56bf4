use crate::Result;
use atif_types::RawEvent;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, trace};

/// Split a log artifact into raw JSON records
///
/// Whitespace-only lines are skipped. Lines that are not a JSON object are
/// dropped without error: the captured output mixes status text with events.
pub fn decode_event_stream(text: &str) -> Vec<RawEvent> {
    let mut events = Vec::new();
    let mut dropped = 0usize;

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match decode_line(line) {
            Some(event) => events.push(event),
            None => {
                dropped += 1;
                trace!(line = index + 1, "skipping non-event log line");
            }
        }
    }

    if dropped > 0 {
        debug!(kept = events.len(), dropped, "decoded event stream");
    }

    events
}

/// Decode one trimmed line; `None` unless it is a JSON object
pub fn decode_line(line: &str) -> Option<RawEvent> {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Read a log file and decode its raw records
pub fn decode_log_file(path: &Path) -> Result<Vec<RawEvent>> {
    let text = std::fs::read_to_string(path)?;
    Ok(decode_event_stream(&text))
}
