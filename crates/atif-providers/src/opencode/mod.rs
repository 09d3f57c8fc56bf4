//! opencode `--format=json` output, as captured by the run harness.
//!
//! The captured stdout interleaves JSON event lines with plain status
//! text, so decoding is line-oriented and noise-tolerant.

mod io;
mod schema;

pub use io::{decode_event_stream, decode_line, decode_log_file};
pub use schema::decode_log_event;

use crate::traits::SessionParser;
use atif_types::{LogEvent, RawEvent};

/// Decode every recognized event of a log artifact, in line order
pub fn decode_log_events(text: &str) -> Vec<LogEvent> {
    decode_event_stream(text)
        .iter()
        .filter_map(decode_log_event)
        .collect()
}

pub struct OpenCodeParser;

impl SessionParser for OpenCodeParser {
    fn parse_text(&self, text: &str) -> Vec<LogEvent> {
        decode_log_events(text)
    }

    fn parse_record(&self, line: &str) -> Option<LogEvent> {
        decode_line(line.trim()).as_ref().and_then(decode_log_event)
    }

    fn raw_records(&self, text: &str) -> Vec<RawEvent> {
        decode_event_stream(text)
    }
}
