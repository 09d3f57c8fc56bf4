use crate::Result;
use atif_types::{LogEvent, RawEvent};
use std::path::Path;

/// Session data normalization
///
/// Responsibilities:
/// - Split a raw log artifact into structured records
/// - Decode recognized records into typed events, applying defaults
/// - Tolerate noise: malformed records are skipped, never fatal
pub trait SessionParser: Send + Sync {
    /// Decode a whole log artifact held in memory
    fn parse_text(&self, text: &str) -> Vec<LogEvent>;

    /// Parse single record (one log line)
    /// Returns None for blank, malformed or unrecognized lines
    fn parse_record(&self, line: &str) -> Option<LogEvent>;

    /// Read and decode a log file
    fn parse_file(&self, path: &Path) -> Result<Vec<LogEvent>> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.parse_text(&text))
    }

    /// Raw records of a log artifact, before event recognition
    fn raw_records(&self, text: &str) -> Vec<RawEvent>;
}
