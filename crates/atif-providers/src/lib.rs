// Error types
pub mod error;

// Trait-based architecture (public API)
pub mod traits;

// Provider implementations
pub mod opencode;

pub use traits::SessionParser;

pub use opencode::{
    OpenCodeParser, decode_event_stream, decode_line, decode_log_event, decode_log_events,
    decode_log_file,
};

pub use error::{Error, Result};
