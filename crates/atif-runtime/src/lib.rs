pub mod config;
pub mod error;
pub mod ops;

pub use config::RunConfig;
pub use error::{Error, Result};
pub use ops::{
    LogsLayout, PostRunReport, convert_log_file, convert_log_text, populate_context_post_run,
    write_trajectory,
};
