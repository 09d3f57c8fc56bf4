mod convert;
mod post_run;

pub use convert::{convert_log_file, convert_log_text, write_trajectory};
pub use post_run::{LogsLayout, PostRunReport, populate_context_post_run};
