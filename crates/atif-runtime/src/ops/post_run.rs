use super::convert::{convert_log_file, write_trajectory};
use crate::{Result, RunConfig};
use atif_types::{AgentContext, Trajectory};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File layout of a harness logs directory
#[derive(Debug, Clone)]
pub struct LogsLayout {
    logs_dir: PathBuf,
}

impl LogsLayout {
    pub fn new(logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
        }
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Captured stdout of the first agent command
    pub fn agent_output(&self) -> PathBuf {
        self.logs_dir.join("command-0").join("stdout.txt")
    }

    pub fn trajectory(&self) -> PathBuf {
        self.logs_dir.join("trajectory.json")
    }
}

/// Outcome of post-run processing
#[derive(Debug, Clone, Default)]
pub struct PostRunReport {
    /// Usage surfaced to the harness; empty when no trajectory was produced
    pub context: AgentContext,
    pub trajectory: Option<Trajectory>,
    /// Set when the trajectory was written
    pub trajectory_path: Option<PathBuf>,
}

/// Convert the run's captured output and surface its usage
///
/// A missing output file or a log without recognizable events is not an
/// error: the report simply carries no trajectory and an empty context.
pub fn populate_context_post_run(logs_dir: &Path, config: &RunConfig) -> Result<PostRunReport> {
    let layout = LogsLayout::new(logs_dir);
    let output_file = layout.agent_output();

    if !output_file.exists() {
        debug!(path = %output_file.display(), "agent output missing, nothing to convert");
        return Ok(PostRunReport::default());
    }

    let Some(trajectory) = convert_log_file(&output_file, config)? else {
        debug!(path = %output_file.display(), "no trajectory produced");
        return Ok(PostRunReport::default());
    };

    let trajectory_path = layout.trajectory();
    write_trajectory(&trajectory_path, &trajectory)?;

    let mut context = AgentContext::default();
    context.record_final_metrics(&trajectory.final_metrics);

    Ok(PostRunReport {
        context,
        trajectory: Some(trajectory),
        trajectory_path: Some(trajectory_path),
    })
}
