use crate::{Result, RunConfig};
use atif_providers::{OpenCodeParser, SessionParser};
use atif_types::Trajectory;
use std::path::Path;
use tracing::{debug, info};

/// Convert captured agent output held in memory
pub fn convert_log_text(text: &str, config: &RunConfig) -> Result<Option<Trajectory>> {
    let context = config.run_context()?;
    let events = OpenCodeParser.parse_text(text);
    debug!(events = events.len(), "decoded agent log");
    Ok(atif_engine::build_trajectory(&events, &context))
}

/// Read and convert a captured agent log
pub fn convert_log_file(path: &Path, config: &RunConfig) -> Result<Option<Trajectory>> {
    let context = config.run_context()?;
    let events = OpenCodeParser.parse_file(path)?;
    debug!(path = %path.display(), events = events.len(), "decoded agent log");
    Ok(atif_engine::build_trajectory(&events, &context))
}

/// Write a trajectory as pretty-printed JSON
pub fn write_trajectory(path: &Path, trajectory: &Trajectory) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let json = trajectory.to_json_pretty()?;
    std::fs::write(path, json)?;
    info!(
        path = %path.display(),
        steps = trajectory.steps.len(),
        "wrote trajectory"
    );
    Ok(())
}
