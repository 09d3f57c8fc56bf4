use anyhow::{Context, Result};
use atif_engine::validate_trajectory;
use atif_types::Trajectory;
use std::path::Path;

pub fn handle(path: &Path) -> Result<()> {
    let trajectory = Trajectory::read_from(path)
        .with_context(|| format!("Failed to load trajectory: {}", path.display()))?;

    let issues = validate_trajectory(&trajectory);
    if issues.is_empty() {
        println!(
            "{}: ok ({} steps)",
            trajectory.session_id,
            trajectory.steps.len()
        );
        return Ok(());
    }

    for issue in &issues {
        println!("{}", issue);
    }
    anyhow::bail!("{} invariant violation(s) in {}", issues.len(), path.display())
}
