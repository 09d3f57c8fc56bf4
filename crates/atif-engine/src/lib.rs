// Engine module - step aggregation, trajectory assembly and validation
// This layer sits between typed log events (types/providers) and the run harness

pub mod aggregator;
pub mod assembler;
pub mod diagnostics;

pub use aggregator::{AggregatedSteps, StepAggregator, UsageTotals, aggregate_steps};
pub use assembler::{assemble_trajectory, assemble_trajectory_at, session_id_for};
pub use diagnostics::{TrajectoryIssue, validate_trajectory};

use atif_types::{LogEvent, RunContext, Trajectory};

// Façade API - Stable public interface for runtime and CLI layers

/// Build a trajectory from decoded events
///
/// Returns `None` when no event produced a step; an empty trajectory is
/// never built.
pub fn build_trajectory(events: &[LogEvent], context: &RunContext) -> Option<Trajectory> {
    if events.is_empty() {
        return None;
    }
    assemble_trajectory(aggregate_steps(events, context), context)
}
