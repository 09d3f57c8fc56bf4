use atif_types::{SCHEMA_VERSION, Trajectory};

/// Absolute tolerance when comparing summed costs
const COST_EPSILON: f64 = 1e-9;

/// A broken trajectory invariant
#[derive(Debug, Clone, PartialEq)]
pub enum TrajectoryIssue {
    /// `schema_version` differs from the one this crate writes
    SchemaVersion(String),
    /// Step at `index` has an id other than `index + 1`
    StepIdOutOfSequence { index: usize, step_id: usize },
    /// `total_steps` does not match the number of steps
    StepCountMismatch { declared: usize, actual: usize },
    /// A final total disagrees with the per-step sum
    TotalMismatch {
        field: &'static str,
        declared: f64,
        summed: f64,
    },
    /// Observation present but without results
    EmptyObservation { step_id: usize },
    /// Tool call list present but empty
    EmptyToolCalls { step_id: usize },
}

impl std::fmt::Display for TrajectoryIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrajectoryIssue::SchemaVersion(found) => {
                write!(f, "schema_version is {} (expected {})", found, SCHEMA_VERSION)
            }
            TrajectoryIssue::StepIdOutOfSequence { index, step_id } => write!(
                f,
                "step #{} has step_id {} (expected {})",
                index + 1,
                step_id,
                index + 1
            ),
            TrajectoryIssue::StepCountMismatch { declared, actual } => write!(
                f,
                "total_steps is {} but trajectory has {} steps",
                declared, actual
            ),
            TrajectoryIssue::TotalMismatch {
                field,
                declared,
                summed,
            } => write!(f, "{} is {} but steps sum to {}", field, declared, summed),
            TrajectoryIssue::EmptyObservation { step_id } => {
                write!(f, "step {} has an observation without results", step_id)
            }
            TrajectoryIssue::EmptyToolCalls { step_id } => {
                write!(f, "step {} has an empty tool_calls list", step_id)
            }
        }
    }
}

/// Check a trajectory against its structural invariants
///
/// Returns every issue found; an empty list means the trajectory is
/// consistent.
pub fn validate_trajectory(trajectory: &Trajectory) -> Vec<TrajectoryIssue> {
    let mut issues = Vec::new();

    if trajectory.schema_version != SCHEMA_VERSION {
        issues.push(TrajectoryIssue::SchemaVersion(
            trajectory.schema_version.clone(),
        ));
    }

    for (index, step) in trajectory.steps.iter().enumerate() {
        if step.step_id != index + 1 {
            issues.push(TrajectoryIssue::StepIdOutOfSequence {
                index,
                step_id: step.step_id,
            });
        }
        if step
            .observation
            .as_ref()
            .is_some_and(|o| o.results.is_empty())
        {
            issues.push(TrajectoryIssue::EmptyObservation {
                step_id: step.step_id,
            });
        }
        if step.tool_calls.as_ref().is_some_and(Vec::is_empty) {
            issues.push(TrajectoryIssue::EmptyToolCalls {
                step_id: step.step_id,
            });
        }
    }

    let metrics = &trajectory.final_metrics;
    if metrics.total_steps != trajectory.steps.len() {
        issues.push(TrajectoryIssue::StepCountMismatch {
            declared: metrics.total_steps,
            actual: trajectory.steps.len(),
        });
    }

    // Sums saturate the same way the aggregator's totals do
    let (prompt, completion, cost) = trajectory.metered_steps().fold(
        (0u64, 0u64, 0.0f64),
        |(prompt, completion, cost), (_, m)| {
            (
                prompt.saturating_add(m.prompt_tokens),
                completion.saturating_add(m.completion_tokens),
                cost + m.cost_usd,
            )
        },
    );

    if metrics.total_prompt_tokens != prompt {
        issues.push(TrajectoryIssue::TotalMismatch {
            field: "total_prompt_tokens",
            declared: metrics.total_prompt_tokens as f64,
            summed: prompt as f64,
        });
    }
    if metrics.total_completion_tokens != completion {
        issues.push(TrajectoryIssue::TotalMismatch {
            field: "total_completion_tokens",
            declared: metrics.total_completion_tokens as f64,
            summed: completion as f64,
        });
    }
    if (metrics.total_cost_usd - cost).abs() > COST_EPSILON {
        issues.push(TrajectoryIssue::TotalMismatch {
            field: "total_cost_usd",
            declared: metrics.total_cost_usd,
            summed: cost,
        });
    }

    issues
}
