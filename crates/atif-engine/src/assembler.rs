use crate::aggregator::AggregatedSteps;
use atif_types::{Agent, FinalMetrics, RunContext, SCHEMA_VERSION, Trajectory};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Wrap aggregated steps into a trajectory stamped with the current time
///
/// Returns `None` when there are no steps.
pub fn assemble_trajectory(aggregated: AggregatedSteps, context: &RunContext) -> Option<Trajectory> {
    assemble_trajectory_at(aggregated, context, Utc::now())
}

/// Same as [`assemble_trajectory`] with an explicit assembly time
pub fn assemble_trajectory_at(
    aggregated: AggregatedSteps,
    context: &RunContext,
    now: DateTime<Utc>,
) -> Option<Trajectory> {
    if aggregated.steps.is_empty() {
        debug!("no steps aggregated, skipping trajectory");
        return None;
    }

    let AggregatedSteps { steps, totals } = aggregated;
    let final_metrics = FinalMetrics {
        total_prompt_tokens: totals.prompt_tokens,
        total_completion_tokens: totals.completion_tokens,
        total_cost_usd: totals.cost_usd,
        total_steps: steps.len(),
    };

    Some(Trajectory {
        schema_version: SCHEMA_VERSION.to_string(),
        session_id: session_id_for(&context.agent_name, now),
        agent: Agent {
            name: context.agent_name.clone(),
            version: context.agent_version.clone(),
            model_name: context.model_name.clone(),
        },
        steps,
        final_metrics,
    })
}

/// `<agent>-<YYYYMMDDHHMMSS>`; two runs within one second share an id
pub fn session_id_for(agent_name: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}", agent_name, now.format("%Y%m%d%H%M%S"))
}
