//! Custom assertions for trajectory validation.
//!
//! These check the structural guarantees every produced trajectory must
//! keep, independent of the engine's own validator.

use anyhow::Result;
use atif_types::Trajectory;

/// Assert that step ids run 1..=len in order.
pub fn assert_step_ids_sequential(trajectory: &Trajectory) -> Result<()> {
    for (index, step) in trajectory.steps.iter().enumerate() {
        if step.step_id != index + 1 {
            anyhow::bail!(
                "Step at position {} has step_id {} (expected {})",
                index,
                step.step_id,
                index + 1
            );
        }
    }
    Ok(())
}

/// Assert that final metrics equal the per-step sums and the step count.
pub fn assert_totals_match_steps(trajectory: &Trajectory) -> Result<()> {
    let metrics = &trajectory.final_metrics;

    if metrics.total_steps != trajectory.steps.len() {
        anyhow::bail!(
            "total_steps is {} but there are {} steps",
            metrics.total_steps,
            trajectory.steps.len()
        );
    }

    // Token sums saturate, matching the engine's totals
    let prompt = trajectory
        .metered_steps()
        .fold(0u64, |acc, (_, m)| acc.saturating_add(m.prompt_tokens));
    let completion = trajectory
        .metered_steps()
        .fold(0u64, |acc, (_, m)| acc.saturating_add(m.completion_tokens));
    let cost: f64 = trajectory.metered_steps().map(|(_, m)| m.cost_usd).sum();

    if metrics.total_prompt_tokens != prompt {
        anyhow::bail!(
            "total_prompt_tokens is {} but steps sum to {}",
            metrics.total_prompt_tokens,
            prompt
        );
    }
    if metrics.total_completion_tokens != completion {
        anyhow::bail!(
            "total_completion_tokens is {} but steps sum to {}",
            metrics.total_completion_tokens,
            completion
        );
    }
    if (metrics.total_cost_usd - cost).abs() > 1e-9 {
        anyhow::bail!(
            "total_cost_usd is {} but steps sum to {}",
            metrics.total_cost_usd,
            cost
        );
    }

    Ok(())
}

/// Both structural assertions at once.
pub fn assert_trajectory_consistent(trajectory: &Trajectory) -> Result<()> {
    assert_step_ids_sequential(trajectory)?;
    assert_totals_match_steps(trajectory)
}
