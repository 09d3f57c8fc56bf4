use crate::FinalMetrics;
use serde::{Deserialize, Serialize};

/// Immutable run metadata threaded into aggregation and assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub agent_name: String,
    pub agent_version: String,
    pub model_name: String,
}

impl RunContext {
    pub fn new(
        agent_name: impl Into<String>,
        agent_version: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            agent_version: agent_version.into(),
            model_name: model_name.into(),
        }
    }
}

/// Usage figures surfaced to the invoking harness after a run
///
/// Fields stay `None` until a trajectory with final metrics is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentContext {
    pub cost_usd: Option<f64>,
    pub n_input_tokens: Option<u64>,
    pub n_output_tokens: Option<u64>,
}

impl AgentContext {
    pub fn is_empty(&self) -> bool {
        self.cost_usd.is_none() && self.n_input_tokens.is_none() && self.n_output_tokens.is_none()
    }

    /// Overwrite cost and token counts with trajectory totals
    pub fn record_final_metrics(&mut self, metrics: &FinalMetrics) {
        self.cost_usd = Some(metrics.total_cost_usd);
        self.n_input_tokens = Some(metrics.total_prompt_tokens);
        self.n_output_tokens = Some(metrics.total_completion_tokens);
    }
}
