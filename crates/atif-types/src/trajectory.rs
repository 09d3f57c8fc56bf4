use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Version tag of the trajectory output contract
pub const SCHEMA_VERSION: &str = "ATIF-v1.4";

/// Complete record of a single agent run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub schema_version: String,

    /// `<agent-name>-<YYYYMMDDHHMMSS>` (UTC, whole seconds)
    pub session_id: String,

    pub agent: Agent,

    /// Ordered steps; `step_id` runs 1..=len
    pub steps: Vec<Step>,

    pub final_metrics: FinalMetrics,
}

impl Trajectory {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load a trajectory document from disk
    pub fn read_from(path: &Path) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&text)?)
    }

    /// Steps that carry per-step usage
    pub fn metered_steps(&self) -> impl Iterator<Item = (&Step, &Metrics)> {
        self.steps
            .iter()
            .filter_map(|step| step.metrics.as_ref().map(|m| (step, m)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub version: String,
    pub model_name: String,
}

/// Who produced a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepSource {
    User,
    Agent,
}

/// One entry of the trajectory, produced from one recognized log event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based position in the trajectory
    pub step_id: usize,

    /// ISO-8601 timestamp copied from the log, or the aggregation time
    pub timestamp: String,

    pub source: StepSource,

    /// Configured model identifier (agent steps only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,

    pub message: String,

    /// Model thinking text, when the log carried any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<Observation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

impl Step {
    pub fn is_agent(&self) -> bool {
        self.source == StepSource::Agent
    }

    pub fn tool_call_count(&self) -> usize {
        self.tool_calls.as_ref().map_or(0, Vec::len)
    }
}

/// Function invocation requested by the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(rename = "tool_call_id")]
    pub call_id: String,
    pub function_name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

/// Tool results returned within one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub results: Vec<ObservationResult>,
}

impl Observation {
    /// Wrap results; an empty list yields no observation at all.
    pub fn from_results(results: Vec<ObservationResult>) -> Option<Self> {
        if results.is_empty() {
            None
        } else {
            Some(Self { results })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationResult {
    /// Identifier of the tool call this result answers
    pub source_call_id: String,
    pub content: String,
}

/// Per-step token and cost accounting
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub cost_usd: f64,
}

/// Totals over all metered steps, plus the step count
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalMetrics {
    pub total_prompt_tokens: u64,
    pub total_completion_tokens: u64,
    pub total_cost_usd: f64,
    pub total_steps: usize,
}
