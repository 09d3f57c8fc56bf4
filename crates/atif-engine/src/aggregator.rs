use atif_types::{
    AssistantEvent, LogEvent, Metrics, Observation, ObservationResult, RunContext, Step,
    StepSource, ToolCall, UserEvent,
};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::trace;

/// Running usage totals over every metered step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UsageTotals {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub cost_usd: f64,
}

impl UsageTotals {
    /// Token totals saturate at `u64::MAX`
    pub fn add(&mut self, metrics: &Metrics) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(metrics.prompt_tokens);
        self.completion_tokens = self
            .completion_tokens
            .saturating_add(metrics.completion_tokens);
        self.cost_usd += metrics.cost_usd;
    }
}

/// Output of aggregation: ordered steps plus their usage totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedSteps {
    pub steps: Vec<Step>,
    pub totals: UsageTotals,
}

/// Aggregate events into steps in one pass
pub fn aggregate_steps(events: &[LogEvent], context: &RunContext) -> AggregatedSteps {
    let mut aggregator = StepAggregator::new(context);
    for event in events {
        aggregator.push(event);
    }
    aggregator.finish()
}

/// Incremental step builder
///
/// Every pushed event becomes exactly one step and takes the next step id,
/// whichever side produced it.
pub struct StepAggregator<'a> {
    context: &'a RunContext,
    clock: fn() -> DateTime<Utc>,
    steps: Vec<Step>,
    totals: UsageTotals,
}

impl<'a> StepAggregator<'a> {
    pub fn new(context: &'a RunContext) -> Self {
        Self {
            context,
            clock: Utc::now,
            steps: Vec::new(),
            totals: UsageTotals::default(),
        }
    }

    /// Replace the clock used for events that carry no timestamp
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Id the next pushed event will receive
    pub fn next_step_id(&self) -> usize {
        self.steps.len() + 1
    }

    pub fn totals(&self) -> UsageTotals {
        self.totals
    }

    /// Append the step for `event`, returning its id
    pub fn push(&mut self, event: &LogEvent) -> usize {
        let step_id = self.next_step_id();
        let step = match event {
            LogEvent::User(user) => self.user_step(step_id, user),
            LogEvent::Assistant(assistant) => self.agent_step(step_id, assistant),
        };
        trace!(
            step_id,
            kind = event.kind(),
            tool_calls = step.tool_call_count(),
            "aggregated step"
        );
        self.steps.push(step);
        step_id
    }

    pub fn finish(self) -> AggregatedSteps {
        AggregatedSteps {
            steps: self.steps,
            totals: self.totals,
        }
    }

    fn user_step(&self, step_id: usize, user: &UserEvent) -> Step {
        Step {
            step_id,
            timestamp: self.timestamp_or_now(user.timestamp.as_deref()),
            source: StepSource::User,
            model_name: None,
            message: user.content.clone(),
            reasoning_content: None,
            tool_calls: None,
            observation: None,
            metrics: None,
        }
    }

    fn agent_step(&mut self, step_id: usize, assistant: &AssistantEvent) -> Step {
        let tool_calls = assistant
            .tool_calls
            .as_ref()
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| ToolCall {
                        call_id: entry
                            .id
                            .clone()
                            .unwrap_or_else(|| format!("call_{}", step_id)),
                        function_name: entry.name.clone(),
                        arguments: entry.arguments.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|calls| !calls.is_empty());

        let observation = assistant.tool_results.as_ref().and_then(|entries| {
            Observation::from_results(
                entries
                    .iter()
                    .map(|entry| ObservationResult {
                        source_call_id: entry.call_id.clone(),
                        content: entry.content.clone(),
                    })
                    .collect(),
            )
        });

        let metrics = assistant.usage.map(|usage| Metrics {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            cost_usd: usage.cost,
        });
        if let Some(metrics) = &metrics {
            self.totals.add(metrics);
        }

        Step {
            step_id,
            timestamp: self.timestamp_or_now(assistant.timestamp.as_deref()),
            source: StepSource::Agent,
            model_name: Some(self.context.model_name.clone()),
            message: assistant.content.clone(),
            reasoning_content: assistant.thinking.clone(),
            tool_calls,
            observation,
            metrics,
        }
    }

    fn timestamp_or_now(&self, timestamp: Option<&str>) -> String {
        match timestamp {
            Some(ts) => ts.to_string(),
            None => (self.clock)().to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atif_types::{ToolCallEntry, ToolResultEntry, UsageEntry};
    use chrono::TimeZone;
    use serde_json::json;

    fn context() -> RunContext {
        RunContext::new("sisyphus", "latest", "anthropic/claude-sonnet-4")
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn user(content: &str) -> LogEvent {
        LogEvent::User(UserEvent {
            timestamp: Some("2025-06-01T11:59:00Z".to_string()),
            content: content.to_string(),
        })
    }

    fn assistant(event: AssistantEvent) -> LogEvent {
        LogEvent::Assistant(event)
    }

    #[test]
    fn test_step_ids_are_shared_across_sources() {
        let events = vec![
            user("hi"),
            assistant(AssistantEvent::default()),
            user("again"),
            assistant(AssistantEvent::default()),
        ];

        let aggregated = aggregate_steps(&events, &context());
        let ids: Vec<_> = aggregated.steps.iter().map(|s| s.step_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(aggregated.steps[0].source, StepSource::User);
        assert_eq!(aggregated.steps[1].source, StepSource::Agent);
    }

    #[test]
    fn test_user_step_has_no_model() {
        let aggregated = aggregate_steps(&[user("fix it")], &context());
        let step = &aggregated.steps[0];
        assert_eq!(step.message, "fix it");
        assert_eq!(step.timestamp, "2025-06-01T11:59:00Z");
        assert!(step.model_name.is_none());
        assert!(step.metrics.is_none());
    }

    #[test]
    fn test_agent_step_carries_configured_model() {
        let aggregated = aggregate_steps(
            &[assistant(AssistantEvent {
                content: "done".to_string(),
                thinking: Some("easy".to_string()),
                ..Default::default()
            })],
            &context(),
        );
        let step = &aggregated.steps[0];
        assert_eq!(step.model_name.as_deref(), Some("anthropic/claude-sonnet-4"));
        assert_eq!(step.reasoning_content.as_deref(), Some("easy"));
        assert!(step.tool_calls.is_none());
        assert!(step.observation.is_none());
    }

    #[test]
    fn test_missing_timestamp_uses_clock() {
        let ctx = context();
        let mut aggregator = StepAggregator::new(&ctx).with_clock(fixed_clock);
        aggregator.push(&LogEvent::User(UserEvent::default()));
        let aggregated = aggregator.finish();
        assert_eq!(aggregated.steps[0].timestamp, "2025-06-01T12:00:00.000000+00:00");
    }

    #[test]
    fn test_missing_call_id_is_synthesized_from_step_id() {
        let ctx = context();
        let mut aggregator = StepAggregator::new(&ctx);
        aggregator.push(&user("go"));
        aggregator.push(&assistant(AssistantEvent {
            tool_calls: Some(vec![
                ToolCallEntry {
                    id: Some("a".to_string()),
                    name: "read".to_string(),
                    arguments: json!({"path": "a.rs"}).as_object().cloned().unwrap(),
                },
                ToolCallEntry::default(),
            ]),
            ..Default::default()
        }));

        let aggregated = aggregator.finish();
        assert_eq!(aggregated.steps[1].tool_call_count(), 2);
        let calls = aggregated.steps[1].tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].call_id, "a");
        assert_eq!(calls[0].arguments["path"], "a.rs");
        assert_eq!(calls[1].call_id, "call_2");
        assert_eq!(calls[1].function_name, "");
        assert!(calls[1].arguments.is_empty());
    }

    #[test]
    fn test_empty_tool_lists_leave_step_bare() {
        let aggregated = aggregate_steps(
            &[assistant(AssistantEvent {
                tool_calls: Some(Vec::new()),
                tool_results: Some(Vec::new()),
                ..Default::default()
            })],
            &context(),
        );
        assert!(aggregated.steps[0].tool_calls.is_none());
        assert_eq!(aggregated.steps[0].tool_call_count(), 0);
        assert!(aggregated.steps[0].observation.is_none());
    }

    #[test]
    fn test_tool_results_preserve_order_and_ids() {
        let aggregated = aggregate_steps(
            &[assistant(AssistantEvent {
                tool_results: Some(vec![
                    ToolResultEntry {
                        call_id: "b".to_string(),
                        content: "second".to_string(),
                    },
                    ToolResultEntry {
                        call_id: "a".to_string(),
                        content: "first".to_string(),
                    },
                ]),
                ..Default::default()
            })],
            &context(),
        );
        let results = &aggregated.steps[0].observation.as_ref().unwrap().results;
        let ids: Vec<_> = results.iter().map(|r| r.source_call_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_usage_accumulates_into_totals() {
        let usage = |p, c, cost| {
            assistant(AssistantEvent {
                usage: Some(UsageEntry {
                    prompt_tokens: p,
                    completion_tokens: c,
                    cost,
                }),
                ..Default::default()
            })
        };
        let events = vec![
            usage(100, 10, 0.5),
            assistant(AssistantEvent::default()),
            usage(50, 5, 0.25),
        ];

        let aggregated = aggregate_steps(&events, &context());
        assert_eq!(
            aggregated.totals,
            UsageTotals {
                prompt_tokens: 150,
                completion_tokens: 15,
                cost_usd: 0.75,
            }
        );
        assert!(aggregated.steps[1].metrics.is_none());
        assert_eq!(aggregated.steps[2].metrics.unwrap().prompt_tokens, 50);
    }

    #[test]
    fn test_token_totals_saturate_instead_of_overflowing() {
        let usage = |p, c| {
            assistant(AssistantEvent {
                usage: Some(UsageEntry {
                    prompt_tokens: p,
                    completion_tokens: c,
                    cost: 0.0,
                }),
                ..Default::default()
            })
        };
        let events = vec![usage(u64::MAX, u64::MAX), usage(1, u64::MAX)];

        let aggregated = aggregate_steps(&events, &context());
        assert_eq!(aggregated.steps.len(), 2);
        assert_eq!(aggregated.totals.prompt_tokens, u64::MAX);
        assert_eq!(aggregated.totals.completion_tokens, u64::MAX);
        assert_eq!(aggregated.steps[1].metrics.unwrap().prompt_tokens, 1);
    }

    #[test]
    fn test_next_step_id_tracks_pushes() {
        let ctx = context();
        let mut aggregator = StepAggregator::new(&ctx);
        assert_eq!(aggregator.next_step_id(), 1);
        assert_eq!(aggregator.push(&user("a")), 1);
        assert_eq!(aggregator.next_step_id(), 2);
        assert_eq!(aggregator.totals(), UsageTotals::default());
    }
}
