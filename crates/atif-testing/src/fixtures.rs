//! Fixtures for agent log generation.
//!
//! `LogBuilder` writes the same shape the run harness captures from
//! opencode: one JSON object per line, optionally interleaved with
//! plain status text.

use serde_json::{Map, Value, json};

/// Fluent builder for a captured agent log.
///
/// # Example
/// ```
/// use atif_testing::LogBuilder;
///
/// let log = LogBuilder::new()
///     .user("hello")
///     .noise("Loading...")
///     .assistant_with_usage("hi", 10, 5, 0.02)
///     .build();
/// assert_eq!(log.lines().count(), 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct LogBuilder {
    lines: Vec<String>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary JSON record
    pub fn record(mut self, record: Value) -> Self {
        self.lines.push(record.to_string());
        self
    }

    /// Append a non-JSON status line
    pub fn noise(mut self, text: &str) -> Self {
        self.lines.push(text.to_string());
        self
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(String::new());
        self
    }

    pub fn user(self, content: &str) -> Self {
        self.record(json!({"type": "user", "content": content}))
    }

    pub fn user_at(self, content: &str, timestamp: &str) -> Self {
        self.record(json!({"type": "user", "content": content, "timestamp": timestamp}))
    }

    pub fn assistant(self, content: &str) -> Self {
        self.record(json!({"type": "assistant", "content": content}))
    }

    pub fn assistant_with_usage(
        self,
        content: &str,
        prompt_tokens: u64,
        completion_tokens: u64,
        cost: f64,
    ) -> Self {
        self.record(json!({
            "type": "assistant",
            "content": content,
            "usage": {
                "prompt_tokens": prompt_tokens,
                "completion_tokens": completion_tokens,
                "cost": cost,
            },
        }))
    }

    /// Assistant turn calling the given `(id, name)` tools and
    /// returning one result per call
    pub fn assistant_with_tools(self, content: &str, calls: &[(&str, &str)]) -> Self {
        let tool_calls: Vec<Value> = calls
            .iter()
            .map(|(id, name)| json!({"id": id, "name": name, "arguments": {}}))
            .collect();
        let tool_results: Vec<Value> = calls
            .iter()
            .map(|(id, name)| json!({"call_id": id, "content": format!("{} ok", name)}))
            .collect();
        self.record(json!({
            "type": "assistant",
            "content": content,
            "tool_calls": tool_calls,
            "tool_results": tool_results,
        }))
    }

    /// Record with a discriminator the decoder does not recognize
    pub fn other(self, kind: &str) -> Self {
        let mut record = Map::new();
        record.insert("type".to_string(), Value::String(kind.to_string()));
        self.record(Value::Object(record))
    }

    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
