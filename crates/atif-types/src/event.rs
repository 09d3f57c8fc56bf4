use serde_json::{Map, Value};

/// One decoded log line: an untyped JSON object
pub type RawEvent = Map<String, Value>;

/// Recognized log event, decoded with defaults applied
///
/// Only `user` and `assistant` records become events; every other
/// discriminator is dropped during decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    User(UserEvent),
    Assistant(AssistantEvent),
}

impl LogEvent {
    /// Timestamp carried by the log line, if any
    pub fn timestamp(&self) -> Option<&str> {
        match self {
            LogEvent::User(user) => user.timestamp.as_deref(),
            LogEvent::Assistant(assistant) => assistant.timestamp.as_deref(),
        }
    }

    /// Discriminator value this event was decoded from
    pub fn kind(&self) -> &'static str {
        match self {
            LogEvent::User(_) => "user",
            LogEvent::Assistant(_) => "assistant",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserEvent {
    pub timestamp: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistantEvent {
    pub timestamp: Option<String>,
    pub content: String,
    pub thinking: Option<String>,

    /// `None` when the line had no tool call list
    pub tool_calls: Option<Vec<ToolCallEntry>>,

    /// `None` when the line had no tool result list
    pub tool_results: Option<Vec<ToolResultEntry>>,

    /// `None` when the line had no usage block
    pub usage: Option<UsageEntry>,
}

/// Tool call descriptor as found in the log
///
/// `id` stays optional: the fallback identifier depends on the step
/// the call ends up in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCallEntry {
    pub id: Option<String>,
    pub name: String,
    pub arguments: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolResultEntry {
    pub call_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UsageEntry {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub cost: f64,
}
