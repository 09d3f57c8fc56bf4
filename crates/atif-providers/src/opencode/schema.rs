use atif_types::{
    AssistantEvent, LogEvent, RawEvent, ToolCallEntry, ToolResultEntry, UsageEntry, UserEvent,
};
use serde_json::{Map, Value};

// Coercion rule, applied to every field: a value of the wrong JSON type
// counts as absent. List entries that are not objects stay in the list
// and decode as if every field were absent.

/// Decode a raw record into a typed event
///
/// Returns `None` for records whose `type` is missing, not a string,
/// or not one of `user` / `assistant`.
pub fn decode_log_event(raw: &RawEvent) -> Option<LogEvent> {
    match raw.get("type").and_then(Value::as_str)? {
        "user" => Some(LogEvent::User(UserEvent {
            timestamp: string_field(raw, "timestamp"),
            content: string_field(raw, "content").unwrap_or_default(),
        })),
        "assistant" => Some(LogEvent::Assistant(decode_assistant(raw))),
        _ => None,
    }
}

fn decode_assistant(raw: &RawEvent) -> AssistantEvent {
    AssistantEvent {
        timestamp: string_field(raw, "timestamp"),
        content: string_field(raw, "content").unwrap_or_default(),
        thinking: string_field(raw, "thinking"),
        tool_calls: list_field(raw, "tool_calls")
            .map(|entries| entries.iter().map(decode_tool_call).collect()),
        tool_results: list_field(raw, "tool_results")
            .map(|entries| entries.iter().map(decode_tool_result).collect()),
        usage: object_field(raw, "usage").map(decode_usage),
    }
}

fn decode_tool_call(entry: &Value) -> ToolCallEntry {
    let Some(fields) = entry.as_object() else {
        return ToolCallEntry::default();
    };
    ToolCallEntry {
        id: string_field(fields, "id"),
        name: string_field(fields, "name").unwrap_or_default(),
        arguments: object_field(fields, "arguments").cloned().unwrap_or_default(),
    }
}

fn decode_tool_result(entry: &Value) -> ToolResultEntry {
    let Some(fields) = entry.as_object() else {
        return ToolResultEntry::default();
    };
    ToolResultEntry {
        call_id: string_field(fields, "call_id").unwrap_or_default(),
        content: string_field(fields, "content").unwrap_or_default(),
    }
}

fn decode_usage(fields: &Map<String, Value>) -> UsageEntry {
    UsageEntry {
        prompt_tokens: fields.get("prompt_tokens").map_or(0, token_count),
        completion_tokens: fields.get("completion_tokens").map_or(0, token_count),
        cost: fields.get("cost").and_then(Value::as_f64).unwrap_or(0.0),
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

fn list_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    fields.get(key).and_then(Value::as_array)
}

fn object_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    fields.get(key).and_then(Value::as_object)
}

/// Non-negative integer, or a float with no fractional part; else 0
fn token_count(value: &Value) -> u64 {
    value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
        .unwrap_or(0)
}
