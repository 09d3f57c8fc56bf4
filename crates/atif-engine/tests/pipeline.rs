use atif_engine::{build_trajectory, validate_trajectory};
use atif_providers::{OpenCodeParser, SessionParser, decode_log_events};
use atif_testing::LogBuilder;
use atif_testing::assertions::assert_trajectory_consistent;
use atif_types::{RunContext, StepSource, Trajectory};
use serde_json::json;
use std::path::Path;

fn context() -> RunContext {
    RunContext::new("sisyphus", "latest", "anthropic/claude-sonnet-4")
}

fn convert(log: &str) -> Option<Trajectory> {
    build_trajectory(&decode_log_events(log), &context())
}

#[test]
fn test_malformed_line_between_events() {
    let log = LogBuilder::new()
        .user("hello")
        .noise("{this is not json")
        .assistant_with_usage("hi", 10, 5, 0.02)
        .build();

    let trajectory = convert(&log).expect("trajectory expected");

    assert_eq!(trajectory.steps.len(), 2);
    assert_eq!(trajectory.final_metrics.total_prompt_tokens, 10);
    assert_eq!(trajectory.final_metrics.total_completion_tokens, 5);
    assert_eq!(trajectory.final_metrics.total_cost_usd, 0.02);
    assert_eq!(trajectory.final_metrics.total_steps, 2);
    assert_trajectory_consistent(&trajectory).unwrap();
}

#[test]
fn test_huge_token_counts_saturate_totals() {
    let log = LogBuilder::new()
        .assistant_with_usage("first", u64::MAX, 3, 0.0)
        .assistant_with_usage("second", 1, 4, 0.0)
        .build();

    let trajectory = convert(&log).expect("trajectory expected");

    assert_eq!(trajectory.final_metrics.total_prompt_tokens, u64::MAX);
    assert_eq!(trajectory.final_metrics.total_completion_tokens, 7);
    assert!(validate_trajectory(&trajectory).is_empty());
    assert_trajectory_consistent(&trajectory).unwrap();
}

#[test]
fn test_blank_or_garbage_input_produces_nothing() {
    assert!(convert("").is_none());
    assert!(convert("\n  \n\t\n").is_none());
    assert!(convert("garbage\n{\"unterminated\": \n").is_none());
}

#[test]
fn test_only_unrecognized_events_produce_nothing() {
    let log = LogBuilder::new()
        .other("step_start")
        .other("step_finish")
        .record(json!({"content": "no type"}))
        .build();
    assert!(convert(&log).is_none());
}

#[test]
fn test_step_count_matches_recognized_events() {
    let log = LogBuilder::new()
        .other("session_start")
        .user("one")
        .assistant("two")
        .noise("status")
        .other("tool")
        .assistant_with_tools("three", &[("x", "read")])
        .user("four")
        .build();

    let trajectory = convert(&log).unwrap();
    let ids: Vec<_> = trajectory.steps.iter().map(|s| s.step_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(trajectory.final_metrics.total_steps, 4);
    assert_eq!(trajectory.final_metrics.total_cost_usd, 0.0);
    assert!(validate_trajectory(&trajectory).is_empty());
}

#[test]
fn test_tool_correlation_keeps_order() {
    let log = LogBuilder::new()
        .assistant_with_tools("running", &[("a", "bash"), ("b", "read")])
        .build();

    let trajectory = convert(&log).unwrap();
    let step = &trajectory.steps[0];

    let call_ids: Vec<_> = step
        .tool_calls
        .as_ref()
        .unwrap()
        .iter()
        .map(|c| c.call_id.as_str())
        .collect();
    assert_eq!(call_ids, vec!["a", "b"]);

    let results = &step.observation.as_ref().unwrap().results;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].source_call_id, "a");
    assert_eq!(results[1].source_call_id, "b");
}

#[test]
fn test_rerun_differs_only_in_session_id() {
    let log = LogBuilder::new()
        .user_at("go", "2025-06-01T12:00:00Z")
        .record(json!({
            "type": "assistant",
            "timestamp": "2025-06-01T12:00:01Z",
            "content": "ok",
            "usage": {"prompt_tokens": 3, "completion_tokens": 2, "cost": 0.5}
        }))
        .build();

    let mut first = convert(&log).unwrap();
    let mut second = convert(&log).unwrap();
    first.session_id.clear();
    second.session_id.clear();
    assert_eq!(first, second);
}

#[test]
fn test_sample_log_end_to_end() {
    let events = OpenCodeParser
        .parse_file(Path::new("../atif-providers/tests/samples/sisyphus_stdout.txt"))
        .expect("Failed to parse sample");

    let trajectory = build_trajectory(&events, &context()).unwrap();

    assert_eq!(trajectory.steps.len(), 4);
    assert_eq!(trajectory.steps[0].source, StepSource::User);
    assert!(trajectory.steps[1..].iter().all(|s| s.is_agent()));
    assert!(trajectory.session_id.starts_with("sisyphus-"));

    let metrics = &trajectory.final_metrics;
    assert_eq!(metrics.total_prompt_tokens, 2650);
    assert_eq!(metrics.total_completion_tokens, 295);
    assert!((metrics.total_cost_usd - 0.0113).abs() < 1e-12);

    // second bash call had no id
    let calls = trajectory.steps[2].tool_calls.as_ref().unwrap();
    assert_eq!(calls[1].call_id, "call_3");

    // empty tool_results list does not produce an observation
    assert!(trajectory.steps[3].observation.is_none());
    assert!(trajectory.steps[3].metrics.is_none());

    assert_trajectory_consistent(&trajectory).unwrap();
    assert!(validate_trajectory(&trajectory).is_empty());
}

#[test]
fn test_steps_snapshot() {
    let log = LogBuilder::new()
        .user_at("list files", "2025-06-01T12:00:00Z")
        .record(json!({
            "type": "assistant",
            "timestamp": "2025-06-01T12:00:02Z",
            "content": "Listing.",
            "tool_calls": [{"id": "a", "name": "bash", "arguments": {"command": "ls"}}],
            "tool_results": [{"call_id": "a", "content": "Cargo.toml"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "cost": 0.02}
        }))
        .build();

    let trajectory = convert(&log).unwrap();

    insta::assert_json_snapshot!(trajectory.steps, @r#"
    [
      {
        "step_id": 1,
        "timestamp": "2025-06-01T12:00:00Z",
        "source": "user",
        "message": "list files"
      },
      {
        "step_id": 2,
        "timestamp": "2025-06-01T12:00:02Z",
        "source": "agent",
        "model_name": "anthropic/claude-sonnet-4",
        "message": "Listing.",
        "tool_calls": [
          {
            "tool_call_id": "a",
            "function_name": "bash",
            "arguments": {
              "command": "ls"
            }
          }
        ],
        "observation": {
          "results": [
            {
              "source_call_id": "a",
              "content": "Cargo.toml"
            }
          ]
        },
        "metrics": {
          "prompt_tokens": 10,
          "completion_tokens": 5,
          "cost_usd": 0.02
        }
      }
    ]
    "#);
}
