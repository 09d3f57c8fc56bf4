use atif_types::Trajectory;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

/// Usage summary on stderr, so stdout stays machine-readable
pub fn print_summary(trajectory: &Trajectory) {
    let color = std::io::stderr().is_terminal();
    for line in summary_lines(trajectory, color) {
        eprintln!("{}", line);
    }
}

fn summary_lines(trajectory: &Trajectory, color: bool) -> Vec<String> {
    let metrics = &trajectory.final_metrics;
    let label = |text: &str| {
        if color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };

    vec![
        format!(
            "{} {} ({} steps)",
            label("trajectory:"),
            trajectory.session_id,
            metrics.total_steps
        ),
        format!(
            "{} {} prompt / {} completion",
            label("tokens:"),
            metrics.total_prompt_tokens,
            metrics.total_completion_tokens
        ),
        format!("{} ${:.4}", label("cost:"), metrics.total_cost_usd),
    ]
}
