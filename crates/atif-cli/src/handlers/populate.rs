use super::resolve_run_config;
use super::summary::print_summary;
use crate::args::RunArgs;
use anyhow::Result;
use atif_runtime::populate_context_post_run;
use std::path::Path;

pub fn handle(logs_dir: &Path, args: &RunArgs) -> Result<()> {
    let config = resolve_run_config(args)?;
    let report = populate_context_post_run(logs_dir, &config)?;

    match &report.trajectory {
        Some(trajectory) => print_summary(trajectory),
        None => eprintln!("no trajectory produced for {}", logs_dir.display()),
    }

    println!("{}", serde_json::to_string_pretty(&report.context)?);
    Ok(())
}
