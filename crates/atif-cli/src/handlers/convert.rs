use super::resolve_run_config;
use super::summary::print_summary;
use crate::args::RunArgs;
use anyhow::Result;
use atif_runtime::{convert_log_file, write_trajectory};
use std::path::{Path, PathBuf};

pub fn handle(log: &Path, output: Option<PathBuf>, args: &RunArgs) -> Result<()> {
    let config = resolve_run_config(args)?;

    let Some(trajectory) = convert_log_file(log, &config)? else {
        eprintln!("no trajectory produced: {} has no user or assistant events", log.display());
        return Ok(());
    };

    match output {
        Some(path) => write_trajectory(&path, &trajectory)?,
        None => println!("{}", trajectory.to_json_pretty()?),
    }

    print_summary(&trajectory);
    Ok(())
}
