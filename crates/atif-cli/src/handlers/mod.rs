pub mod convert;
pub mod populate;
pub mod summary;
pub mod validate;

use crate::args::RunArgs;
use anyhow::{Context, Result};
use atif_runtime::RunConfig;

/// Config file first, then command-line overrides
pub(crate) fn resolve_run_config(args: &RunArgs) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load_from(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => RunConfig::load().context("Failed to load config")?,
    };

    if let Some(model) = &args.model {
        config.model_name = model.clone();
    }
    if let Some(name) = &args.agent_name {
        config.agent_name = name.clone();
    }
    if let Some(version) = &args.agent_version {
        config.agent_version = version.clone();
    }

    config.validate()?;
    tracing::debug!(?config, "resolved run config");
    Ok(config)
}
