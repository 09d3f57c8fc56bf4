use crate::{Error, Result};
use atif_types::RunContext;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_AGENT_NAME: &str = "sisyphus";
pub const DEFAULT_AGENT_VERSION: &str = "latest";

/// Resolve the config file path based on priority:
/// 1. ATIF_CONFIG environment variable
/// 2. XDG config directory
/// 3. ~/.config/atif (fallback for systems without XDG)
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(env_path) = std::env::var("ATIF_CONFIG") {
        return Ok(PathBuf::from(env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("atif").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".config/atif/config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Metadata of the agent run whose log is being converted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    /// Build identifier recorded in the trajectory's agent block
    #[serde(default = "default_agent_version")]
    pub agent_version: String,

    /// `provider/model`, e.g. `anthropic/claude-sonnet-4`
    #[serde(default)]
    pub model_name: String,
}

fn default_agent_name() -> String {
    DEFAULT_AGENT_NAME.to_string()
}

fn default_agent_version() -> String {
    DEFAULT_AGENT_VERSION.to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            agent_name: default_agent_name(),
            agent_version: default_agent_version(),
            model_name: String::new(),
        }
    }
}

impl RunConfig {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Self::default()
        }
    }

    pub fn with_agent_name(mut self, agent_name: impl Into<String>) -> Self {
        self.agent_name = agent_name.into();
        self
    }

    pub fn with_agent_version(mut self, agent_version: impl Into<String>) -> Self {
        self.agent_version = agent_version.into();
        self
    }

    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from a TOML file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: RunConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Provider part of `model_name`
    pub fn provider(&self) -> Option<&str> {
        self.model_name
            .split_once('/')
            .map(|(provider, _)| provider)
            .filter(|provider| !provider.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if self.agent_name.trim().is_empty() {
            return Err(Error::Config("agent name must not be empty".to_string()));
        }
        let has_model = self
            .model_name
            .split_once('/')
            .is_some_and(|(_, model)| !model.is_empty());
        if self.provider().is_none() || !has_model {
            return Err(Error::Config(format!(
                "model name must be in the format provider/model_name (got '{}')",
                self.model_name
            )));
        }
        Ok(())
    }

    /// Validated, immutable context for aggregation and assembly
    pub fn run_context(&self) -> Result<RunContext> {
        self.validate()?;
        Ok(RunContext::new(
            self.agent_name.clone(),
            self.agent_version.clone(),
            self.model_name.clone(),
        ))
    }
}
