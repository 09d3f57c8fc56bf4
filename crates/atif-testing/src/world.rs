//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated harness logs directory
//! - Placing captured agent output where the harness leaves it
//! - Configuring CLI commands against that directory

use anyhow::{Context, Result};
use assert_cmd::Command;
use atif_types::Trajectory;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use atif_testing::{LogBuilder, TestWorld};
///
/// let world = TestWorld::new().with_agent_output(&LogBuilder::new().user("hi").build());
/// assert!(world.agent_output_path().exists());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    logs_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let logs_dir = temp_dir.path().join("logs");
        std::fs::create_dir_all(&logs_dir).expect("Failed to create logs dir");

        Self {
            temp_dir,
            logs_dir,
            env_vars: HashMap::new(),
        }
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the harness logs directory.
    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Where the harness stores the agent's captured stdout.
    pub fn agent_output_path(&self) -> PathBuf {
        self.logs_dir.join("command-0").join("stdout.txt")
    }

    /// Where the trajectory is written.
    pub fn trajectory_path(&self) -> PathBuf {
        self.logs_dir.join("trajectory.json")
    }

    /// Write captured agent output into `command-0/stdout.txt`.
    pub fn with_agent_output(self, text: &str) -> Self {
        let path = self.agent_output_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create command dir");
        }
        std::fs::write(&path, text).expect("Failed to write agent output");
        self
    }

    /// Write a file relative to the temp root and return its path.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Load the trajectory written to the logs directory.
    pub fn read_trajectory(&self) -> Result<Trajectory> {
        let path = self.trajectory_path();
        Trajectory::read_from(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// `ATIF_CONFIG` points at `<temp>/config.toml`, which only exists if the
    /// test writes it. The caller must provide the base command (e.g., from `cargo_bin_cmd!("atif")`).
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("RUST_LOG");
        // Keep the user's own config file out of the run
        cmd.env("ATIF_CONFIG", self.temp_dir.path().join("config.toml"));

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }
}
