//! Global context for plugin-yml operations.
//!
//! Provides centralized access to the working directory, output settings
//! and configuration file locations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::manifest::{find_manifest as find_manifest_in, ManifestError};
use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            cwd,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            color: true,
        }
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find `plugin-yml.toml` starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        let mut current = self.cwd.clone();
        loop {
            match find_manifest_in(&current) {
                Ok(path) => return Ok(path),
                Err(_) => {
                    if !current.pop() {
                        return Err(ManifestError::NotFoundUpward {
                            dir: self.cwd.clone(),
                        });
                    }
                }
            }
        }
    }

    /// Resolve the manifest path: an explicit one relative to cwd, or the
    /// nearest manifest upward.
    pub fn manifest_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(self.cwd.join(path)),
            None => Ok(self.find_manifest()?),
        }
    }

    /// Load the layered configuration for a project rooted at `project_root`.
    pub fn config(&self, project_root: &Path) -> Config {
        let global = config::global_config_path();
        config::load_config(global.as_deref(), &config::project_config_path(project_root))
    }
}
