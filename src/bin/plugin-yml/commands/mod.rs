//! Command implementations

pub mod completions;
pub mod generate;
pub mod libraries;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::GlobalArgs;
use pluginyml::ops::ProjectError;
use pluginyml::util::diagnostic::{emit, suggestions, Diagnostic};
use pluginyml::util::{Config, GlobalContext};
use pluginyml::PluginManifest;

/// The manifest and configuration a command works on.
pub struct Session {
    pub ctx: GlobalContext,
    pub manifest: PluginManifest,
    pub config: Config,
}

impl Session {
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let mut ctx = GlobalContext::new()?;
        ctx.set_color(global.color);

        let manifest_path = ctx
            .manifest_path(global.manifest_path.as_deref())
            .map_err(|e| anyhow::anyhow!("{:#}\n{}", e, suggestions::NO_MANIFEST))?;
        let manifest = PluginManifest::load(&manifest_path)?;
        let config = ctx.config(manifest.manifest_dir());

        Ok(Session {
            ctx,
            manifest,
            config,
        })
    }

    /// Resolve a path given on the command line against the working directory.
    pub fn cli_path(&self, path: Option<PathBuf>) -> Option<PathBuf> {
        path.map(|path| self.ctx.cwd().join(path))
    }

    /// Turn a project error into a command error, printing a diagnostic for
    /// invalid descriptions.
    pub fn report(&self, error: ProjectError) -> anyhow::Error {
        match error {
            ProjectError::Invalid { platform, source } => {
                let diag = Diagnostic::invalid_descriptor(platform, &source)
                    .with_location(self.manifest.path());
                emit(&diag, self.ctx.color());
                anyhow::anyhow!("{} description failed validation", platform.display_name())
            }
            other => other.into(),
        }
    }
}
