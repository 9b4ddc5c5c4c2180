//! Generation and validation for every platform of a manifest.

use std::path::PathBuf;

use anyhow::Result;
use thiserror::Error;

use crate::core::manifest::PluginManifest;
use crate::core::platform::Platform;
use crate::libraries::{GraphFile, PluginLibraries};
use crate::ops::generate::{GenerateError, GenerateOptions, GenerateResult, GenerationEngine};
use crate::util::config::Config;
use crate::validate::InvalidDescriptor;

/// Why a manifest-wide operation failed.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("invalid {} plugin description", .platform.display_name())]
    Invalid {
        platform: Platform,
        #[source]
        source: InvalidDescriptor,
    },

    #[error("platform `{0}` has no table in the manifest")]
    MissingPlatform(Platform),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Options shared by the manifest-wide operations.
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    /// Platforms to process (empty = every platform in the manifest)
    pub platforms: Vec<Platform>,

    /// Output directory override
    pub output_dir: Option<PathBuf>,

    /// Dependency graph override
    pub graph: Option<PathBuf>,
}

impl ProjectOptions {
    fn platforms(&self, manifest: &PluginManifest) -> Result<Vec<Platform>, ProjectError> {
        let available = manifest.platforms();
        if self.platforms.is_empty() {
            return Ok(available);
        }
        for platform in &self.platforms {
            if !available.contains(platform) {
                return Err(ProjectError::MissingPlatform(*platform));
            }
        }
        Ok(self.platforms.clone())
    }

    fn graph(&self, manifest: &PluginManifest) -> Result<Option<GraphFile>> {
        let path = match &self.graph {
            Some(path) => Some(path.clone()),
            None => manifest.graph_path(),
        };
        path.map(|path| GraphFile::load(&path)).transpose()
    }
}

/// Build the engine for one platform of `manifest`.
pub fn engine_for(
    manifest: &PluginManifest,
    config: &Config,
    platform: Platform,
    output_dir: Option<PathBuf>,
) -> GenerationEngine {
    let output_dir = output_dir.unwrap_or_else(|| config.output_dir(manifest.manifest_dir()));
    let mut options = GenerateOptions::new(output_dir, config.rules(platform));
    options.file_name = Some(config.file_name(platform));
    options.central_urls = config.central_urls();
    options.repositories = manifest.libraries.repositories.clone();
    options.proxies = manifest.libraries.proxy_config();
    GenerationEngine::new(options)
}

/// Generate the files of each selected platform.
///
/// Stops at the first platform that fails; files of earlier platforms stay.
pub fn generate_project(
    manifest: &PluginManifest,
    config: &Config,
    opts: &ProjectOptions,
) -> Result<Vec<(Platform, GenerateResult)>, ProjectError> {
    let graph = opts.graph(manifest)?;
    let mut results = Vec::new();

    for platform in opts.platforms(manifest)? {
        let engine = engine_for(manifest, config, platform, opts.output_dir.clone());
        let root = graph.as_ref().map(GraphFile::root);
        let project = &manifest.project;

        let result = match platform {
            Platform::Bukkit => manifest.bukkit.clone().map(|d| engine.run(project, d, root)),
            Platform::Bungee => manifest.bungee.clone().map(|d| engine.run(project, d, root)),
            Platform::Nukkit => manifest.nukkit.clone().map(|d| engine.run(project, d, root)),
            Platform::Paper => manifest.paper.clone().map(|d| engine.run(project, d, root)),
        };

        match result {
            Some(Ok(result)) => results.push((platform, result)),
            Some(Err(GenerateError::Invalid(source))) => {
                return Err(ProjectError::Invalid { platform, source })
            }
            Some(Err(e)) => return Err(anyhow::Error::new(e).into()),
            None => return Err(ProjectError::MissingPlatform(platform)),
        }
    }

    Ok(results)
}

/// Fill defaults and validate each selected platform without writing.
pub fn validate_project(
    manifest: &PluginManifest,
    config: &Config,
    opts: &ProjectOptions,
) -> Result<Vec<Platform>, ProjectError> {
    let graph = opts.graph(manifest)?;
    let platforms = opts.platforms(manifest)?;

    for &platform in &platforms {
        let engine = engine_for(manifest, config, platform, None);
        let root = graph.as_ref().map(GraphFile::root);
        let project = &manifest.project;

        let checked = match platform {
            Platform::Bukkit => manifest
                .bukkit
                .clone()
                .map(|mut d| engine.prepare(project, &mut d, root)),
            Platform::Bungee => manifest
                .bungee
                .clone()
                .map(|mut d| engine.prepare(project, &mut d, root)),
            Platform::Nukkit => manifest
                .nukkit
                .clone()
                .map(|mut d| engine.prepare(project, &mut d, root)),
            Platform::Paper => manifest
                .paper
                .clone()
                .map(|mut d| engine.prepare(project, &mut d, root)),
        };

        match checked {
            Some(Ok(())) => tracing::debug!("{} description is valid", platform.display_name()),
            Some(Err(source)) => return Err(ProjectError::Invalid { platform, source }),
            None => return Err(ProjectError::MissingPlatform(platform)),
        }
    }

    Ok(platforms)
}

/// The libraries file contents for the manifest's repositories and graph.
pub fn project_libraries(
    manifest: &PluginManifest,
    config: &Config,
    opts: &ProjectOptions,
) -> Result<PluginLibraries> {
    let graph = opts.graph(manifest)?;
    // the repository settings are shared, so any platform's engine will do
    let platform = manifest.platforms().first().copied().unwrap_or(Platform::Bukkit);
    let engine = engine_for(manifest, config, platform, None);
    Ok(engine.libraries(graph.as_ref().map(GraphFile::root)))
}
