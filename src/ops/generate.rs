//! Implementation of description file generation.
//!
//! A run fills defaults, validates, and writes the description file. It then
//! writes the libraries file when the description asks for one. Nothing is
//! written when validation fails.

use std::path::PathBuf;

use anyhow::Context;
use thiserror::Error;

use crate::core::description::PluginDescription;
use crate::core::project::ProjectContext;
use crate::libraries::{
    collect_libraries, DependencyNode, PluginLibraries, ProxyConfig, RepositoryMap,
    RepositoryResolver, CENTRAL_URLS,
};
use crate::util::fs::write_atomic;
use crate::validate::{InvalidDescriptor, PlatformRules};

/// Why a generation run failed.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Invalid(#[from] InvalidDescriptor),

    #[error("failed to serialize plugin description")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to serialize libraries file")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Write(#[from] anyhow::Error),
}

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory receiving the generated files
    pub output_dir: PathBuf,

    /// Description file name (None = platform default)
    pub file_name: Option<String>,

    /// Libraries file name (None = `<platform>-libraries.json`)
    pub libraries_file_name: Option<String>,

    /// Rules the description is validated against
    pub rules: PlatformRules,

    /// URLs treated as Maven Central
    pub central_urls: Vec<String>,

    /// Declared repositories
    pub repositories: RepositoryMap,

    /// Central proxies
    pub proxies: ProxyConfig,
}

impl GenerateOptions {
    /// Options with platform defaults for everything but the rules.
    pub fn new(output_dir: impl Into<PathBuf>, rules: PlatformRules) -> Self {
        GenerateOptions {
            output_dir: output_dir.into(),
            file_name: None,
            libraries_file_name: None,
            rules,
            central_urls: CENTRAL_URLS.iter().map(|url| url.to_string()).collect(),
            repositories: RepositoryMap::new(),
            proxies: ProxyConfig::new(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// The written description file
    pub description_path: PathBuf,

    /// The written libraries file, if one was requested
    pub libraries_path: Option<PathBuf>,

    /// Runtime libraries listed in either file
    pub libraries: Vec<String>,
}

/// Generates description and libraries files for one platform.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
    resolver: RepositoryResolver,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        let resolver = RepositoryResolver::new(options.central_urls.iter().cloned());
        GenerationEngine { options, resolver }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Fill defaults, populate inline libraries and validate.
    ///
    /// When the description keeps its libraries inline, the graph's
    /// libraries are appended to the declared ones.
    pub fn prepare<D, N>(
        &self,
        project: &ProjectContext,
        description: &mut D,
        graph: Option<N>,
    ) -> Result<(), InvalidDescriptor>
    where
        D: PluginDescription,
        N: DependencyNode,
    {
        description.apply_defaults(project);

        if graph.is_some() && !description.generate_libraries_json() {
            if let Some(libraries) = description.libraries_mut() {
                *libraries = collect_libraries(graph, libraries);
            }
        }

        description.validate(&self.options.rules)
    }

    /// Compute the libraries file contents.
    pub fn libraries<N: DependencyNode>(&self, graph: Option<N>) -> PluginLibraries {
        PluginLibraries {
            repositories: self
                .resolver
                .resolve(&self.options.repositories, &self.options.proxies),
            dependencies: collect_libraries(graph, &[]),
        }
    }

    /// Run generation for `description`.
    pub fn run<D, N>(
        &self,
        project: &ProjectContext,
        mut description: D,
        graph: Option<N>,
    ) -> Result<GenerateResult, GenerateError>
    where
        D: PluginDescription,
        N: DependencyNode,
    {
        let wants_json = description.generate_libraries_json();
        let (inline_graph, json_graph) = if wants_json {
            (None, graph)
        } else {
            (graph, None)
        };

        self.prepare(project, &mut description, inline_graph)?;

        let description_path = self.options.output_dir.join(
            self.options
                .file_name
                .clone()
                .unwrap_or_else(|| D::PLATFORM.file_name().to_string()),
        );
        let yaml = serde_yaml::to_string(&description)?;
        write_atomic(&description_path, &yaml)?;
        tracing::debug!(
            "Wrote {} for `{}`",
            description_path.display(),
            description.name().unwrap_or_default()
        );

        let mut result = GenerateResult {
            description_path,
            libraries_path: None,
            libraries: description
                .libraries_mut()
                .map(|libraries| libraries.clone())
                .unwrap_or_default(),
        };

        if wants_json {
            let libraries = self.libraries(json_graph);
            let json = libraries.to_json()?;
            let libraries_path = self.options.output_dir.join(
                self.options
                    .libraries_file_name
                    .clone()
                    .unwrap_or_else(|| D::PLATFORM.libraries_file_name()),
            );
            write_atomic(&libraries_path, &json).with_context(|| {
                format!(
                    "{} was generated, but its libraries file was not",
                    result.description_path.display()
                )
            })?;
            tracing::debug!(
                "Wrote {} ({} libraries)",
                libraries_path.display(),
                libraries.dependencies.len()
            );
            result.libraries_path = Some(libraries_path);
            result.libraries = libraries.dependencies;
        }

        Ok(result)
    }
}
