//! `plugin-yml.toml` manifest parsing and schema.
//!
//! The manifest holds the project context, one table per target platform and
//! the library settings shared by all platforms.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use miette::NamedSource;
use serde::Deserialize;
use thiserror::Error;

use crate::core::bukkit::BukkitDescription;
use crate::core::bungee::BungeeDescription;
use crate::core::nukkit::NukkitDescription;
use crate::core::paper::PaperDescription;
use crate::core::platform::Platform;
use crate::core::project::ProjectContext;
use crate::libraries::{ProxyConfig, RepositoryMap};
use crate::util::diagnostic::{find_span, InvalidUrlError, NoPlatformError};
use crate::util::fs;

/// Manifest file name.
pub const MANIFEST_NAME: &str = "plugin-yml.toml";

/// Failure to locate a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find `plugin-yml.toml` in `{}`", .dir.display())]
    NotFound { dir: PathBuf },

    #[error("could not find `plugin-yml.toml` in `{}` or any parent directory", .dir.display())]
    NotFoundUpward { dir: PathBuf },
}

/// Find the manifest in `dir` itself.
pub fn find_manifest(dir: &Path) -> Result<PathBuf, ManifestError> {
    let path = dir.join(MANIFEST_NAME);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ManifestError::NotFound {
            dir: dir.to_path_buf(),
        })
    }
}

/// Built-in central proxy selections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyPreset {
    /// Google's cache, then EldoNexus
    Default,
    Google,
    Eldonexus,
    /// Only proxies listed in `[libraries.proxies]`
    #[default]
    None,
}

/// The `[libraries]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibrariesSection {
    /// Resolved dependency graph, relative to the manifest directory
    pub graph: Option<PathBuf>,

    /// Built-in proxy selection
    pub proxy: ProxyPreset,

    /// Declared repositories, in declaration order
    pub repositories: RepositoryMap,

    /// Additional named proxies
    pub proxies: IndexMap<String, String>,
}

impl LibrariesSection {
    /// The proxies configured by this section: the preset first, then the
    /// named entries.
    pub fn proxy_config(&self) -> ProxyConfig {
        let mut config = ProxyConfig::new();
        match self.proxy {
            ProxyPreset::Default => {
                config.use_default_central_proxy();
            }
            ProxyPreset::Google => {
                config.use_google_central_proxy();
            }
            ProxyPreset::Eldonexus => {
                config.use_eldonexus_central_proxy();
            }
            ProxyPreset::None => {}
        }
        for (name, url) in &self.proxies {
            config.add(name.clone(), url.clone());
        }
        config
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    project: ProjectContext,
    #[serde(default)]
    bukkit: Option<BukkitDescription>,
    #[serde(default)]
    bungee: Option<BungeeDescription>,
    #[serde(default)]
    nukkit: Option<NukkitDescription>,
    #[serde(default)]
    paper: Option<PaperDescription>,
    #[serde(default)]
    libraries: LibrariesSection,
}

/// A parsed `plugin-yml.toml`.
#[derive(Debug, Clone)]
pub struct PluginManifest {
    pub project: ProjectContext,
    pub bukkit: Option<BukkitDescription>,
    pub bungee: Option<BungeeDescription>,
    pub nukkit: Option<NukkitDescription>,
    pub paper: Option<PaperDescription>,
    pub libraries: LibrariesSection,

    /// Path to the manifest file
    path: PathBuf,
}

impl PluginManifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        Self::parse(&content, path)
    }

    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawManifest = toml::from_str(content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let manifest = PluginManifest {
            project: raw.project,
            bukkit: raw.bukkit,
            bungee: raw.bungee,
            nukkit: raw.nukkit,
            paper: raw.paper,
            libraries: raw.libraries,
            path: path.to_path_buf(),
        };

        if manifest.platforms().is_empty() {
            return Err(NoPlatformError {
                path: path.display().to_string(),
            }
            .into());
        }

        manifest.check_urls(content)?;

        tracing::debug!(
            "Loaded manifest {} for {}",
            path.display(),
            manifest
                .platforms()
                .iter()
                .map(Platform::key)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(manifest)
    }

    fn check_urls(&self, content: &str) -> Result<()> {
        let entries = self
            .libraries
            .repositories
            .iter()
            .map(|entry| ("repository", entry))
            .chain(self.libraries.proxies.iter().map(|entry| ("proxy", entry)));

        for (kind, (name, value)) in entries {
            if let Err(e) = url::Url::parse(value) {
                return Err(InvalidUrlError {
                    kind,
                    name: name.clone(),
                    reason: e.to_string(),
                    src: Some(NamedSource::new(
                        self.path.display().to_string(),
                        content.to_string(),
                    )),
                    span: find_span(content, value),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Platforms with a table in this manifest, in manifest order.
    pub fn platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|platform| match platform {
                Platform::Bukkit => self.bukkit.is_some(),
                Platform::Bungee => self.bungee.is_some(),
                Platform::Nukkit => self.nukkit.is_some(),
                Platform::Paper => self.paper.is_some(),
            })
            .collect()
    }

    /// Path to the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the manifest.
    pub fn manifest_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// Path of the dependency graph file, if configured.
    pub fn graph_path(&self) -> Option<PathBuf> {
        self.libraries
            .graph
            .as_ref()
            .map(|graph| self.manifest_dir().join(graph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manifest_path(tmp: &TempDir) -> PathBuf {
        tmp.path().join(MANIFEST_NAME)
    }

    #[test]
    fn test_parse_basic_manifest() {
        let content = r#"
[project]
name = "MyPlugin"
version = "1.0.0"
url = "https://example.com"

[bukkit]
main = "com.example.MyPlugin"
api-version = "1.20"
depend = ["Vault"]

[paper]
main = "com.example.MyPlugin"
api-version = "1.20.6"
"#;
        let tmp = TempDir::new().unwrap();
        let manifest = PluginManifest::parse(content, &manifest_path(&tmp)).unwrap();

        assert_eq!(manifest.project.name, "MyPlugin");
        assert_eq!(manifest.platforms(), vec![Platform::Bukkit, Platform::Paper]);
        let bukkit = manifest.bukkit.unwrap();
        assert_eq!(bukkit.main.as_deref(), Some("com.example.MyPlugin"));
        assert_eq!(bukkit.depend, vec!["Vault"]);
        assert!(manifest.libraries.proxy_config().is_empty());
    }

    #[test]
    fn test_parse_libraries_section() {
        let content = r#"
[project]
name = "MyPlugin"
version = "1.0.0"

[bungee]
main = "com.example.Proxy"

[libraries]
graph = "build/graph.json"
proxy = "google"

[libraries.repositories]
central = "https://repo1.maven.org/maven2"
paper = "https://repo.papermc.io/repository/maven-public/"

[libraries.proxies]
mirror = "https://mirror.example"
"#;
        let tmp = TempDir::new().unwrap();
        let manifest = PluginManifest::parse(content, &manifest_path(&tmp)).unwrap();

        let names: Vec<_> = manifest.libraries.repositories.keys().collect();
        assert_eq!(names, vec!["central", "paper"]);
        assert_eq!(
            manifest.graph_path(),
            Some(tmp.path().join("build/graph.json"))
        );

        let proxies: Vec<_> = manifest
            .libraries
            .proxy_config()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect();
        assert_eq!(proxies, vec!["google_central_proxy", "mirror"]);
    }

    #[test]
    fn test_manifest_requires_platform() {
        let content = r#"
[project]
name = "MyPlugin"
version = "1.0.0"
"#;
        let tmp = TempDir::new().unwrap();
        let err = PluginManifest::parse(content, &manifest_path(&tmp)).unwrap_err();
        assert!(err.to_string().contains("declares no platform"));
    }

    #[test]
    fn test_manifest_rejects_bad_url() {
        let content = r#"
[project]
name = "MyPlugin"
version = "1.0.0"

[nukkit]
main = "com.example.Main"
api = ["1.0.0"]

[libraries.repositories]
broken = "not a url"
"#;
        let tmp = TempDir::new().unwrap();
        let err = PluginManifest::parse(content, &manifest_path(&tmp)).unwrap_err();
        assert!(err.to_string().contains("repository `broken`"));
    }

    #[test]
    fn test_manifest_rejects_unknown_field() {
        let content = r#"
[project]
name = "MyPlugin"
version = "1.0.0"

[bukkit]
mian = "com.example.Main"
"#;
        let tmp = TempDir::new().unwrap();
        assert!(PluginManifest::parse(content, &manifest_path(&tmp)).is_err());
    }

    #[test]
    fn test_find_manifest() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            find_manifest(tmp.path()),
            Err(ManifestError::NotFound { .. })
        ));

        let message = find_manifest(tmp.path()).unwrap_err().to_string();
        assert!(!message.contains("parent directory"));

        std::fs::write(manifest_path(&tmp), "").unwrap();
        assert_eq!(find_manifest(tmp.path()).unwrap(), manifest_path(&tmp));
    }
}
