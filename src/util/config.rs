//! Configuration file support for plugin-yml.
//!
//! plugin-yml supports two configuration file locations:
//! - Global: `<config dir>/plugin-yml/config.toml` - User-wide defaults
//! - Project: `.plugin-yml/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::platform::Platform;
use crate::libraries::CENTRAL_URLS;
use crate::util::fs;
use crate::validate::PlatformRules;

/// Default output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "build/plugin-yml";

/// plugin-yml configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Library and repository settings
    pub libraries: LibrariesConfig,

    /// Extra reserved namespaces, keyed by platform
    pub namespaces: IndexMap<Platform, Vec<String>>,
}

/// Where generated files go.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory (None = `build/plugin-yml`)
    pub dir: Option<PathBuf>,

    /// Description file name overrides, keyed by platform
    pub files: IndexMap<Platform, String>,
}

/// Library-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LibrariesConfig {
    /// URLs treated as Maven Central (None = the well-known mirrors)
    pub central_urls: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    ///
    /// Reserved namespaces accumulate instead of being replaced.
    pub fn merge(&mut self, other: Config) {
        if other.output.dir.is_some() {
            self.output.dir = other.output.dir;
        }
        self.output.files.extend(other.output.files);

        if other.libraries.central_urls.is_some() {
            self.libraries.central_urls = other.libraries.central_urls;
        }

        for (platform, namespaces) in other.namespaces {
            let existing = self.namespaces.entry(platform).or_default();
            for namespace in namespaces {
                if !existing.contains(&namespace) {
                    existing.push(namespace);
                }
            }
        }
    }

    /// Output directory, relative paths resolved against `root`.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        let dir = self
            .output
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        root.join(dir)
    }

    /// Name of the description file generated for `platform`.
    pub fn file_name(&self, platform: Platform) -> String {
        self.output
            .files
            .get(&platform)
            .cloned()
            .unwrap_or_else(|| platform.file_name().to_string())
    }

    /// URLs recognized as Maven Central.
    pub fn central_urls(&self) -> Vec<String> {
        match &self.libraries.central_urls {
            Some(urls) => urls.clone(),
            None => CENTRAL_URLS.iter().map(|url| url.to_string()).collect(),
        }
    }

    /// Validation rules for `platform`, including configured namespaces.
    pub fn rules(&self, platform: Platform) -> PlatformRules {
        let rules = platform.rules();
        match self.namespaces.get(&platform) {
            Some(extra) => rules.with_extra_namespaces(extra.iter().cloned()),
            None => rules,
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.plugin-yml/config.toml)
/// 2. Global config (<config dir>/plugin-yml/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global plugin-yml config path.
pub fn global_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.config_dir().join("plugin-yml").join("config.toml"))
}

/// Get the project config path (.plugin-yml/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".plugin-yml").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        let root = Path::new("/project");
        assert_eq!(config.output_dir(root), root.join("build/plugin-yml"));
        assert_eq!(config.file_name(Platform::Paper), "paper-plugin.yml");
        assert_eq!(config.central_urls().len(), CENTRAL_URLS.len());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[output]
dir = "target/generated"

[output.files]
bukkit = "spigot-plugin.yml"

[libraries]
central-urls = ["https://central.internal/maven2"]

[namespaces]
bukkit = ["com.example.internal."]
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.output.dir, Some(PathBuf::from("target/generated")));
        assert_eq!(config.file_name(Platform::Bukkit), "spigot-plugin.yml");
        assert_eq!(config.file_name(Platform::Bungee), "bungee.yml");
        assert_eq!(config.central_urls(), vec!["https://central.internal/maven2"]);

        let rules = config.rules(Platform::Bukkit);
        assert!(rules
            .reserved_namespaces
            .contains(&"com.example.internal.".to_string()));
        assert!(rules.reserved_namespaces.contains(&"org.bukkit.".to_string()));
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.output.dir = Some(PathBuf::from("out"));
        base.namespaces
            .insert(Platform::Paper, vec!["a.".to_string()]);

        let mut override_cfg = Config::default();
        override_cfg.libraries.central_urls = Some(Vec::new());
        override_cfg
            .namespaces
            .insert(Platform::Paper, vec!["a.".to_string(), "b.".to_string()]);

        base.merge(override_cfg);

        assert_eq!(base.output.dir, Some(PathBuf::from("out"))); // Not overridden
        assert_eq!(base.central_urls(), Vec::<String>::new());
        assert_eq!(base.namespaces[&Platform::Paper], vec!["a.", "b."]);
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[output]
dir = "global-out"

[output.files]
paper = "global-paper.yml"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[output]
dir = "project-out"
"#,
        )
        .unwrap();

        let config = load_config(Some(&global_path), &project_path);
        assert_eq!(config.output.dir, Some(PathBuf::from("project-out")));
        assert_eq!(config.file_name(Platform::Paper), "global-paper.yml");
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "output = 3").unwrap();

        assert!(Config::load(&path).is_err());
        assert!(Config::load_or_default(&path).output.dir.is_none());
    }
}
