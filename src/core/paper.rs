//! Paper `paper-plugin.yml` description.
//!
//! Paper plugins declare dependencies for two phases: `bootstrap` (before the
//! server is constructed) and `server`. Both are ordered lists in memory and
//! serialize as `name: {load, required, join-classpath}` mappings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::description::{fill_default, is_blank, LoadOrder, PluginDescription};
use crate::core::permission::{Permission, PermissionDefault};
use crate::core::platform::Platform;
use crate::core::project::ProjectContext;
use crate::validate::rules::{
    check_api_version, check_dependency_names, check_entry_point, check_main, check_name,
    check_provides, check_version,
};
use crate::validate::{InvalidDescriptor, PlatformRules};

/// Description of a Paper plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaperDescription {
    #[serde(default, rename = "api-version", skip_serializing_if = "is_blank")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub main: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub bootstrapper: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub loader: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<LoadOrder>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<String>,

    #[serde(
        default,
        rename = "has-open-classloader",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_open_classloader: Option<bool>,

    #[serde(
        default,
        rename = "folia-supported",
        skip_serializing_if = "Option::is_none"
    )]
    pub folia_supported: Option<bool>,

    #[serde(
        default,
        rename = "defaultPerm",
        alias = "default-permission",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_permission: Option<PermissionDefault>,

    #[serde(default, skip_serializing_if = "PaperDependencies::is_empty")]
    pub dependencies: PaperDependencies,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub permissions: IndexMap<String, Permission>,

    #[serde(default, rename = "generate-libraries-json", skip_serializing)]
    pub generate_libraries_json: bool,
}

/// Bootstrap and server dependencies of a Paper plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaperDependencies {
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_by_name"
    )]
    pub bootstrap: Vec<PaperDependency>,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_by_name"
    )]
    pub server: Vec<PaperDependency>,
}

impl PaperDependencies {
    /// Whether neither phase declares a dependency.
    pub fn is_empty(&self) -> bool {
        self.bootstrap.is_empty() && self.server.is_empty()
    }
}

/// A dependency on another plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaperDependency {
    /// Name of the plugin depended on; the key of the serialized mapping
    #[serde(skip_serializing)]
    pub name: String,

    #[serde(default)]
    pub load: RelativeLoadOrder,

    #[serde(default = "default_true")]
    pub required: bool,

    #[serde(default = "default_true", rename = "join-classpath")]
    pub join_classpath: bool,
}

impl PaperDependency {
    /// A required dependency with default load order and classpath joining.
    pub fn new(name: impl Into<String>) -> Self {
        PaperDependency {
            name: name.into(),
            load: RelativeLoadOrder::default(),
            required: true,
            join_classpath: true,
        }
    }

    /// Mark the dependency as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the load order relative to the dependency.
    pub fn with_load(mut self, load: RelativeLoadOrder) -> Self {
        self.load = load;
        self
    }
}

/// Load order of a plugin relative to one of its dependencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelativeLoadOrder {
    #[serde(alias = "before")]
    Before,
    #[serde(alias = "after")]
    After,
    #[default]
    #[serde(alias = "omit")]
    Omit,
}

fn default_true() -> bool {
    true
}

fn serialize_by_name<S: Serializer>(
    dependencies: &[PaperDependency],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(dependencies.iter().map(|dep| (&dep.name, dep)))
}

impl PluginDescription for PaperDescription {
    const PLATFORM: Platform = Platform::Paper;

    fn apply_defaults(&mut self, project: &ProjectContext) {
        fill_default(&mut self.name, Some(project.name.as_str()));
        fill_default(&mut self.version, Some(project.version.as_str()));
        fill_default(&mut self.description, project.description.as_deref());
        fill_default(&mut self.website, project.url.as_deref());
        fill_default(&mut self.author, project.author.as_deref());
    }

    fn validate(&self, rules: &PlatformRules) -> Result<(), InvalidDescriptor> {
        check_name(self.name.as_deref(), rules)?;
        check_api_version(self.api_version.as_deref(), rules)?;
        check_version(self.version.as_deref())?;
        check_main(self.main.as_deref(), rules)?;
        check_entry_point(self.bootstrapper.as_deref(), "Bootstrapper", rules)?;
        check_entry_point(self.loader.as_deref(), "Loader", rules)?;
        check_dependency_names(
            "serverDependencies",
            self.dependencies.server.iter().map(|dep| dep.name.as_str()),
        )?;
        check_dependency_names(
            "bootstrapDependencies",
            self.dependencies.bootstrap.iter().map(|dep| dep.name.as_str()),
        )?;
        check_provides(&self.provides, rules)?;
        Ok(())
    }

    fn generate_libraries_json(&self) -> bool {
        self.generate_libraries_json
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
