//! BungeeCord `bungee.yml` description.

use serde::{Deserialize, Serialize};

use crate::core::description::{fill_default, is_blank, PluginDescription};
use crate::core::platform::Platform;
use crate::core::project::ProjectContext;
use crate::validate::rules::{check_main, check_name, check_version};
use crate::validate::{InvalidDescriptor, PlatformRules};

/// Description of a BungeeCord proxy plugin.
///
/// BungeeCord keeps camel-case keys for its dependency lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BungeeDescription {
    #[serde(default, skip_serializing_if = "is_blank")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub main: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<String>,

    #[serde(
        default,
        rename = "softDepends",
        alias = "soft-depends",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub soft_depends: Vec<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<String>,

    #[serde(default, rename = "generate-libraries-json", skip_serializing)]
    pub generate_libraries_json: bool,
}

impl PluginDescription for BungeeDescription {
    const PLATFORM: Platform = Platform::Bungee;

    fn apply_defaults(&mut self, project: &ProjectContext) {
        fill_default(&mut self.name, Some(project.name.as_str()));
        fill_default(&mut self.version, Some(project.version.as_str()));
        fill_default(&mut self.description, project.description.as_deref());
        fill_default(&mut self.author, project.author.as_deref());
    }

    fn validate(&self, rules: &PlatformRules) -> Result<(), InvalidDescriptor> {
        check_name(self.name.as_deref(), rules)?;
        check_version(self.version.as_deref())?;
        check_main(self.main.as_deref(), rules)?;
        Ok(())
    }

    fn generate_libraries_json(&self) -> bool {
        self.generate_libraries_json
    }

    fn libraries_mut(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.libraries)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
