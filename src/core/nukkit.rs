//! Nukkit `nukkit.yml` description.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::command::Command;
use crate::core::description::{fill_default, is_blank, LoadOrder, PluginDescription};
use crate::core::permission::Permission;
use crate::core::platform::Platform;
use crate::core::project::ProjectContext;
use crate::validate::rules::{check_commands, check_main, check_name, check_version};
use crate::validate::{InvalidDescriptor, PlatformRules};

/// Description of a Nukkit plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NukkitDescription {
    #[serde(default, skip_serializing_if = "is_blank")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub main: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub version: Option<String>,

    /// Supported Nukkit API versions; at least one is required
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api: Vec<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<LoadOrder>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depend: Vec<String>,

    #[serde(default, rename = "softdepend", skip_serializing_if = "Vec::is_empty")]
    pub soft_depend: Vec<String>,

    #[serde(default, rename = "loadbefore", skip_serializing_if = "Vec::is_empty")]
    pub load_before: Vec<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub commands: IndexMap<String, Command>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub permissions: IndexMap<String, Permission>,

    #[serde(default, rename = "generate-libraries-json", skip_serializing)]
    pub generate_libraries_json: bool,
}

impl PluginDescription for NukkitDescription {
    const PLATFORM: Platform = Platform::Nukkit;

    fn apply_defaults(&mut self, project: &ProjectContext) {
        fill_default(&mut self.name, Some(project.name.as_str()));
        fill_default(&mut self.version, Some(project.version.as_str()));
        fill_default(&mut self.description, project.description.as_deref());
        fill_default(&mut self.website, project.url.as_deref());
        fill_default(&mut self.author, project.author.as_deref());
    }

    fn validate(&self, rules: &PlatformRules) -> Result<(), InvalidDescriptor> {
        check_name(self.name.as_deref(), rules)?;
        if self.api.iter().all(|api| api.is_empty()) {
            return Err(InvalidDescriptor::new("Nukkit API version is not set"));
        }
        check_version(self.version.as_deref())?;
        check_main(self.main.as_deref(), rules)?;
        check_commands(&self.commands)?;
        Ok(())
    }

    fn generate_libraries_json(&self) -> bool {
        self.generate_libraries_json
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> NukkitDescription {
        NukkitDescription {
            name: Some("NukkitPlugin".to_string()),
            version: Some("1.0".to_string()),
            main: Some("com.example.Main".to_string()),
            api: vec!["1.0.0".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_api_required() {
        let rules = Platform::Nukkit.rules();
        assert!(valid().validate(&rules).is_ok());

        let missing = NukkitDescription {
            api: Vec::new(),
            ..valid()
        };
        assert_eq!(
            missing.validate(&rules).unwrap_err().message(),
            "Nukkit API version is not set"
        );
    }

    #[test]
    fn test_reserved_namespace() {
        let description = NukkitDescription {
            main: Some("cn.nukkit.Main".to_string()),
            ..valid()
        };
        assert!(description.validate(&Platform::Nukkit.rules()).is_err());
    }

    #[test]
    fn test_command_alias_with_colon() {
        let mut description = valid();
        description.commands.insert(
            "home".to_string(),
            Command {
                aliases: vec!["nukkit:home".to_string()],
                ..Default::default()
            },
        );
        let err = description.validate(&Platform::Nukkit.rules()).unwrap_err();
        assert_eq!(err.message(), "Alias 'nukkit:home' of 'home' cannot contain ':'");
    }
}
