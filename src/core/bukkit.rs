//! Bukkit `plugin.yml` description.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::command::Command;
use crate::core::description::{fill_default, is_blank, LoadOrder, PluginDescription};
use crate::core::permission::{Permission, PermissionDefault};
use crate::core::platform::Platform;
use crate::core::project::ProjectContext;
use crate::validate::rules::{
    check_api_version, check_commands, check_main, check_name, check_provides, check_version,
};
use crate::validate::{InvalidDescriptor, PlatformRules};

/// Description of a Bukkit (Spigot, Paper legacy loader) plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BukkitDescription {
    #[serde(default, rename = "api-version", skip_serializing_if = "is_blank")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub main: Option<String>,

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

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depend: Vec<String>,

    #[serde(default, rename = "softdepend", skip_serializing_if = "Vec::is_empty")]
    pub soft_depend: Vec<String>,

    #[serde(default, rename = "loadbefore", skip_serializing_if = "Vec::is_empty")]
    pub load_before: Vec<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub prefix: Option<String>,

    #[serde(
        default,
        rename = "default-permission",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_permission: Option<PermissionDefault>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<String>,

    #[serde(
        default,
        rename = "folia-supported",
        skip_serializing_if = "Option::is_none"
    )]
    pub folia_supported: Option<bool>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub commands: IndexMap<String, Command>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub permissions: IndexMap<String, Permission>,

    /// Write runtime libraries to a separate libraries file.
    #[serde(default, rename = "generate-libraries-json", skip_serializing)]
    pub generate_libraries_json: bool,
}

impl PluginDescription for BukkitDescription {
    const PLATFORM: Platform = Platform::Bukkit;

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
        check_commands(&self.commands)?;
        check_provides(&self.provides, rules)?;
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

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> BukkitDescription {
        BukkitDescription {
            name: Some("TestPlugin".to_string()),
            version: Some("1.0".to_string()),
            main: Some("com.example.TestPlugin".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_fill_unset_fields() {
        let project = ProjectContext::new("MyPlugin", "1.0")
            .with_description("A plugin")
            .with_url("https://example.com")
            .with_author("someone");

        let mut description = BukkitDescription {
            author: Some("explicit".to_string()),
            ..Default::default()
        };
        description.apply_defaults(&project);

        assert_eq!(description.name.as_deref(), Some("MyPlugin"));
        assert_eq!(description.version.as_deref(), Some("1.0"));
        assert_eq!(description.description.as_deref(), Some("A plugin"));
        assert_eq!(description.website.as_deref(), Some("https://example.com"));
        assert_eq!(description.author.as_deref(), Some("explicit"));
    }

    #[test]
    fn test_valid_description() {
        assert!(valid().validate(&Platform::Bukkit.rules()).is_ok());
    }

    #[test]
    fn test_reserved_main() {
        let description = BukkitDescription {
            main: Some("org.bukkit.MyPlugin".to_string()),
            ..valid()
        };
        let err = description.validate(&Platform::Bukkit.rules()).unwrap_err();
        assert!(err.message().contains("org.bukkit."));
    }

    #[test]
    fn test_api_version_optional_but_checked() {
        let rules = Platform::Bukkit.rules();
        let with_old = BukkitDescription {
            api_version: Some("1.12".to_string()),
            ..valid()
        };
        assert!(with_old.validate(&rules).is_err());

        let with_new = BukkitDescription {
            api_version: Some("1.20.5".to_string()),
            ..valid()
        };
        assert!(with_new.validate(&rules).is_ok());
    }

    #[test]
    fn test_name_checked_first() {
        let description = BukkitDescription {
            name: Some("bad:name".to_string()),
            main: Some("org.bukkit.Main".to_string()),
            ..valid()
        };
        let err = description.validate(&Platform::Bukkit.rules()).unwrap_err();
        assert!(err.message().starts_with("Invalid plugin name"));
    }

    #[test]
    fn test_command_with_colon() {
        let mut description = valid();
        description
            .commands
            .insert("foo:bar".to_string(), Command::default());
        assert!(description.validate(&Platform::Bukkit.rules()).is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let mut description = BukkitDescription {
            api_version: Some("1.20".to_string()),
            soft_depend: vec!["Vault".to_string()],
            load_before: vec!["Essentials".to_string()],
            default_permission: Some(PermissionDefault::Op),
            folia_supported: Some(true),
            description: Some(String::new()),
            generate_libraries_json: true,
            ..valid()
        };
        description.commands.insert(
            "test".to_string(),
            Command {
                aliases: vec!["t".to_string()],
                permission_message: Some("Denied".to_string()),
                ..Default::default()
            },
        );

        let yaml = serde_yaml::to_string(&description).unwrap();
        assert!(yaml.starts_with("api-version:"));
        assert!(yaml.contains("softdepend:"));
        assert!(yaml.contains("loadbefore:"));
        assert!(yaml.contains("default-permission: op"));
        assert!(yaml.contains("folia-supported: true"));
        assert!(yaml.contains("permission-message: Denied"));
        assert!(!yaml.contains("description"));
        assert!(!yaml.contains("generate-libraries-json"));
        assert!(!yaml.contains("permissions"));
    }

    #[test]
    fn test_parse_from_toml() {
        let description: BukkitDescription = toml::from_str(
            r#"
main = "com.example.Main"
api-version = "1.20"
softdepend = ["Vault"]
load = "POSTWORLD"
generate-libraries-json = true

[commands.test]
aliases = ["t"]

[permissions."test.*"]
default = "op"
children = ["test.a"]
"#,
        )
        .unwrap();

        assert_eq!(description.load, Some(LoadOrder::PostWorld));
        assert!(description.generate_libraries_json);
        assert_eq!(description.commands["test"].aliases, vec!["t"]);
        assert_eq!(description.permissions["test.*"].children, vec!["test.a"]);
    }
}
