//! Platform rule sets and the field checks shared by every platform.
//!
//! Each platform validator calls these in the same order: name, API version,
//! version, entry points, commands, dependency names, provides.

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use super::{check_namespace, validate_api_version, InvalidDescriptor};
use crate::core::command::Command;

static VALID_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9 _.-]+$").expect("plugin name pattern is valid"));

static VALID_API_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^1\.[1-9][0-9]*(\.[1-9][0-9]*)?$").expect("api version pattern is valid")
});

/// API version policy of a platform.
#[derive(Debug, Clone)]
pub struct ApiVersionRule {
    /// Pattern the whole version must match
    pub pattern: Regex,

    /// Lowest accepted minor version for `major.minor` versions
    pub min_minor: u32,

    /// Whether a missing API version is an error
    pub required: bool,
}

/// Validation configuration for one platform.
///
/// Rule sets are plain values; nothing here is shared between platforms.
#[derive(Debug, Clone)]
pub struct PlatformRules {
    /// Pattern for plugin names and `provides` entries
    pub name_pattern: Regex,

    /// API version policy, if the platform has an `api-version` field
    pub api_version: Option<ApiVersionRule>,

    /// Namespace prefixes entry points may not live in
    pub reserved_namespaces: Vec<String>,
}

impl PlatformRules {
    /// Rules with the default name pattern and the given reserved namespaces.
    pub fn new<I, S>(reserved_namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PlatformRules {
            name_pattern: VALID_NAME.clone(),
            api_version: None,
            reserved_namespaces: reserved_namespaces.into_iter().map(Into::into).collect(),
        }
    }

    /// Add an API version policy using the default version pattern.
    pub fn with_api_version(mut self, min_minor: u32, required: bool) -> Self {
        self.api_version = Some(ApiVersionRule {
            pattern: VALID_API_VERSION.clone(),
            min_minor,
            required,
        });
        self
    }

    /// Reserve additional namespaces on top of the platform defaults.
    pub fn with_extra_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for namespace in namespaces {
            let namespace = namespace.into();
            if !self.reserved_namespaces.contains(&namespace) {
                self.reserved_namespaces.push(namespace);
            }
        }
        self
    }
}

/// Rule 1: the plugin name is set and well-formed.
pub fn check_name(name: Option<&str>, rules: &PlatformRules) -> Result<(), InvalidDescriptor> {
    let name = name.ok_or_else(|| InvalidDescriptor::new("Plugin name is not set"))?;
    if !rules.name_pattern.is_match(name) {
        return Err(InvalidDescriptor::new(format!(
            "Invalid plugin name: should match {}",
            rules.name_pattern.as_str()
        )));
    }
    Ok(())
}

/// Rule 2: the API version, when the platform has one.
pub fn check_api_version(
    api_version: Option<&str>,
    rules: &PlatformRules,
) -> Result<(), InvalidDescriptor> {
    let Some(rule) = &rules.api_version else {
        return Ok(());
    };

    match api_version {
        Some(version) => validate_api_version(version, &rule.pattern, rule.min_minor),
        None if rule.required => Err(InvalidDescriptor::new("Plugin API version is not set")),
        None => Ok(()),
    }
}

/// Rule 3: the plugin version is set.
pub fn check_version(version: Option<&str>) -> Result<(), InvalidDescriptor> {
    match version {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(InvalidDescriptor::new("Plugin version is not set")),
    }
}

/// Rule 4: the main class is set and outside the reserved namespaces.
pub fn check_main(main: Option<&str>, rules: &PlatformRules) -> Result<(), InvalidDescriptor> {
    let main = main.ok_or_else(|| InvalidDescriptor::new("Main class is not defined"))?;
    if main.is_empty() {
        return Err(InvalidDescriptor::new("Main class cannot be empty"));
    }
    check_namespace(Some(main), "Main", &rules.reserved_namespaces)
}

/// Rule 4 for optional entry points (bootstrapper, loader).
pub fn check_entry_point(
    class_name: Option<&str>,
    label: &str,
    rules: &PlatformRules,
) -> Result<(), InvalidDescriptor> {
    check_namespace(class_name, label, &rules.reserved_namespaces)
}

/// Rule 5: command names and aliases may not contain the namespace separator.
pub fn check_commands(commands: &IndexMap<String, Command>) -> Result<(), InvalidDescriptor> {
    for (name, command) in commands {
        if name.contains(':') {
            return Err(InvalidDescriptor::new(format!(
                "Command '{}' cannot contain ':'",
                name
            )));
        }
        if let Some(alias) = command.aliases.iter().find(|alias| alias.contains(':')) {
            return Err(InvalidDescriptor::new(format!(
                "Alias '{}' of '{}' cannot contain ':'",
                alias, name
            )));
        }
    }
    Ok(())
}

/// Rule 6: every entry of a dependency list names a plugin, once.
pub fn check_dependency_names<'a, I>(label: &str, names: I) -> Result<(), InvalidDescriptor>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(InvalidDescriptor::new(format!(
                "Plugin name in {} can not be empty",
                label
            )));
        }
        if !seen.insert(name) {
            return Err(InvalidDescriptor::new(format!(
                "Plugin '{}' is listed more than once in {}",
                name, label
            )));
        }
    }
    Ok(())
}

/// Rule 7: every `provides` entry is a valid plugin name.
pub fn check_provides(provides: &[String], rules: &PlatformRules) -> Result<(), InvalidDescriptor> {
    if provides.iter().all(|name| rules.name_pattern.is_match(name)) {
        Ok(())
    } else {
        Err(InvalidDescriptor::new(format!(
            "Invalid plugin provides name: all should match {}",
            rules.name_pattern.as_str()
        )))
    }
}
