//! Supported server platforms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validate::PlatformRules;

/// A target server platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Bukkit,
    Bungee,
    Nukkit,
    Paper,
}

impl Platform {
    /// All platforms, in manifest order.
    pub const ALL: [Platform; 4] = [
        Platform::Bukkit,
        Platform::Bungee,
        Platform::Nukkit,
        Platform::Paper,
    ];

    /// Manifest table key and CLI name.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Bukkit => "bukkit",
            Platform::Bungee => "bungee",
            Platform::Nukkit => "nukkit",
            Platform::Paper => "paper",
        }
    }

    /// Human-readable platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Bukkit => "Bukkit",
            Platform::Bungee => "BungeeCord",
            Platform::Nukkit => "Nukkit",
            Platform::Paper => "Paper",
        }
    }

    /// Default name of the generated description file.
    pub fn file_name(&self) -> &'static str {
        match self {
            Platform::Bukkit => "plugin.yml",
            Platform::Bungee => "bungee.yml",
            Platform::Nukkit => "nukkit.yml",
            Platform::Paper => "paper-plugin.yml",
        }
    }

    /// Default name of the generated libraries file.
    pub fn libraries_file_name(&self) -> String {
        format!("{}-libraries.json", self.key())
    }

    /// Namespaces reserved by the platform itself.
    pub fn reserved_namespaces(&self) -> &'static [&'static str] {
        match self {
            Platform::Bukkit => &[
                "net.minecraft.",
                "org.bukkit.",
                "io.papermc.",
                "com.destroystokoyo.paper.",
                "org.spigotmc",
            ],
            Platform::Bungee => &["net.md_5.bungee."],
            Platform::Nukkit => &["cn.nukkit."],
            Platform::Paper => &[
                "net.minecraft.",
                "org.bukkit.",
                "io.papermc.paper.",
                "com.destroystokoyo.paper.",
            ],
        }
    }

    /// Default validation rules.
    pub fn rules(&self) -> PlatformRules {
        let rules = PlatformRules::new(self.reserved_namespaces().iter().copied());
        match self {
            Platform::Bukkit => rules.with_api_version(13, false),
            Platform::Paper => rules.with_api_version(19, true),
            Platform::Bungee | Platform::Nukkit => rules,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bukkit" | "spigot" => Ok(Platform::Bukkit),
            "bungee" | "bungeecord" => Ok(Platform::Bungee),
            "nukkit" => Ok(Platform::Nukkit),
            "paper" => Ok(Platform::Paper),
            other => Err(format!(
                "unknown platform `{}`, expected one of: bukkit, bungee, nukkit, paper",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platform() {
        assert_eq!("Paper".parse::<Platform>().unwrap(), Platform::Paper);
        assert_eq!("bungeecord".parse::<Platform>().unwrap(), Platform::Bungee);
        assert!("velocity".parse::<Platform>().is_err());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(Platform::Bukkit.file_name(), "plugin.yml");
        assert_eq!(Platform::Paper.file_name(), "paper-plugin.yml");
        assert_eq!(Platform::Paper.libraries_file_name(), "paper-libraries.json");
    }

    #[test]
    fn test_namespace_lists_are_independent() {
        assert!(Platform::Bukkit.reserved_namespaces().contains(&"org.spigotmc"));
        assert!(!Platform::Paper.reserved_namespaces().contains(&"org.spigotmc"));
        assert!(Platform::Paper.reserved_namespaces().contains(&"io.papermc.paper."));
    }

    #[test]
    fn test_api_version_policies() {
        let bukkit = Platform::Bukkit.rules().api_version.unwrap();
        assert_eq!(bukkit.min_minor, 13);
        assert!(!bukkit.required);

        let paper = Platform::Paper.rules().api_version.unwrap();
        assert_eq!(paper.min_minor, 19);
        assert!(paper.required);

        assert!(Platform::Nukkit.rules().api_version.is_none());
    }
}
