//! Core data structures for plugin-yml.
//!
//! This module contains the foundational types used throughout plugin-yml:
//! - Platforms and their description schemas
//! - Commands, permissions and the project context
//! - The `plugin-yml.toml` manifest

pub mod bukkit;
pub mod bungee;
pub mod command;
pub mod description;
pub mod manifest;
pub mod nukkit;
pub mod paper;
pub mod permission;
pub mod platform;
pub mod project;

pub use bukkit::BukkitDescription;
pub use bungee::BungeeDescription;
pub use command::Command;
pub use description::{LoadOrder, PluginDescription};
pub use manifest::{find_manifest, PluginManifest, MANIFEST_NAME};
pub use nukkit::NukkitDescription;
pub use paper::{PaperDependency, PaperDescription, RelativeLoadOrder};
pub use permission::{Permission, PermissionDefault};
pub use platform::Platform;
pub use project::ProjectContext;
