//! plugin-yml - Plugin description generator for Minecraft server platforms
//!
//! This crate provides the core library functionality for plugin-yml,
//! including description validation, defaulting, library collection and
//! file generation for Bukkit, BungeeCord, Nukkit and Paper.

pub mod core;
pub mod libraries;
pub mod ops;
pub mod util;
pub mod validate;

pub use crate::core::{
    description::PluginDescription, manifest::PluginManifest, platform::Platform,
    project::ProjectContext,
};
pub use libraries::{PluginLibraries, ProxyConfig, RepositoryResolver};
pub use ops::GenerationEngine;
pub use util::context::GlobalContext;
pub use validate::InvalidDescriptor;
