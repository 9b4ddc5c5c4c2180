//! High-level operations.
//!
//! This module contains the implementation of plugin-yml commands.

pub mod generate;
pub mod project;

pub use generate::{GenerateError, GenerateOptions, GenerateResult, GenerationEngine};
pub use project::{
    engine_for, generate_project, project_libraries, validate_project, ProjectError,
    ProjectOptions,
};
