//! Plugin description validation.
//!
//! Every check is fail-fast: the first violated rule produces an
//! [`InvalidDescriptor`] and generation stops before anything is written.

pub mod namespace;
pub mod rules;
pub mod version;

pub use namespace::check_namespace;
pub use rules::{ApiVersionRule, PlatformRules};
pub use version::validate_api_version;

use thiserror::Error;

/// A plugin description that violates a rule of its target platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidDescriptor {
    message: String,
}

impl InvalidDescriptor {
    /// Create a new error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        InvalidDescriptor {
            message: message.into(),
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
