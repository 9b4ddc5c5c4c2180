//! Project context used to fill unset description fields.

use serde::{Deserialize, Serialize};

/// Project metadata from the `[project]` section.
///
/// `url` and `author` are free-form project properties; only their string
/// value is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectContext {
    /// Project name
    pub name: String,

    /// Project version, as written
    pub version: String,

    /// Project description
    #[serde(default)]
    pub description: Option<String>,

    /// Project website
    #[serde(default)]
    pub url: Option<String>,

    /// Project author
    #[serde(default)]
    pub author: Option<String>,
}

impl ProjectContext {
    /// Create a context with a name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        ProjectContext {
            name: name.into(),
            version: version.into(),
            description: None,
            url: None,
            author: None,
        }
    }

    /// Set the project description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the `url` property.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the `author` property.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}
