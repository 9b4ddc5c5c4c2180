//! The plugin description capability shared by all platforms.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::platform::Platform;
use crate::core::project::ProjectContext;
use crate::validate::{InvalidDescriptor, PlatformRules};

/// A platform-specific plugin description.
///
/// Implementations serialize to the platform's description file; the
/// serialized form omits unset and empty fields.
pub trait PluginDescription: Serialize + fmt::Debug {
    /// Platform this description targets.
    const PLATFORM: Platform;

    /// Fill unset fields from the project context. Explicit values win.
    fn apply_defaults(&mut self, project: &ProjectContext);

    /// Validate a fully defaulted description, stopping at the first violation.
    fn validate(&self, rules: &PlatformRules) -> Result<(), InvalidDescriptor>;

    /// Whether a separate libraries file should be generated.
    fn generate_libraries_json(&self) -> bool {
        false
    }

    /// Runtime libraries listed in the description file itself.
    ///
    /// `None` for platforms whose schema has no `libraries` field.
    fn libraries_mut(&mut self) -> Option<&mut Vec<String>> {
        None
    }

    /// Plugin name, once set.
    fn name(&self) -> Option<&str>;
}

/// When the plugin is loaded during server startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoadOrder {
    #[serde(alias = "startup")]
    Startup,
    #[serde(alias = "postworld")]
    PostWorld,
}

/// Copy `value` into `field` when the field is unset.
pub fn fill_default(field: &mut Option<String>, value: Option<&str>) {
    if field.is_none() {
        *field = value.map(str::to_owned);
    }
}

/// Whether an optional string would serialize as nothing.
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}
