//! Plugin commands (Bukkit and Nukkit).

use serde::{Deserialize, Serialize};

use crate::core::description::is_blank;

/// A command registered by the plugin.
///
/// The command name is the key of the `commands` table and is not part of
/// the serialized value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Command {
    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub permission: Option<String>,

    #[serde(
        default,
        rename = "permission-message",
        skip_serializing_if = "is_blank"
    )]
    pub permission_message: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub usage: Option<String>,
}
