//! Plugin permissions.
//!
//! Children are an ordered list of permission names in memory. Description
//! files express them as a `name: true` mapping, so that shape only exists at
//! the serialization boundary. Input accepts either shape; `false` entries of
//! a mapping carry no meaning and are dropped.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::description::is_blank;

/// A permission declared by the plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Permission {
    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<PermissionDefault>,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_children",
        deserialize_with = "deserialize_children"
    )]
    pub children: Vec<String>,
}

/// Who holds a permission by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDefault {
    True,
    False,
    Op,
    NotOp,
}

impl PermissionDefault {
    /// Token used in description files.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionDefault::True => "true",
            PermissionDefault::False => "false",
            PermissionDefault::Op => "op",
            PermissionDefault::NotOp => "!op",
        }
    }
}

impl fmt::Display for PermissionDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionDefault {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "true" => Ok(PermissionDefault::True),
            "false" => Ok(PermissionDefault::False),
            "op" => Ok(PermissionDefault::Op),
            "!op" | "not-op" | "not_op" => Ok(PermissionDefault::NotOp),
            other => Err(format!(
                "invalid permission default `{}`, expected one of: true, false, op, !op",
                other
            )),
        }
    }
}

impl Serialize for PermissionDefault {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PermissionDefault {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Token(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(true) => Ok(PermissionDefault::True),
            Raw::Bool(false) => Ok(PermissionDefault::False),
            Raw::Token(token) => token.parse().map_err(serde::de::Error::custom),
        }
    }
}

fn serialize_children<S: Serializer>(children: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(children.iter().map(|child| (child, true)))
}

fn deserialize_children<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Map(IndexMap<String, bool>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::List(children) => children,
        Raw::Map(children) => children
            .into_iter()
            .filter_map(|(name, granted)| granted.then_some(name))
            .collect(),
    })
}
