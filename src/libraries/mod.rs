//! Runtime libraries: graph flattening, repositories and the libraries file.

pub mod collect;
pub mod graph;
pub mod repository;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::fs;

pub use collect::{collect_libraries, DependencyNode, ResolvedComponent};
pub use graph::{DependencyGraph, GraphNode, GraphSpec};
pub use repository::{ProxyConfig, RepositoryMap, RepositoryResolver, CENTRAL_URLS};

/// Contents of a `<platform>-libraries.json` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginLibraries {
    #[serde(default, skip_serializing_if = "RepositoryMap::is_empty")]
    pub repositories: RepositoryMap,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl PluginLibraries {
    /// Compact JSON text.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A resolved dependency graph as read from disk.
///
/// Either a nested tree of components or the flat
/// `dependencies`/`components` form.
#[derive(Debug, Clone)]
pub enum GraphFile {
    Tree(ResolvedComponent),
    Flat(DependencyGraph),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGraphFile {
    Flat(GraphSpec),
    Tree(ResolvedComponent),
}

impl GraphFile {
    /// Parse graph JSON text.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        Ok(match serde_json::from_str(text)? {
            RawGraphFile::Flat(spec) => GraphFile::Flat(DependencyGraph::from_spec(&spec)),
            RawGraphFile::Tree(tree) => GraphFile::Tree(tree),
        })
    }

    /// Read and parse a graph file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
            .with_context(|| format!("failed to parse dependency graph {}", path.display()))
    }

    /// The project root of this graph.
    pub fn root(&self) -> GraphRoot<'_> {
        match self {
            GraphFile::Tree(tree) => GraphRoot::Tree(tree),
            GraphFile::Flat(graph) => GraphRoot::Flat(graph.root()),
        }
    }

    /// Collect the libraries of this graph after `seed`.
    pub fn collect(&self, seed: &[String]) -> Vec<String> {
        collect_libraries(Some(self.root()), seed)
    }
}

/// A node of either graph form.
#[derive(Debug, Clone, Copy)]
pub enum GraphRoot<'a> {
    Tree(&'a ResolvedComponent),
    Flat(GraphNode<'a>),
}

impl DependencyNode for GraphRoot<'_> {
    fn coordinate(&self) -> Option<&str> {
        match self {
            GraphRoot::Tree(node) => node.coordinate.as_deref(),
            GraphRoot::Flat(node) => node.coordinate(),
        }
    }

    fn children(&self) -> Vec<Self> {
        match self {
            GraphRoot::Tree(node) => node.children.iter().map(GraphRoot::Tree).collect(),
            GraphRoot::Flat(node) => node.children().into_iter().map(GraphRoot::Flat).collect(),
        }
    }

    fn identity(&self) -> Option<usize> {
        match self {
            GraphRoot::Tree(_) => None,
            GraphRoot::Flat(node) => node.identity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_members_omitted() {
        assert_eq!(PluginLibraries::default().to_json().unwrap(), "{}");

        let libraries = PluginLibraries {
            repositories: RepositoryMap::from([(
                "paper".to_string(),
                "https://repo.papermc.io/repository/maven-public/".to_string(),
            )]),
            dependencies: vec!["com.google.code.gson:gson:2.10.1".to_string()],
        };
        assert_eq!(
            libraries.to_json().unwrap(),
            r#"{"repositories":{"paper":"https://repo.papermc.io/repository/maven-public/"},"dependencies":["com.google.code.gson:gson:2.10.1"]}"#
        );
    }

    #[test]
    fn test_parse_both_graph_forms() {
        let flat = GraphFile::parse(r#"{"dependencies":["a"],"components":{"a":["b"]}}"#).unwrap();
        assert!(matches!(flat, GraphFile::Flat(_)));
        assert_eq!(flat.collect(&[]), vec!["a", "b"]);

        let tree =
            GraphFile::parse(r#"{"children":[{"coordinate":"a","children":[{"coordinate":"b"}]}]}"#)
                .unwrap();
        assert!(matches!(tree, GraphFile::Tree(_)));
        assert_eq!(tree.collect(&["z".to_string()]), vec!["z", "a", "b"]);
    }

    #[test]
    fn test_load_missing_graph() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = GraphFile::load(&tmp.path().join("graph.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read file"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(GraphFile::parse(r#"{"nodes": 1}"#).is_err());
    }
}
