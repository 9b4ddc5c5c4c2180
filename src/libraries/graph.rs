//! A resolved dependency graph keyed by coordinate.
//!
//! This is the flat counterpart of [`ResolvedComponent`]: every coordinate
//! is a single node, and the project is a virtual root whose edges are the
//! direct dependencies.
//!
//! ```json
//! {
//!   "dependencies": ["com.example:a:1.0"],
//!   "components": {
//!     "com.example:a:1.0": ["com.example:b:2.0"],
//!     "com.example:b:2.0": []
//!   }
//! }
//! ```
//!
//! [`ResolvedComponent`]: super::collect::ResolvedComponent

use std::collections::HashMap;

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use super::collect::DependencyNode;

/// Serialized form of a [`DependencyGraph`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphSpec {
    /// Direct dependencies of the project
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Each component and its direct dependencies
    #[serde(default)]
    pub components: IndexMap<String, Vec<String>>,
}

/// The resolved dependency graph.
///
/// Immutable once built; nodes are read through [`GraphNode`] handles.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Node weights are coordinates; the project root has none
    graph: DiGraph<Option<String>, ()>,

    /// Map from coordinate to node index
    coordinate_to_node: HashMap<String, NodeIndex>,

    /// The project root
    root: NodeIndex,
}

impl DependencyGraph {
    /// Create a graph containing only the project root.
    pub fn new() -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(None);
        DependencyGraph {
            graph,
            coordinate_to_node: HashMap::new(),
            root,
        }
    }

    /// Build a graph from its serialized form.
    pub fn from_spec(spec: &GraphSpec) -> Self {
        let mut graph = DependencyGraph::new();
        for coordinate in spec.components.keys() {
            graph.add_component(coordinate);
        }
        for coordinate in &spec.dependencies {
            graph.add_direct_dependency(coordinate);
        }
        for (from, deps) in &spec.components {
            for to in deps {
                graph.add_edge(from, to);
            }
        }
        graph
    }

    /// Add a component, returning its node.
    pub fn add_component(&mut self, coordinate: &str) -> NodeIndex {
        if let Some(&node) = self.coordinate_to_node.get(coordinate) {
            return node;
        }
        let node = self.graph.add_node(Some(coordinate.to_string()));
        self.coordinate_to_node.insert(coordinate.to_string(), node);
        node
    }

    /// Add a dependency of the project itself.
    pub fn add_direct_dependency(&mut self, coordinate: &str) {
        let to = self.add_component(coordinate);
        if !self.graph.contains_edge(self.root, to) {
            self.graph.add_edge(self.root, to, ());
        }
    }

    /// Add a dependency edge between components.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from = self.add_component(from);
        let to = self.add_component(to);
        if !self.graph.contains_edge(from, to) {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Number of components, excluding the project root.
    pub fn len(&self) -> usize {
        self.coordinate_to_node.len()
    }

    /// Check if the graph has no components.
    pub fn is_empty(&self) -> bool {
        self.coordinate_to_node.is_empty()
    }

    /// Handle to the project root.
    pub fn root(&self) -> GraphNode<'_> {
        GraphNode {
            graph: self,
            index: self.root,
        }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// A node handle into a [`DependencyGraph`].
#[derive(Debug, Clone, Copy)]
pub struct GraphNode<'g> {
    graph: &'g DependencyGraph,
    index: NodeIndex,
}

impl DependencyNode for GraphNode<'_> {
    fn coordinate(&self) -> Option<&str> {
        self.graph.graph[self.index].as_deref()
    }

    fn children(&self) -> Vec<Self> {
        // petgraph yields the most recently added edge first
        let mut children: Vec<_> = self
            .graph
            .graph
            .neighbors(self.index)
            .map(|index| GraphNode {
                graph: self.graph,
                index,
            })
            .collect();
        children.reverse();
        children
    }

    fn identity(&self) -> Option<usize> {
        Some(self.index.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libraries::collect::collect_libraries;

    #[test]
    fn test_diamond() {
        let mut graph = DependencyGraph::new();
        graph.add_direct_dependency("A");
        graph.add_edge("A", "B");
        graph.add_edge("A", "C");
        graph.add_edge("B", "D");
        graph.add_edge("C", "D");

        assert_eq!(graph.len(), 4);
        let libraries = collect_libraries(Some(graph.root()), &[]);
        assert_eq!(libraries, vec!["A", "B", "D", "C"]);
    }

    #[test]
    fn test_children_keep_declaration_order() {
        let mut graph = DependencyGraph::new();
        graph.add_direct_dependency("z");
        graph.add_direct_dependency("a");
        graph.add_direct_dependency("m");

        let children: Vec<_> = graph
            .root()
            .children()
            .iter()
            .filter_map(|node| node.coordinate().map(str::to_string))
            .collect();
        assert_eq!(children, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_cycle_terminates() {
        let mut graph = DependencyGraph::new();
        graph.add_direct_dependency("A");
        graph.add_edge("A", "B");
        graph.add_edge("B", "A");

        assert_eq!(collect_libraries(Some(graph.root()), &[]), vec!["A", "B"]);
    }

    #[test]
    fn test_layered_shared_dependencies() {
        // every library of a layer depends on both libraries of the next,
        // so the number of paths doubles with each layer
        let layers = 40;
        let mut graph = DependencyGraph::new();
        graph.add_direct_dependency("l0a");
        graph.add_direct_dependency("l0b");
        for layer in 0..layers - 1 {
            for from in ["a", "b"] {
                for to in ["a", "b"] {
                    graph.add_edge(
                        &format!("l{layer}{from}"),
                        &format!("l{}{to}", layer + 1),
                    );
                }
            }
        }

        let libraries = collect_libraries(Some(graph.root()), &[]);
        assert_eq!(libraries.len(), layers * 2);
        assert_eq!(libraries[..4], ["l0a", "l1a", "l2a", "l3a"]);
        assert_eq!(libraries[layers - 1], format!("l{}a", layers - 1));
        assert_eq!(libraries[layers], format!("l{}b", layers - 1));
        assert_eq!(libraries.last().map(String::as_str), Some("l0b"));
    }

    #[test]
    fn test_from_spec() {
        let spec: GraphSpec = serde_json::from_str(
            r#"{
                "dependencies": ["g:a:1", "g:c:1"],
                "components": {"g:a:1": ["g:b:1"], "g:b:1": [], "g:c:1": ["g:b:1"]}
            }"#,
        )
        .unwrap();
        let graph = DependencyGraph::from_spec(&spec);

        assert_eq!(
            collect_libraries(Some(graph.root()), &[]),
            vec!["g:a:1", "g:b:1", "g:c:1"]
        );
    }

    #[test]
    fn test_unreachable_component_ignored() {
        let spec = GraphSpec {
            dependencies: vec!["a".to_string()],
            components: IndexMap::from([("orphan".to_string(), Vec::new())]),
        };
        let graph = DependencyGraph::from_spec(&spec);
        assert_eq!(collect_libraries(Some(graph.root()), &[]), vec!["a"]);
    }
}
