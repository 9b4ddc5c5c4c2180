//! Flattening a resolved dependency graph into a library list.

use std::collections::HashSet;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A node of a resolved dependency graph.
///
/// Nodes are lightweight handles; the graph itself is owned elsewhere and
/// is only read.
pub trait DependencyNode: Sized {
    /// Library coordinate of this node, or `None` for the project root.
    fn coordinate(&self) -> Option<&str>;

    /// Direct dependencies, in declaration order.
    fn children(&self) -> Vec<Self>;

    /// Identity of a node whose children never differ between visits.
    ///
    /// Once such a node has been fully walked it is skipped when reached
    /// again. Tree nodes return `None`: the same coordinate may carry
    /// different children at different places in a tree.
    fn identity(&self) -> Option<usize> {
        None
    }
}

/// An owned dependency tree, as exported by a build tool.
///
/// ```json
/// {"children": [{"coordinate": "com.example:lib:1.0", "children": []}]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolvedComponent {
    /// Library coordinate; absent on the project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<String>,

    /// Direct dependencies
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResolvedComponent>,
}

impl ResolvedComponent {
    /// A library node without children.
    pub fn library(coordinate: impl Into<String>) -> Self {
        ResolvedComponent {
            coordinate: Some(coordinate.into()),
            children: Vec::new(),
        }
    }

    /// A project root node.
    pub fn project(children: Vec<ResolvedComponent>) -> Self {
        ResolvedComponent {
            coordinate: None,
            children,
        }
    }

    /// Add a child node.
    pub fn with_child(mut self, child: ResolvedComponent) -> Self {
        self.children.push(child);
        self
    }
}

impl DependencyNode for &ResolvedComponent {
    fn coordinate(&self) -> Option<&str> {
        self.coordinate.as_deref()
    }

    fn children(&self) -> Vec<Self> {
        self.children.iter().collect()
    }
}

/// Collect the unique library coordinates reachable from `root`.
///
/// `seed` entries come first, then coordinates in depth-first pre-order,
/// children in declaration order. A coordinate that is met again is not
/// repeated, but its subtree is still walked unless the node has an
/// [`identity`](DependencyNode::identity) and was already walked. A
/// coordinate already on the current path is not entered again, which
/// breaks cycles.
pub fn collect_libraries<N: DependencyNode>(root: Option<N>, seed: &[String]) -> Vec<String> {
    let mut walk = Walk {
        libraries: seed.iter().cloned().collect(),
        path: Vec::new(),
        expanded: HashSet::new(),
    };

    if let Some(root) = root {
        walk.visit(&root);
    }

    walk.libraries.into_iter().collect()
}

struct Walk {
    libraries: IndexSet<String>,
    path: Vec<String>,
    expanded: HashSet<usize>,
}

impl Walk {
    fn visit<N: DependencyNode>(&mut self, node: &N) {
        let identity = node.identity();
        if identity.is_some_and(|id| self.expanded.contains(&id)) {
            return;
        }

        let entered = match node.coordinate() {
            Some(coordinate) => {
                if self.path.iter().any(|c| c == coordinate) {
                    tracing::debug!("Dependency cycle through `{}`", coordinate);
                    return;
                }
                if !self.libraries.contains(coordinate) {
                    self.libraries.insert(coordinate.to_string());
                }
                self.path.push(coordinate.to_string());
                true
            }
            None => false,
        };

        for child in node.children() {
            self.visit(&child);
        }

        if entered {
            self.path.pop();
        }
        if let Some(id) = identity {
            self.expanded.insert(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> ResolvedComponent {
        let d = ResolvedComponent::library("D");
        ResolvedComponent::library("A")
            .with_child(ResolvedComponent::library("B").with_child(d.clone()))
            .with_child(ResolvedComponent::library("C").with_child(d))
    }

    #[test]
    fn test_diamond_deduplicated() {
        let root = diamond();
        let libraries = collect_libraries(Some(&root), &[]);
        assert_eq!(libraries, vec!["A", "B", "D", "C"]);
    }

    #[test]
    fn test_no_root_returns_seed() {
        let seed = vec!["x:y:1".to_string(), "x:y:1".to_string()];
        let libraries = collect_libraries::<&ResolvedComponent>(None, &seed);
        assert_eq!(libraries, vec!["x:y:1"]);
    }

    #[test]
    fn test_seed_first_and_deduplicated() {
        let root = diamond();
        let seed = vec!["Z".to_string(), "C".to_string()];
        let libraries = collect_libraries(Some(&root), &seed);
        assert_eq!(libraries, vec!["Z", "C", "A", "B", "D"]);
    }

    #[test]
    fn test_project_root_not_emitted() {
        let root = ResolvedComponent::project(vec![
            ResolvedComponent::library("a:a:1"),
            ResolvedComponent::library("b:b:1"),
        ]);
        assert_eq!(collect_libraries(Some(&root), &[]), vec!["a:a:1", "b:b:1"]);
    }

    #[test]
    fn test_rediscovered_subtree_still_walked() {
        // the second B carries a child the first one does not
        let root = ResolvedComponent::project(vec![
            ResolvedComponent::library("B"),
            ResolvedComponent::library("C")
                .with_child(ResolvedComponent::library("B").with_child(ResolvedComponent::library("E"))),
        ]);
        assert_eq!(collect_libraries(Some(&root), &[]), vec!["B", "C", "E"]);
    }

    #[test]
    fn test_deterministic() {
        let root = diamond();
        let first = collect_libraries(Some(&root), &[]);
        let second = collect_libraries(Some(&root), &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_tree_json() {
        let root: ResolvedComponent = serde_json::from_str(
            r#"{"children": [{"coordinate": "g:a:1", "children": [{"coordinate": "g:b:2"}]}]}"#,
        )
        .unwrap();
        assert_eq!(collect_libraries(Some(&root), &[]), vec!["g:a:1", "g:b:2"]);
    }
}
