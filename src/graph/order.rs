//! Processing order for a revision run.
//!
//! This module provides the graph data structure and the depth-first ordering
//! that places every dependency before the files that mention it, with
//! explicit cycle detection.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::DependencyMap;
use crate::core::RevError;

/// Color states for the depth-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is on the current DFS path.
    Gray,
    /// Node and everything it depends on has been emitted.
    Black,
}

/// Directed graph of file references.
///
/// An edge `from -> to` means `from` mentions `to`, so `to` must be revisioned
/// before `from`.
pub struct DependencyGraph {
    /// The underlying directed graph.
    graph: DiGraph<String, ()>,
    /// Map from file names to their graph indices.
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds the graph over the files of `map` that have dependencies.
    ///
    /// Files without dependencies only appear as targets of other files'
    /// edges, if at all.
    pub fn from_map(map: &DependencyMap) -> Self {
        let mut graph = Self::new();
        for (file, deps) in map.iter() {
            for dep in deps {
                graph.add_dependency(file, dep);
            }
        }
        graph
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(name) {
            index
        } else {
            let index = self.graph.add_node(name.to_string());
            self.node_map.insert(name.to_string(), index);
            index
        }
    }

    /// Records that `from` references `to`.
    ///
    /// Repeated edges are stored once; a reference list naming the same file
    /// twice orders exactly like one naming it once.
    pub fn add_dependency(&mut self, from: &str, to: &str) {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);

        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    /// Direct dependencies of `node`, in the order they were added.
    fn dependencies_of(&self, node: NodeIndex) -> Vec<NodeIndex> {
        // petgraph yields neighbors most-recent first
        let mut deps: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        deps.reverse();
        deps
    }

    /// Checks the graph for cycles.
    pub fn detect_cycles(&self) -> Result<(), RevError> {
        self.topological_order().map(|_| ())
    }

    /// Every node, dependencies first.
    ///
    /// Nodes are visited in insertion order and dependencies in the order they
    /// were added, so the result is deterministic for a given graph.
    ///
    /// # Errors
    ///
    /// [`RevError::CyclicDependency`] with the cycle as
    /// `a.js -> b.js -> a.js`.
    pub fn topological_order(&self) -> Result<Vec<String>, RevError> {
        let mut colors = vec![Color::White; self.graph.node_count()];
        let mut path = Vec::new();
        let mut order = Vec::with_capacity(self.graph.node_count());

        for node in self.graph.node_indices() {
            if colors[node.index()] != Color::White {
                continue;
            }
            if let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path, &mut order) {
                let chain = cycle
                    .iter()
                    .map(|idx| self.graph[*idx].as_str())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(RevError::CyclicDependency {
                    chain,
                });
            }
        }

        Ok(order.into_iter().map(|idx| self.graph[idx].clone()).collect())
    }

    /// DFS visit emitting `node` after everything it depends on.
    ///
    /// Returns `Some(cycle_path)` if a gray node is reached again.
    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut [Color],
        path: &mut Vec<NodeIndex>,
        order: &mut Vec<NodeIndex>,
    ) -> Option<Vec<NodeIndex>> {
        colors[node.index()] = Color::Gray;
        path.push(node);

        for dep in self.dependencies_of(node) {
            match colors[dep.index()] {
                Color::Gray => {
                    let start = path.iter().position(|n| *n == dep).unwrap_or(0);
                    let mut cycle = path[start..].to_vec();
                    // Close the loop so the chain reads back to its start
                    cycle.push(dep);
                    return Some(cycle);
                }
                Color::White => {
                    if let Some(cycle) = self.dfs_visit(dep, colors, path, order) {
                        return Some(cycle);
                    }
                }
                Color::Black => {}
            }
        }

        path.pop();
        colors[node.index()] = Color::Black;
        order.push(node);
        None
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Orders every file of `map` so dependencies come before dependents.
///
/// Files without dependencies come first, in map order, followed by the files
/// with dependencies in depth-first order. Each file appears exactly once,
/// including standalone files that are also dependency targets.
///
/// # Errors
///
/// [`RevError::CyclicDependency`] if files reference each other in a loop.
pub fn processing_order(map: &DependencyMap) -> Result<Vec<String>, RevError> {
    let standalone: Vec<String> =
        map.iter().filter(|(_, deps)| deps.is_empty()).map(|(file, _)| file.to_string()).collect();

    let graph = DependencyGraph::from_map(map);
    let linked = graph.topological_order()?;

    debug!(
        "{} standalone files, {} linked files with {} edges",
        standalone.len(),
        graph.node_count(),
        graph.edge_count()
    );

    let seen: HashSet<&str> = standalone.iter().map(String::as_str).collect();
    let linked: Vec<String> = linked.into_iter().filter(|file| !seen.contains(file.as_str())).collect();

    let mut order = standalone;
    order.extend(linked);
    Ok(order)
}
