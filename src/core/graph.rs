//! Dependency graph
//!
//! Nodes are component identifiers; an edge `dep -> dependent` means `dep`
//! must be built first. The graph is built fresh for every run by expanding
//! the requested identifiers breadth-first through the introspector.
//! Cycles are allowed here and rejected by [`crate::core::resolver`].

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Write as _;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::identifier::ComponentId;
use crate::core::introspect::RecipeIntrospector;
use crate::error::TreebuildError;

/// Directed dependency graph over component identifiers
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<ComponentId, ()>,
    node_map: HashMap<ComponentId, NodeIndex>,
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its index. Adding a known node is a no-op.
    pub fn add_component(&mut self, id: &ComponentId) -> NodeIndex {
        if let Some(idx) = self.node_map.get(id) {
            return *idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.node_map.insert(id.clone(), idx);
        idx
    }

    /// Record that `dependent` needs `dependency` built first
    ///
    /// Both nodes are added if missing; repeating an edge is a no-op.
    pub fn add_dependency(&mut self, dependent: &ComponentId, dependency: &ComponentId) {
        let from = self.add_component(dependency);
        let to = self.add_component(dependent);
        self.graph.update_edge(from, to, ());
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All nodes, sorted
    pub fn components(&self) -> Vec<ComponentId> {
        let mut nodes: Vec<ComponentId> = self.node_map.keys().cloned().collect();
        nodes.sort();
        nodes
    }

    /// All `(dependency, dependent)` edges, sorted
    pub fn edges(&self) -> Vec<(ComponentId, ComponentId)> {
        let mut edges: Vec<(ComponentId, ComponentId)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (self.graph[a].clone(), self.graph[b].clone()))
            .collect();
        edges.sort();
        edges
    }

    /// Underlying petgraph graph
    pub(crate) fn inner(&self) -> &DiGraph<ComponentId, ()> {
        &self.graph
    }

    /// Format as DOT graph, edges pointing from dependency to dependent
    pub fn to_dot(&self) -> String {
        let mut output = String::new();
        output.push_str("digraph dependencies {\n");
        output.push_str("    rankdir=BT;\n");
        output.push_str("    node [shape=box];\n");
        output.push('\n');

        for id in self.components() {
            let _ = writeln!(output, "    \"{id}\";");
        }
        output.push('\n');

        for (dependency, dependent) in self.edges() {
            let _ = writeln!(output, "    \"{dependency}\" -> \"{dependent}\";");
        }

        output.push_str("}\n");
        output
    }
}

/// Expand `requested` into the full transitive dependency graph
///
/// Every requested identifier becomes a node even if nothing depends on it.
/// Each identifier is introspected at most once, so cyclic declarations
/// terminate and are left for the scheduler to report.
pub fn build_graph(
    introspector: &mut RecipeIntrospector<'_>,
    requested: &[ComponentId],
) -> Result<DependencyGraph, TreebuildError> {
    let mut graph = DependencyGraph::new();
    let mut expanded: HashSet<ComponentId> = HashSet::new();
    let mut queue: VecDeque<ComponentId> = requested.iter().cloned().collect();

    while let Some(current) = queue.pop_front() {
        graph.add_component(&current);
        if !expanded.insert(current.clone()) {
            continue;
        }

        for dependency in introspector.get_dependencies(&current)? {
            graph.add_dependency(&current, &dependency);
            if !expanded.contains(&dependency) {
                queue.push_back(dependency);
            }
        }
    }

    tracing::info!(
        "Dependency graph has {} components and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
