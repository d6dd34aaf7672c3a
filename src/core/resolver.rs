//! Build order scheduling
//!
//! Handles computing the build order and detecting dependency cycles.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::core::graph::DependencyGraph;
use crate::core::identifier::ComponentId;
use crate::error::ResolverError;

/// Total build order; every dependency precedes its dependents
pub type BuildOrder = Vec<ComponentId>;

/// Compute the build order of a dependency graph
///
/// Kahn's algorithm, always taking the smallest ready identifier next, so
/// the same graph yields the same order on every call.
pub fn compute_order(graph: &DependencyGraph) -> Result<BuildOrder, ResolverError> {
    let inner = graph.inner();

    let mut in_degree: HashMap<NodeIndex, usize> = inner
        .node_indices()
        .map(|n| (n, inner.neighbors_directed(n, Direction::Incoming).count()))
        .collect();

    let mut ready: BTreeSet<(&ComponentId, NodeIndex)> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(n, _)| (&inner[*n], *n))
        .collect();

    let mut order = Vec::with_capacity(inner.node_count());
    while let Some((id, node)) = ready.pop_first() {
        order.push(id.clone());
        for next in inner.neighbors_directed(node, Direction::Outgoing) {
            if let Some(degree) = in_degree.get_mut(&next) {
                *degree -= 1;
                if *degree == 0 {
                    ready.insert((&inner[next], next));
                }
            }
        }
    }

    if order.len() < inner.node_count() {
        let cycle = find_cycle(graph);
        tracing::debug!(
            "Scheduling stopped after {} of {} components",
            order.len(),
            inner.node_count()
        );
        return Err(ResolverError::CyclicDependency { cycle });
    }

    Ok(order)
}

/// One concrete cycle, closed on its first member
///
/// Picks the cyclic strongly connected component holding the smallest
/// identifier and walks the shortest path from that identifier back to
/// itself along "requires" edges, so `a -> b` reads as `a` needs `b`.
fn find_cycle(graph: &DependencyGraph) -> Vec<String> {
    let inner = graph.inner();

    let start = tarjan_scc(inner)
        .into_iter()
        .filter(|scc| scc.len() > 1 || inner.find_edge(scc[0], scc[0]).is_some())
        .filter_map(|scc| {
            let members: HashSet<NodeIndex> = scc.iter().copied().collect();
            let start = scc.into_iter().min_by(|a, b| inner[*a].cmp(&inner[*b]))?;
            Some((start, members))
        })
        .min_by(|(a, _), (b, _)| inner[*a].cmp(&inner[*b]));

    let Some((start, members)) = start else {
        return Vec::new();
    };

    // breadth-first from `start`, staying inside its component
    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    let mut closing = None;
    while let Some(node) = queue.pop_front() {
        let mut next: Vec<NodeIndex> = inner
            .neighbors_directed(node, Direction::Incoming)
            .filter(|n| members.contains(n))
            .collect();
        next.sort_by(|a, b| inner[*a].cmp(&inner[*b]));
        next.dedup();

        if next.contains(&start) {
            closing = Some(node);
            break;
        }
        for n in next {
            if n != start && !parent.contains_key(&n) {
                parent.insert(n, node);
                queue.push_back(n);
            }
        }
    }

    let mut path = Vec::new();
    let mut cursor = closing;
    while let Some(node) = cursor {
        path.push(inner[node].to_string());
        cursor = if node == start { None } else { parent.get(&node).copied() };
    }
    path.reverse();
    path.push(inner[start].to_string());
    path
}
