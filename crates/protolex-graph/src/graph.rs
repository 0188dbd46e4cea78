//! The protocol reference graph.
//!
//! One node per protocol id, one directed edge per resolved
//! `relatedProtocols` entry. Edges are exactly what the authors wrote: the
//! graph never synthesizes a reverse edge, so `neighbors("a")` containing
//! `"b"` says nothing about `neighbors("b")`.
//!
//! Cycles are normal here (TCP and UDP list each other) and are only
//! reported, never rejected.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use protolex_core::{Category, Error, Protocol, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

// ============================================================================
// Node type
// ============================================================================

/// Graph node: the parts of a protocol record navigation needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolNode {
    pub id: String,
    pub name: String,
    /// `None` when the record's category is outside the closed set.
    pub category: Option<Category>,
}

impl ProtocolNode {
    /// Create a node.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

impl From<&Protocol> for ProtocolNode {
    fn from(record: &Protocol) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            category: record.category(),
        }
    }
}

// ============================================================================
// Graph
// ============================================================================

/// Directed graph over protocol ids.
#[derive(Clone, Debug, Default)]
pub struct ProtocolGraph {
    pub(crate) graph: DiGraph<ProtocolNode, ()>,
    pub(crate) node_indices: HashMap<String, NodeIndex>,
}

impl ProtocolGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. If the id is already present the existing node is kept.
    pub fn add_node(&mut self, node: ProtocolNode) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(&node.id) {
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.node_indices.insert(id, idx);
        idx
    }

    /// Add a directed edge between two existing nodes.
    ///
    /// Returns `Ok(false)` if the edge already exists.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if either endpoint is not a node.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<bool> {
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;
        if self.graph.find_edge(from_idx, to_idx).is_some() {
            return Ok(false);
        }
        self.graph.add_edge(from_idx, to_idx, ());
        Ok(true)
    }

    fn index_of(&self, id: &str) -> Result<NodeIndex> {
        self.node_indices
            .get(id)
            .copied()
            .ok_or_else(|| Error::not_found(format!("protocol {id:?} is not in the graph")))
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True if `id` is a node.
    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Node by id.
    pub fn node(&self, id: &str) -> Option<&ProtocolNode> {
        self.node_indices.get(id).map(|&idx| &self.graph[idx])
    }

    /// Node ids in ascending order.
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.node_indices.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> Vec<&ProtocolNode> {
        self.node_ids()
            .into_iter()
            .filter_map(|id| self.node(id))
            .collect()
    }

    /// Every edge as `(from, to)`, sorted.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges: Vec<(&str, &str)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (self.graph[a].id.as_str(), self.graph[b].id.as_str()))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Outgoing adjacency `id -> set<id>` for every node.
    pub fn adjacency(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        self.node_ids()
            .into_iter()
            .map(|id| (id, self.neighbors(id)))
            .collect()
    }

    /// Ids this protocol lists in `relatedProtocols` (that resolved).
    ///
    /// Unknown ids yield an empty set.
    pub fn neighbors(&self, id: &str) -> BTreeSet<&str> {
        self.adjacent(id, Direction::Outgoing)
    }

    /// Ids of protocols that list this one.
    pub fn incoming(&self, id: &str) -> BTreeSet<&str> {
        self.adjacent(id, Direction::Incoming)
    }

    fn adjacent(&self, id: &str, direction: Direction) -> BTreeSet<&str> {
        match self.node_indices.get(id) {
            Some(&idx) => self
                .graph
                .neighbors_directed(idx, direction)
                .map(|n| self.graph[n].id.as_str())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// Breadth-first distances from `id` following outgoing edges, up to
    /// `max_hops`. The start node is included at distance 0.
    fn distances(&self, id: &str, max_hops: usize) -> Vec<(NodeIndex, usize)> {
        let Some(&start) = self.node_indices.get(id) else {
            return Vec::new();
        };

        let mut visited: HashMap<NodeIndex, usize> = HashMap::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        visited.insert(start, 0);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let depth = visited[&current];
            order.push((current, depth));
            if depth == max_hops {
                continue;
            }
            for next in self.graph.neighbors_directed(current, Direction::Outgoing) {
                if !visited.contains_key(&next) {
                    visited.insert(next, depth + 1);
                    queue.push_back(next);
                }
            }
        }

        order
    }

    /// True if `to` can be reached from `from` in at most `max_hops` edges.
    ///
    /// A node reaches itself in zero hops. Unknown ids are never reachable.
    pub fn is_reachable(&self, from: &str, to: &str, max_hops: usize) -> bool {
        let Some(&target) = self.node_indices.get(to) else {
            return false;
        };
        self.distances(from, max_hops)
            .iter()
            .any(|(idx, _)| *idx == target)
    }

    /// Protocols within `radius` hops of `id` (outgoing edges), excluding `id`
    /// itself, ordered by distance then id.
    pub fn neighborhood(&self, id: &str, radius: usize) -> Vec<(&str, usize)> {
        let mut found: Vec<(&str, usize)> = self
            .distances(id, radius)
            .into_iter()
            .filter(|(_, d)| *d > 0)
            .map(|(idx, d)| (self.graph[idx].id.as_str(), d))
            .collect();
        found.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        found
    }

    /// Shortest path of ids from `from` to `to` following outgoing edges.
    ///
    /// When several shortest paths exist, neighbors are explored in ascending
    /// id order so the result is deterministic.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<Vec<&str>> {
        let start = *self.node_indices.get(from)?;
        let goal = *self.node_indices.get(to)?;

        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        let mut seen = BTreeSet::from([start]);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                let mut path = vec![self.graph[current].id.as_str()];
                let mut cursor = current;
                while let Some(&prev) = parent.get(&cursor) {
                    path.push(self.graph[prev].id.as_str());
                    cursor = prev;
                }
                path.reverse();
                return Some(path);
            }

            let mut next: Vec<NodeIndex> = self
                .graph
                .neighbors_directed(current, Direction::Outgoing)
                .collect();
            next.sort_by(|a, b| self.graph[*a].id.cmp(&self.graph[*b].id));
            for n in next {
                if seen.insert(n) {
                    parent.insert(n, current);
                    queue.push_back(n);
                }
            }
        }

        None
    }

    /// Protocols with no incoming and no outgoing edges, ascending.
    pub fn orphans(&self) -> Vec<&str> {
        self.node_ids()
            .into_iter()
            .filter(|id| self.neighbors(id).is_empty() && self.incoming(id).is_empty())
            .collect()
    }

    /// Groups of protocols that reference each other in a cycle.
    ///
    /// Each group is a strongly connected component with more than one
    /// member, ids sorted; groups are sorted by their first id.
    pub fn cycles(&self) -> Vec<Vec<&str>> {
        let mut groups: Vec<Vec<&str>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut ids: Vec<&str> = scc.iter().map(|&i| self.graph[i].id.as_str()).collect();
                ids.sort_unstable();
                ids
            })
            .collect();
        groups.sort();
        groups
    }

    /// True if any cycle exists.
    pub fn has_cycles(&self) -> bool {
        !self.cycles().is_empty()
    }

    /// Edges `a -> b` for which `b -> a` does not exist, sorted.
    pub fn asymmetric_links(&self) -> Vec<(&str, &str)> {
        self.edges()
            .into_iter()
            .filter(|(from, to)| !self.neighbors(to).contains(from))
            .collect()
    }
}

impl PartialEq for ProtocolGraph {
    /// Graphs are equal when they hold the same nodes and the same edges,
    /// regardless of insertion order.
    fn eq(&self, other: &Self) -> bool {
        self.nodes() == other.nodes() && self.edges() == other.edges()
    }
}

impl Eq for ProtocolGraph {}

// ============================================================================
// Tests
// ============================================================================
