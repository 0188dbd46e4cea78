//! Graph statistics.
//!
//! Degree distribution, category breakdown and top-node rankings for the
//! `graph stats` command.

use crate::graph::ProtocolGraph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Types
// ============================================================================

/// Summary statistics about a reference graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Nodes per category label; `"uncategorized"` collects the rest.
    pub category_distribution: BTreeMap<String, usize>,
    /// Protocols with neither incoming nor outgoing references.
    pub orphan_count: usize,
    /// Edges `a -> b` without the matching `b -> a`.
    pub asymmetric_count: usize,
    /// Number of reference cycles.
    pub cycle_count: usize,
    /// Average edges per node (in + out).
    pub avg_degree: f32,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    /// Protocol listed by the most others.
    pub most_referenced: Option<String>,
    /// Protocol listing the most others.
    pub most_references: Option<String>,
}

/// Direction for degree calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegreeDirection {
    /// Incoming edges only.
    In,
    /// Outgoing edges only.
    Out,
    /// Both directions.
    #[default]
    Both,
}

// ============================================================================
// Functions
// ============================================================================

/// Compute statistics for a graph.
pub fn compute_stats(graph: &ProtocolGraph) -> GraphStats {
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();

    let mut category_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for node in graph.nodes() {
        let label = node
            .category
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| "uncategorized".to_string());
        *category_distribution.entry(label).or_insert(0) += 1;
    }

    let avg_degree = if node_count > 0 {
        (2 * edge_count) as f32 / node_count as f32
    } else {
        0.0
    };

    let (most_referenced, max_in_degree) = leader(graph, DegreeDirection::In);
    let (most_references, max_out_degree) = leader(graph, DegreeDirection::Out);

    GraphStats {
        node_count,
        edge_count,
        category_distribution,
        orphan_count: graph.orphans().len(),
        asymmetric_count: graph.asymmetric_links().len(),
        cycle_count: graph.cycles().len(),
        avg_degree,
        max_in_degree,
        max_out_degree,
        most_referenced,
        most_references,
    }
}

fn leader(graph: &ProtocolGraph, direction: DegreeDirection) -> (Option<String>, usize) {
    top_nodes_by_degree(graph, 1, direction)
        .into_iter()
        .next()
        .map(|(id, degree)| (Some(id), degree))
        .unwrap_or((None, 0))
}

/// Quick one-line size summary.
pub fn quick_summary(graph: &ProtocolGraph) -> String {
    format!("{} protocols, {} references", graph.node_count(), graph.edge_count())
}

/// Top `limit` protocols by degree, highest first; ties by ascending id.
pub fn top_nodes_by_degree(
    graph: &ProtocolGraph,
    limit: usize,
    direction: DegreeDirection,
) -> Vec<(String, usize)> {
    let mut scores: Vec<(String, usize)> = graph
        .node_ids()
        .into_iter()
        .map(|id| {
            let degree = match direction {
                DegreeDirection::In => graph.incoming(id).len(),
                DegreeDirection::Out => graph.neighbors(id).len(),
                DegreeDirection::Both => graph.incoming(id).len() + graph.neighbors(id).len(),
            };
            (id.to_string(), degree)
        })
        .collect();

    scores.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scores.truncate(limit);
    scores
}

// ============================================================================
// Tests
// ============================================================================
