//! Query response types for graph navigation.
//!
//! Serializable shapes returned by the knowledge base and printed by the
//! CLI's `--json` output.

use crate::graph::{ProtocolGraph, ProtocolNode};
use protolex_core::{Error, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Node summary
// ============================================================================

/// Summary information about a protocol node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
}

impl From<&ProtocolNode> for NodeSummary {
    fn from(node: &ProtocolNode) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            category: node.category.map(|c| c.as_str().to_string()),
        }
    }
}

fn summary(graph: &ProtocolGraph, id: &str) -> Result<NodeSummary> {
    graph
        .node(id)
        .map(NodeSummary::from)
        .ok_or_else(|| Error::not_found(format!("protocol {id:?} is not in the graph")))
}

fn summaries<'a>(graph: &ProtocolGraph, ids: impl IntoIterator<Item = &'a str>) -> Vec<NodeSummary> {
    ids.into_iter()
        .filter_map(|id| graph.node(id))
        .map(NodeSummary::from)
        .collect()
}

// ============================================================================
// Related protocols
// ============================================================================

/// Protocols linked to a source protocol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedResponse {
    pub source: NodeSummary,
    /// Protocols the source lists in `relatedProtocols`.
    pub outgoing: Vec<NodeSummary>,
    /// Protocols that list the source.
    pub incoming: Vec<NodeSummary>,
    pub total_count: usize,
}

/// Build the related-protocols response for `id`.
///
/// # Errors
///
/// [`Error::NotFound`] if `id` is not a node.
pub fn related(graph: &ProtocolGraph, id: &str) -> Result<RelatedResponse> {
    let source = summary(graph, id)?;
    let outgoing = summaries(graph, graph.neighbors(id));
    let incoming = summaries(graph, graph.incoming(id));
    let total_count = outgoing.len() + incoming.len();

    Ok(RelatedResponse {
        source,
        outgoing,
        incoming,
        total_count,
    })
}

// ============================================================================
// Path
// ============================================================================

/// Shortest reference path between two protocols.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResponse {
    pub from: NodeSummary,
    pub to: NodeSummary,
    /// Nodes in order, including both endpoints. Empty when not found.
    pub path: Vec<NodeSummary>,
    pub found: bool,
    /// Number of edges on the path.
    pub length: usize,
}

/// Build the path response from `from` to `to`.
///
/// # Errors
///
/// [`Error::NotFound`] if either endpoint is not a node. An unreachable
/// target is not an error; it yields `found: false`.
pub fn path(graph: &ProtocolGraph, from: &str, to: &str) -> Result<PathResponse> {
    let from_summary = summary(graph, from)?;
    let to_summary = summary(graph, to)?;

    let steps = graph.shortest_path(from, to).unwrap_or_default();
    let found = !steps.is_empty();
    let length = steps.len().saturating_sub(1);

    Ok(PathResponse {
        from: from_summary,
        to: to_summary,
        path: summaries(graph, steps),
        found,
        length,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_graph, ReferencePolicy};
    use protolex_core::fixtures::sample_corpus;

    fn sample_graph() -> ProtocolGraph {
        build_graph(&sample_corpus(), ReferencePolicy::Lenient).graph
    }

    #[test]
    fn test_related_lists_both_directions() {
        let graph = sample_graph();
        let response = related(&graph, "kerberos").unwrap();

        assert_eq!(response.source.name, "Kerberos");
        assert_eq!(response.source.category.as_deref(), Some("Security"));
        let out: Vec<_> = response.outgoing.iter().map(|n| n.id.as_str()).collect();
        let inc: Vec<_> = response.incoming.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(out, vec!["ldap"]);
        assert_eq!(inc, vec!["ldap"]);
        assert_eq!(response.total_count, 2);
    }

    #[test]
    fn test_related_unknown_id() {
        let err = related(&sample_graph(), "gopher").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_path_found() {
        let graph = sample_graph();
        let response = path(&graph, "ssh", "dns").unwrap();

        assert!(response.found);
        let ids: Vec<_> = response.path.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["ssh", "tcp", "udp", "dns"]);
        assert_eq!(response.length, 3);
    }

    #[test]
    fn test_path_not_found() {
        let graph = sample_graph();
        let response = path(&graph, "kerberos", "tcp").unwrap();
        assert!(!response.found);
        assert!(response.path.is_empty());
        assert_eq!(response.length, 0);
    }

    #[test]
    fn test_response_serializes() {
        let response = related(&sample_graph(), "tcp").unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["source"]["id"], "tcp");
        assert!(json["outgoing"].is_array());
    }
}
