//! Graph persistence.
//!
//! The graph is written as JSON (`nodes`, `edges`, `metadata`) with nodes and
//! edges in sorted order, so the same corpus always produces the same file
//! apart from `built_at`. The petgraph structure is rebuilt on load.

use crate::graph::{ProtocolGraph, ProtocolNode};
use chrono::{SecondsFormat, Utc};
use protolex_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Serializable types
// ============================================================================

/// On-disk form of a [`ProtocolGraph`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerializableGraph {
    pub nodes: Vec<ProtocolNode>,
    /// Edges as `[from, to]` pairs.
    pub edges: Vec<(String, String)>,
    pub metadata: Option<GraphMetadata>,
}

/// Metadata about a persisted graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMetadata {
    /// RFC 3339 build time.
    pub built_at: String,
    pub builder_version: String,
    /// Corpus fingerprint the graph was built from.
    pub fingerprint: Option<String>,
}

impl GraphMetadata {
    /// Metadata stamped now for the given corpus fingerprint.
    pub fn for_fingerprint(fingerprint: impl Into<String>) -> Self {
        Self {
            fingerprint: Some(fingerprint.into()),
            ..Default::default()
        }
    }
}

impl Default for GraphMetadata {
    fn default() -> Self {
        Self {
            built_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            builder_version: env!("CARGO_PKG_VERSION").to_string(),
            fingerprint: None,
        }
    }
}

impl SerializableGraph {
    /// Snapshot a graph.
    pub fn from_graph(graph: &ProtocolGraph, metadata: Option<GraphMetadata>) -> Self {
        Self {
            nodes: graph.nodes().into_iter().cloned().collect(),
            edges: graph
                .edges()
                .into_iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            metadata,
        }
    }

    /// Rebuild the graph.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if an edge names a node that is not in `nodes`.
    pub fn into_graph(self) -> Result<ProtocolGraph> {
        let mut graph = ProtocolGraph::new();
        for node in self.nodes {
            graph.add_node(node);
        }
        for (from, to) in &self.edges {
            graph
                .add_edge(from, to)
                .map_err(|e| Error::parse(format!("graph edge {from} -> {to}: {e}")))?;
        }
        Ok(graph)
    }
}

// ============================================================================
// Save / Load
// ============================================================================

/// Serialize a graph to pretty JSON.
pub fn graph_to_json(graph: &ProtocolGraph, metadata: Option<GraphMetadata>) -> Result<String> {
    serde_json::to_string_pretty(&SerializableGraph::from_graph(graph, metadata))
        .map_err(|e| Error::serialization(format!("failed to serialize graph: {e}")))
}

/// Save a graph to a JSON file, creating parent directories.
pub fn save_graph(
    graph: &ProtocolGraph,
    path: impl AsRef<Path>,
    metadata: Option<GraphMetadata>,
) -> Result<()> {
    let path = path.as_ref();
    let json = graph_to_json(graph, metadata)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    std::fs::write(path, json).map_err(|e| Error::io_with_path(e, path))?;

    log::debug!("saved graph to {}", path.display());
    Ok(())
}

/// Load a graph from a JSON file.
pub fn load_graph(path: impl AsRef<Path>) -> Result<ProtocolGraph> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    load_graph_from_str(&json)
}

/// Load a graph from a JSON string.
pub fn load_graph_from_str(json: &str) -> Result<ProtocolGraph> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|e| Error::parse(format!("failed to parse graph JSON: {e}")))?;
    serializable.into_graph()
}

/// True if the file at `path` holds a graph built from `fingerprint`.
pub fn is_graph_fresh(path: impl AsRef<Path>, fingerprint: &str) -> bool {
    std::fs::read_to_string(path.as_ref())
        .ok()
        .and_then(|json| serde_json::from_str::<SerializableGraph>(&json).ok())
        .and_then(|graph| graph.metadata)
        .and_then(|meta| meta.fingerprint)
        .is_some_and(|cached| cached == fingerprint)
}

// ============================================================================
// Tests
// ============================================================================
