//! Reference graph for the Protolex catalog.
//!
//! # Key Abstractions
//!
//! - [`ProtocolGraph`]: directed graph keyed by protocol id
//! - [`build_graph`]: resolves `relatedProtocols` under a [`ReferencePolicy`]

#![doc = include_str!("../README.md")]

pub mod builder;
pub mod graph;
pub mod persistence;
pub mod query;
pub mod stats;

pub use builder::{build_graph, GraphBuild, ReferencePolicy};
pub use graph::{ProtocolGraph, ProtocolNode};
pub use persistence::{is_graph_fresh, load_graph, save_graph, GraphMetadata};
pub use query::{NodeSummary, PathResponse, RelatedResponse};
pub use stats::{compute_stats, top_nodes_by_degree, DegreeDirection, GraphStats};
