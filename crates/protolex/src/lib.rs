//! Protolex: integrity and retrieval engine for a protocol catalog.

#![doc = include_str!("../README.md")]

pub mod knowledge_base;

pub use knowledge_base::{EngineConfig, KnowledgeBase, Snapshot};

pub use protolex_content as content;
pub use protolex_fts as fts;
pub use protolex_graph as graph;
pub use protolex_quiz as quiz;

pub use protolex_core::{Error, Protocol, QuizQuestion, Result, ValidationReport, Violation};
