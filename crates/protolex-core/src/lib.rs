//! Protolex Core: record types, validation reports, errors, and utilities.
//!
//! This crate provides the foundational types used across all Protolex
//! crates. It has no internal Protolex dependencies.
//!
//! # Modules
//!
//! - [`model`]: `Protocol`, `QuizQuestion` and the closed taxonomies
//! - [`report`]: Accumulating `ValidationReport`
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration abstraction
//! - [`util`]: Slug, text, path and fingerprint helpers

#![doc = include_str!("../README.md")]

pub mod error;
pub mod model;
pub mod report;
pub mod traits;
pub mod util;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use model::{
    Category, Difficulty, Example, Protocol, QuizQuestion, Resource, ResourceType, StatementKind,
};
pub use report::{Severity, ValidationReport, Violation};
pub use traits::ConfigProvider;

pub use util::fingerprint::corpus_fingerprint;
pub use util::ids::is_valid_slug;
pub use util::text::normalize_statement;
