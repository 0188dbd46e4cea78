//! Schema validation and corpus loading for Protolex.
//!
//! # Modules
//!
//! - [`schema`]: Structural validation of protocol records
//! - [`quiz_records`]: Validation of authored quiz questions
//! - [`loader`]: JSON file and directory loading
//! - [`codes`]: Violation codes emitted by this crate

#![doc = include_str!("../README.md")]

pub mod codes;
pub mod loader;
pub mod quiz_records;
pub mod schema;

pub use loader::{load_protocols, load_quiz_questions};
pub use quiz_records::validate_quiz;
pub use schema::validate;
