//! Utility modules shared across Protolex crates.
//!
//! # Modules
//!
//! - [`ids`]: Slug validation for record ids
//! - [`text`]: Statement normalisation used for duplicate detection
//! - [`paths`]: Tilde expansion for configured paths
//! - [`fingerprint`]: Content hashes of a record set

pub mod fingerprint;
pub mod ids;
pub mod paths;
pub mod text;
