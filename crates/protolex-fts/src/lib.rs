//! Full-text search for the Protolex catalog.
//!
//! Build a [`SearchIndex`] once per corpus with [`build_index`], then run
//! [`SearchQuery`] values against it with [`search`] or [`execute`].

#![doc = include_str!("../README.md")]

pub mod index;
pub mod persistence;
pub mod query;
pub mod tokenizer;
pub mod types;

pub use index::{build_index, SearchIndex};
pub use persistence::{is_index_fresh, load_index, save_index, IndexMetadata, PersistedIndex};
pub use query::{execute, search, search_with_config};
pub use tokenizer::tokenize;
pub use types::{Field, SearchConfig, SearchQuery, SearchResults, DEFAULT_LIMIT, MAX_LIMIT};
