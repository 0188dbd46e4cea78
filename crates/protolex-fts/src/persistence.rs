//! Index persistence.
//!
//! The index is stored as JSON next to a small metadata block. Because the
//! index uses ordered maps throughout, two builds of the same corpus produce
//! identical `index` sections.

use crate::index::SearchIndex;
use chrono::{SecondsFormat, Utc};
use protolex_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Metadata about a persisted index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMetadata {
    /// RFC 3339 build time.
    pub built_at: String,
    pub builder_version: String,
    /// Corpus fingerprint the index was built from.
    pub fingerprint: Option<String>,
    pub record_count: usize,
}

impl IndexMetadata {
    /// Metadata stamped now for `index`.
    pub fn new(index: &SearchIndex, fingerprint: Option<String>) -> Self {
        Self {
            built_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            builder_version: env!("CARGO_PKG_VERSION").to_string(),
            fingerprint,
            record_count: index.len(),
        }
    }
}

/// On-disk form: the index plus its metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistedIndex {
    pub metadata: IndexMetadata,
    pub index: SearchIndex,
}

/// Serialize an index with metadata to pretty JSON.
pub fn index_to_json(index: &SearchIndex, metadata: &IndexMetadata) -> Result<String> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        metadata: &'a IndexMetadata,
        index: &'a SearchIndex,
    }

    serde_json::to_string_pretty(&Borrowed { metadata, index })
        .map_err(|e| Error::serialization(format!("failed to serialize index: {e}")))
}

/// Save an index to `path`, creating parent directories.
pub fn save_index(index: &SearchIndex, path: impl AsRef<Path>, metadata: &IndexMetadata) -> Result<()> {
    let path = path.as_ref();
    let json = index_to_json(index, metadata)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    std::fs::write(path, json).map_err(|e| Error::io_with_path(e, path))?;

    log::debug!("saved index ({} records) to {}", index.len(), path.display());
    Ok(())
}

/// Load an index and its metadata from `path`.
pub fn load_index(path: impl AsRef<Path>) -> Result<PersistedIndex> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    load_index_from_str(&json)
}

/// Load an index and its metadata from a JSON string.
pub fn load_index_from_str(json: &str) -> Result<PersistedIndex> {
    let persisted: PersistedIndex = serde_json::from_str(json)
        .map_err(|e| Error::parse(format!("failed to parse index JSON: {e}")))?;

    if persisted.metadata.record_count != persisted.index.len() {
        return Err(Error::parse(format!(
            "index metadata claims {} records but the index holds {}",
            persisted.metadata.record_count,
            persisted.index.len()
        )));
    }
    Ok(persisted)
}

/// True if the index at `path` was built from `fingerprint`.
pub fn is_index_fresh(path: impl AsRef<Path>, fingerprint: &str) -> bool {
    match load_index(path) {
        Ok(persisted) => persisted.metadata.fingerprint.as_deref() == Some(fingerprint),
        Err(_) => false,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use crate::query::search;
    use crate::types::SearchQuery;
    use protolex_core::fixtures::sample_corpus;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("index.json");
        let index = build_index(&sample_corpus());
        let metadata = IndexMetadata::new(&index, Some("fp".into()));

        save_index(&index, &path, &metadata).unwrap();
        let loaded = load_index(&path).unwrap();

        assert_eq!(loaded.index, index);
        assert_eq!(loaded.metadata, metadata);
        assert_eq!(
            search(&loaded.index, &SearchQuery::text("kerberos ticket")).unwrap(),
            vec!["kerberos"]
        );
    }

    #[test]
    fn test_is_index_fresh() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        let index = build_index(&sample_corpus());

        save_index(&index, &path, &IndexMetadata::new(&index, Some("abc".into()))).unwrap();

        assert!(is_index_fresh(&path, "abc"));
        assert!(!is_index_fresh(&path, "def"));
        assert!(!is_index_fresh(dir.path().join("missing.json"), "abc"));
    }

    #[test]
    fn test_record_count_mismatch_is_rejected() {
        let index = build_index(&sample_corpus());
        let mut metadata = IndexMetadata::new(&index, None);
        metadata.record_count = 3;
        let json = index_to_json(&index, &metadata).unwrap();

        let err = load_index_from_str(&json).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        assert!(matches!(load_index_from_str("[]"), Err(Error::Parse(_))));
    }
}
