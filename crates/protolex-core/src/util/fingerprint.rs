//! Content fingerprints of a record set.
//!
//! Derived structures are rebuilt whenever the corpus changes. A fingerprint
//! is how "changed" is decided: the BLAKE3 hash of the canonical JSON encoding
//! of every record, taken in ascending id order so that the order the
//! records were loaded in does not matter.

use crate::{Error, Protocol, Result};

/// Compute the fingerprint of a record set as a lowercase hex string.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if a record cannot be encoded (only
/// possible with non-finite numbers inside loosely structured fields).
pub fn corpus_fingerprint(records: &[Protocol]) -> Result<String> {
    let mut ordered: Vec<&Protocol> = records.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    let mut hasher = blake3::Hasher::new();
    for record in ordered {
        let bytes = serde_json::to_vec(record)
            .map_err(|e| Error::serialization(format!("fingerprint {}: {e}", record.id)))?;
        hasher.update(&(bytes.len() as u64).to_le_bytes());
        hasher.update(&bytes);
    }

    Ok(hasher.finalize().to_hex().to_string())
}
