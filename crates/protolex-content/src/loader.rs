//! Loading records from JSON.
//!
//! The content pipeline hands the engine either
//!
//! - a single `.json` file holding an array of records (or one record), or
//! - a directory searched recursively for `*.json` files, each holding one
//!   record or an array.
//!
//! Directory entries are read in path order so repeated loads of the same
//! tree produce the same record order.

use protolex_core::util::paths::expand_tilde;
use protolex_core::{Error, Protocol, QuizQuestion, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Load protocol records from a file or directory.
pub fn load_protocols(path: impl AsRef<Path>) -> Result<Vec<Protocol>> {
    load_records(path)
}

/// Load quiz questions from a file or directory.
pub fn load_quiz_questions(path: impl AsRef<Path>) -> Result<Vec<QuizQuestion>> {
    load_records(path)
}

/// Load any JSON record type from a file or directory.
pub fn load_records<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = expand_tilde(path);

    if path.is_dir() {
        let files = discover_json_files(&path)?;
        log::debug!("loading {} JSON file(s) from {}", files.len(), path.display());
        let mut records = Vec::new();
        for file in files {
            records.extend(read_file::<T>(&file)?);
        }
        Ok(records)
    } else if path.is_file() {
        read_file(&path)
    } else {
        Err(Error::not_found(format!(
            "no content at {}",
            path.display()
        )))
    }
}

/// All `*.json` files under `dir`, sorted by path.
pub fn discover_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("**").join("*.json");
    let pattern = pattern.to_string_lossy();

    let entries =
        glob::glob(&pattern).map_err(|e| Error::config(format!("bad content path {pattern}: {e}")))?;

    let mut files = Vec::new();
    for entry in entries {
        let file = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            let err: std::io::Error = e.into();
            Error::io_with_path(err, path)
        })?;
        if file.is_file() {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    parse_records(&text).map_err(|e| Error::parse(format!("{}: {e}", path.display())))
}

/// Parse a JSON document holding one record or an array of records.
pub fn parse_records<T: DeserializeOwned>(json: &str) -> std::result::Result<Vec<T>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|one| vec![one])
    }
}
