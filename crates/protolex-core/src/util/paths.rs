//! Path resolution utilities.

use std::path::{Path, PathBuf};

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~` (or when no home directory is known) are
/// returned unchanged.
///
/// # Example
///
/// ```
/// use protolex_core::util::paths::expand_tilde;
///
/// let expanded = expand_tilde("~/catalog/protocols");
/// assert!(!expanded.starts_with("~"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_with_tilde() {
        let path = expand_tilde("~/data/protocols");
        assert!(!path.starts_with("~"));
        if let Some(home) = dirs::home_dir() {
            assert!(path.starts_with(&home));
            assert!(path.ends_with("data/protocols"));
        }
    }

    #[test]
    fn test_expand_tilde_absolute_unchanged() {
        let original = PathBuf::from("/srv/catalog");
        assert_eq!(expand_tilde(&original), original);
    }

    #[test]
    fn test_expand_tilde_inner_tilde_unchanged() {
        let original = PathBuf::from("data/~backup");
        assert_eq!(expand_tilde(&original), original);
    }
}
