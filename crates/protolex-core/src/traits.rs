//! Core traits for Protolex.
//!
//! [`ConfigProvider`] abstracts where a deployment keeps its corpus, so the
//! loader and command line handlers do not depend on one concrete
//! configuration type.

use std::path::PathBuf;

use crate::Result;

/// Trait for deployment-specific configuration.
///
/// # Bounds
///
/// - `Send + Sync`: configuration must be shareable across threads
/// - `Clone`: configuration can be duplicated for passing to subsystems
/// - `'static`: configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use protolex_core::traits::ConfigProvider;
/// use protolex_core::Result;
///
/// #[derive(Clone)]
/// struct CatalogConfig {
///     data_dir: PathBuf,
/// }
///
/// impl ConfigProvider for CatalogConfig {
///     fn project_name(&self) -> &str {
///         "protocol-catalog"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.data_dir.clone())
///     }
///
///     fn content_path(&self, content_type: &str) -> Result<PathBuf> {
///         Ok(self.data_dir.join(content_type))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path for a specific content type.
    ///
    /// Protolex asks for `"protocols"` (the record feed) and `"quizzes"`
    /// (authored quiz questions). The implementation decides how these map
    /// to files or directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type is unknown or the path cannot
    /// be resolved.
    fn content_path(&self, content_type: &str) -> Result<PathBuf>;
}
