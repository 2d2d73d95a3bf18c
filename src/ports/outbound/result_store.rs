use crate::shared::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// ResultStore port for persisting scan documents
///
/// Output is write-once: a file name is reserved before a project is crawled
/// and populated exactly once afterwards.
pub trait ResultStore: Send + Sync {
    /// Reserves an output file, failing if it already exists
    ///
    /// # Errors
    /// Returns `ScanError::OutputAlreadyExists` when the file is already present
    fn reserve(&self, file_name: &str) -> Result<PathBuf>;

    /// Path a file name resolves to inside the store, without reserving it
    fn path_for(&self, file_name: &str) -> PathBuf;

    /// Writes a document to a reserved, still empty, output file
    ///
    /// # Errors
    /// Returns `ScanError::OutputAlreadyPopulated` if the file already holds
    /// data; the existing content is left untouched
    fn persist(&self, path: &Path, document: &Value) -> Result<()>;
}
