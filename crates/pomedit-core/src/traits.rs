//! Core traits for manifest storage

use crate::types::Document;
use crate::Result;
use pomedit_fs::FileSystem;
use std::path::Path;
use std::sync::Arc;

/// Load/save boundary for a manifest format
///
/// All edits operate on [`Document`] values; a store turns files into
/// documents and back.
pub trait ManifestStore: Send + Sync {
    /// Read and parse the manifest at `path`
    ///
    /// # Errors
    /// Returns [`Error::FileNotFound`](crate::Error::FileNotFound) when the
    /// file does not exist, and a parse error when it is not a well-formed
    /// manifest.
    fn load<F: FileSystem>(&self, fs: &Arc<F>, path: &Path) -> Result<Document>;

    /// Serialize `document` to `path`
    ///
    /// When `backup` is given and `path` already exists, the previous file is
    /// moved to `backup` first.
    ///
    /// # Errors
    /// Returns an error if the document cannot be rendered or the file cannot
    /// be written, backed up or renamed.
    fn save<F: FileSystem>(
        &self,
        fs: &Arc<F>,
        document: &Document,
        path: &Path,
        backup: Option<&Path>,
    ) -> Result<()>;

    /// Render `document` as file contents without touching the filesystem
    ///
    /// # Errors
    /// Returns an error if the document cannot be serialized.
    fn render(&self, document: &Document) -> Result<String>;
}
