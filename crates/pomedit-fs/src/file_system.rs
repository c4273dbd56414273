//! FileSystem trait for manifest load/save operations.

use std::io;
use std::path::Path;

/// Filesystem abstraction used by the manifest store.
///
/// Every operation is synchronous: an invocation performs one read and one
/// write, so there is nothing to overlap.
///
/// # Error Handling
///
/// Uses `std::io::Result<T>` throughout:
/// - Native: Direct mapping from std::fs errors
/// - Memory: Constructs io::Error with the matching ErrorKind
pub trait FileSystem: Send + Sync {
    /// Check if a path exists.
    fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Read file contents as a string.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::NotFound` if file doesn't exist.
    /// Returns `io::ErrorKind::InvalidData` if file is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Read file contents as bytes.
    ///
    /// Used for manifests and property files, whose encoding is decided by the caller.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write string contents to a file, replacing any existing content.
    ///
    /// Parent directories are NOT created automatically.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Rename a file, replacing the destination if it exists.
    ///
    /// Used both for backups and for atomic updates (write to .tmp, then rename).
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}
