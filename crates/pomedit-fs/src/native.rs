//! Native filesystem implementation using std::fs.

use crate::FileSystem;
use std::io;
use std::path::{Path, PathBuf};

/// Native filesystem implementation using std::fs.
///
/// Relative paths are resolved against the project root given at
/// construction (normally the current working directory).
#[derive(Debug, Clone)]
pub struct NativeFileSystem {
    project_root: PathBuf,
}

impl NativeFileSystem {
    /// Create a new native filesystem rooted at `project_root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root doesn't exist or is not a directory.
    pub fn new(project_root: impl AsRef<Path>) -> io::Result<Self> {
        let project_root = project_root.as_ref().canonicalize().map_err(|e| {
            io::Error::new(
                e.kind(),
                format!(
                    "Project root does not exist: {}",
                    project_root.as_ref().display()
                ),
            )
        })?;

        if !project_root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Project root is not a directory: {}", project_root.display()),
            ));
        }

        Ok(Self { project_root })
    }

    /// Create a filesystem rooted at the current working directory.
    pub fn current_dir() -> io::Result<Self> {
        Self::new(std::env::current_dir()?)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

impl FileSystem for NativeFileSystem {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        Ok(self.resolve(path).exists())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.resolve(path))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(path))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(self.resolve(path), contents)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let resolved = self.resolve(path);
        if resolved.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Refusing to remove directory: {}", resolved.display()),
            ));
        }
        std::fs::remove_file(resolved)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(self.resolve(from), self.resolve(to))
    }
}
