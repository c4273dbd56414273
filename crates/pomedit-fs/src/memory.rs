//! In-memory filesystem implementation.

use crate::FileSystem;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// In-memory filesystem.
///
/// Files live in a map keyed by normalized absolute path. Clones share the
/// same storage, so a test can hand one clone to the code under test and
/// inspect the results through another.
#[derive(Clone)]
pub struct MemoryFileSystem {
    project_root: PathBuf,
    files: Arc<RwLock<HashMap<PathBuf, Vec<u8>>>>,
}

impl MemoryFileSystem {
    /// Create a new in-memory filesystem from pre-loaded files.
    ///
    /// Relative keys in `files` are placed under `project_root`.
    pub fn new(project_root: impl AsRef<Path>, files: HashMap<PathBuf, Vec<u8>>) -> Self {
        let project_root = normalize(Path::new("/"), project_root.as_ref());
        let files = files
            .into_iter()
            .map(|(path, contents)| (normalize(&project_root, &path), contents))
            .collect();

        Self {
            project_root,
            files: Arc::new(RwLock::new(files)),
        }
    }

    /// Create an empty filesystem.
    pub fn empty(project_root: impl AsRef<Path>) -> Self {
        Self::new(project_root, HashMap::new())
    }

    /// Add a file (used during test setup).
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        let normalized = normalize(&self.project_root, path.as_ref());
        self.files.write().insert(normalized, contents.into());
    }

    /// Paths of all stored files, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.files.read().keys().cloned().collect();
        paths.sort();
        paths
    }

    fn key(&self, path: &Path) -> PathBuf {
        normalize(&self.project_root, path)
    }
}

/// Syntactic normalization: joins relative paths onto `root` and resolves
/// `.` and `..` without touching any real filesystem.
fn normalize(root: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };

    let mut components = Vec::new();
    for component in joined.components() {
        match component {
            std::path::Component::Prefix(_) | std::path::Component::RootDir => {
                components.clear();
            }
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                components.pop();
            }
            std::path::Component::Normal(name) => components.push(name.to_owned()),
        }
    }

    let mut result = PathBuf::from("/");
    for component in components {
        result.push(component);
    }
    result
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("File not found: {}", path.display()),
    )
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        Ok(self.files.read().contains_key(&self.key(path)))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let key = self.key(path);
        self.files
            .read()
            .get(&key)
            .cloned()
            .ok_or_else(|| not_found(&key))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let key = self.key(path);
        self.files.write().insert(key, contents.as_bytes().to_vec());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let key = self.key(path);
        self.files
            .write()
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| not_found(&key))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let from_key = self.key(from);
        let to_key = self.key(to);

        let mut files = self.files.write();
        let contents = files.remove(&from_key).ok_or_else(|| not_found(&from_key))?;
        files.insert(to_key, contents);
        Ok(())
    }
}
