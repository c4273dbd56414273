//! Safe file update operations

use crate::{Error, Result};
use pomedit_fs::FileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// File updater that writes through a temporary file
#[derive(Debug, Default)]
pub struct FileUpdater;

impl FileUpdater {
    /// Create a new file updater
    pub fn new() -> Self {
        Self
    }

    /// Replace the contents of `path`, optionally keeping the old file
    ///
    /// Strategy:
    /// 1. Write to `<path>.tmp` in the same directory
    /// 2. Verify the temporary file reads back
    /// 3. Move the current file to `backup` (when given and the file exists)
    /// 4. Rename the temporary file over `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be written or renamed. A failed
    /// backup leaves the original file in place and removes the temporary one.
    pub fn update_file<F: FileSystem>(
        &self,
        fs: &Arc<F>,
        path: &Path,
        new_contents: &str,
        backup: Option<&Path>,
    ) -> Result<()> {
        let temp_path = temp_path_for(path);

        fs.write(&temp_path, new_contents)?;
        let _ = fs.read_to_string(&temp_path)?;

        if let Some(backup) = backup {
            if fs.exists(path)? {
                if let Err(source) = fs.rename(path, backup) {
                    if let Err(e) = fs.remove_file(&temp_path) {
                        let temp = temp_path.display();
                        warn!(path = %temp, error = %e, "Failed to remove temporary file");
                    }
                    return Err(Error::Backup {
                        from: path.to_path_buf(),
                        to: backup.to_path_buf(),
                        source,
                    });
                }
                debug!(backup = %backup.display(), "Backed up previous manifest");
            }
        }

        fs.rename(&temp_path, path)?;

        Ok(())
    }
}

/// `pom.xml` -> `pom.xml.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
