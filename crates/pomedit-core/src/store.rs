//! `pom.xml` store

use crate::traits::ManifestStore;
use crate::types::Document;
use crate::update::FileUpdater;
use crate::{pom, Error, Result};
use pomedit_fs::FileSystem;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Reads and writes Maven `pom.xml` files
pub struct PomStore {
    updater: FileUpdater,
}

impl PomStore {
    /// Create a new store
    pub fn new() -> Self {
        Self {
            updater: FileUpdater::new(),
        }
    }
}

impl Default for PomStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestStore for PomStore {
    fn load<F: FileSystem>(&self, fs: &Arc<F>, path: &Path) -> Result<Document> {
        debug!(path = %path.display(), "Reading project manifest");

        if !fs.exists(path)? {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let bytes = fs.read(path)?;
        pom::parse(&pom::decode(&bytes)?, path)
    }

    fn save<F: FileSystem>(
        &self,
        fs: &Arc<F>,
        document: &Document,
        path: &Path,
        backup: Option<&Path>,
    ) -> Result<()> {
        let content = self.render(document)?;
        self.updater.update_file(fs, path, &content, backup)?;

        info!(path = %path.display(), "Wrote project manifest");
        Ok(())
    }

    fn render(&self, document: &Document) -> Result<String> {
        pom::render(document)
    }
}
