//! Shared load, edit and save cycle

use crate::config::EditorConfig;
use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use pomedit_core::{Document, ManifestStore, PomStore};
use pomedit_fs::NativeFileSystem;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Settings shared by every command
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Loaded configuration
    pub config: EditorConfig,
    /// Print the edited manifest instead of writing it
    pub dry_run: bool,
}

/// Manifest location flags accepted by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ManifestArgs {
    /// POM file to modify [default: pom.xml]
    #[arg(long, value_name = "FILE")]
    pub pom_file: Option<PathBuf>,

    /// Keep a copy of the current POM file here before modifying it
    #[arg(long, value_name = "FILE")]
    pub pom_backup: Option<PathBuf>,
}

impl ManifestArgs {
    /// Manifest and backup paths, falling back to the configuration
    pub fn resolve(&self, config: &EditorConfig) -> (PathBuf, Option<PathBuf>) {
        let pom_file = self
            .pom_file
            .clone()
            .unwrap_or_else(|| config.pom_file.clone());
        let pom_backup = self.pom_backup.clone().or_else(|| config.pom_backup.clone());
        (pom_file, pom_backup)
    }
}

/// Load the manifest, apply `edit`, then save (or print on a dry run)
pub fn edit_manifest<E>(ctx: &Context, manifest: &ManifestArgs, edit: E) -> Result<()>
where
    E: FnOnce(Document) -> Result<Document>,
{
    let (pom_file, pom_backup) = manifest.resolve(&ctx.config);
    let fs = Arc::new(NativeFileSystem::current_dir().context("Failed to open working directory")?);
    let store = PomStore::new();

    let document = store
        .load(&fs, &pom_file)
        .with_context(|| {
            format!(
                "Error while loading the Maven model from {}",
                pom_file.display()
            )
        })?;

    let document = edit(document)?;

    if ctx.dry_run {
        debug!(path = %pom_file.display(), "Dry run, printing instead of saving");
        let rendered = store.render(&document).context("Failed to render the Maven model")?;
        print!("{}", rendered);
        return Ok(());
    }

    store
        .save(&fs, &document, &pom_file, pom_backup.as_deref())
        .with_context(|| {
            format!(
                "I/O error while writing the Maven model to {}",
                pom_file.display()
            )
        })?;

    println!("{} Updated {}", "✓".green(), pom_file.display());
    if let Some(backup) = &pom_backup {
        println!("  Backup: {}", backup.display());
    }
    Ok(())
}
