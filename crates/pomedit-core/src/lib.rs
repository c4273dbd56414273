//! # pomedit-core
//!
//! Maven project manifest (`pom.xml`) editing.
//!
//! This crate provides functionality to:
//! - Load a `pom.xml` into a [`Document`] and save it back, optionally keeping a backup
//! - Add or delete dependencies matched by partial coordinates, in the plain
//!   and the managed (`dependencyManagement`) lists
//! - Set the parent reference and the project identity
//! - Add properties globally or to a named profile, from a `.properties`
//!   file and inline `key=value` entries
//!
//! ## Architecture
//!
//! Every edit is a function that takes a [`Document`] and returns the edited
//! one. The [`ManifestStore`] trait is the only place that touches files, and
//! it does so through the [`pomedit_fs::FileSystem`] abstraction. Sections of
//! the file the model does not describe are carried through unchanged.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pomedit_core::{add_dependency, Dependency, DependencyKey, ManifestStore, PomStore};
//! use pomedit_fs::NativeFileSystem;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn example() -> pomedit_core::Result<()> {
//! let fs = Arc::new(NativeFileSystem::current_dir()?);
//! let store = PomStore::new();
//! let pom = Path::new("pom.xml");
//!
//! let document = store.load(&fs, pom)?;
//! let junit = Dependency::new("junit", "junit").with_version("4.13.2").with_scope("test");
//! let key = DependencyKey::coordinates("junit", "junit");
//! let document = add_dependency(document, junit, &key, false);
//!
//! store.save(&fs, &document, pom, Some(Path::new("pom.xml.bak")))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod identity;
pub mod matcher;
pub mod merge;
pub mod pom;
pub mod properties;
pub mod property_source;
pub mod store;
pub mod traits;
pub mod types;
pub mod update;
pub mod xml;

// Re-export main types and traits
pub use error::{Error, ErrorKind, Result};
pub use identity::{apply_identity, set_parent, IdentityFields};
pub use matcher::DependencyKey;
pub use merge::{add_dependency, count_matches, delete_dependency};
pub use properties::apply_properties;
pub use property_source::{PropertiesEncoding, PropertySources};
pub use store::PomStore;
pub use traits::ManifestStore;
pub use types::{Dependency, Document, Parent, Profile, Properties};
