//! Dependency merge engine
//!
//! Both operations rebuild each affected list in a single pass: entries that
//! match the key are dropped, everything else is carried over in its original
//! order. `add_dependency` then appends the new entry, so it always ends up
//! last, even when it replaced an entry in the middle of the list.

use crate::matcher::DependencyKey;
use crate::types::{Dependency, Document};
use crate::{Error, Result};
use tracing::debug;

/// Add `dependency`, evicting every entry that matches `key`
///
/// The plain list is always updated. When `affect_management` is true the
/// managed list gets the same treatment and is created if the document has
/// none.
pub fn add_dependency(
    mut document: Document,
    dependency: Dependency,
    key: &DependencyKey,
    affect_management: bool,
) -> Document {
    if affect_management {
        let managed = document.dependency_management.take().unwrap_or_default();
        document.dependency_management = Some(replace_matching(
            managed,
            dependency.clone(),
            key,
            "dependencyManagement",
        ));
    }

    let plain = std::mem::take(&mut document.dependencies);
    document.dependencies = replace_matching(plain, dependency, key, "dependencies");
    document
}

/// Remove every entry matching `key`
///
/// The managed list is only touched when `affect_management` is true and the
/// document has one.
///
/// # Errors
/// Returns a usage error when `key` has no field set, since it would match
/// (and delete) every dependency.
pub fn delete_dependency(
    mut document: Document,
    key: &DependencyKey,
    affect_management: bool,
) -> Result<Document> {
    if key.is_empty() {
        return Err(Error::usage(
            "An artifactId, groupId or version is needed for dependency deletion",
        ));
    }

    let plain = std::mem::take(&mut document.dependencies);
    document.dependencies = remove_matching(plain, key, "dependencies");

    if affect_management {
        if let Some(managed) = document.dependency_management.take() {
            document.dependency_management =
                Some(remove_matching(managed, key, "dependencyManagement"));
        }
    }

    Ok(document)
}

/// Number of entries in the plain list (and, if requested, the managed list)
/// that match `key`
pub fn count_matches(document: &Document, key: &DependencyKey, affect_management: bool) -> usize {
    let plain = document.dependencies.iter().filter(|d| key.matches(d)).count();
    let managed = if affect_management {
        document
            .managed_dependencies()
            .iter()
            .filter(|d| key.matches(d))
            .count()
    } else {
        0
    };
    plain + managed
}

fn replace_matching(
    list: Vec<Dependency>,
    dependency: Dependency,
    key: &DependencyKey,
    section: &str,
) -> Vec<Dependency> {
    let mut merged = remove_matching(list, key, section);
    debug!(section, dependency = %dependency, "Appending dependency");
    merged.push(dependency);
    merged
}

fn remove_matching(list: Vec<Dependency>, key: &DependencyKey, section: &str) -> Vec<Dependency> {
    let mut kept = Vec::with_capacity(list.len());
    for entry in list {
        if key.matches(&entry) {
            debug!(section, dependency = %entry, "Dependency found (removed)");
        } else {
            kept.push(entry);
        }
    }
    kept
}
