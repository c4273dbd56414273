//! Project identity and parent reference updates
//!
//! Changing coordinates here does not touch modules, children or anything
//! else that refers to this project by its old GAV.

use crate::types::{Document, Parent};
use tracing::info;

/// Identity fields to overwrite; `None` leaves the current value alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityFields {
    /// New `groupId`
    pub group_id: Option<String>,
    /// New `artifactId`
    pub artifact_id: Option<String>,
    /// New `version`
    pub version: Option<String>,
    /// New `name`
    pub name: Option<String>,
    /// New `description`
    pub description: Option<String>,
    /// New `url`
    pub url: Option<String>,
}

impl IdentityFields {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.group_id.is_none()
            && self.artifact_id.is_none()
            && self.version.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.url.is_none()
    }
}

/// Overwrite each identity attribute present in `fields`
pub fn apply_identity(mut document: Document, fields: &IdentityFields) -> Document {
    overwrite(&mut document.group_id, &fields.group_id, "groupId");
    overwrite(&mut document.artifact_id, &fields.artifact_id, "artifactId");
    overwrite(&mut document.version, &fields.version, "version");
    overwrite(&mut document.name, &fields.name, "name");
    overwrite(&mut document.description, &fields.description, "description");
    overwrite(&mut document.url, &fields.url, "url");
    document
}

fn overwrite(target: &mut Option<String>, value: &Option<String>, field: &str) {
    if let Some(value) = value {
        info!(field, value = %value, "Setting project field");
        *target = Some(value.clone());
    }
}

/// Replace the parent reference
pub fn set_parent(mut document: Document, parent: Parent) -> Document {
    info!(parent = %parent, "Adding a parent reference");
    document.parent = Some(parent);
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_present_fields_change() {
        let mut document = Document::new();
        document.group_id = Some("com.old".to_string());
        document.artifact_id = Some("app".to_string());
        document.name = Some("Old name".to_string());

        let fields = IdentityFields {
            group_id: Some("com.new".to_string()),
            url: Some("https://example.com".to_string()),
            ..IdentityFields::default()
        };
        let document = apply_identity(document, &fields);

        assert_eq!(document.group_id.as_deref(), Some("com.new"));
        assert_eq!(document.artifact_id.as_deref(), Some("app"));
        assert_eq!(document.name.as_deref(), Some("Old name"));
        assert_eq!(document.url.as_deref(), Some("https://example.com"));
        assert!(document.version.is_none());
    }

    #[test]
    fn test_empty_string_is_a_value() {
        let mut document = Document::new();
        document.description = Some("text".to_string());

        let fields = IdentityFields {
            description: Some(String::new()),
            ..IdentityFields::default()
        };
        assert!(!fields.is_empty());

        let document = apply_identity(document, &fields);
        assert_eq!(document.description.as_deref(), Some(""));
    }

    #[test]
    fn test_set_parent_replaces_existing() {
        let mut document = Document::new();
        document.parent = Some(Parent {
            relative_path: Some("../old".to_string()),
            ..Parent::new("g", "old-parent", "1")
        });

        let document = set_parent(document, Parent::new("g", "new-parent", "2"));

        assert_eq!(document.parent, Some(Parent::new("g", "new-parent", "2")));
    }
}
