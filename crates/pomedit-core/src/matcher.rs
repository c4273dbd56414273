//! Dependency matching by partial coordinates

use crate::types::Dependency;
use std::fmt;

/// A partial `groupId:artifactId:version` key
///
/// Each absent field is a wildcard. A present field must equal the
/// corresponding dependency field exactly; an unset dependency field never
/// equals a present key field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyKey {
    /// Required `groupId`, or any
    pub group_id: Option<String>,
    /// Required `artifactId`, or any
    pub artifact_id: Option<String>,
    /// Required `version`, or any
    pub version: Option<String>,
}

impl DependencyKey {
    /// Build a key from optional parts
    pub fn new(
        group_id: Option<String>,
        artifact_id: Option<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            group_id,
            artifact_id,
            version,
        }
    }

    /// Key on group and artifact, any version
    pub fn coordinates(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self::new(Some(group_id.into()), Some(artifact_id.into()), None)
    }

    /// Key on the exact coordinates of a dependency (an unset version stays a wildcard)
    pub fn of(dependency: &Dependency) -> Self {
        Self::new(
            dependency.group_id.clone(),
            dependency.artifact_id.clone(),
            dependency.version.clone(),
        )
    }

    /// True when every field is absent, so the key matches everything
    pub fn is_empty(&self) -> bool {
        self.group_id.is_none() && self.artifact_id.is_none() && self.version.is_none()
    }

    /// Whether `entry` satisfies this key
    pub fn matches(&self, entry: &Dependency) -> bool {
        matches(
            entry,
            self.group_id.as_deref(),
            self.artifact_id.as_deref(),
            self.version.as_deref(),
        )
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.group_id.as_deref().unwrap_or("*"),
            self.artifact_id.as_deref().unwrap_or("*"),
            self.version.as_deref().unwrap_or("*")
        )
    }
}

/// Whether `entry` matches the given partial coordinates
pub fn matches(
    entry: &Dependency,
    group_id: Option<&str>,
    artifact_id: Option<&str>,
    version: Option<&str>,
) -> bool {
    field_matches(group_id, entry.group_id.as_deref())
        && field_matches(artifact_id, entry.artifact_id.as_deref())
        && field_matches(version, entry.version.as_deref())
}

fn field_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual == Some(wanted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(group: &str, artifact: &str, version: &str) -> Dependency {
        Dependency::new(group, artifact).with_version(version)
    }

    #[test]
    fn test_empty_key_matches_everything() {
        let key = DependencyKey::default();
        assert!(key.is_empty());
        assert!(key.matches(&dep("g1", "a1", "1.0")));
        assert!(key.matches(&Dependency::default()));
    }

    #[test]
    fn test_group_only_key() {
        let key = DependencyKey::new(Some("g1".to_string()), None, None);
        assert!(key.matches(&dep("g1", "a1", "1.0")));
        assert!(key.matches(&dep("g1", "a2", "2.0")));
        assert!(!key.matches(&dep("g2", "a1", "1.0")));
    }

    #[test]
    fn test_full_key_requires_exact_version() {
        let key = DependencyKey::of(&dep("g1", "a1", "1.0"));
        assert!(key.matches(&dep("g1", "a1", "1.0")));
        assert!(!key.matches(&dep("g1", "a1", "1.0.0")));
        assert!(!key.matches(&Dependency::new("g1", "a1")));
    }

    #[test]
    fn test_empty_string_is_not_a_wildcard() {
        let key = DependencyKey::new(Some(String::new()), None, None);
        assert!(!key.is_empty());
        assert!(!key.matches(&dep("g1", "a1", "1.0")));
    }

    #[test]
    fn test_free_function_agrees_with_key() {
        let entry = dep("g1", "a1", "1.0");
        assert!(matches(&entry, None, Some("a1"), None));
        assert!(!matches(&entry, None, Some("A1"), None));
    }

    #[test]
    fn test_display_marks_wildcards() {
        let key = DependencyKey::coordinates("g", "a");
        assert_eq!(key.to_string(), "g:a:*");
    }
}
