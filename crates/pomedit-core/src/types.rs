//! Document model for a Maven project manifest

use crate::xml::{Node, XmlDocument};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered key/value map used for global and profile properties
pub type Properties = BTreeMap<String, String>;

/// A single `<dependency>` entry
///
/// Value type: two dependencies are the same when all their fields are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependency {
    /// `groupId`
    pub group_id: Option<String>,
    /// `artifactId`
    pub artifact_id: Option<String>,
    /// `version`
    pub version: Option<String>,
    /// `systemPath`
    pub system_path: Option<String>,
    /// `type` (jar, pom, war, ...)
    pub dep_type: Option<String>,
    /// `scope` (compile, test, provided, ...)
    pub scope: Option<String>,
    /// `optional` as written (`true`, `false` or a `${...}` expression)
    pub optional: Option<String>,
    /// Child nodes the model does not describe (`exclusions`, `classifier`, comments)
    pub extras: Vec<Node>,
}

impl Dependency {
    /// Create a dependency with the given coordinates
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: Some(group_id.into()),
            artifact_id: Some(artifact_id.into()),
            ..Self::default()
        }
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the scope
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the type
    pub fn with_type(mut self, dep_type: impl Into<String>) -> Self {
        self.dep_type = Some(dep_type.into());
        self
    }

    /// Set the system path
    pub fn with_system_path(mut self, system_path: impl Into<String>) -> Self {
        self.system_path = Some(system_path.into());
        self
    }

    /// Mark the dependency optional (or drop the flag)
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional.then(|| "true".to_string());
        self
    }

    /// Whether `optional` is literally `true` (case-insensitive)
    pub fn is_optional(&self) -> bool {
        self.optional
            .as_deref()
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.group_id.as_deref().unwrap_or("?"),
            self.artifact_id.as_deref().unwrap_or("?")
        )?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        Ok(())
    }
}

/// The `<parent>` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parent {
    /// Parent `groupId`
    pub group_id: String,
    /// Parent `artifactId`
    pub artifact_id: String,
    /// Parent `version`
    pub version: String,
    /// Optional `relativePath`
    pub relative_path: Option<String>,
}

impl Parent {
    /// Create a parent reference without a relative path
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            relative_path: None,
        }
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// A named `<profile>` with its own properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Profile id, unique within a document
    pub id: String,
    /// Profile properties
    pub properties: Properties,
    /// Element the profile was loaded from (activation, build, ... survive a save)
    pub(crate) source: Option<crate::xml::Element>,
}

impl Profile {
    /// Create a profile with the given id and properties
    pub fn new(id: impl Into<String>, properties: Properties) -> Self {
        Self {
            id: id.into(),
            properties,
            source: None,
        }
    }
}

/// In-memory project manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Project `groupId`
    pub group_id: Option<String>,
    /// Project `artifactId`
    pub artifact_id: Option<String>,
    /// Project `version`
    pub version: Option<String>,
    /// Project `name`
    pub name: Option<String>,
    /// Project `description`
    pub description: Option<String>,
    /// Project `url`
    pub url: Option<String>,
    /// Parent reference
    pub parent: Option<Parent>,
    /// Plain dependency list
    pub dependencies: Vec<Dependency>,
    /// Managed dependency list (`dependencyManagement/dependencies`)
    pub dependency_management: Option<Vec<Dependency>>,
    /// Global properties
    pub properties: Properties,
    /// Profiles in document order
    pub profiles: Vec<Profile>,
    /// Tree the document was loaded from
    pub(crate) source: Option<XmlDocument>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a profile by id
    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Find a profile by id, mutably
    pub fn profile_mut(&mut self, id: &str) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|p| p.id == id)
    }

    /// Managed dependencies, empty when the document has no management section
    pub fn managed_dependencies(&self) -> &[Dependency] {
        self.dependency_management.as_deref().unwrap_or(&[])
    }
}
