//! End-to-end tests for the pomedit commands

use pomedit_cli::commands::{
    add_dependency, add_parent, add_properties, delete_dependency, modify_project,
    AddDependencyArgs, AddParentArgs, AddPropertiesArgs, Context, DeleteDependencyArgs,
    ManifestArgs, ModifyProjectArgs,
};
use pomedit_cli::{Error, ErrorKind};
use pomedit_core::{ManifestStore, PomStore};
use pomedit_fs::NativeFileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>app</artifactId>
  <version>1.0.0</version>
  <dependencies>
    <dependency>
      <groupId>g1</groupId>
      <artifactId>a1</artifactId>
      <version>1.0</version>
    </dependency>
    <dependency>
      <groupId>g2</groupId>
      <artifactId>a2</artifactId>
      <version>2.0</version>
    </dependency>
  </dependencies>
</project>
"#;

fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let pom = dir.path().join("pom.xml");
    std::fs::write(&pom, POM).unwrap();
    (dir, pom)
}

fn manifest(pom: &Path) -> ManifestArgs {
    ManifestArgs {
        pom_file: Some(pom.to_path_buf()),
        pom_backup: None,
    }
}

fn load(dir: &TempDir, pom: &Path) -> pomedit_core::Document {
    let fs = Arc::new(NativeFileSystem::new(dir.path()).unwrap());
    PomStore::new().load(&fs, pom).unwrap()
}

fn kind_of(err: &anyhow::Error) -> Option<ErrorKind> {
    err.downcast_ref::<Error>().map(Error::kind)
}

#[test]
fn test_add_dependency_replaces_by_coordinates() {
    let (dir, pom) = setup();

    add_dependency::run(
        AddDependencyArgs {
            group_id: "g1".to_string(),
            artifact_id: "a1".to_string(),
            version: Some("1.1".to_string()),
            system_path: None,
            dep_type: None,
            scope: Some("test".to_string()),
            optional: true,
            modify_dependency_management: false,
            manifest: manifest(&pom),
        },
        &Context::default(),
    )
    .unwrap();

    let document = load(&dir, &pom);
    let deps: Vec<String> = document.dependencies.iter().map(|d| d.to_string()).collect();
    assert_eq!(deps, vec!["g2:a2:2.0", "g1:a1:1.1"]);
    assert!(document.dependencies[1].is_optional());
    assert_eq!(document.dependencies[1].scope.as_deref(), Some("test"));
    assert!(document.dependency_management.is_none());
}

#[test]
fn test_delete_without_key_fails_before_loading() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("pom.xml");

    let err = delete_dependency::run(
        DeleteDependencyArgs {
            group_id: None,
            artifact_id: None,
            version: None,
            modify_dependency_management: false,
            manifest: manifest(&missing),
        },
        &Context::default(),
    )
    .unwrap_err();

    assert_eq!(kind_of(&err), Some(ErrorKind::Usage));
}

#[test]
fn test_delete_by_group_with_backup() {
    let (dir, pom) = setup();
    let backup = dir.path().join("pom.xml.bak");

    delete_dependency::run(
        DeleteDependencyArgs {
            group_id: Some("g2".to_string()),
            artifact_id: None,
            version: None,
            modify_dependency_management: true,
            manifest: ManifestArgs {
                pom_file: Some(pom.clone()),
                pom_backup: Some(backup.clone()),
            },
        },
        &Context::default(),
    )
    .unwrap();

    assert_eq!(std::fs::read_to_string(&backup).unwrap(), POM);
    let document = load(&dir, &pom);
    assert_eq!(document.dependencies.len(), 1);
    assert_eq!(document.dependencies[0].group_id.as_deref(), Some("g1"));
}

#[test]
fn test_missing_manifest_is_not_found() {
    let dir = TempDir::new().unwrap();

    let err = add_parent::run(
        AddParentArgs {
            group_id: "g".to_string(),
            artifact_id: "parent".to_string(),
            version: "1".to_string(),
            relative_path: None,
            manifest: manifest(&dir.path().join("pom.xml")),
        },
        &Context::default(),
    )
    .unwrap_err();

    assert_eq!(kind_of(&err), Some(ErrorKind::NotFound));
}

#[test]
fn test_add_parent_with_relative_path() {
    let (dir, pom) = setup();

    add_parent::run(
        AddParentArgs {
            group_id: "com.example".to_string(),
            artifact_id: "parent".to_string(),
            version: "7".to_string(),
            relative_path: Some("../parent/pom.xml".to_string()),
            manifest: manifest(&pom),
        },
        &Context::default(),
    )
    .unwrap();

    let parent = load(&dir, &pom).parent.unwrap();
    assert_eq!(parent.version, "7");
    assert_eq!(parent.relative_path.as_deref(), Some("../parent/pom.xml"));
}

#[test]
fn test_add_properties_without_sources_is_noop() {
    let (_dir, pom) = setup();

    add_properties::run(
        AddPropertiesArgs {
            properties_file: None,
            properties: Vec::new(),
            profile: None,
            properties_encoding: None,
            manifest: manifest(&pom),
        },
        &Context::default(),
    )
    .unwrap();

    assert_eq!(std::fs::read_to_string(&pom).unwrap(), POM);
}

#[test]
fn test_add_properties_to_profile() {
    let (dir, pom) = setup();
    let file = dir.path().join("extra.properties");
    std::fs::write(&file, "from.file=yes\nshared=file\n").unwrap();

    add_properties::run(
        AddPropertiesArgs {
            properties_file: Some(file),
            properties: vec!["shared=inline".to_string(), "quoted=\"a b\"".to_string()],
            profile: Some("release".to_string()),
            properties_encoding: Some("ISO-8859-1".to_string()),
            manifest: manifest(&pom),
        },
        &Context::default(),
    )
    .unwrap();

    let document = load(&dir, &pom);
    let profile = document.profile("release").unwrap();
    assert_eq!(profile.properties["from.file"], "yes");
    assert_eq!(profile.properties["shared"], "inline");
    assert_eq!(profile.properties["quoted"], "a b");
}

#[test]
fn test_unknown_encoding_is_usage_error() {
    let (_dir, pom) = setup();

    let err = add_properties::run(
        AddPropertiesArgs {
            properties_file: None,
            properties: vec!["a=1".to_string()],
            profile: None,
            properties_encoding: Some("EBCDIC".to_string()),
            manifest: manifest(&pom),
        },
        &Context::default(),
    )
    .unwrap_err();

    assert_eq!(kind_of(&err), Some(ErrorKind::Usage));
    assert_eq!(std::fs::read_to_string(&pom).unwrap(), POM);
}

#[test]
fn test_modify_project_fields() {
    let (dir, pom) = setup();

    modify_project::run(
        ModifyProjectArgs {
            group_id: None,
            artifact_id: Some("renamed".to_string()),
            version: None,
            name: Some("Renamed".to_string()),
            description: None,
            url: None,
            manifest: manifest(&pom),
        },
        &Context::default(),
    )
    .unwrap();

    let document = load(&dir, &pom);
    assert_eq!(document.group_id.as_deref(), Some("com.example"));
    assert_eq!(document.artifact_id.as_deref(), Some("renamed"));
    assert_eq!(document.name.as_deref(), Some("Renamed"));
}

#[test]
fn test_dry_run_leaves_file_untouched() {
    let (_dir, pom) = setup();
    let ctx = Context {
        dry_run: true,
        ..Context::default()
    };

    modify_project::run(
        ModifyProjectArgs {
            group_id: None,
            artifact_id: None,
            version: Some("9.9.9".to_string()),
            name: None,
            description: None,
            url: None,
            manifest: manifest(&pom),
        },
        &ctx,
    )
    .unwrap();

    assert_eq!(std::fs::read_to_string(&pom).unwrap(), POM);
}
