//! Mapping between the XML tree and the document model
//!
//! Loading reads the modelled sections out of the tree and keeps the tree.
//! Rendering writes the modelled sections back into a copy of that tree, so
//! everything else in the file (build, modules, repositories, comments, ...)
//! survives an edit.

use crate::types::{Dependency, Document, Parent, Profile, Properties};
use crate::xml::{Element, Node, XmlDocument};
use crate::{Error, Result};
use std::collections::BTreeSet;
use std::path::Path;

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const POM_SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd";

/// Maven's default id for a profile without one
const DEFAULT_PROFILE_ID: &str = "default";

/// Canonical child order of `<project>`
const PROJECT_ORDER: &[&str] = &[
    "modelVersion",
    "parent",
    "groupId",
    "artifactId",
    "version",
    "packaging",
    "name",
    "description",
    "url",
    "inceptionYear",
    "organization",
    "licenses",
    "developers",
    "contributors",
    "mailingLists",
    "prerequisites",
    "modules",
    "scm",
    "issueManagement",
    "ciManagement",
    "distributionManagement",
    "properties",
    "dependencyManagement",
    "dependencies",
    "repositories",
    "pluginRepositories",
    "build",
    "reporting",
    "profiles",
];

/// Canonical child order of `<profile>`
const PROFILE_ORDER: &[&str] = &[
    "id",
    "activation",
    "build",
    "modules",
    "distributionManagement",
    "properties",
    "dependencyManagement",
    "dependencies",
    "repositories",
    "pluginRepositories",
    "reporting",
];

const DEPENDENCY_FIELDS: &[&str] = &[
    "groupId",
    "artifactId",
    "version",
    "type",
    "scope",
    "systemPath",
    "optional",
];

/// Parse manifest text
///
/// `path` is only used in error messages.
pub fn parse(text: &str, path: &Path) -> Result<Document> {
    let xml = XmlDocument::parse(text)?;
    from_xml(xml, path)
}

/// Decode raw manifest bytes
///
/// UTF-8 unless the XML declaration names ISO-8859-1 (or US-ASCII). Bytes
/// that do not fit the encoding are a parse error.
pub fn decode(bytes: &[u8]) -> Result<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match declared_encoding(bytes).as_deref() {
        None | Some("UTF-8" | "UTF8") => std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| Error::xml(e.valid_up_to() as u64, e)),
        Some("ISO-8859-1" | "ISO8859-1" | "LATIN1" | "LATIN-1" | "US-ASCII" | "ASCII") => {
            Ok(bytes.iter().map(|&b| b as char).collect())
        }
        Some(other) => Err(Error::xml(0, format!("unsupported encoding '{}'", other))),
    }
}

/// `encoding` pseudo-attribute of the XML declaration, upper-cased
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let head = bytes.strip_prefix(b"<?xml")?;
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = std::str::from_utf8(&head[..end]).ok()?;

    let rest = &decl[decl.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    Some(value[..value.find(quote)?].to_ascii_uppercase())
}

/// Render a document as manifest text
pub fn render(document: &Document) -> Result<String> {
    to_xml(document).to_xml_string()
}

/// Build a document from a parsed tree
pub fn from_xml(xml: XmlDocument, path: &Path) -> Result<Document> {
    let root = &xml.root;
    if root.name != "project" {
        return Err(Error::InvalidFormat(
            path.to_path_buf(),
            format!("expected a <project> root element, found <{}>", root.name),
        ));
    }

    let parent = root.child("parent").map(|el| Parent {
        group_id: el.child_text("groupId").unwrap_or_default(),
        artifact_id: el.child_text("artifactId").unwrap_or_default(),
        version: el.child_text("version").unwrap_or_default(),
        relative_path: el.child_text("relativePath"),
    });

    let dependency_management = root
        .child("dependencyManagement")
        .map(|dm| dm.child("dependencies").map(read_dependencies).unwrap_or_default());

    let mut profiles: Vec<Profile> = Vec::new();
    for el in root.child("profiles").into_iter().flat_map(|p| p.children_named("profile")) {
        let id = el
            .child_text("id")
            .unwrap_or_else(|| DEFAULT_PROFILE_ID.to_string());
        if profiles.iter().any(|profile| profile.id == id) {
            return Err(Error::InvalidFormat(
                path.to_path_buf(),
                format!("duplicate profile id '{}'", id),
            ));
        }
        profiles.push(Profile {
            id,
            properties: read_properties(el),
            source: Some(el.clone()),
        });
    }

    Ok(Document {
        group_id: root.child_text("groupId"),
        artifact_id: root.child_text("artifactId"),
        version: root.child_text("version"),
        name: root.child_text("name"),
        description: root.child_text("description"),
        url: root.child_text("url"),
        parent,
        dependencies: root
            .child("dependencies")
            .map(read_dependencies)
            .unwrap_or_default(),
        dependency_management,
        properties: read_properties(root),
        profiles,
        source: Some(xml),
    })
}

/// Write the document's modelled sections into its tree (or a fresh one)
pub fn to_xml(document: &Document) -> XmlDocument {
    let mut xml = document.source.clone().unwrap_or_else(empty_project);
    let root = &mut xml.root;

    root.set_child_text("groupId", document.group_id.as_deref(), PROJECT_ORDER);
    root.set_child_text("artifactId", document.artifact_id.as_deref(), PROJECT_ORDER);
    root.set_child_text("version", document.version.as_deref(), PROJECT_ORDER);
    root.set_child_text("name", document.name.as_deref(), PROJECT_ORDER);
    root.set_child_text("description", document.description.as_deref(), PROJECT_ORDER);
    root.set_child_text("url", document.url.as_deref(), PROJECT_ORDER);

    match &document.parent {
        Some(parent) => *root.upsert_child("parent", PROJECT_ORDER) = parent_element(parent),
        None => root.remove_children("parent"),
    }

    write_properties(root, &document.properties, PROJECT_ORDER);
    write_dependency_management(root, document.dependency_management.as_deref());
    write_dependencies(root, &document.dependencies, PROJECT_ORDER);

    if document.profiles.is_empty() {
        root.remove_children("profiles");
    } else {
        root.upsert_child("profiles", PROJECT_ORDER).children = document
            .profiles
            .iter()
            .map(|profile| Node::Element(profile_element(profile)))
            .collect();
    }

    xml
}

fn empty_project() -> XmlDocument {
    let mut root = Element::new("project");
    root.attributes = vec![
        ("xmlns".to_string(), POM_NAMESPACE.to_string()),
        (
            "xmlns:xsi".to_string(),
            "http://www.w3.org/2001/XMLSchema-instance".to_string(),
        ),
        (
            "xsi:schemaLocation".to_string(),
            POM_SCHEMA_LOCATION.to_string(),
        ),
    ];
    root.children
        .push(Node::Element(Element::with_text("modelVersion", "4.0.0")));
    XmlDocument::new(root)
}

fn read_dependencies(list: &Element) -> Vec<Dependency> {
    list.children_named("dependency").map(read_dependency).collect()
}

fn read_dependency(el: &Element) -> Dependency {
    let extras = el
        .children
        .iter()
        .filter(|node| match node {
            Node::Element(child) => !DEPENDENCY_FIELDS.contains(&child.name.as_str()),
            Node::Comment(_) => true,
            Node::Text(_) | Node::CData(_) => false,
        })
        .cloned()
        .collect();

    Dependency {
        group_id: el.child_text("groupId"),
        artifact_id: el.child_text("artifactId"),
        version: el.child_text("version"),
        system_path: el.child_text("systemPath"),
        dep_type: el.child_text("type"),
        scope: el.child_text("scope"),
        optional: el.child_text("optional"),
        extras,
    }
}

fn read_properties(el: &Element) -> Properties {
    el.child("properties")
        .map(|props| {
            props
                .elements()
                .map(|prop| (prop.name.clone(), prop.text().unwrap_or_default()))
                .collect()
        })
        .unwrap_or_default()
}

fn parent_element(parent: &Parent) -> Element {
    let mut el = Element::new("parent");
    for (name, value) in [
        ("groupId", parent.group_id.as_str()),
        ("artifactId", parent.artifact_id.as_str()),
        ("version", parent.version.as_str()),
    ] {
        if !value.is_empty() {
            el.children.push(Node::Element(Element::with_text(name, value)));
        }
    }
    if let Some(relative_path) = &parent.relative_path {
        el.children
            .push(Node::Element(Element::with_text("relativePath", relative_path)));
    }
    el
}

fn dependency_element(dependency: &Dependency) -> Element {
    let mut el = Element::new("dependency");
    for (name, value) in [
        ("groupId", &dependency.group_id),
        ("artifactId", &dependency.artifact_id),
        ("version", &dependency.version),
        ("type", &dependency.dep_type),
        ("scope", &dependency.scope),
        ("systemPath", &dependency.system_path),
    ] {
        if let Some(value) = value {
            el.children.push(Node::Element(Element::with_text(name, value)));
        }
    }
    el.children.extend(dependency.extras.iter().cloned());
    if let Some(optional) = &dependency.optional {
        el.children
            .push(Node::Element(Element::with_text("optional", optional)));
    }
    el
}

fn profile_element(profile: &Profile) -> Element {
    let mut el = profile
        .source
        .clone()
        .unwrap_or_else(|| Element::new("profile"));
    if profile.id != DEFAULT_PROFILE_ID || el.child("id").is_some() {
        el.set_child_text("id", Some(&profile.id), PROFILE_ORDER);
    }
    write_properties(&mut el, &profile.properties, PROFILE_ORDER);
    el
}

/// Sync `<properties>` under `parent`: existing entries keep their position,
/// removed keys disappear, new keys are appended
fn write_properties(parent: &mut Element, properties: &Properties, order: &[&str]) {
    if properties.is_empty() {
        parent.remove_children("properties");
        return;
    }

    let el = parent.upsert_child("properties", order);
    let mut written = BTreeSet::new();
    el.children.retain_mut(|node| match node {
        Node::Element(prop) => match properties.get(&prop.name) {
            Some(value) if written.insert(prop.name.clone()) => {
                prop.set_text(value);
                true
            }
            _ => false,
        },
        _ => true,
    });

    for (name, value) in properties {
        if !written.contains(name) {
            el.children
                .push(Node::Element(Element::with_text(name.as_str(), value)));
        }
    }
}

fn write_dependencies(parent: &mut Element, dependencies: &[Dependency], order: &[&str]) {
    if dependencies.is_empty() {
        parent.remove_children("dependencies");
        return;
    }

    parent.upsert_child("dependencies", order).children = dependencies
        .iter()
        .map(|dependency| Node::Element(dependency_element(dependency)))
        .collect();
}

fn write_dependency_management(root: &mut Element, managed: Option<&[Dependency]>) {
    let Some(managed) = managed else {
        root.remove_children("dependencyManagement");
        return;
    };
    if managed.is_empty() && root.child("dependencyManagement").is_none() {
        return;
    }

    let emptied = {
        let dm = root.upsert_child("dependencyManagement", PROJECT_ORDER);
        write_dependencies(dm, managed, &["dependencies"]);
        dm.children.is_empty()
    };
    if emptied {
        root.remove_children("dependencyManagement");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <parent>
        <groupId>com.example</groupId>
        <artifactId>parent</artifactId>
        <version>1</version>
    </parent>
    <artifactId>app</artifactId>
    <name>App</name>
    <properties>
        <java.version>17</java.version>
        <empty/>
    </properties>
    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>org.managed</groupId>
                <artifactId>bom</artifactId>
                <version>3.0</version>
                <type>pom</type>
                <scope>import</scope>
            </dependency>
        </dependencies>
    </dependencyManagement>
    <dependencies>
        <dependency>
            <groupId>junit</groupId>
            <artifactId>junit</artifactId>
            <version>4.13</version>
            <scope>test</scope>
            <!-- keep -->
            <exclusions>
                <exclusion><groupId>x</groupId><artifactId>y</artifactId></exclusion>
            </exclusions>
            <optional>true</optional>
        </dependency>
    </dependencies>
    <build>
        <finalName>app</finalName>
    </build>
    <profiles>
        <profile>
            <id>dev</id>
            <activation><activeByDefault>true</activeByDefault></activation>
            <properties><env>dev</env></properties>
        </profile>
        <profile>
            <build/>
        </profile>
    </profiles>
</project>
"#;

    fn sample() -> Document {
        parse(SAMPLE, Path::new("pom.xml")).unwrap()
    }

    #[test]
    fn test_parse_reads_model_sections() {
        let document = sample();

        assert_eq!(document.group_id, None);
        assert_eq!(document.artifact_id.as_deref(), Some("app"));
        assert_eq!(document.name.as_deref(), Some("App"));
        assert_eq!(document.parent, Some(Parent::new("com.example", "parent", "1")));
        assert_eq!(document.properties["java.version"], "17");
        assert_eq!(document.properties["empty"], "");

        let managed = document.managed_dependencies();
        assert_eq!(managed.len(), 1);
        assert_eq!(managed[0].dep_type.as_deref(), Some("pom"));
        assert_eq!(managed[0].scope.as_deref(), Some("import"));

        let junit = &document.dependencies[0];
        assert_eq!(junit.version.as_deref(), Some("4.13"));
        assert!(junit.is_optional());
        assert_eq!(junit.extras.len(), 2);

        assert_eq!(document.profiles.len(), 2);
        assert_eq!(document.profiles[0].id, "dev");
        assert_eq!(document.profiles[0].properties["env"], "dev");
        assert_eq!(document.profiles[1].id, DEFAULT_PROFILE_ID);
    }

    #[test]
    fn test_render_round_trip_is_stable() {
        let first = render(&sample()).unwrap();
        let reparsed = parse(&first, Path::new("pom.xml")).unwrap();
        let second = render(&reparsed).unwrap();

        assert_eq!(first, second);
        assert!(first.contains("<finalName>app</finalName>"));
        assert!(first.contains("<!-- keep -->"));
        assert!(first.contains("<activeByDefault>true</activeByDefault>"));
        assert!(first.contains("    <modelVersion>4.0.0</modelVersion>"));
    }

    #[test]
    fn test_render_places_new_elements_canonically() {
        let mut document = sample();
        document.group_id = Some("com.example".to_string());
        document.url = Some("https://example.com".to_string());

        let xml = to_xml(&document);
        let names: Vec<&str> = xml.root.elements().map(|e| e.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "modelVersion",
                "parent",
                "groupId",
                "artifactId",
                "name",
                "url",
                "properties",
                "dependencyManagement",
                "dependencies",
                "build",
                "profiles",
            ]
        );
    }

    #[test]
    fn test_render_omits_unset_fields() {
        let mut document = sample();
        document.name = None;
        document.parent = None;
        document.dependencies.clear();
        document.dependency_management = Some(Vec::new());

        let xml = render(&document).unwrap();

        assert!(!xml.contains("<name>"));
        assert!(!xml.contains("<parent>"));
        assert!(!xml.contains("<dependencies>"));
        assert!(!xml.contains("<dependencyManagement>"));
    }

    #[test]
    fn test_render_dependency_field_order() {
        let mut document = Document::new();
        document.dependencies.push(
            Dependency::new("g", "a")
                .with_version("1")
                .with_system_path("/lib/a.jar")
                .with_scope("system")
                .with_type("jar")
                .with_optional(true),
        );

        let xml = to_xml(&document);
        let dependency = xml
            .root
            .child("dependencies")
            .and_then(|deps| deps.child("dependency"))
            .unwrap();
        let names: Vec<&str> = dependency.elements().map(|e| e.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["groupId", "artifactId", "version", "type", "scope", "systemPath", "optional"]
        );
    }

    #[test]
    fn test_fresh_document_gets_project_skeleton() {
        let mut document = Document::new();
        document.artifact_id = Some("app".to_string());

        let xml = render(&document).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project xmlns="));
        assert!(xml.contains(
            "  <modelVersion>4.0.0</modelVersion>\n  <artifactId>app</artifactId>"
        ));
    }

    #[test]
    fn test_properties_keep_existing_positions() {
        let mut document = sample();
        document.properties.insert("a.new".to_string(), "x".to_string());
        document
            .properties
            .insert("java.version".to_string(), "21".to_string());
        document.properties.remove("empty");

        let xml = to_xml(&document);
        let props: Vec<(String, String)> = xml
            .root
            .child("properties")
            .unwrap()
            .elements()
            .map(|e| (e.name.clone(), e.text().unwrap_or_default()))
            .collect();

        assert_eq!(
            props,
            vec![
                ("java.version".to_string(), "21".to_string()),
                ("a.new".to_string(), "x".to_string()),
            ]
        );
    }

    #[test]
    fn test_optional_expression_survives_unrelated_edit() {
        let text = r#"<project>
  <dependencies>
    <dependency>
      <groupId>g</groupId>
      <artifactId>a</artifactId>
      <optional>${opt}</optional>
    </dependency>
    <dependency>
      <groupId>g</groupId>
      <artifactId>b</artifactId>
      <optional>false</optional>
    </dependency>
  </dependencies>
</project>"#;
        let mut document = parse(text, Path::new("pom.xml")).unwrap();
        assert!(!document.dependencies[0].is_optional());
        assert!(!document.dependencies[1].is_optional());

        document.properties.insert("x".to_string(), "1".to_string());
        let xml = render(&document).unwrap();

        assert!(xml.contains("<optional>${opt}</optional>"));
        assert!(xml.contains("<optional>false</optional>"));
    }

    #[test]
    fn test_duplicate_profile_ids_are_invalid_format() {
        let id_less =
            "<project><profiles><profile/><profile><build/></profile></profiles></project>";
        let err = parse(id_less, Path::new("pom.xml")).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_, ref msg) if msg.contains("'default'")));

        let repeated = "<project><profiles>\
            <profile><id>ci</id></profile><profile><id>ci</id></profile>\
            </profiles></project>";
        assert!(matches!(
            parse(repeated, Path::new("pom.xml")),
            Err(Error::InvalidFormat(..))
        ));
    }

    #[test]
    fn test_decode_honours_declared_encoding() {
        let latin1 = b"<?xml version='1.0' encoding='ISO-8859-1'?>\
            <project><name>Caf\xE9</name></project>";
        let text = decode(latin1).unwrap();
        let document = parse(&text, Path::new("pom.xml")).unwrap();
        assert_eq!(document.name.as_deref(), Some("Café"));

        let utf8 = "\u{feff}<?xml version=\"1.0\" encoding=\"utf-8\"?><project/>";
        assert!(decode(utf8.as_bytes()).unwrap().starts_with("<?xml"));
    }

    #[test]
    fn test_decode_rejects_bytes_outside_the_encoding() {
        let err = decode(b"<project><name>Caf\xE9</name></project>").unwrap_err();
        assert!(matches!(err, Error::Xml { position: 18, .. }));

        let err = decode(b"<?xml version=\"1.0\" encoding=\"EBCDIC\"?><project/>").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Parse);
    }

    #[test]
    fn test_wrong_root_is_invalid_format() {
        let err = parse("<settings/>", Path::new("settings.xml")).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(..)));
    }
}
