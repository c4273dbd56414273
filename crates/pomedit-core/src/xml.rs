//! Minimal XML element tree built on `quick-xml`
//!
//! The tree keeps elements, attributes, text, CDATA and comments so a manifest
//! can be edited section by section and written back without losing content
//! the document model does not describe.

use crate::{Error, Result};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::debug;

/// A node in the element tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Child element
    Element(Element),
    /// Unescaped character data
    Text(String),
    /// CDATA section contents
    CData(String),
    /// Comment contents (without the `<!--`/`-->` markers)
    Comment(String),
}

/// An XML element with attributes in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified element name
    pub name: String,
    /// Attribute name/value pairs (values unescaped)
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element holding a single text node
    pub fn with_text(name: impl Into<String>, text: &str) -> Self {
        let mut element = Self::new(name);
        element.set_text(text);
        element
    }

    /// Iterate over child elements
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Iterate over child elements with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |element| element.name == name)
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// First child element with the given name, mutably
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Text content (text and CDATA children concatenated), `None` when the
    /// element has no character data at all
    pub fn text(&self) -> Option<String> {
        let mut text: Option<String> = None;
        for node in &self.children {
            if let Node::Text(part) | Node::CData(part) = node {
                text.get_or_insert_with(String::new).push_str(part);
            }
        }
        text
    }

    /// Text of the first child element with the given name
    ///
    /// A present but empty element (`<name/>`) yields `Some("")`.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name)
            .map(|element| element.text().unwrap_or_default())
    }

    /// Replace all children with a single text node (none for empty text)
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    /// Remove every child element with the given name
    pub fn remove_children(&mut self, name: &str) {
        self.children
            .retain(|node| !matches!(node, Node::Element(element) if element.name == name));
    }

    /// Get the child element `name`, inserting an empty one at its canonical
    /// position when missing
    ///
    /// `order` lists sibling names in their canonical order. A new element is
    /// placed before the first existing sibling that sorts after it; names
    /// absent from `order` sort last.
    pub fn upsert_child(&mut self, name: &str, order: &[&str]) -> &mut Element {
        let existing = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Element(element) if element.name == name));

        let index = match existing {
            Some(index) => index,
            None => {
                let rank = |candidate: &str| {
                    order
                        .iter()
                        .position(|known| *known == candidate)
                        .unwrap_or(usize::MAX)
                };
                let target = rank(name);
                let index = self
                    .children
                    .iter()
                    .position(|node| {
                        matches!(node, Node::Element(element) if rank(&element.name) > target)
                    })
                    .unwrap_or(self.children.len());
                self.children.insert(index, Node::Element(Element::new(name)));
                index
            }
        };

        match &mut self.children[index] {
            Node::Element(element) => element,
            _ => unreachable!("index always points at an element"),
        }
    }

    /// Set (`Some`) or remove (`None`) the text child element `name`
    pub fn set_child_text(&mut self, name: &str, value: Option<&str>, order: &[&str]) {
        match value {
            Some(value) => self.upsert_child(name, order).set_text(value),
            None => self.remove_children(name),
        }
    }

    fn trim_text(&mut self) {
        for node in &mut self.children {
            if let Node::Text(text) = node {
                let trimmed = text.trim();
                if trimmed.len() != text.len() {
                    *text = trimmed.to_string();
                }
            }
        }
        self.children
            .retain(|node| !matches!(node, Node::Text(text) if text.is_empty()));
    }
}

/// Indentation unit used when writing the tree back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    /// Character repeated per level (space or tab)
    pub fill: u8,
    /// Repetitions per level
    pub width: usize,
}

impl Default for Indent {
    fn default() -> Self {
        Self {
            fill: b' ',
            width: 2,
        }
    }
}

impl Indent {
    /// Detect the indentation unit from the first indented line that opens
    /// an element
    pub fn detect(text: &str) -> Self {
        for line in text.lines() {
            let content = line.trim_start_matches(&[' ', '\t'][..]);
            let leading = &line[..line.len() - content.len()];
            if leading.is_empty() || !content.starts_with('<') {
                continue;
            }
            if leading.bytes().all(|b| b == b'\t') {
                return Self {
                    fill: b'\t',
                    width: 1,
                };
            }
            if leading.bytes().all(|b| b == b' ') {
                return Self {
                    fill: b' ',
                    width: leading.len(),
                };
            }
        }
        Self::default()
    }
}

/// A parsed XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// Comments before the root element
    pub prolog: Vec<Node>,
    /// Root element
    pub root: Element,
    /// Comments after the root element
    pub epilog: Vec<Node>,
    /// Indentation used when writing
    pub indent: Indent,
}

impl XmlDocument {
    /// Wrap a root element with default formatting
    pub fn new(root: Element) -> Self {
        Self {
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
            indent: Indent::default(),
        }
    }

    /// Parse XML text into a tree
    ///
    /// Whitespace-only text between elements is dropped and remaining text is
    /// trimmed. Processing instructions and DOCTYPE declarations are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = Reader::from_str(text);
        let mut stack: Vec<Element> = Vec::new();
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => return Err(Error::xml(reader.buffer_position() as u64, e)),
            };
            let position = reader.buffer_position() as u64;

            let node = match event {
                Event::Start(start) => {
                    stack.push(element_from(&start, position)?);
                    continue;
                }
                Event::Empty(start) => Node::Element(element_from(&start, position)?),
                Event::End(_) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| Error::xml(position, "unexpected closing tag"))?;
                    element.trim_text();
                    Node::Element(element)
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| Error::xml(position, e))?;
                    if text.trim().is_empty() {
                        continue;
                    }
                    if stack.is_empty() {
                        return Err(Error::xml(position, "text outside of the root element"));
                    }
                    Node::Text(text.into_owned())
                }
                Event::CData(data) => {
                    let data = String::from_utf8(data.into_inner().into_owned())
                        .map_err(|e| Error::xml(position, e))?;
                    if stack.is_empty() {
                        return Err(Error::xml(position, "CDATA outside of the root element"));
                    }
                    Node::CData(data)
                }
                Event::Comment(comment) => {
                    let comment =
                        std::str::from_utf8(&comment).map_err(|e| Error::xml(position, e))?;
                    Node::Comment(comment.to_string())
                }
                Event::Decl(_) => continue,
                Event::Eof => break,
                other => {
                    debug!(?other, "Skipping XML event");
                    continue;
                }
            };

            if let Some(parent) = stack.last_mut() {
                parent.children.push(node);
                continue;
            }

            match node {
                Node::Element(element) if root.is_none() => root = Some(element),
                Node::Element(element) => {
                    return Err(Error::xml(
                        position,
                        format!("second root element <{}>", element.name),
                    ))
                }
                comment if root.is_none() => prolog.push(comment),
                comment => epilog.push(comment),
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::xml(
                reader.buffer_position() as u64,
                format!("unclosed element <{}>", open.name),
            ));
        }

        let root = root.ok_or_else(|| Error::xml(0, "document has no root element"))?;

        Ok(Self {
            prolog,
            root,
            epilog,
            indent: Indent::detect(text),
        })
    }

    /// Serialize the tree with an XML declaration and a trailing newline
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), self.indent.fill, self.indent.width);

        write_event(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        for node in &self.prolog {
            write_node(&mut writer, node)?;
        }
        write_element(&mut writer, &self.root)?;
        for node in &self.epilog {
            write_node(&mut writer, node)?;
        }

        let mut output = String::from_utf8(writer.into_inner())
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        output.push('\n');
        Ok(output)
    }
}

fn element_from(start: &BytesStart<'_>, position: u64) -> Result<Element> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| Error::xml(position, e))?
        .to_string();

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| Error::xml(position, e))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|e| Error::xml(position, e))?
            .to_string();
        let value = attribute
            .unescape_value()
            .map_err(|e| Error::xml(position, e))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
    match node {
        Node::Element(element) => write_element(writer, element),
        Node::Text(text) => write_event(writer, Event::Text(BytesText::new(text))),
        Node::CData(data) => write_event(writer, Event::CData(BytesCData::new(data.as_str()))),
        Node::Comment(comment) => write_event(
            writer,
            Event::Comment(BytesText::from_escaped(comment.as_str())),
        ),
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return write_event(writer, Event::Empty(start));
    }

    write_event(writer, Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    write_event(writer, Event::End(BytesEnd::new(element.name.as_str())))
}
