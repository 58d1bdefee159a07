use std::fmt;

use crate::section::write_node;
use crate::{Section, Value};

/// A complete SNOT document: top-level scalar values and sections.
///
/// The document is the synthetic root of the tree and behaves like a
/// section without a name. `Display` renders the compact textual form; the
/// alternate flag renders an indented form. Neither form emits close
/// delimiters for the outermost still-open sections, since the end of input
/// closes them on re-parse.
///
/// ### Example
/// ```rust
/// use snot_encoder::{Document, Section};
///
/// let mut server = Section::new("server");
/// let mut port = Section::new("port");
/// port.value(8080);
/// server.section(port);
///
/// let mut document = Document::new();
/// document.section(server);
///
/// assert_eq!(document.to_string(), "server port 8080");
/// assert_eq!(format!("{document:#}"), "server\n  port 8080");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Document {
    content: Vec<Value>,
    children: Vec<Section>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level scalar.
    pub fn value(&mut self, value: impl Into<Value>) {
        self.content.push(value.into());
    }

    /// Append a top-level section.
    pub fn section(&mut self, section: Section) {
        self.children.push(section);
    }

    /// The top-level scalar values, in order.
    pub fn content(&self) -> &[Value] {
        &self.content
    }

    /// The top-level sections, in order.
    pub fn children(&self) -> &[Section] {
        &self.children
    }

    /// The first top-level section with the given name.
    pub fn find(&self, name: &str) -> Option<&Section> {
        self.children.iter().find(|child| child.name() == name)
    }

    /// Whether a top-level section with the given name exists.
    pub fn has(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, None, &self.content, &self.children, 0, false).map(|_| ())
    }
}
