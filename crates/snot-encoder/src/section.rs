use std::fmt::{self, Write};

use crate::value::{write_text, write_value};
use crate::Value;

/// A named container: an ordered list of scalar values followed by any
/// number of child sections.
///
/// ### Example
/// ```rust
/// use snot_encoder::{Section, Value};
///
/// let mut limits = Section::new("limits");
/// limits.value(Value::octal(0o644));
/// limits.value(4096);
///
/// assert_eq!(limits.to_string(), "limits 0644,4096");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    content: Vec<Value>,
    children: Vec<Section>,
}

impl Section {
    /// Create an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append a scalar to the content list.
    pub fn value(&mut self, value: impl Into<Value>) {
        self.content.push(value.into());
    }

    /// Append a child section.
    pub fn section(&mut self, child: Section) {
        self.children.push(child);
    }

    /// The section's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The section's scalar values, in order.
    pub fn content(&self) -> &[Value] {
        &self.content
    }

    /// The section's child sections, in order.
    pub fn children(&self) -> &[Section] {
        &self.children
    }

    /// The first child with the given name.
    pub fn find(&self, name: &str) -> Option<&Section> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Whether a child with the given name exists.
    pub fn has(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, Some(self.name.as_str()), &self.content, &self.children, 0, false).map(|_| ())
    }
}

/// Render one node and return how many levels it leaves open: its own
/// name and content plus whatever its last child chain left open. The
/// caller owes that many close delimiters before the next sibling; at the
/// top level nothing is owed, the end of input closes the rest.
pub(crate) fn write_node(
    f: &mut fmt::Formatter<'_>,
    name: Option<&str>,
    content: &[Value],
    children: &[Section],
    mut indent_level: usize,
    mut need_separator: bool,
) -> Result<usize, fmt::Error> {
    let indented = f.alternate();
    let sp = indent_level;
    let mut depth = 0;

    if indented {
        write!(f, "{:sp$}", "")?;
        need_separator = false;
    }

    if let Some(name) = name {
        if indented {
            indent_level += 2;
        }
        need_separator = write_text(f, name, need_separator)?;
        depth += 1;
    }

    if !children.is_empty() && indented {
        if name.is_some() {
            f.write_char('\n')?;
        }
        if !content.is_empty() {
            write!(f, "{:sp$}  ", "")?;
        }
    }

    // Content values are joined by commas.
    let mut first = true;
    for value in content {
        if first {
            first = false;
        } else {
            f.write_char(',')?;
            need_separator = false;
        }
        need_separator = write_value(f, value, need_separator)?;
    }
    if !content.is_empty() {
        depth += 1;
    }

    if !children.is_empty() {
        if !content.is_empty() {
            // Close the content list before the first child.
            f.write_char(',')?;
            depth -= 1;
            if indented {
                f.write_char('\n')?;
            }
        }

        // Levels the previous child chain left open; flushed as close
        // delimiters so the next child lands at this node's level.
        let mut open = 0;
        for child in children {
            while open > 0 {
                match open {
                    1 => {
                        open -= 1;
                        f.write_char(',')?;
                    }
                    2 => {
                        open -= 2;
                        f.write_char(';')?;
                    }
                    _ => {
                        open -= 3;
                        f.write_char('.')?;
                    }
                }
                need_separator = false;
                if open == 0 && indented {
                    f.write_char('\n')?;
                }
            }
            open += write_node(
                f,
                Some(child.name()),
                child.content(),
                child.children(),
                indent_level,
                need_separator,
            )?;
        }
        depth += open;
    }

    Ok(depth)
}
