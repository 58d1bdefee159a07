use std::str::FromStr;

use snot_parser::{NumberKind, Parser, Sink, TokenView};
use thiserror::Error;

use crate::{Document, Section, Value};

/// Errors that can occur while assembling a [`Document`] from parser events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FromError {
    /// The underlying parse failed.
    #[error(transparent)]
    Parse(#[from] snot_parser::Error),
    /// A section close did not match the innermost open section.
    #[error("section close {found:?} does not match open section {expected:?}")]
    SectionMismatch {
        /// Name of the innermost open section.
        expected: String,
        /// Name carried by the close event.
        found: String,
    },
    /// A section close arrived with no section open.
    #[error("section close {found:?} with no open section")]
    UnbalancedClose {
        /// Name carried by the close event.
        found: String,
    },
}

/// An event [`Sink`] that assembles a [`Document`].
///
/// Feed it through a [`Parser`]; when the parse is done, take it back with
/// [`Parser::finish`] and call [`finish`](DocumentBuilder::finish). On a
/// structural mismatch the builder latches the first error and ignores
/// every later event, as sinks cannot fail into the parser.
///
/// [`Document::from_str`] wraps the whole dance:
///
/// ```rust
/// use snot_encoder::Document;
///
/// let document: Document = r#"logging level debug,file "app.log";"#
///     .parse()
///     .unwrap();
///
/// let logging = document.find("logging").unwrap();
/// assert_eq!(logging.find("level").unwrap().content()[0].as_str(), "debug");
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    root: Document,
    open: Vec<Section>,
    error: Option<FromError>,
}

impl DocumentBuilder {
    /// Create a builder with an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The assembled document, or the first structural error.
    ///
    /// Sections still open because [`Parser::end`] was never called are
    /// attached to their parents as-is.
    pub fn finish(mut self) -> Result<Document, FromError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        while let Some(section) = self.open.pop() {
            self.attach(section);
        }
        Ok(self.root)
    }

    fn attach(&mut self, section: Section) {
        match self.open.last_mut() {
            Some(parent) => parent.section(section),
            None => self.root.section(section),
        }
    }

    fn push_value(&mut self, value: Value) {
        match self.open.last_mut() {
            Some(section) => section.value(value),
            None => self.root.value(value),
        }
    }
}

impl Sink for DocumentBuilder {
    fn start_section(&mut self, token: TokenView<'_>) {
        if self.error.is_some() {
            return;
        }
        self.open.push(Section::new(token.text()));
    }

    fn end_section(&mut self, token: TokenView<'_>) {
        if self.error.is_some() {
            return;
        }
        match self.open.pop() {
            Some(section) if section.name() == token.text() => self.attach(section),
            Some(section) => {
                self.error = Some(FromError::SectionMismatch {
                    expected: section.name().to_string(),
                    found: token.text().to_string(),
                });
            }
            None => {
                self.error = Some(FromError::UnbalancedClose {
                    found: token.text().to_string(),
                });
            }
        }
    }

    fn string(&mut self, token: TokenView<'_>) {
        if self.error.is_some() {
            return;
        }
        self.push_value(Value::String(token.text().to_string()));
    }

    fn number(&mut self, token: TokenView<'_>) {
        if self.error.is_some() {
            return;
        }
        let text = token.text().to_string();
        let value = match token.number_kind() {
            Some(NumberKind::Oct) => Value::Octal(text),
            Some(NumberKind::Hex) => Value::Hexadecimal(text),
            // Reals print as decimals, so they travel as decimals.
            _ => Value::Decimal(text),
        };
        self.push_value(value);
    }
}

impl FromStr for Document {
    type Err = FromError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(DocumentBuilder::new());
        parser.parse_str(input)?;
        parser.end()?;
        parser.finish().finish()
    }
}
