use crate::parser::{NumberKind, TokenId};

/// A borrowed view of a completed token, handed to [`Sink`] callbacks.
///
/// The lexeme text borrows from the parser's character pool and is only
/// valid for the duration of the callback; copy it out if it needs to
/// outlive the event.
#[derive(Debug, Clone, Copy)]
pub struct TokenView<'a> {
    pub(crate) id: TokenId,
    pub(crate) text: &'a str,
    pub(crate) parent: Option<TokenId>,
    pub(crate) number: Option<NumberKind>,
}

impl<'a> TokenView<'a> {
    /// The token's handle, usable with the parser's lookup methods while the
    /// token is alive.
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// The token's lexeme.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The enclosing token, or `None` at the top level.
    pub fn parent(&self) -> Option<TokenId> {
        self.parent
    }

    /// The numeric subtype, for tokens reported through [`Sink::number`].
    pub fn number_kind(&self) -> Option<NumberKind> {
        self.number
    }
}

/// Receives structural events as the parser completes tokens.
///
/// All methods default to doing nothing, so a sink only has to handle the
/// events it cares about. Events are ordered: `start_section` for a section
/// precedes every event of its descendants and the matching `end_section`
/// follows them, while siblings fire in the order their tokens complete.
///
/// Sink methods cannot fail. A sink that runs into trouble of its own must
/// record that fact and ignore the events that follow.
pub trait Sink {
    /// An earlier identifier or string has turned out to name a section:
    /// something followed it before the enclosing level was closed.
    fn start_section(&mut self, token: TokenView<'_>) {
        let _ = token;
    }

    /// The section was closed by a delimiter, a `)`, or the end of input.
    fn end_section(&mut self, token: TokenView<'_>) {
        let _ = token;
    }

    /// A completed string or identifier value.
    fn string(&mut self, token: TokenView<'_>) {
        let _ = token;
    }

    /// A completed number value; the subtype is available through
    /// [`TokenView::number_kind`].
    fn number(&mut self, token: TokenView<'_>) {
        let _ = token;
    }
}
