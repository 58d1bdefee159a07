use thiserror::Error;

/// Errors surfaced by [`Parser::parse`](crate::Parser::parse) and
/// [`Parser::end`](crate::Parser::end).
///
/// The parser does not recover: once a call has returned an error the
/// document is abandoned and the parser should be dropped. Sink callbacks
/// cannot signal failure back into the parser; a sink that detects a problem
/// of its own (such as a structural mismatch while building a tree) must
/// latch that state internally and ignore the remaining events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Growing the character pool or the token table failed, or a configured
    /// limit refused the growth.
    #[error("out of memory")]
    NoMemory,

    /// A Unicode noncharacter, a malformed string escape, a digit outside
    /// the detected number base, a `)` with no matching `(`, or a `\`
    /// outside a string context.
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),

    /// A close delimiter was used while no token was open, or the input
    /// ended in the middle of a token that cannot be completed.
    #[error("incomplete document")]
    Partial,

    /// Internal token bookkeeping was inconsistent, or a token that is not a
    /// number was asked for its number kind.
    #[error("token kind undefined")]
    TokenKindUndefined,
}
