use crate::parser::TokenKind;

/// Opaque handle to a token in the parser's table.
///
/// Handles are stable indices: the one passed to a sink callback can be used
/// with the parser's lookup methods for as long as the token is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(pub(crate) usize);

/// A record in the token table.
///
/// `start` and `length` locate the lexeme in the character pool; offsets
/// stay valid across pool growth. The terminating NUL that follows each
/// lexeme is not part of `length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) start: usize,
    pub(crate) length: usize,
    pub(crate) parent: Option<TokenId>,
    pub(crate) kind: TokenKind,
}
