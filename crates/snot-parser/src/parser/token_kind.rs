/// The numeric subtype inferred while lexing a number.
///
/// The subtype is decided by the first two characters of the lexeme: a
/// leading `0` followed by `x` or `X` is hexadecimal, a leading `0` followed
/// by anything else is octal, and any other leading digit is decimal. A
/// decimal that meets a `.` becomes a real.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    /// Decimal integer, e.g. `1280`.
    Dec,
    /// Hexadecimal integer with its `0x` prefix, e.g. `0xFF`.
    Hex,
    /// Octal integer with its `0` prefix, e.g. `0755`.
    Oct,
    /// Decimal with a fractional part, e.g. `3.14`.
    Real,
}

/// The classification of a completed token in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Number(NumberKind),
    Identifier,
    String,
    /// An identifier or string retroactively promoted once another token
    /// completed after it.
    Section,
    /// An anonymous `(` bracket; groups siblings without naming a section.
    Group,
}

impl TokenKind {
    pub(crate) fn number_kind(self) -> Option<NumberKind> {
        match self {
            TokenKind::Number(kind) => Some(kind),
            _ => None,
        }
    }
}
