use std::fmt::{self, Write};

/// A scalar in a section's content list.
///
/// The number variants keep the text exactly as written, prefixes included,
/// so a parsed document serializes back without reformatting. Reals travel
/// as [`Value::Decimal`]: they print the same way and the distinction only
/// exists while lexing.
///
/// ### Example
/// ```rust
/// use snot_encoder::Value;
///
/// let mode = Value::octal(0o644);
/// assert_eq!(mode.as_str(), "0644");
/// assert_eq!(mode.to_u64(), Some(0o644));
///
/// let color = Value::hexadecimal(0xFF8800);
/// assert_eq!(color.as_str(), "0xff8800");
///
/// assert_eq!(Value::from(3.25).as_str(), "3.25");
/// assert_eq!(Value::from("plain text").to_u64(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Bare or quoted text, e.g. `localhost` or `"hello world"`.
    String(String),
    /// Decimal integer or real, e.g. `42` or `3.14`.
    Decimal(String),
    /// Octal integer with its `0` prefix, e.g. `0755`.
    Octal(String),
    /// Hexadecimal integer with its `0x` prefix, e.g. `0xFF`.
    Hexadecimal(String),
}

impl Value {
    /// An octal value; the text gets the `0` prefix.
    pub fn octal(n: u64) -> Self {
        Value::Octal(format!("0{n:o}"))
    }

    /// A hexadecimal value; the text gets the `0x` prefix.
    pub fn hexadecimal(n: u64) -> Self {
        Value::Hexadecimal(format!("0x{n:x}"))
    }

    /// The value's text exactly as written, prefixes included.
    pub fn as_str(&self) -> &str {
        match self {
            Value::String(text)
            | Value::Decimal(text)
            | Value::Octal(text)
            | Value::Hexadecimal(text) => text,
        }
    }

    /// Whether this is a text value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Whether this is one of the number variants.
    pub fn is_number(&self) -> bool {
        !self.is_string()
    }

    /// Decode a number value as an unsigned integer, honouring its base.
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            Value::String(_) => None,
            Value::Decimal(text) => text.parse().ok(),
            Value::Octal(text) => {
                let digits = text.strip_prefix('0').unwrap_or(text);
                if digits.is_empty() {
                    Some(0)
                } else {
                    u64::from_str_radix(digits, 8).ok()
                }
            }
            Value::Hexadecimal(text) => {
                let digits = text
                    .strip_prefix("0x")
                    .or_else(|| text.strip_prefix("0X"))
                    .unwrap_or(text);
                u64::from_str_radix(digits, 16).ok()
            }
        }
    }

    /// Decode a number value as a signed integer.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Value::Decimal(text) => text.parse().ok(),
            _ => self.to_u64().map(|n| n as i64),
        }
    }

    /// Decode a number value as a float. Reals and decimals parse directly;
    /// octals and hexadecimals convert from their integer value.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::String(_) => None,
            Value::Decimal(text) => text.parse().ok(),
            _ => self.to_u64().map(|n| n as f64),
        }
    }
}

macro_rules! decimal_value {
    ($($ty:path),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Decimal(n.to_string())
                }
            }
        )+
    };
}

// Numbers
decimal_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_string())
    }
}

/// Write and optionally escape a character inside a quoted SNOT string.
fn write_character(c: char, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match c {
        '"' => f.write_str(r#"\""#),
        '\\' => f.write_str(r"\\"),
        '\u{0007}' => f.write_str(r"\a"),
        '\u{0008}' => f.write_str(r"\b"),
        '\u{000C}' => f.write_str(r"\f"),
        '\n' => f.write_str(r"\n"),
        '\r' => f.write_str(r"\r"),
        '\t' => f.write_str(r"\t"),
        '\u{000B}' => f.write_str(r"\v"),
        '\u{001B}' => f.write_str(r"\e"),
        c => f.write_char(c),
    }
}

/// The parser's whitespace set; a bare value containing any of these would
/// be split on re-parse.
fn is_separator(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '\n'
            | '\r'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Whether `text` must be quoted to survive a round trip: anything holding
/// a separator, a delimiter, a quote or a backslash, anything that would
/// re-lex as a number, and the empty string.
fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text.starts_with(|c: char| c.is_ascii_digit())
        || text
            .chars()
            .any(|c| is_separator(c) || matches!(c, '(' | ')' | ';' | ',' | '.' | '\\' | '"'))
}

/// Write a string scalar or a section name, quoting and escaping as needed.
/// Returns whether the next bare token still needs a separating space.
pub(crate) fn write_text(
    f: &mut fmt::Formatter<'_>,
    text: &str,
    need_separator: bool,
) -> Result<bool, fmt::Error> {
    if needs_quotes(text) {
        if f.alternate() || need_separator {
            f.write_char(' ')?;
        }
        f.write_char('"')?;
        for c in text.chars() {
            write_character(c, f)?;
        }
        f.write_char('"')?;
        Ok(false)
    } else {
        if need_separator {
            f.write_char(' ')?;
        }
        f.write_str(text)?;
        Ok(true)
    }
}

/// Write one scalar. Numbers always print bare; only text can need quotes.
pub(crate) fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    need_separator: bool,
) -> Result<bool, fmt::Error> {
    match value {
        Value::String(text) => write_text(f, text, need_separator),
        _ => {
            if need_separator {
                f.write_char(' ')?;
            }
            f.write_str(value.as_str())?;
            Ok(true)
        }
    }
}
