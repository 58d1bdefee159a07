mod arena;
mod lookup;
mod token;
mod token_kind;

use crate::event::{Sink, TokenView};
use crate::Error;
use crate::LimitTracker;

use arena::Arena;
pub use token::TokenId;
pub(crate) use token::Token;
pub use token_kind::NumberKind;
pub(crate) use token_kind::TokenKind;

/// The lexer's mode: what the next code point will be interpreted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between tokens; dispatches delimiters and starts new lexemes.
    Value,
    Identifier,
    String,
    /// Saw `\` after a completed string; a `"` will reopen that string.
    Continue,
    Number,
}

/// Outcome of one dispatch step.
enum Step {
    Done,
    /// The character closed an in-flight lexeme and must be dispatched again
    /// against [`State::Value`].
    Repeat,
}

/// Parse SNOT text into an event stream, one code point at a time.
///
/// The parser owns a [`Sink`] and calls it as tokens complete; it holds no
/// document buffer of its own beyond the lexeme pool, so arbitrarily large
/// inputs stream through in constant space per open section. Feed code
/// points with [`parse`](Parser::parse) (or whole strings with
/// [`parse_str`](Parser::parse_str)), then call [`end`](Parser::end) to
/// flush and close everything still open.
///
/// ## Example
///
/// ```rust
/// use snot_parser::{Parser, Sink, TokenView};
///
/// /// Counts sections as they close.
/// #[derive(Default)]
/// struct Sections(usize);
///
/// impl Sink for Sections {
///     fn end_section(&mut self, _token: TokenView<'_>) {
///         self.0 += 1;
///     }
/// }
///
/// let mut parser = Parser::new(Sections::default());
/// parser.parse_str("display width 1920,height 1080;").unwrap();
/// parser.end().unwrap();
///
/// assert_eq!(parser.finish().0, 3);
/// ```
#[derive(Debug)]
pub struct Parser<S: Sink> {
    arena: Arena,
    state: State,
    /// In-flight number classification; `None` until the second character of
    /// the lexeme decides the base.
    number: Option<NumberKind>,
    /// A backslash inside a string is pending its escape character.
    escaped: bool,
    sink: S,
    tokens: LimitTracker,
    depth: LimitTracker,
}

impl<S: Sink> Parser<S> {
    /// Create a parser that reports events to `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            arena: Arena::new(),
            state: State::Value,
            number: None,
            escaped: false,
            sink,
            tokens: LimitTracker::new(usize::MAX),
            depth: LimitTracker::new(usize::MAX),
        }
    }

    /// Configure the total number of tokens the parser may create.
    pub fn token_limit(mut self, limit: usize) -> Self {
        self.tokens = LimitTracker::new(limit);
        self
    }

    /// Configure how deep the open-section stack may grow.
    pub fn depth_limit(mut self, limit: usize) -> Self {
        self.depth = LimitTracker::new(limit);
        self
    }

    /// Feed one code point.
    ///
    /// Events for any tokens the character completes are delivered to the
    /// sink before this returns. On an error the parse cannot be resumed.
    pub fn parse(&mut self, c: char) -> Result<(), Error> {
        if !lookup::is_valid(c) {
            return Err(Error::InvalidCharacter(c));
        }
        loop {
            let step = match self.state {
                State::Value => self.lex_value(c)?,
                State::Identifier => self.lex_identifier(c)?,
                State::String => self.lex_string(c)?,
                State::Continue => self.lex_continue(c)?,
                State::Number => self.lex_number(c)?,
            };
            if let Step::Done = step {
                return Ok(());
            }
        }
    }

    /// Feed a whole string, code point by code point.
    pub fn parse_str(&mut self, input: &str) -> Result<(), Error> {
        for c in input.chars() {
            self.parse(c)?;
        }
        Ok(())
    }

    /// Finish the parse: flush the in-flight lexeme, then close and emit
    /// every still-open token, innermost first.
    pub fn end(&mut self) -> Result<(), Error> {
        if self.arena.in_flight() {
            self.parse(' ')?;
            if self.arena.in_flight() {
                // An unterminated string absorbs the synthetic space.
                return Err(Error::Partial);
            }
        }
        while !self.arena.is_empty() {
            self.consume(1)?;
        }
        Ok(())
    }

    /// Consume the parser and hand back its sink.
    pub fn finish(self) -> S {
        self.sink
    }

    /// The sink the parser reports into.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The lexeme of a live token.
    ///
    /// Fails with [`Error::TokenKindUndefined`] if the id is stale: once a
    /// token has been emitted and popped, its pool bytes are released.
    pub fn value(&self, id: TokenId) -> Result<&str, Error> {
        let token = self.arena.get(id).ok_or(Error::TokenKindUndefined)?;
        self.arena.text(&token).ok_or(Error::TokenKindUndefined)
    }

    /// The enclosing token of `id`, or `None` at the top level.
    pub fn parent(&self, id: TokenId) -> Option<TokenId> {
        self.arena.get(id).and_then(|token| token.parent)
    }

    /// The numeric subtype of a number token.
    ///
    /// Fails with [`Error::TokenKindUndefined`] for anything that is not a
    /// number.
    pub fn number_kind(&self, id: TokenId) -> Result<NumberKind, Error> {
        match self.arena.get(id).map(|token| token.kind) {
            Some(TokenKind::Number(kind)) => Ok(kind),
            _ => Err(Error::TokenKindUndefined),
        }
    }

    /// Token-count utilization and configured limit.
    pub fn token_usage(&self) -> LimitTracker {
        self.tokens
    }

    /// Open-stack depth utilization and configured limit.
    pub fn depth_usage(&self) -> LimitTracker {
        self.depth
    }

    /// Dispatch between tokens: delimiters, groups, string openers, and the
    /// first character of a new lexeme.
    fn lex_value(&mut self, c: char) -> Result<Step, Error> {
        match c {
            '.' => self.consume(3)?,
            ';' => self.consume(2)?,
            ',' => self.consume(1)?,
            '(' => {
                debug_assert_eq!(self.arena.start(), self.arena.current());
                let token = Token {
                    start: self.arena.start(),
                    length: 0,
                    parent: self.arena.open_parent(),
                    kind: TokenKind::Group,
                };
                self.push_token(token)?;
            }
            ')' => loop {
                let (_, top) = self.arena.peek(0)?;
                if top.kind == TokenKind::Group {
                    self.arena.pop()?;
                    break;
                }
                self.consume(1)?;
            },
            '"' => self.state = State::String,
            '\\' => {
                let (_, top) = self.arena.peek(0)?;
                if top.kind != TokenKind::String {
                    return Err(Error::InvalidCharacter(c));
                }
                self.state = State::Continue;
            }
            _ if lookup::is_whitespace(c) => {}
            _ => {
                if c.is_ascii_digit() {
                    self.state = State::Number;
                    self.number = None;
                } else {
                    self.state = State::Identifier;
                }
                self.arena.append_code_point(c)?;
            }
        }
        Ok(Step::Done)
    }

    fn lex_identifier(&mut self, c: char) -> Result<Step, Error> {
        if lookup::is_whitespace(c) || lookup::is_reserved(c) {
            self.complete(TokenKind::Identifier)?;
            return Ok(if lookup::is_whitespace(c) {
                Step::Done
            } else {
                Step::Repeat
            });
        }
        self.arena.append_code_point(c)?;
        Ok(Step::Done)
    }

    fn lex_string(&mut self, c: char) -> Result<Step, Error> {
        if self.escaped {
            self.escaped = false;
            let decoded = unescape(c).ok_or(Error::InvalidCharacter(c))?;
            self.arena.append_code_point(decoded)?;
        } else if c == '"' {
            self.complete(TokenKind::String)?;
        } else if c == '\\' {
            self.escaped = true;
        } else {
            self.arena.append_code_point(c)?;
        }
        Ok(Step::Done)
    }

    /// After `"..."\`: wait for the `"` that reopens the string in place.
    fn lex_continue(&mut self, c: char) -> Result<Step, Error> {
        if lookup::is_whitespace(c) {
            return Ok(Step::Done);
        }
        if c == '"' {
            let token = self.arena.reopen_top()?;
            debug_assert_eq!(token.kind, TokenKind::String);
            self.state = State::String;
            return Ok(Step::Done);
        }
        Err(Error::InvalidCharacter(c))
    }

    fn lex_number(&mut self, c: char) -> Result<Step, Error> {
        if self.number.is_none() {
            // Classification happens on the second character; the first is
            // already pooled.
            if self.arena.first_lexeme_byte() == Some(b'0') {
                if c == 'x' || c == 'X' {
                    // The base marker joins the lexeme and is exempt from
                    // digit validation.
                    self.number = Some(NumberKind::Hex);
                    self.arena.append_code_point(c)?;
                    return Ok(Step::Done);
                }
                self.number = Some(NumberKind::Oct);
            } else {
                self.number = Some(NumberKind::Dec);
            }
        }
        let kind = self.number.ok_or(Error::TokenKindUndefined)?;

        if !(c == '.' && kind == NumberKind::Dec)
            && (lookup::is_whitespace(c) || lookup::is_reserved(c))
        {
            let whitespace = lookup::is_whitespace(c);
            // A `.` straight before whitespace is the close-three delimiter,
            // not part of the number.
            let trailing_dot = whitespace && self.arena.last_lexeme_byte() == Some(b'.');
            if trailing_dot {
                self.arena.pop_code_point();
            }
            self.complete(TokenKind::Number(kind))?;
            if trailing_dot {
                self.consume(3)?;
            }
            return Ok(if whitespace { Step::Done } else { Step::Repeat });
        }

        match kind {
            NumberKind::Dec if c == '.' => self.number = Some(NumberKind::Real),
            NumberKind::Dec | NumberKind::Real if !c.is_ascii_digit() => {
                return Err(Error::InvalidCharacter(c));
            }
            NumberKind::Hex if !c.is_ascii_hexdigit() => {
                return Err(Error::InvalidCharacter(c));
            }
            NumberKind::Oct if !lookup::is_oct_digit(c) => {
                return Err(Error::InvalidCharacter(c));
            }
            _ => {}
        }
        self.arena.append_code_point(c)?;
        Ok(Step::Done)
    }

    /// Terminate the in-flight lexeme, promote whatever it turns into a
    /// section, and push the new token.
    fn complete(&mut self, kind: TokenKind) -> Result<(), Error> {
        self.arena.append_terminator()?;
        let token = Token {
            start: self.arena.start(),
            length: self.arena.current() - self.arena.start() - 1,
            parent: self.arena.open_parent(),
            kind,
        };
        self.arena.finish_lexeme();
        self.promote_sections()?;
        self.push_token(token)?;
        self.state = State::Value;
        Ok(())
    }

    /// Walk back from the top of the stack, promoting identifiers and
    /// strings into sections. Groups are transparent; numbers and sections
    /// already there stop the scan.
    fn promote_sections(&mut self) -> Result<(), Error> {
        let mut depth = 0;
        while let Ok((id, token)) = self.arena.peek(depth) {
            match token.kind {
                TokenKind::Identifier | TokenKind::String => {
                    self.arena.promote(id);
                    let promoted = Token {
                        kind: TokenKind::Section,
                        ..token
                    };
                    self.emit(id, &promoted, S::start_section)?;
                    depth += 1;
                }
                TokenKind::Group => depth += 1,
                _ => break,
            }
        }
        Ok(())
    }

    /// Emit and pop the top `count` tokens.
    fn consume(&mut self, count: usize) -> Result<(), Error> {
        for _ in 0..count {
            let (id, token) = self.arena.peek(0)?;
            match token.kind {
                TokenKind::Section => self.emit(id, &token, S::end_section)?,
                TokenKind::Number(_) => self.emit(id, &token, S::number)?,
                TokenKind::Identifier | TokenKind::String => {
                    self.emit(id, &token, S::string)?
                }
                TokenKind::Group => return Err(Error::InvalidCharacter('(')),
            }
            self.arena.pop()?;
        }
        Ok(())
    }

    fn emit(
        &mut self,
        id: TokenId,
        token: &Token,
        event: impl FnOnce(&mut S, TokenView<'_>),
    ) -> Result<(), Error> {
        let text = self.arena.text(token).ok_or(Error::TokenKindUndefined)?;
        let view = TokenView {
            id,
            text,
            parent: token.parent,
            number: token.kind.number_kind(),
        };
        event(&mut self.sink, view);
        Ok(())
    }

    fn push_token(&mut self, token: Token) -> Result<TokenId, Error> {
        let created = self.tokens.current + 1;
        if self.tokens.check(created) {
            return Err(Error::NoMemory);
        }
        let id = self.arena.push(token)?;
        if self.depth.check(self.arena.depth()) {
            return Err(Error::NoMemory);
        }
        Ok(id)
    }
}

/// Decode the character following a backslash inside a string.
fn unescape(c: char) -> Option<char> {
    match c {
        '\'' | '"' | '?' | '\\' => Some(c),
        'a' => Some('\u{0007}'),
        'b' => Some('\u{0008}'),
        'f' => Some('\u{000C}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{000B}'),
        'e' => Some('\u{001B}'),
        _ => None,
    }
}
