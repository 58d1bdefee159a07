use expect_test::expect;
use pretty_assertions::assert_eq;

use crate::{Error, Parser, Sink, TokenId, TokenView};

/// Records every event as a line of text.
#[derive(Debug, Default)]
struct EventLog(Vec<String>);

impl Sink for EventLog {
    fn start_section(&mut self, token: TokenView<'_>) {
        self.0.push(format!("start_section({})", token.text()));
    }
    fn end_section(&mut self, token: TokenView<'_>) {
        self.0.push(format!("end_section({})", token.text()));
    }
    fn string(&mut self, token: TokenView<'_>) {
        self.0.push(format!("string({})", token.text()));
    }
    fn number(&mut self, token: TokenView<'_>) {
        self.0.push(format!(
            "number({}, {:?})",
            token.text(),
            token.number_kind().expect("number events carry a kind")
        ));
    }
}

fn events(input: &str) -> Vec<String> {
    let mut parser = Parser::new(EventLog::default());
    parser.parse_str(input).unwrap();
    parser.end().unwrap();
    parser.finish().0
}

fn parse_error(input: &str) -> Error {
    let mut parser = Parser::new(EventLog::default());
    match parser.parse_str(input) {
        Err(err) => err,
        Ok(()) => parser.end().expect_err("expected the input to be rejected"),
    }
}

#[test]
fn juxtaposition_promotes_the_predecessor() {
    assert_eq!(
        events("name value1 value2,"),
        [
            "start_section(name)",
            "start_section(value1)",
            "string(value2)",
            "end_section(value1)",
            "end_section(name)",
        ]
    );
}

#[test]
fn comma_separated_values_stay_flat() {
    let expected = [
        "start_section(a)",
        "string(b)",
        "string(c)",
        "end_section(a)",
    ];
    assert_eq!(events("a b,c,"), expected);
    assert_eq!(events("a b, c,"), expected);
}

#[test]
fn semicolon_closes_two_levels() {
    assert_eq!(
        events("outer inner leaf 1;"),
        [
            "start_section(outer)",
            "start_section(inner)",
            "start_section(leaf)",
            "number(1, Dec)",
            "end_section(leaf)",
            "end_section(inner)",
            "end_section(outer)",
        ]
    );
}

#[test]
fn dot_closes_three_levels() {
    assert_eq!(
        events("a b c d."),
        [
            "start_section(a)",
            "start_section(b)",
            "start_section(c)",
            "string(d)",
            "end_section(c)",
            "end_section(b)",
            "end_section(a)",
        ]
    );
}

#[test]
fn string_continuation_concatenates() {
    assert_eq!(
        events(r#"k "hello"\" world","#),
        [
            "start_section(k)",
            "string(hello world)",
            "end_section(k)",
        ]
    );
}

#[test]
fn continuation_allows_whitespace_before_reopening() {
    assert_eq!(
        events(r#"k "a" \ "b","#),
        ["start_section(k)", "string(ab)", "end_section(k)"]
    );
}

#[test]
fn number_kinds_are_classified() {
    assert_eq!(
        events("n 0xFF,0755,3.14,"),
        [
            "start_section(n)",
            "number(0xFF, Hex)",
            "number(0755, Oct)",
            "number(3.14, Real)",
            "end_section(n)",
        ]
    );
}

#[test]
fn lone_zero_is_octal() {
    assert_eq!(
        events("n 0,"),
        ["start_section(n)", "number(0, Oct)", "end_section(n)"]
    );
}

#[test]
fn juxtaposed_numbers_emit_on_close() {
    // Numbers do not promote and stay on the open stack, so values that are
    // only separated by whitespace surface innermost-first when the level
    // closes. Comma-separated values (the serializer's output shape) are
    // flushed one by one and keep source order.
    assert_eq!(
        events("n 1 2 3,"),
        [
            "start_section(n)",
            "number(3, Dec)",
            "number(2, Dec)",
            "number(1, Dec)",
            "end_section(n)",
        ]
    );
}

#[test]
fn trailing_dot_closes_three_levels() {
    assert_eq!(
        events("a b 1. x,"),
        [
            "start_section(a)",
            "start_section(b)",
            "number(1, Real)",
            "end_section(b)",
            "end_section(a)",
            "string(x)",
        ]
    );
}

#[test]
fn groups_bracket_siblings() {
    assert_eq!(
        events("grp (a b) c,"),
        [
            "start_section(grp)",
            "start_section(a)",
            "string(b)",
            "end_section(a)",
            "string(c)",
            "end_section(grp)",
        ]
    );
}

#[test]
fn empty_group_leaves_no_trace() {
    assert_eq!(events("a (),"), ["string(a)"]);
}

#[test]
fn escapes_are_decoded() {
    assert_eq!(
        events(r#"m "a\tb\\c","#),
        [
            "start_section(m)",
            "string(a\tb\\c)",
            "end_section(m)",
        ]
    );
    assert_eq!(
        events(r#"m "\e","#),
        [
            "start_section(m)".to_string(),
            format!("string({})", '\u{001B}'),
            "end_section(m)".to_string(),
        ]
    );
}

#[test]
fn end_of_input_flushes_and_closes() {
    assert_eq!(
        events("a b"),
        ["start_section(a)", "string(b)", "end_section(a)"]
    );
}

#[test]
fn empty_input_is_ok() {
    assert!(events("").is_empty());
    assert!(events(" \t\n ").is_empty());
}

#[test]
fn unicode_whitespace_separates_tokens() {
    assert_eq!(
        events("a\u{3000}b,"),
        ["start_section(a)", "string(b)", "end_section(a)"]
    );
}

#[test]
fn multibyte_lexemes_round_through_the_pool() {
    assert_eq!(
        events("café wörld,"),
        [
            "start_section(café)",
            "string(wörld)",
            "end_section(café)",
        ]
    );
}

#[test]
fn unmatched_close_paren_is_partial() {
    assert_eq!(parse_error("x )"), Error::Partial);
}

#[test]
fn close_delimiter_without_open_token_is_partial() {
    assert_eq!(parse_error(","), Error::Partial);
}

#[test]
fn octal_rejects_other_digits() {
    assert_eq!(parse_error("x 0b1"), Error::InvalidCharacter('b'));
    assert_eq!(parse_error("x 09"), Error::InvalidCharacter('9'));
}

#[test]
fn hex_rejects_non_hex_digits() {
    assert_eq!(parse_error("x 0xZ"), Error::InvalidCharacter('Z'));
}

#[test]
fn real_rejects_non_digits() {
    assert_eq!(parse_error("n 1.2x"), Error::InvalidCharacter('x'));
}

#[test]
fn unknown_escape_is_rejected() {
    assert_eq!(parse_error(r#"m "a\z""#), Error::InvalidCharacter('z'));
}

#[test]
fn backslash_outside_string_context() {
    assert_eq!(parse_error("a \\ b"), Error::InvalidCharacter('\\'));
    assert_eq!(parse_error("\\x"), Error::Partial);
}

#[test]
fn noncharacters_are_rejected_everywhere() {
    assert_eq!(parse_error("\u{FFFF}"), Error::InvalidCharacter('\u{FFFF}'));
    assert_eq!(
        parse_error("\"a\u{FDD0}b\""),
        Error::InvalidCharacter('\u{FDD0}')
    );
}

#[test]
fn unterminated_string_is_partial() {
    assert_eq!(parse_error("a \"xy"), Error::Partial);
}

#[test]
fn unclosed_group_fails_the_end_sweep() {
    assert_eq!(parse_error("a (b"), Error::InvalidCharacter('('));
}

/// Captures the id of the first section and all parent links.
#[derive(Debug, Default)]
struct Links {
    first_section: Option<TokenId>,
    seen: Vec<(TokenId, Option<TokenId>)>,
}

impl Sink for Links {
    fn start_section(&mut self, token: TokenView<'_>) {
        self.first_section.get_or_insert(token.id());
        self.seen.push((token.id(), token.parent()));
    }
    fn string(&mut self, token: TokenView<'_>) {
        self.seen.push((token.id(), token.parent()));
    }
}

#[test]
fn parent_links_chain_through_sections() {
    let mut parser = Parser::new(Links::default());
    parser.parse_str("a b c.").unwrap();
    parser.end().unwrap();

    let seen = parser.finish().seen;
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0].1, None);
    assert_eq!(seen[1].1, Some(seen[0].0));
    assert_eq!(seen[2].1, Some(seen[1].0));
}

#[test]
fn live_tokens_are_queryable() {
    let mut parser = Parser::new(Links::default());
    parser.parse_str("config item ").unwrap();

    let id = parser.sink().first_section.expect("config was promoted");
    assert_eq!(parser.value(id).unwrap(), "config");
    assert_eq!(parser.parent(id), None);
    assert_eq!(
        parser.number_kind(id).unwrap_err(),
        Error::TokenKindUndefined
    );

    parser.end().unwrap();
    // The pool bytes were released by the end sweep.
    assert_eq!(parser.value(id).unwrap_err(), Error::TokenKindUndefined);
}

#[test]
fn lexemes_survive_pool_growth() {
    let payload = "x".repeat(8 * 1024);
    let input = format!("k {payload},");
    let log = events(&input);
    assert_eq!(log[1], format!("string({payload})"));
}

#[test]
fn token_limit_is_enforced() {
    let mut parser = Parser::new(EventLog::default()).token_limit(2);
    assert_eq!(parser.parse_str("a b c d.").unwrap_err(), Error::NoMemory);
}

#[test]
fn depth_limit_is_enforced() {
    let mut parser = Parser::new(EventLog::default()).depth_limit(1);
    assert_eq!(parser.parse_str("a b,").unwrap_err(), Error::NoMemory);
}

#[test]
fn usage_reports_high_water_marks() {
    let mut parser = Parser::new(EventLog::default());
    parser.parse_str("a b 1,").unwrap();
    parser.end().unwrap();

    assert_eq!(parser.token_usage().high, 3);
    assert_eq!(parser.depth_usage().high, 3);
}

#[test]
fn document_event_stream() {
    let input = r#"config window (width 1280,height 720;) title "demo".,"#;
    let dump: String = events(input)
        .into_iter()
        .map(|event| event + "\n")
        .collect();
    expect![[r#"
        start_section(config)
        start_section(window)
        start_section(width)
        number(1280, Dec)
        start_section(height)
        number(720, Dec)
        end_section(height)
        end_section(width)
        start_section(title)
        string(demo)
        end_section(title)
        end_section(window)
        end_section(config)
    "#]]
    .assert_eq(&dump);
}
