//! Renders a SNOT file as XML-ish markup on stdout.
//!
//! ```bash
//! cargo run --example snot_to_xml -- config.snot
//! ```

use std::fs;

use anyhow::Context;
use snot_parser::{Parser, Sink, TokenView};

#[derive(Default)]
struct Xml {
    indent: usize,
}

impl Sink for Xml {
    fn start_section(&mut self, token: TokenView<'_>) {
        println!("{:indent$}<{}>", "", token.text(), indent = self.indent);
        self.indent += 2;
    }

    fn end_section(&mut self, token: TokenView<'_>) {
        self.indent -= 2;
        println!("{:indent$}</{}>", "", token.text(), indent = self.indent);
    }

    fn string(&mut self, token: TokenView<'_>) {
        println!("{:indent$}{}", "", token.text(), indent = self.indent);
    }

    fn number(&mut self, token: TokenView<'_>) {
        println!("{:indent$}{}", "", token.text(), indent = self.indent);
    }
}

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: snot_to_xml <file.snot>")?;
    let text = fs::read_to_string(&path).with_context(|| format!("cannot open {path}"))?;

    let mut parser = Parser::new(Xml::default());
    parser.parse_str(&text)?;
    parser.end()?;

    Ok(())
}
