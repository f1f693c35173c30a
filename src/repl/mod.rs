//! Line-oriented shell
//!
//! Reads one line at a time, runs a fresh [`Lexer`] over it and prints every
//! token up to end of input. In [`Mode::Ast`] each line is parsed instead and
//! its canonical form is printed together with any diagnostics. Nothing is
//! carried from one line to the next.

pub mod theme;

use crate::parser::lexer::Lexer;
use crate::parser::parse::{parse, ParseOutput};
use crate::parser::token::{Token, TokenKind};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, BufRead, Write};
use theme::{Theme, DEFAULT_THEME};
use tracing::trace;

pub const PROMPT: &str = ">> ";

/// What the shell prints for each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Tokens,
    Ast,
}

/// Writes tokens, programs, and diagnostics, optionally coloured.
pub struct Printer {
    color: bool,
    theme: &'static Theme,
}

impl Printer {
    pub fn new(color: bool) -> Self {
        Printer {
            color,
            theme: &DEFAULT_THEME,
        }
    }

    fn write_colored<W: Write>(&self, out: &mut W, color: Color, text: &str) -> io::Result<()> {
        if self.color {
            queue!(out, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            out.write_all(text.as_bytes())
        }
    }

    pub fn write_prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_colored(out, self.theme.prompt, PROMPT)?;
        out.flush()
    }

    /// One line per token: `Kind "literal"`.
    pub fn write_token<W: Write>(&self, out: &mut W, token: &Token) -> io::Result<()> {
        self.write_colored(out, self.theme.token_color(token.kind), &format!("{:?}", token.kind))?;
        writeln!(out, " {:?}", token.literal)
    }

    /// Every token of `source` except the final `EOF`.
    pub fn write_tokens<W: Write>(&self, out: &mut W, source: &str) -> io::Result<()> {
        for token in Lexer::new(source).take_while(|t| !t.is(TokenKind::Eof)) {
            self.write_token(out, &token)?;
        }
        Ok(())
    }

    pub fn write_parse_output<W: Write>(&self, out: &mut W, output: &ParseOutput) -> io::Result<()> {
        if !output.program.is_empty() {
            self.write_colored(out, self.theme.success, &output.program.to_string())?;
            writeln!(out)?;
        }
        for diagnostic in &output.diagnostics {
            self.write_colored(out, self.theme.error, &diagnostic.to_string())?;
            writeln!(out)?;
        }
        Ok(())
    }
}

pub struct Repl {
    mode: Mode,
    printer: Printer,
}

impl Repl {
    pub fn new(mode: Mode, color: bool) -> Self {
        Repl {
            mode,
            printer: Printer::new(color),
        }
    }

    /// Run until `input` is exhausted.
    pub fn start<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            self.printer.write_prompt(out)?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line?;
            trace!(%line, mode = ?self.mode, "read line");

            match self.mode {
                Mode::Tokens => self.printer.write_tokens(out, &line)?,
                Mode::Ast => self.printer.write_parse_output(out, &parse(&line))?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(mode: Mode, input: &str) -> String {
        let mut out = Vec::new();
        Repl::new(mode, false)
            .start(Cursor::new(input), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_token_dump() {
        let output = run(Mode::Tokens, "let x = 5;\n");
        assert_eq!(
            output,
            ">> Let \"let\"\nIdentifier \"x\"\nAssign \"=\"\nInt \"5\"\nSemicolon \";\"\n>> "
        );
    }

    #[test]
    fn test_each_line_is_independent() {
        let output = run(Mode::Tokens, "a\n\nb\n");
        assert_eq!(
            output,
            ">> Identifier \"a\"\n>> >> Identifier \"b\"\n>> "
        );
    }

    #[test]
    fn test_ast_mode() {
        let output = run(Mode::Ast, "x = 1 + 2 * 3;\nlet = 4;\n");
        assert!(output.contains("x = (1 + (2 * 3));\n"));
        assert!(output.contains("expected next token to be IDENT, got = instead"));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let mut out = Vec::new();
        Printer::new(true).write_tokens(&mut out, "fn").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("Function"));
    }
}
