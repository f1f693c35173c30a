//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, its two-token lookahead window,
//! the helper methods shared by every rule, and the [`parse`] entry point.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: statement rules (`let`, `return`, `if`, `fn`, assignment)
//! - `expressions`: precedence climbing over prefix/infix rules
//!
//! Parser methods are split across files using `impl Parser` blocks. Every
//! rule takes the [`Diagnostics`] collector by `&mut` and returns `Option`,
//! where `None` means "no node" and the reason has already been recorded.
//!
//! # Cursor convention
//!
//! A rule is entered with `current` on the first token of its production and
//! returns with `current` on the last token it consumed. The caller advances.

use crate::parser::ast::Program;
use crate::parser::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenKind};
use tracing::trace;

/// Deepest nesting of expressions and blocks a single parse will build.
///
/// Every prefix operand, parenthesized group, call argument, infix operator
/// and block counts one level, so this also bounds the depth of the AST.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Pratt parser over a pull-based token stream
pub struct Parser {
    lexer: Lexer,
    pub(crate) current: Token,
    pub(crate) peek: Token,
    depth: usize,
}

/// Result of parsing a whole source text.
///
/// The program is always complete in the sense that every statement in it was
/// fully built; callers should still check [`ParseOutput::has_errors`] before
/// trusting it, since malformed statements are left out.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub program: Program,
    pub diagnostics: Diagnostics,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Diagnostic messages in the order they were recorded.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.messages()
    }
}

/// Parse `source` into a [`Program`] plus whatever diagnostics accumulated.
///
/// Never fails outright.
pub fn parse(source: &str) -> ParseOutput {
    let mut diagnostics = Diagnostics::new();
    let program = Parser::new(source).parse_program(&mut diagnostics);
    ParseOutput {
        program,
        diagnostics,
    }
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self::from_lexer(Lexer::new(source))
    }

    /// Prime the lookahead window with the first two tokens.
    pub fn from_lexer(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            depth: 0,
        }
    }

    /// Parse statements until end of input.
    ///
    /// Statements that fail to parse are dropped; the rule that failed has
    /// already recorded why.
    pub fn parse_program(&mut self, diags: &mut Diagnostics) -> Program {
        let mut program = Program::new();

        while !self.current_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement(diags) {
                trace!(%statement, "parsed statement");
                program.statements.push(statement);
            }
            self.next_token();
        }

        program
    }

    // ===== Helper methods =====

    /// Slide the window one token forward.
    pub(crate) fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    pub(crate) fn current_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advance if the peek token is `kind`; otherwise record an
    /// unexpected-token diagnostic and leave the window untouched.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind, diags: &mut Diagnostics) -> Option<()> {
        if self.peek_is(kind) {
            self.next_token();
            Some(())
        } else {
            diags.push(
                DiagnosticKind::UnexpectedToken {
                    expected: kind,
                    found: self.peek.kind,
                },
                self.peek.location,
            );
            None
        }
    }

    /// Take one nesting level, or record `NestingTooDeep` at the current
    /// token once the limit is reached.
    pub(crate) fn enter_nesting(&mut self, diags: &mut Diagnostics) -> Option<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            diags.push(
                DiagnosticKind::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.current.location,
            );
            return None;
        }
        self.depth += 1;
        Some(())
    }

    pub(crate) fn leave_nesting(&mut self, levels: usize) {
        self.depth -= levels;
    }
}
