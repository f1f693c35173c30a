//! Parse diagnostics
//!
//! The parser never aborts on malformed input. Each problem it finds becomes a
//! [`Diagnostic`] appended to a [`Diagnostics`] collector that is threaded
//! through every parsing rule by `&mut` reference; the offending rule then
//! yields no node and parsing carries on.

use super::token::{SourceLocation, TokenKind};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// The next token was not the one the grammar requires.
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },

    /// The current token cannot begin an expression.
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParseFn { kind: TokenKind },

    /// An integer literal does not fit in an `i64`.
    #[error("could not parse {literal:?} as integer")]
    InvalidInteger { literal: String },

    /// The lexer produced an `Illegal` token.
    #[error("illegal character {literal:?}")]
    IllegalCharacter { literal: String },

    /// A block reached end of input before its closing `}`.
    #[error("expected '}}' to close block opened at {opened}, reached end of input")]
    UnterminatedBlock { opened: SourceLocation },

    /// Expressions or blocks nested past the parser's depth limit.
    #[error("nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
}

/// A recorded parse error and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: SourceLocation,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.kind
        )
    }
}

impl std::error::Error for Diagnostic {}

/// Ordered collection of diagnostics for one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, location: SourceLocation) {
        let diagnostic = Diagnostic { kind, location };
        debug!(%diagnostic, "recorded diagnostic");
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// The human-readable messages, in the order they were recorded.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
