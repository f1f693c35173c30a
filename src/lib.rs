//! # Introduction
//!
//! `yac` tokenizes and parses a small C-like scripting language into an AST.
//! Malformed input never aborts a parse: problems are collected as
//! diagnostics next to whatever statements could be built.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → (Program, Diagnostics)
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds the AST with a Pratt
//!    parser; see [`parser::parse::parse`].
//! 2. [`repl`]: a line-oriented shell that dumps tokens (or parsed lines).
//! 3. [`config`] / [`logging`]: the `LOG_LEVEL` toggle and the tracing
//!    subscriber behind it.
//!
//! ## Example
//!
//! ```
//! let output = yac::parse("let x = 1 + 2 * 3;");
//! assert!(output.diagnostics.is_empty());
//! assert_eq!(output.program.to_string(), "let x = (1 + (2 * 3));");
//! ```

pub mod config;
pub mod logging;
pub mod parser;
pub mod repl;

pub use parser::lexer::tokenize;
pub use parser::parse::{parse, ParseOutput};
