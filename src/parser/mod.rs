//! Source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token model (kinds, literals, locations)
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser state and entry point (tokens → AST)
//! - [`ast`]: AST node definitions and canonical rendering
//! - [`diagnostics`]: Errors recorded while parsing
//!
//! # Language
//!
//! - Values: 64-bit integers and booleans
//! - Statements: `let`, `return`, re-assignment, `if`/`else`, `fn` literals
//! - Expressions: `+ - * /`, `< > == !=`, prefix `-` and `!`, grouping, calls
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent for statements with precedence climbing
//! (Pratt parsing) for expressions. Malformed input is reported through
//! [`diagnostics::Diagnostics`] rather than aborting the parse.

pub mod ast;
pub mod diagnostics;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod token;

pub use expressions::Precedence;
