//! Statement parsing implementation
//!
//! Statements are dispatched on the kind of the current token:
//!
//! ```text
//! statement ::= let_stmt | return_stmt | if_stmt | fn_stmt | assign_stmt
//! let_stmt    ::= "let" IDENT "=" expr ";"
//! return_stmt ::= "return" expr ";"
//! assign_stmt ::= IDENT "=" expr ";"
//! if_stmt     ::= "if" "(" expr ")" block ( "else" block )?
//! fn_stmt     ::= "fn" "(" params? ")" block ";"?
//! block       ::= "{" statement* "}"
//! ```
//!
//! Any other leading token yields no statement and no diagnostic, except an
//! illegal character, which is reported.

use crate::parser::ast::*;
use crate::parser::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::expressions::Precedence;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;
use tracing::trace;

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self, diags: &mut Diagnostics) -> Option<Statement> {
        trace!(token = %self.current, peek = %self.peek, "parse statement");

        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(diags).map(Statement::Let),
            TokenKind::Return => self.parse_return_statement(diags).map(Statement::Return),
            TokenKind::Function => self.parse_function_statement(diags).map(Statement::Function),
            TokenKind::If => self.parse_if_statement(diags).map(Statement::If),
            TokenKind::Identifier => self
                .parse_identifier_statement(diags)
                .map(Statement::Assignment),
            TokenKind::Illegal => {
                diags.push(
                    DiagnosticKind::IllegalCharacter {
                        literal: self.current.literal.clone(),
                    },
                    self.current.location,
                );
                None
            }
            // Silently skipped. A stray top-level token is dropped without a
            // diagnostic; kept as-is until the grammar says otherwise.
            _ => None,
        }
    }

    /// `let IDENT = expr;`
    fn parse_let_statement(&mut self, diags: &mut Diagnostics) -> Option<LetStatement> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::Identifier, diags)?;
        let name = Identifier::new(self.current.clone());

        self.expect_peek(TokenKind::Assign, diags)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest, diags)?;
        self.expect_peek(TokenKind::Semicolon, diags)?;

        Some(LetStatement { token, name, value })
    }

    /// `return expr;`
    fn parse_return_statement(&mut self, diags: &mut Diagnostics) -> Option<ReturnStatement> {
        let token = self.current.clone();

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest, diags)?;
        self.expect_peek(TokenKind::Semicolon, diags)?;

        Some(ReturnStatement { token, value })
    }

    /// Re-assignment of an existing name: `IDENT = expr;`
    fn parse_identifier_statement(
        &mut self,
        diags: &mut Diagnostics,
    ) -> Option<AssignmentStatement> {
        let token = self.current.clone();
        let name = Identifier::new(token.clone());

        self.expect_peek(TokenKind::Assign, diags)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest, diags)?;
        self.expect_peek(TokenKind::Semicolon, diags)?;

        Some(AssignmentStatement { token, name, value })
    }

    /// `if (cond) { ... } else { ... }`
    fn parse_if_statement(&mut self, diags: &mut Diagnostics) -> Option<IfStatement> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LParen, diags)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest, diags)?;
        self.expect_peek(TokenKind::RParen, diags)?;

        self.expect_peek(TokenKind::LBrace, diags)?;
        let consequence = self.parse_closed_block(diags)?;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace, diags)?;
            Some(self.parse_closed_block(diags)?)
        } else {
            None
        };

        Some(IfStatement {
            token,
            condition,
            consequence,
            alternative,
        })
    }

    /// A function literal in statement position, with an optional trailing `;`.
    fn parse_function_statement(&mut self, diags: &mut Diagnostics) -> Option<FunctionLiteral> {
        let literal = self.parse_function_literal(diags)?;
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(literal)
    }

    /// Parse statements up to the matching `}` or end of input, entered on the
    /// `{`. Running into `EOF` is not reported here.
    pub(crate) fn parse_block_statement(&mut self, diags: &mut Diagnostics) -> BlockStatement {
        let token = self.current.clone();
        let mut statements = Vec::new();

        self.next_token();
        while !self.current_is(TokenKind::RBrace) && !self.current_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement(diags) {
                statements.push(statement);
            }
            self.next_token();
        }

        BlockStatement { token, statements }
    }

    /// A block that must end on `}`; a block cut short by end of input is
    /// reported and discarded. Blocks count toward the nesting limit.
    pub(crate) fn parse_closed_block(&mut self, diags: &mut Diagnostics) -> Option<BlockStatement> {
        self.enter_nesting(diags)?;
        let block = self.parse_block_statement(diags);
        self.leave_nesting(1);
        if self.current_is(TokenKind::RBrace) {
            Some(block)
        } else {
            diags.push(
                DiagnosticKind::UnterminatedBlock {
                    opened: block.token.location,
                },
                self.current.location,
            );
            None
        }
    }
}
