//! Expression parsing implementation
//!
//! Expressions are parsed by precedence climbing (a Pratt parser). Each token
//! kind may have a *prefix* rule, used when it starts an expression, and an
//! *infix* rule, used when it follows an already parsed left operand. Both
//! tables are closed `match`es over [`TokenKind`], so adding a token kind
//! forces a decision here at compile time.
//!
//! # Precedence
//!
//! ```text
//! Lowest < Equals (== !=) < LessGreater (< >) < Sum (+ -)
//!        < Product (* /) < Prefix (-x !x) < Call (f(x))
//! ```
//!
//! Infix operators are left-associative: the right operand is parsed with the
//! operator's own precedence as the threshold, and the loop only continues
//! while the next operator binds *strictly* tighter.

use crate::parser::ast::*;
use crate::parser::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;
use tracing::trace;

/// Binding power of operators, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,      // ==
    LessGreater, // > or <
    Sum,         // +
    Product,     // *
    Prefix,      // -x or !x
    Call,        // f(x)
}

impl Precedence {
    /// Precedence of `kind` in infix position; `Lowest` if it is not an
    /// infix operator.
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Slash | TokenKind::Asterisk => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}

/// How a token begins an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrefixRule {
    Identifier,
    Integer,
    Operator(PrefixOperator),
    Boolean,
    Grouped,
    Function,
}

/// How a token continues an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InfixRule {
    Binary(InfixOperator),
    Call,
}

fn prefix_rule(kind: TokenKind) -> Option<PrefixRule> {
    match kind {
        TokenKind::Identifier => Some(PrefixRule::Identifier),
        TokenKind::Int => Some(PrefixRule::Integer),
        TokenKind::Bang => Some(PrefixRule::Operator(PrefixOperator::Bang)),
        TokenKind::Minus => Some(PrefixRule::Operator(PrefixOperator::Minus)),
        TokenKind::True | TokenKind::False => Some(PrefixRule::Boolean),
        TokenKind::LParen => Some(PrefixRule::Grouped),
        TokenKind::Function => Some(PrefixRule::Function),
        TokenKind::RParen
        | TokenKind::LBrace
        | TokenKind::RBrace
        | TokenKind::Comma
        | TokenKind::Semicolon
        | TokenKind::Assign
        | TokenKind::Plus
        | TokenKind::Asterisk
        | TokenKind::Slash
        | TokenKind::Lt
        | TokenKind::Gt
        | TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Let
        | TokenKind::Return
        | TokenKind::If
        | TokenKind::Else
        | TokenKind::Eof
        | TokenKind::Illegal => None,
    }
}

fn infix_rule(kind: TokenKind) -> Option<InfixRule> {
    let op = match kind {
        TokenKind::Plus => InfixOperator::Plus,
        TokenKind::Minus => InfixOperator::Minus,
        TokenKind::Asterisk => InfixOperator::Asterisk,
        TokenKind::Slash => InfixOperator::Slash,
        TokenKind::Lt => InfixOperator::Lt,
        TokenKind::Gt => InfixOperator::Gt,
        TokenKind::Eq => InfixOperator::Eq,
        TokenKind::NotEq => InfixOperator::NotEq,
        TokenKind::LParen => return Some(InfixRule::Call),
        TokenKind::RParen
        | TokenKind::LBrace
        | TokenKind::RBrace
        | TokenKind::Comma
        | TokenKind::Semicolon
        | TokenKind::Assign
        | TokenKind::Bang
        | TokenKind::Int
        | TokenKind::Identifier
        | TokenKind::Let
        | TokenKind::Return
        | TokenKind::Function
        | TokenKind::True
        | TokenKind::False
        | TokenKind::If
        | TokenKind::Else
        | TokenKind::Eof
        | TokenKind::Illegal => return None,
    };
    Some(InfixRule::Binary(op))
}

impl Parser {
    /// Parse an expression whose operators all bind tighter than
    /// `precedence`.
    pub(crate) fn parse_expression(
        &mut self,
        precedence: Precedence,
        diags: &mut Diagnostics,
    ) -> Option<Expression> {
        trace!(token = %self.current, ?precedence, "parse expression");

        self.enter_nesting(diags)?;
        let mut levels = 1;
        let expression = self.parse_operator_chain(precedence, &mut levels, diags);
        self.leave_nesting(levels);
        expression
    }

    /// The climbing loop. Each infix node built here deepens the tree by one,
    /// so each takes a nesting level, counted in `levels`.
    fn parse_operator_chain(
        &mut self,
        precedence: Precedence,
        levels: &mut usize,
        diags: &mut Diagnostics,
    ) -> Option<Expression> {
        let Some(rule) = prefix_rule(self.current.kind) else {
            self.no_prefix_rule(diags);
            return None;
        };
        let mut left = self.parse_prefix(rule, diags)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let Some(rule) = infix_rule(self.peek.kind) else {
                return Some(left);
            };
            self.enter_nesting(diags)?;
            *levels += 1;
            self.next_token();
            left = self.parse_infix(rule, left, diags)?;
        }

        Some(left)
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current.kind)
    }

    fn no_prefix_rule(&self, diags: &mut Diagnostics) {
        let kind = if self.current_is(TokenKind::Illegal) {
            DiagnosticKind::IllegalCharacter {
                literal: self.current.literal.clone(),
            }
        } else {
            DiagnosticKind::NoPrefixParseFn {
                kind: self.current.kind,
            }
        };
        diags.push(kind, self.current.location);
    }

    fn parse_prefix(&mut self, rule: PrefixRule, diags: &mut Diagnostics) -> Option<Expression> {
        match rule {
            PrefixRule::Identifier => Some(Expression::Identifier(Identifier::new(
                self.current.clone(),
            ))),
            PrefixRule::Integer => self.parse_integer_literal(diags).map(Expression::Integer),
            PrefixRule::Operator(operator) => self
                .parse_prefix_expression(operator, diags)
                .map(Expression::Prefix),
            PrefixRule::Boolean => Some(Expression::Boolean(BooleanLiteral {
                token: self.current.clone(),
                value: self.current_is(TokenKind::True),
            })),
            PrefixRule::Grouped => self.parse_grouped_expression(diags),
            PrefixRule::Function => self.parse_function_literal(diags).map(Expression::Function),
        }
    }

    fn parse_infix(
        &mut self,
        rule: InfixRule,
        left: Expression,
        diags: &mut Diagnostics,
    ) -> Option<Expression> {
        match rule {
            InfixRule::Binary(operator) => self
                .parse_infix_expression(operator, left, diags)
                .map(Expression::Infix),
            InfixRule::Call => self.parse_call_expression(left, diags).map(Expression::Call),
        }
    }

    fn parse_integer_literal(&mut self, diags: &mut Diagnostics) -> Option<IntegerLiteral> {
        match self.current.literal.parse::<i64>() {
            Ok(value) => Some(IntegerLiteral {
                token: self.current.clone(),
                value,
            }),
            Err(_) => {
                diags.push(
                    DiagnosticKind::InvalidInteger {
                        literal: self.current.literal.clone(),
                    },
                    self.current.location,
                );
                None
            }
        }
    }

    fn parse_prefix_expression(
        &mut self,
        operator: PrefixOperator,
        diags: &mut Diagnostics,
    ) -> Option<PrefixExpression> {
        let token = self.current.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix, diags)?;
        Some(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(
        &mut self,
        operator: InfixOperator,
        left: Expression,
        diags: &mut Diagnostics,
    ) -> Option<InfixExpression> {
        let token = self.current.clone();
        let precedence = self.current_precedence();
        self.next_token();
        let right = self.parse_expression(precedence, diags)?;
        Some(InfixExpression {
            token,
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// `( expr )`; the parentheses leave no node behind.
    fn parse_grouped_expression(&mut self, diags: &mut Diagnostics) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest, diags)?;
        self.expect_peek(TokenKind::RParen, diags)?;
        Some(expr)
    }

    fn parse_call_expression(
        &mut self,
        function: Expression,
        diags: &mut Diagnostics,
    ) -> Option<CallExpression> {
        let token = self.current.clone();
        let arguments = self.parse_call_arguments(diags)?;
        Some(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        })
    }

    /// Parse argument list: `(expr, expr, ...)`, entered on the `(`.
    fn parse_call_arguments(&mut self, diags: &mut Diagnostics) -> Option<Vec<Expression>> {
        let mut args = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(args);
        }

        self.next_token();
        args.push(self.parse_expression(Precedence::Lowest, diags)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            args.push(self.parse_expression(Precedence::Lowest, diags)?);
        }

        self.expect_peek(TokenKind::RParen, diags)?;
        Some(args)
    }

    /// `fn(a, b) { ... }`, entered on the `fn`.
    pub(crate) fn parse_function_literal(
        &mut self,
        diags: &mut Diagnostics,
    ) -> Option<FunctionLiteral> {
        let token = self.current.clone();
        self.expect_peek(TokenKind::LParen, diags)?;
        let parameters = self.parse_function_parameters(diags)?;
        self.expect_peek(TokenKind::LBrace, diags)?;
        let body = self.parse_closed_block(diags)?;
        Some(FunctionLiteral {
            token,
            parameters,
            body,
        })
    }

    fn parse_function_parameters(&mut self, diags: &mut Diagnostics) -> Option<Vec<Identifier>> {
        let mut params = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(params);
        }

        self.expect_peek(TokenKind::Identifier, diags)?;
        params.push(Identifier::new(self.current.clone()));

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.expect_peek(TokenKind::Identifier, diags)?;
            params.push(Identifier::new(self.current.clone()));
        }

        self.expect_peek(TokenKind::RParen, diags)?;
        Some(params)
    }
}
