//! AST (Abstract Syntax Tree) definitions
//!
//! Every node keeps the [`Token`] that introduced it. `Display` on any node
//! produces its canonical source form: expressions are fully parenthesised
//! (`a + b * c` renders as `(a + (b * c))`), statements carry their own
//! trailing `;`, so the rendering can be tokenized and parsed again.
//!
//! [`Program`] is the root and sole owner of the tree; children are boxed or
//! held in vectors by their parent.

use super::token::Token;
use std::fmt;

/// Behaviour shared by every node in the tree.
pub trait Node: fmt::Display {
    /// Literal of the token that started this node.
    fn token_literal(&self) -> &str;

    /// Canonical source form of this node.
    fn to_source_string(&self) -> String {
        self.to_string()
    }
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Bang,  // !x
    Minus, // -x
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOperator::Bang => f.write_str("!"),
            PrefixOperator::Minus => f.write_str("-"),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    // Arithmetic
    Plus,
    Minus,
    Asterisk,
    Slash,
    // Comparison
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Asterisk => "*",
            InfixOperator::Slash => "/",
            InfixOperator::Lt => "<",
            InfixOperator::Gt => ">",
            InfixOperator::Eq => "==",
            InfixOperator::NotEq => "!=",
        };
        f.write_str(symbol)
    }
}

// ===== Expressions =====

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        let name = token.literal.clone();
        Identifier { token, name }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: PrefixOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub operator: InfixOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

/// `function(arguments...)`; `token` is the `(`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

/// `fn(parameters...) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Call(CallExpression),
    Function(FunctionLiteral),
}

// ===== Statements =====

#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Expression,
}

/// Re-assignment of an existing name: `x = value;`. `token` is the name.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub token: Token,
    pub condition: Expression,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Assignment(AssignmentStatement),
    If(IfStatement),
    Function(FunctionLiteral),
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

// ===== Token literals =====

macro_rules! token_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Node for $ty {
                fn token_literal(&self) -> &str {
                    &self.token.literal
                }
            }
        )*
    };
}

token_node!(
    Identifier,
    IntegerLiteral,
    BooleanLiteral,
    PrefixExpression,
    InfixExpression,
    CallExpression,
    FunctionLiteral,
    LetStatement,
    ReturnStatement,
    AssignmentStatement,
    BlockStatement,
    IfStatement,
);

impl Node for Expression {
    fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(node) => node.token_literal(),
            Expression::Integer(node) => node.token_literal(),
            Expression::Boolean(node) => node.token_literal(),
            Expression::Prefix(node) => node.token_literal(),
            Expression::Infix(node) => node.token_literal(),
            Expression::Call(node) => node.token_literal(),
            Expression::Function(node) => node.token_literal(),
        }
    }
}

impl Node for Statement {
    fn token_literal(&self) -> &str {
        match self {
            Statement::Let(node) => node.token_literal(),
            Statement::Return(node) => node.token_literal(),
            Statement::Assignment(node) => node.token_literal(),
            Statement::If(node) => node.token_literal(),
            Statement::Function(node) => node.token_literal(),
        }
    }
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(|s| s.token_literal())
            .unwrap_or("")
    }
}

// ===== Canonical rendering =====

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for PrefixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

impl fmt::Display for InfixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        write_separated(f, &self.arguments)?;
        f.write_str(")")
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.token.literal)?;
        write_separated(f, &self.parameters)?;
        write!(f, ") {}", self.body)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(node) => fmt::Display::fmt(node, f),
            Expression::Integer(node) => fmt::Display::fmt(node, f),
            Expression::Boolean(node) => fmt::Display::fmt(node, f),
            Expression::Prefix(node) => fmt::Display::fmt(node, f),
            Expression::Infix(node) => fmt::Display::fmt(node, f),
            Expression::Call(node) => fmt::Display::fmt(node, f),
            Expression::Function(node) => fmt::Display::fmt(node, f),
        }
    }
}

impl fmt::Display for LetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {};", self.token.literal, self.name, self.value)
    }
}

impl fmt::Display for ReturnStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {};", self.token.literal, self.value)
    }
}

impl fmt::Display for AssignmentStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {};", self.name, self.value)
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for statement in &self.statements {
            write!(f, "{} ", statement)?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for IfStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            // Already parenthesized by their own rendering.
            Expression::Prefix(_) | Expression::Infix(_) => write!(f, "if {}", self.condition)?,
            _ => write!(f, "if ({})", self.condition)?,
        }
        write!(f, " {}", self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {}", alternative)?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(node) => fmt::Display::fmt(node, f),
            Statement::Return(node) => fmt::Display::fmt(node, f),
            Statement::Assignment(node) => fmt::Display::fmt(node, f),
            Statement::If(node) => fmt::Display::fmt(node, f),
            Statement::Function(node) => fmt::Display::fmt(node, f),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

fn write_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
