//! Abstract syntax tree produced by the parser
//!
//! Two closed families: [`Statement`] and [`Expression`]. Every node keeps
//! the token that introduced it so callers can ask for its literal, and every
//! node renders back to canonical source through `Display` (see `display.rs`).
//! The tree is immutable once built; function bodies are held behind `Rc` so
//! that function values can share them without copying.

mod display;

use std::rc::Rc;

use crate::token::Token;

/// The root node: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order
    pub statements: Vec<Statement>,
}

impl Program {
    /// Literal of the first statement's token, or empty for an empty program.
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or("")
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Statements
// ═══════════════════════════════════════════════════════════════════════

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let(LetStatement),
    /// `return <value>;`
    Return(ReturnStatement),
    /// A bare expression used as a statement
    Expression(ExpressionStatement),
}

impl Statement {
    /// Literal text of the token that starts this statement.
    pub fn token_literal(&self) -> &str {
        match self {
            Statement::Let(s) => &s.token.literal,
            Statement::Return(s) => &s.token.literal,
            Statement::Expression(s) => &s.token.literal,
        }
    }
}

/// `let <name> = <value>;`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    /// The `let` token
    pub token: Token,
    /// The bound name
    pub name: Identifier,
    /// The bound expression
    pub value: Expression,
}

/// `return <value>;`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// The `return` token
    pub token: Token,
    /// The returned expression
    pub value: Expression,
}

/// An expression in statement position.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// First token of the expression
    pub token: Token,
    /// The expression
    pub expression: Expression,
}

/// A braced sequence of statements.
///
/// Blocks only occur as `if` branches and `fn` bodies, so there is no
/// block [`Statement`]; a `{` opening a statement starts a hash literal.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// The `{` token
    pub token: Token,
    /// Statements in source order
    pub statements: Vec<Statement>,
}

// ═══════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `foobar`
    Identifier(Identifier),
    /// `5`
    Integer(IntegerLiteral),
    /// `true` / `false`
    Boolean(BooleanLiteral),
    /// `"hello"`
    String(StringLiteral),
    /// `!x`, `-x`
    Prefix(PrefixExpression),
    /// `a + b`
    Infix(InfixExpression),
    /// `if (c) { ... } else { ... }`
    If(IfExpression),
    /// `fn(x, y) { ... }`
    Function(FunctionLiteral),
    /// `f(a, b)`
    Call(CallExpression),
    /// `[1, 2, 3]`
    Array(ArrayLiteral),
    /// `xs[0]`
    Index(IndexExpression),
    /// `{"a": 1}`
    Hash(HashLiteral),
}

impl Expression {
    /// The token that introduced this expression.
    pub fn token(&self) -> &Token {
        match self {
            Expression::Identifier(e) => &e.token,
            Expression::Integer(e) => &e.token,
            Expression::Boolean(e) => &e.token,
            Expression::String(e) => &e.token,
            Expression::Prefix(e) => &e.token,
            Expression::Infix(e) => &e.token,
            Expression::If(e) => &e.token,
            Expression::Function(e) => &e.token,
            Expression::Call(e) => &e.token,
            Expression::Array(e) => &e.token,
            Expression::Index(e) => &e.token,
            Expression::Hash(e) => &e.token,
        }
    }

    /// Literal text of the token that introduced this expression.
    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }
}

/// A name reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// The `IDENT` token
    pub token: Token,
    /// The name
    pub value: String,
}

impl Identifier {
    /// Literal text of the identifier's token.
    pub fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

/// A decimal integer literal.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    /// The `INT` token
    pub token: Token,
    /// Parsed value
    pub value: i64,
}

/// `true` or `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    /// The `TRUE`/`FALSE` token
    pub token: Token,
    /// The value
    pub value: bool,
}

/// A double-quoted string literal (raw text, no escapes).
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    /// The `STRING` token
    pub token: Token,
    /// The text between the quotes
    pub value: String,
}

/// Operators valid in prefix position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    /// `!`
    Bang,
    /// `-`
    Minus,
}

/// `<operator><right>`
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    /// The operator token
    pub token: Token,
    /// The operator
    pub operator: PrefixOperator,
    /// The operand
    pub right: Box<Expression>,
}

/// Binary operators valid in infix position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Asterisk,
    /// `/`
    Slash,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
}

/// `<left> <operator> <right>`
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    /// The operator token
    pub token: Token,
    /// Left operand
    pub left: Box<Expression>,
    /// The operator
    pub operator: InfixOperator,
    /// Right operand
    pub right: Box<Expression>,
}

/// `if (<condition>) <consequence> else <alternative>`
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    /// The `if` token
    pub token: Token,
    /// The condition
    pub condition: Box<Expression>,
    /// Block evaluated when the condition is truthy
    pub consequence: BlockStatement,
    /// Optional `else` block
    pub alternative: Option<BlockStatement>,
}

/// `fn(<parameters>) <body>`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    /// The `fn` token
    pub token: Token,
    /// Parameter names in order
    pub parameters: Vec<Identifier>,
    /// The body, shared with every function value created from this literal
    pub body: Rc<BlockStatement>,
}

/// `<function>(<arguments>)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// The `(` token
    pub token: Token,
    /// The callee: an identifier or a function literal
    pub function: Box<Expression>,
    /// Arguments in order
    pub arguments: Vec<Expression>,
}

/// `[<elements>]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    /// The `[` token
    pub token: Token,
    /// Elements in order
    pub elements: Vec<Expression>,
}

/// `<left>[<index>]`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    /// The `[` token
    pub token: Token,
    /// The indexed collection
    pub left: Box<Expression>,
    /// The index
    pub index: Box<Expression>,
}

/// `{<key>: <value>, ...}`
#[derive(Debug, Clone, PartialEq)]
pub struct HashLiteral {
    /// The `{` token
    pub token: Token,
    /// Key/value pairs in source order
    pub pairs: Vec<(Expression, Expression)>,
}
