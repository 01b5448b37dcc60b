//! Error types for parsing and evaluation
//!
//! The two channels never overlap: [`ParseError`]s are collected by the
//! parser and handed back alongside the (possibly partial) program, while
//! [`EvalError`]s short-circuit evaluation and surface to callers of
//! [`crate::eval`] as [`Value::Error`].

use thiserror::Error;

use crate::ast::{InfixOperator, PrefixOperator};
use crate::eval::ControlFlow;
use crate::token::TokenKind;
use crate::value::Value;

/// A recoverable diagnostic produced while parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The next token was not the one the grammar requires here
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken {
        /// Required token kind
        expected: TokenKind,
        /// Kind actually found
        got: TokenKind,
    },

    /// No expression can start with this token
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParse {
        /// The offending token kind
        kind: TokenKind,
    },

    /// An integer literal does not fit in 64 bits
    #[error("could not parse {literal:?} as integer")]
    InvalidInteger {
        /// The literal text
        literal: String,
    },
}

/// Errors (and non-local control flow) raised during evaluation.
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// Name not bound in any enclosing scope nor a builtin
    #[error("identifier not found: {name}")]
    UndefinedIdentifier {
        /// The unresolved name
        name: String,
    },

    /// Infix operands of different types
    #[error("type mismatch: {left} {op} {right}")]
    TypeMismatch {
        /// Left operand type
        left: &'static str,
        /// Operator
        op: InfixOperator,
        /// Right operand type
        right: &'static str,
    },

    /// Prefix operator not defined for the operand type
    #[error("unknown operator: {op}{operand}")]
    UnknownPrefixOperator {
        /// Operator
        op: PrefixOperator,
        /// Operand type
        operand: &'static str,
    },

    /// Infix operator not defined for operands of this (shared) type
    #[error("unknown operator: {left} {op} {right}")]
    UnknownInfixOperator {
        /// Left operand type
        left: &'static str,
        /// Operator
        op: InfixOperator,
        /// Right operand type
        right: &'static str,
    },

    /// Call on something that is neither a function nor a builtin
    #[error("not a function: {kind}")]
    NotAFunction {
        /// Type of the callee
        kind: &'static str,
    },

    /// Argument count differs from the callee's parameter count
    #[error("wrong number of arguments. got={got}, want={expected}")]
    ArityMismatch {
        /// Parameter count
        expected: usize,
        /// Argument count
        got: usize,
    },

    /// Index applied to a value that cannot be indexed that way
    #[error("index operator not supported: {kind}")]
    IndexNotSupported {
        /// Type of the indexed value
        kind: &'static str,
    },

    /// Hash key of a type that cannot be hashed
    #[error("unusable as hash key: {kind}")]
    UnusableHashKey {
        /// Type of the key
        kind: &'static str,
    },

    /// Integer division by zero
    #[error("division by zero")]
    DivisionByZero,

    /// A builtin rejected its arguments
    #[error("{message}")]
    BuiltinError {
        /// Builtin name
        name: &'static str,
        /// Human-readable reason
        message: String,
    },

    /// Configured call depth limit exceeded
    #[error("stack overflow: call depth {depth} exceeds limit {max}")]
    StackOverflow {
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// The evaluation context's interrupt flag was raised
    #[error("evaluation interrupted")]
    Interrupted,

    /// A function referred to a scope that has already been reclaimed
    #[error("dangling scope reference")]
    DanglingScope,

    /// `return` unwinding to the nearest call boundary
    #[error("unhandled control flow: {0:?}")]
    ControlFlow(ControlFlow),
}

impl EvalError {
    /// Whether this is a control-flow signal rather than a failure.
    pub fn is_control_flow(&self) -> bool {
        matches!(self, EvalError::ControlFlow(_))
    }

    /// Convert to the value observed by callers of `eval`.
    ///
    /// A `return` signal yields its carried value; anything else becomes
    /// [`Value::Error`] with this error's message.
    pub fn into_value(self) -> Value {
        match self {
            EvalError::ControlFlow(flow) => flow.into_value(),
            other => Value::error(other.to_string()),
        }
    }
}

/// Result type alias for evaluation.
pub type Result<T> = std::result::Result<T, EvalError>;
