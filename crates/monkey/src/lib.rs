//! # Monkey
//!
//! A tree-walking interpreter for the Monkey programming language.
//!
//! Monkey is a small expression-oriented language with integers, booleans,
//! strings, arrays, hashes, first-class functions and closures. Source text
//! flows through three stages:
//!
//! - **Lexer**: characters to [`token::Token`]s
//! - **Parser**: tokens to a [`Program`] via Pratt parsing, collecting
//!   [`ParseError`]s instead of stopping at the first one
//! - **Evaluator**: walks the tree against an [`Environment`], producing a
//!   [`Value`]
//!
//! ```
//! use monkey::{eval, parse_program, Environment, Value};
//!
//! let mut env = Environment::new();
//! let (program, errors) = parse_program(
//!     "let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(3)",
//! );
//! assert!(errors.is_empty());
//! assert_eq!(eval(&program, &mut env), Value::Integer(5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod value;

// Re-export main types
pub use ast::Program;
pub use context::EvalContext;
pub use environment::{Environment, ScopeGuard, ScopeId};
pub use error::{EvalError, ParseError, Result};
pub use eval::{eval, eval_block, eval_expr, eval_with_context, ControlFlow, Evaluate};
pub use lexer::Lexer;
pub use parser::{parse_program, Parser};
pub use token::{Token, TokenKind};
pub use value::{Builtin, FunctionValue, HashKey, Value};

/// Monkey version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
