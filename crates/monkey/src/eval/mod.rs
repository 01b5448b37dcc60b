//! Expression and statement evaluation

pub mod array;
pub mod binary;
pub mod builtins;
pub mod call;
pub mod control;
pub mod function;
pub mod identifier;
pub mod if_expr;
pub mod index;
pub mod literal;
pub mod stmt;
pub mod unary;

use crate::ast::{Expression, Program};
use crate::{Environment, EvalContext, EvalError, Value};

/// A syntax node that reduces to a [`Value`].
///
/// Every node kind implements it; `return` and runtime errors both travel
/// through the `Err` side until a call boundary or the program unwraps them.
pub trait Evaluate {
    /// Reduce this node, reading and binding names through `env`.
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Expression Dispatch
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expression {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        // Cancellation point
        if ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }

        match self {
            Expression::Identifier(expr) => expr.eval(env, ctx),
            Expression::Integer(expr) => expr.eval(env, ctx),
            Expression::Boolean(expr) => expr.eval(env, ctx),
            Expression::String(expr) => expr.eval(env, ctx),
            Expression::Prefix(expr) => expr.eval(env, ctx),
            Expression::Infix(expr) => expr.eval(env, ctx),
            Expression::If(expr) => expr.eval(env, ctx),
            Expression::Function(expr) => expr.eval(env, ctx),
            Expression::Call(expr) => expr.eval(env, ctx),
            Expression::Array(expr) => expr.eval(env, ctx),
            Expression::Index(expr) => expr.eval(env, ctx),
            Expression::Hash(expr) => expr.eval(env, ctx),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate a program with default settings.
///
/// Runtime errors come back as [`Value::Error`]; a top-level `return`
/// yields its value. Reuse `env` across calls to keep bindings alive.
///
/// # Example
///
/// ```
/// use monkey::{eval, parse_program, Environment, Value};
///
/// let mut env = Environment::new();
/// let (program, errors) = parse_program("let x = 5; x * 2");
/// assert!(errors.is_empty());
/// assert_eq!(eval(&program, &mut env), Value::Integer(10));
/// ```
pub fn eval(program: &Program, env: &mut Environment) -> Value {
    eval_with_context(program, env, &EvalContext::default())
}

/// Evaluate a program under `ctx`.
///
/// After evaluation, if more than `ctx.gc_threshold` scopes are live, scopes
/// unreachable from the environment or the result are reclaimed.
pub fn eval_with_context(program: &Program, env: &mut Environment, ctx: &EvalContext) -> Value {
    let value = program.eval(env, ctx).unwrap_or_else(EvalError::into_value);

    if env.live_scopes() > ctx.gc_threshold {
        env.collect_garbage(&[&value]);
    }
    value
}

/// Evaluate one expression without the boundary conversion `eval` applies.
pub fn eval_expr(
    expr: &Expression,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    expr.eval(env, ctx)
}

pub use call::call_value;
pub use control::ControlFlow;
pub use stmt::{eval_block, eval_block_stmts};
