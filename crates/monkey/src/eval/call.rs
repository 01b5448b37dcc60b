//! Calls: `callee(arg, ...)` against user functions and builtins

use tracing::trace;

use crate::ast::CallExpression;
use crate::eval::control::ControlFlow;
use crate::{Environment, EvalContext, EvalError, FunctionValue, Value};

use super::builtins::call_builtin;
use super::stmt::eval_block_stmts;
use super::Evaluate;

impl Evaluate for CallExpression {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        let callee = self.function.eval(env, ctx)?;

        // Left to right; the first error wins
        let mut args = Vec::with_capacity(self.arguments.len());
        for arg in &self.arguments {
            args.push(arg.eval(env, ctx)?);
        }

        call_value(callee, args, env, ctx)
    }
}

/// Apply `func` to already-evaluated `args`.
///
/// # Errors
///
/// `NotAFunction` for anything but a function or builtin, `ArityMismatch`
/// for a wrong argument count, and whatever the body itself raises.
pub fn call_value(
    func: Value,
    args: Vec<Value>,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    match func {
        Value::Function(f) => call_function(&f, args, env, ctx),
        Value::Builtin(b) => call_builtin(b, args),
        other => Err(EvalError::NotAFunction {
            kind: other.type_name(),
        }),
    }
}

fn call_function(
    func: &FunctionValue,
    args: Vec<Value>,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    if args.len() != func.arity() {
        return Err(EvalError::ArityMismatch {
            expected: func.arity(),
            got: args.len(),
        });
    }

    env.enter_call(ctx.max_call_depth)?;
    trace!(depth = env.call_depth(), arity = func.arity(), "calling function");

    // The body runs in a fresh scope enclosed by the captured one
    let result = match env.scope_guard(func.env) {
        Ok(mut scope) => {
            for (param, arg) in func.parameters.iter().zip(args) {
                scope.define(param.clone(), arg);
            }
            eval_block_stmts(&func.body.statements, &mut scope, ctx)
        }
        Err(e) => Err(e),
    };

    env.exit_call();

    // `return` stops at the function boundary
    result.or_else(|err| match err {
        EvalError::ControlFlow(ControlFlow::Return { value }) => Ok(value),
        other => Err(other),
    })
}
