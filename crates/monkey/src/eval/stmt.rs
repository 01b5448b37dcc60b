//! Statement evaluation

use crate::ast::{BlockStatement, LetStatement, Program, ReturnStatement, Statement};
use crate::eval::control::ControlFlow;
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

impl Evaluate for Program {
    /// Evaluate every statement in order. A `return` at the top level stops
    /// the program and yields its value.
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        match eval_block_stmts(&self.statements, env, ctx) {
            Err(EvalError::ControlFlow(ControlFlow::Return { value })) => Ok(value),
            result => result,
        }
    }
}

impl Evaluate for Statement {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        match self {
            Statement::Let(stmt) => stmt.eval(env, ctx),
            Statement::Return(stmt) => stmt.eval(env, ctx),
            Statement::Expression(stmt) => stmt.expression.eval(env, ctx),
        }
    }
}

impl Evaluate for LetStatement {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        let value = self.value.eval(env, ctx)?;
        env.define(self.name.value.clone(), value);
        Ok(Value::Null)
    }
}

impl Evaluate for ReturnStatement {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        let value = self.value.eval(env, ctx)?;
        Err(EvalError::ControlFlow(ControlFlow::return_value(value)))
    }
}

impl Evaluate for BlockStatement {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        eval_block(self, env, ctx)
    }
}

/// Evaluate a block in a fresh scope enclosed by the current one.
///
/// # Errors
///
/// Returns errors from statement evaluation, including a pending `return`.
pub fn eval_block(
    block: &BlockStatement,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let mut scope = env.block_guard();
    eval_block_stmts(&block.statements, &mut scope, ctx)
}

/// Evaluate statements in the current scope, yielding the last one's value
/// (`null` for none).
///
/// # Errors
///
/// Returns errors from statement evaluation.
pub fn eval_block_stmts(
    stmts: &[Statement],
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let mut last_value = Value::Null;

    for stmt in stmts {
        // Check for interruption
        if ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }

        last_value = stmt.eval(env, ctx)?;
    }

    Ok(last_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    fn run(src: &str, env: &mut Environment) -> Result<Value, EvalError> {
        let (program, errors) = parse_program(src);
        assert!(errors.is_empty(), "parse errors: {errors:?}");
        program.eval(env, &EvalContext::default())
    }

    #[test]
    fn test_program_yields_last_statement() {
        let mut env = Environment::new();
        assert_eq!(run("1; 2; 3", &mut env).unwrap(), Value::Integer(3));
    }

    #[test]
    fn test_empty_program_is_null() {
        let mut env = Environment::new();
        assert_eq!(run("", &mut env).unwrap(), Value::Null);
    }

    #[test]
    fn test_let_yields_null_and_binds() {
        let mut env = Environment::new();
        assert_eq!(run("let x = 42;", &mut env).unwrap(), Value::Null);
        assert_eq!(env.get("x"), Some(&Value::Integer(42)));
    }

    #[test]
    fn test_top_level_return_stops_program() {
        let mut env = Environment::new();
        assert_eq!(run("1; return 2; 3", &mut env).unwrap(), Value::Integer(2));
    }

    #[test]
    fn test_block_return_propagates_as_control_flow() {
        let (program, _) = parse_program("if (true) { return 7; 8 }");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected expression statement");
        };
        let crate::ast::Expression::If(if_expr) = &stmt.expression else {
            panic!("expected if expression");
        };

        let mut env = Environment::new();
        let err = eval_block(&if_expr.consequence, &mut env, &EvalContext::default())
            .unwrap_err();
        assert!(matches!(
            err,
            EvalError::ControlFlow(ControlFlow::Return {
                value: Value::Integer(7)
            })
        ));
    }

    #[test]
    fn test_block_scope_is_dropped() {
        let mut env = Environment::new();
        run("if (true) { let inner = 1; }", &mut env).unwrap();
        assert!(env.get("inner").is_none());
        assert_eq!(env.live_scopes(), 1);
    }
}
