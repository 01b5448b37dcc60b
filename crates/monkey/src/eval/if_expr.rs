//! If expression evaluation

use crate::ast::IfExpression;
use crate::{Environment, EvalContext, EvalError, Value};

use super::stmt::eval_block;
use super::Evaluate;

impl Evaluate for IfExpression {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        let condition = self.condition.eval(env, ctx)?;

        if condition.is_truthy() {
            eval_block(&self.consequence, env, ctx)
        } else if let Some(alternative) = &self.alternative {
            eval_block(alternative, env, ctx)
        } else {
            Ok(Value::Null)
        }
    }
}
