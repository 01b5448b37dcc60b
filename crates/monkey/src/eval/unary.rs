//! Prefix operator evaluation

use crate::ast::{PrefixExpression, PrefixOperator};
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

impl Evaluate for PrefixExpression {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        let operand = self.right.eval(env, ctx)?;
        eval_prefix(self.operator, operand)
    }
}

/// Apply a prefix operator to an evaluated operand.
///
/// # Errors
///
/// Returns `UnknownPrefixOperator` for `-` on a non-integer.
pub fn eval_prefix(op: PrefixOperator, operand: Value) -> Result<Value, EvalError> {
    match op {
        PrefixOperator::Bang => Ok(Value::Boolean(!operand.is_truthy())),
        PrefixOperator::Minus => match operand {
            Value::Integer(n) => Ok(Value::Integer(n.wrapping_neg())),
            other => Err(EvalError::UnknownPrefixOperator {
                op,
                operand: other.type_name(),
            }),
        },
    }
}
