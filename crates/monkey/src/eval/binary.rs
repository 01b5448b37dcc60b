//! Infix operator evaluation

use crate::ast::{InfixExpression, InfixOperator};
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

impl Evaluate for InfixExpression {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        let left = self.left.eval(env, ctx)?;
        let right = self.right.eval(env, ctx)?;
        eval_infix(self.operator, &left, &right)
    }
}

/// Apply an infix operator to two evaluated operands.
///
/// # Errors
///
/// Returns `TypeMismatch` when the operand types differ, `UnknownInfixOperator`
/// when the operator is undefined for the shared type, and `DivisionByZero`.
pub fn eval_infix(op: InfixOperator, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(op, *l, *r),
        (Value::String(l), Value::String(r)) => eval_string_infix(op, l, r, left, right),
        (Value::Boolean(l), Value::Boolean(r)) => eval_equality(op, l == r, left, right),
        (Value::Null, Value::Null) => eval_equality(op, true, left, right),
        _ if left.type_name() != right.type_name() => Err(EvalError::TypeMismatch {
            left: left.type_name(),
            op,
            right: right.type_name(),
        }),
        _ => Err(unknown_operator(op, left, right)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Integer Operations
// ═══════════════════════════════════════════════════════════════════════

/// Arithmetic wraps on overflow; division truncates toward zero.
fn eval_integer_infix(op: InfixOperator, l: i64, r: i64) -> Result<Value, EvalError> {
    let value = match op {
        InfixOperator::Plus => Value::Integer(l.wrapping_add(r)),
        InfixOperator::Minus => Value::Integer(l.wrapping_sub(r)),
        InfixOperator::Asterisk => Value::Integer(l.wrapping_mul(r)),
        InfixOperator::Slash => {
            if r == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Value::Integer(l.wrapping_div(r))
        }
        InfixOperator::Lt => Value::Boolean(l < r),
        InfixOperator::Gt => Value::Boolean(l > r),
        InfixOperator::Eq => Value::Boolean(l == r),
        InfixOperator::NotEq => Value::Boolean(l != r),
    };
    Ok(value)
}

// ═══════════════════════════════════════════════════════════════════════
// String Operations
// ═══════════════════════════════════════════════════════════════════════

fn eval_string_infix(
    op: InfixOperator,
    l: &str,
    r: &str,
    left: &Value,
    right: &Value,
) -> Result<Value, EvalError> {
    match op {
        InfixOperator::Plus => {
            let mut joined = String::with_capacity(l.len() + r.len());
            joined.push_str(l);
            joined.push_str(r);
            Ok(Value::string(joined))
        }
        InfixOperator::Eq | InfixOperator::NotEq => eval_equality(op, l == r, left, right),
        _ => Err(unknown_operator(op, left, right)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Equality
// ═══════════════════════════════════════════════════════════════════════

/// `==`/`!=` for types that support nothing else.
fn eval_equality(
    op: InfixOperator,
    equal: bool,
    left: &Value,
    right: &Value,
) -> Result<Value, EvalError> {
    match op {
        InfixOperator::Eq => Ok(Value::Boolean(equal)),
        InfixOperator::NotEq => Ok(Value::Boolean(!equal)),
        _ => Err(unknown_operator(op, left, right)),
    }
}

fn unknown_operator(op: InfixOperator, left: &Value, right: &Value) -> EvalError {
    EvalError::UnknownInfixOperator {
        left: left.type_name(),
        op,
        right: right.type_name(),
    }
}
