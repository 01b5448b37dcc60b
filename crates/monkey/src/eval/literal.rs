//! Literal evaluation

use crate::ast::{BooleanLiteral, IntegerLiteral, StringLiteral};
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

impl Evaluate for IntegerLiteral {
    fn eval(&self, _env: &mut Environment, _ctx: &EvalContext) -> Result<Value, EvalError> {
        Ok(Value::Integer(self.value))
    }
}

impl Evaluate for BooleanLiteral {
    fn eval(&self, _env: &mut Environment, _ctx: &EvalContext) -> Result<Value, EvalError> {
        Ok(Value::Boolean(self.value))
    }
}

impl Evaluate for StringLiteral {
    fn eval(&self, _env: &mut Environment, _ctx: &EvalContext) -> Result<Value, EvalError> {
        Ok(Value::string(&self.value))
    }
}
