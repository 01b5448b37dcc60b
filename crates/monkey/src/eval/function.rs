//! Function literal evaluation

use std::rc::Rc;

use crate::ast::FunctionLiteral;
use crate::{Environment, EvalContext, EvalError, FunctionValue, Value};

use super::Evaluate;

impl Evaluate for FunctionLiteral {
    /// Produce a function value closing over the current scope.
    fn eval(&self, env: &mut Environment, _ctx: &EvalContext) -> Result<Value, EvalError> {
        let parameters = self
            .parameters
            .iter()
            .map(|param| param.value.clone())
            .collect();

        let func = FunctionValue::new(parameters, Rc::clone(&self.body), env.capture());
        Ok(Value::Function(Rc::new(func)))
    }
}
