//! Identifier resolution

use crate::ast::Identifier;
use crate::{Builtin, Environment, EvalContext, EvalError, Value};

use super::Evaluate;

impl Evaluate for Identifier {
    /// Resolve through the scope chain, then the builtins. User bindings
    /// shadow builtins of the same name.
    fn eval(&self, env: &mut Environment, _ctx: &EvalContext) -> Result<Value, EvalError> {
        if let Some(value) = env.resolve(&self.value)? {
            return Ok(value.clone());
        }

        Builtin::lookup(&self.value)
            .map(Value::Builtin)
            .ok_or_else(|| EvalError::UndefinedIdentifier {
                name: self.value.clone(),
            })
    }
}
