//! Array and hash literal evaluation

use indexmap::IndexMap;

use crate::ast::{ArrayLiteral, HashLiteral};
use crate::{Environment, EvalContext, EvalError, HashKey, Value};

use super::Evaluate;

impl Evaluate for ArrayLiteral {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        let elements = self
            .elements
            .iter()
            .map(|elem| elem.eval(env, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::array(elements))
    }
}

impl Evaluate for HashLiteral {
    /// Pairs are evaluated in source order, key before value. A repeated
    /// key keeps its first position and takes the last value.
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        let mut map = IndexMap::with_capacity(self.pairs.len());

        for (key_expr, value_expr) in &self.pairs {
            let key = key_expr.eval(env, ctx)?;
            let key = HashKey::from_value(&key).ok_or(EvalError::UnusableHashKey {
                kind: key.type_name(),
            })?;
            let value = value_expr.eval(env, ctx)?;
            map.insert(key, value);
        }

        Ok(Value::hash(map))
    }
}
