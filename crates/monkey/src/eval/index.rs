//! Index expression evaluation

use crate::ast::IndexExpression;
use crate::{Environment, EvalContext, EvalError, HashKey, Value};

use super::Evaluate;

impl Evaluate for IndexExpression {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        let collection = self.left.eval(env, ctx)?;
        let index = self.index.eval(env, ctx)?;
        eval_index(&collection, &index)
    }
}

/// Index into an array or hash. Missing elements and keys yield `null`.
///
/// # Errors
///
/// Returns `UnusableHashKey` for an unhashable key into a hash and
/// `IndexNotSupported` for any other combination.
pub fn eval_index(collection: &Value, index: &Value) -> Result<Value, EvalError> {
    match (collection, index) {
        (Value::Array(items), Value::Integer(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .unwrap_or(Value::Null)),

        (Value::Hash(map), key) => {
            let key = HashKey::from_value(key).ok_or(EvalError::UnusableHashKey {
                kind: key.type_name(),
            })?;
            Ok(map.get(&key).cloned().unwrap_or(Value::Null))
        }

        _ => Err(EvalError::IndexNotSupported {
            kind: collection.type_name(),
        }),
    }
}
