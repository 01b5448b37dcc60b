//! Control flow mechanism for return

use crate::Value;

/// Control flow signal for non-local jumps.
///
/// When `return` is evaluated, it doesn't produce a normal
/// `Result<Value, EvalError>`. Instead, it returns an
/// `Err(EvalError::ControlFlow(...))` that propagates up through every
/// enclosing block until the nearest function call (or the program) turns it
/// back into a plain value.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    /// Return from a function with a value.
    Return {
        /// Value to return from the function
        value: Value,
    },
}

impl ControlFlow {
    /// Create a return.
    pub fn return_value(value: Value) -> Self {
        ControlFlow::Return { value }
    }

    /// The value carried by the signal.
    pub fn into_value(self) -> Value {
        match self {
            ControlFlow::Return { value } => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_value() {
        let cf = ControlFlow::return_value(Value::Integer(42));
        match cf {
            ControlFlow::Return { ref value } => assert_eq!(value, &Value::Integer(42)),
        }
        assert_eq!(cf.into_value(), Value::Integer(42));
    }

    #[test]
    fn test_partialeq_return() {
        let cf1 = ControlFlow::return_value(Value::Integer(42));
        let cf2 = ControlFlow::return_value(Value::Integer(42));
        let cf3 = ControlFlow::return_value(Value::Integer(43));
        assert_eq!(cf1, cf2);
        assert_ne!(cf1, cf3);
    }
}
