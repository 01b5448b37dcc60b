//! Built-in functions

use crate::{Builtin, EvalError, Value};

/// Call a built-in function.
///
/// # Errors
///
/// Returns `ArityMismatch` for a wrong argument count and `BuiltinError` when
/// an argument has the wrong type.
pub fn call_builtin(builtin: Builtin, args: Vec<Value>) -> Result<Value, EvalError> {
    // Check arity (if not variadic)
    if let Some(arity) = builtin.arity() {
        if args.len() != arity {
            return Err(EvalError::ArityMismatch {
                expected: arity,
                got: args.len(),
            });
        }
    }

    let result = match builtin {
        Builtin::Len => builtin_len(&args),
        Builtin::First => builtin_first(&args),
        Builtin::Last => builtin_last(&args),
        Builtin::Rest => builtin_rest(&args),
        Builtin::Push => builtin_push(&args),
        Builtin::Puts => builtin_puts(&args),
    };

    result.map_err(|message| EvalError::BuiltinError {
        name: builtin.name(),
        message,
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Function Implementations
// ═══════════════════════════════════════════════════════════════════════

fn builtin_len(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::String(s) => Ok(Value::Integer(s.len() as i64)),
        Value::Array(items) => Ok(Value::Integer(items.len() as i64)),
        other => Err(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

fn builtin_first(args: &[Value]) -> Result<Value, String> {
    let items = array_arg("first", &args[0])?;
    Ok(items.first().cloned().unwrap_or(Value::Null))
}

fn builtin_last(args: &[Value]) -> Result<Value, String> {
    let items = array_arg("last", &args[0])?;
    Ok(items.last().cloned().unwrap_or(Value::Null))
}

fn builtin_rest(args: &[Value]) -> Result<Value, String> {
    let items = array_arg("rest", &args[0])?;
    match items.split_first() {
        Some((_, rest)) => Ok(Value::array(rest.to_vec())),
        None => Ok(Value::Null),
    }
}

/// Arrays are immutable, so `push` copies.
fn builtin_push(args: &[Value]) -> Result<Value, String> {
    let items = array_arg("push", &args[0])?;
    let mut pushed = Vec::with_capacity(items.len() + 1);
    pushed.extend_from_slice(items);
    pushed.push(args[1].clone());
    Ok(Value::array(pushed))
}

fn builtin_puts(args: &[Value]) -> Result<Value, String> {
    for arg in args {
        println!("{}", arg);
    }
    Ok(Value::Null)
}

fn array_arg<'a>(name: &str, value: &'a Value) -> Result<&'a [Value], String> {
    value
        .as_array()
        .ok_or_else(|| format!("argument to `{name}` must be ARRAY, got {}", value.type_name()))
}
