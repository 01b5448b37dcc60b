//! Display and Debug implementations for Value
//!
//! `Display` is the user-facing `inspect` rendering. `Debug` differs only in
//! quoting strings, so test failures show `"5"` and `5` apart.

use std::fmt;

use super::*;

fn write_elements(f: &mut fmt::Formatter<'_>, items: &[Value], debug: bool) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        if debug {
            write!(f, "{:?}", item)?;
        } else {
            write!(f, "{}", item)?;
        }
    }
    write!(f, "]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => f.write_str(s),
            Value::Null => f.write_str("null"),
            Value::Array(items) => write_elements(f, items, false),
            Value::Hash(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Function(func) => {
                write!(f, "fn({}) {{\n{}\n}}", func.parameters.join(", "), func.body)
            }
            Value::Builtin(_) => f.write_str("builtin function"),
            Value::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s.as_ref()),
            Value::Array(items) => write_elements(f, items, true),
            Value::Hash(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {:?}", k.to_value(), v)?;
                }
                write!(f, "}}")
            }
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name()),
            _ => fmt::Display::fmt(self, f),
        }
    }
}
