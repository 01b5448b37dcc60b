//! Hash keys: the subset of values usable as hash keys

use std::fmt;
use std::rc::Rc;

use super::Value;

/// A value that can key a hash: integer, boolean or string.
///
/// Keys of different types never compare equal, so `1` and `"1"` are
/// distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    /// Integer key
    Integer(i64),
    /// Boolean key
    Boolean(bool),
    /// String key
    String(Rc<str>),
}

impl HashKey {
    /// Check if a value can be hashed
    pub fn is_hashable(value: &Value) -> bool {
        matches!(
            value,
            Value::Integer(_) | Value::Boolean(_) | Value::String(_)
        )
    }

    /// Build a key from a value, or `None` if the value is not hashable.
    pub fn from_value(value: &Value) -> Option<HashKey> {
        match value {
            Value::Integer(n) => Some(HashKey::Integer(*n)),
            Value::Boolean(b) => Some(HashKey::Boolean(*b)),
            Value::String(s) => Some(HashKey::String(Rc::clone(s))),
            _ => None,
        }
    }

    /// The value this key was built from.
    pub fn to_value(&self) -> Value {
        match self {
            HashKey::Integer(n) => Value::Integer(*n),
            HashKey::Boolean(b) => Value::Boolean(*b),
            HashKey::String(s) => Value::String(Rc::clone(s)),
        }
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Integer(n) => write!(f, "{}", n),
            HashKey::Boolean(b) => write!(f, "{}", b),
            HashKey::String(s) => f.write_str(s),
        }
    }
}
