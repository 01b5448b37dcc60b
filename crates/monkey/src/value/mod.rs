//! Value representation for runtime values

mod callable;
mod display;
mod hashable;
mod impls;

pub use callable::{Builtin, FunctionValue};
pub use hashable::HashKey;

use std::rc::Rc;

use indexmap::IndexMap;

/// Runtime value produced by the evaluator.
///
/// Scalars are stored inline. Strings and composites are reference counted:
/// cloning a `Value` shares the backing storage, so two bindings of the same
/// array alias one vector. Values are never mutated in place.
#[derive(Clone)]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64),

    /// `true` or `false`
    Boolean(bool),

    /// Immutable text
    String(Rc<str>),

    /// The absence of a value
    Null,

    /// Ordered elements
    Array(Rc<Vec<Value>>),

    /// Hashable keys to values, in insertion order
    Hash(Rc<IndexMap<HashKey, Value>>),

    /// User-defined function with its captured scope
    Function(Rc<FunctionValue>),

    /// Native function
    Builtin(Builtin),

    /// Runtime error message, as handed back from [`crate::eval`]
    Error(Rc<str>),
}
