//! Callable value types: functions and builtins

use std::rc::Rc;

use crate::ast::BlockStatement;
use crate::environment::ScopeId;

/// A function value created by evaluating a function literal.
///
/// `env` names the scope that was current when the literal was evaluated.
/// It is a handle into the environment's scope arena, not an owning pointer,
/// so a function bound inside the scope it captures does not keep that scope
/// alive by itself.
#[derive(Debug, Clone)]
pub struct FunctionValue {
    /// Parameter names in order
    pub parameters: Vec<String>,

    /// The body, shared with the literal it came from
    pub body: Rc<BlockStatement>,

    /// The captured defining scope
    pub env: ScopeId,
}

impl FunctionValue {
    /// Create a function value
    pub fn new(parameters: Vec<String>, body: Rc<BlockStatement>, env: ScopeId) -> Self {
        Self {
            parameters,
            body,
            env,
        }
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// A native function, identified by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `len(x)`: byte length of a string or element count of an array
    Len,
    /// `first(xs)`: first element or null
    First,
    /// `last(xs)`: last element or null
    Last,
    /// `rest(xs)`: all but the first element, or null when empty
    Rest,
    /// `push(xs, x)`: a new array with `x` appended
    Push,
    /// `puts(...)`: print each argument on its own line
    Puts,
}

impl Builtin {
    /// Every builtin, in registration order.
    pub const ALL: [Builtin; 6] = [
        Builtin::Len,
        Builtin::First,
        Builtin::Last,
        Builtin::Rest,
        Builtin::Push,
        Builtin::Puts,
    ];

    /// Find the builtin bound to `name`.
    pub fn lookup(name: &str) -> Option<Builtin> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// The name the builtin is called by.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Len => "len",
            Builtin::First => "first",
            Builtin::Last => "last",
            Builtin::Rest => "rest",
            Builtin::Push => "push",
            Builtin::Puts => "puts",
        }
    }

    /// Fixed argument count, or `None` for variadic builtins.
    pub fn arity(self) -> Option<usize> {
        match self {
            Builtin::Len | Builtin::First | Builtin::Last | Builtin::Rest => Some(1),
            Builtin::Push => Some(2),
            Builtin::Puts => None,
        }
    }
}
