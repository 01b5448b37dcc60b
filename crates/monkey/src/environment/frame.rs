//! Guards that enter a scope and leave it on drop

use super::{Environment, ScopeId};
use crate::error::EvalError;

/// RAII guard that makes a new scope current and restores the previous one
/// when dropped.
///
/// # Example
///
/// ```
/// use monkey::{Environment, Value};
///
/// let mut env = Environment::new();
/// env.define("x", Value::Integer(1));
///
/// {
///     let mut guard = env.block_guard();
///     guard.define("y", Value::Integer(2));
///     assert_eq!(guard.live_scopes(), 2);
/// }
/// assert_eq!(env.live_scopes(), 1);
/// assert_eq!(env.get("y"), None);
/// assert_eq!(env.get("x"), Some(&Value::Integer(1)));
/// ```
pub struct ScopeGuard<'a> {
    env: &'a mut Environment,
    previous: ScopeId,
}

impl Environment {
    /// Enter a scope enclosed by the current one (for blocks).
    pub fn block_guard(&mut self) -> ScopeGuard<'_> {
        let previous = self.current;
        let scope = self.arena.alloc(Some(previous));
        self.current = scope;
        ScopeGuard {
            env: self,
            previous,
        }
    }

    /// Enter a scope enclosed by `outer` (for calls, where `outer` is the
    /// callee's captured scope rather than the caller's).
    ///
    /// # Errors
    ///
    /// Returns `DanglingScope` if `outer` has been reclaimed.
    pub fn scope_guard(&mut self, outer: ScopeId) -> Result<ScopeGuard<'_>, EvalError> {
        let previous = self.enter_scope(outer)?;
        Ok(ScopeGuard {
            env: self,
            previous,
        })
    }
}

impl<'a> Drop for ScopeGuard<'a> {
    fn drop(&mut self) {
        self.env.exit_scope(self.previous);
    }
}

impl<'a> std::ops::Deref for ScopeGuard<'a> {
    type Target = Environment;

    fn deref(&self) -> &Self::Target {
        self.env
    }
}

impl<'a> std::ops::DerefMut for ScopeGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.env
    }
}
