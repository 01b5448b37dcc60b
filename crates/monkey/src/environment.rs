//! Runtime environment managing variable bindings and lexical scopes

mod arena;
mod frame;

pub use arena::ScopeId;
pub use frame::ScopeGuard;

use tracing::debug;

use arena::ScopeArena;

use crate::error::EvalError;
use crate::value::Value;

/// The runtime environment: a chain of scopes plus the cursor of the one
/// currently evaluating.
///
/// Scopes live in an arena and link to their enclosing scope by [`ScopeId`].
/// Function values capture a `ScopeId` rather than an owning pointer, so a
/// function bound inside the scope it captures forms no ownership cycle.
/// Call and block scopes are freed on exit unless a function captured them;
/// captured scopes are reclaimed by [`Environment::collect_garbage`] once
/// nothing reachable refers to them.
///
/// Collection only happens between top-level programs: values being built
/// mid-evaluation live on the Rust stack, where no pass can see them. A
/// captured scope therefore outlasts its closure until the current program
/// finishes, so a single program that creates one closure per call keeps
/// every such activation's scope until then. [`crate::eval_with_context`]
/// collects afterwards once live scopes exceed
/// [`EvalContext::gc_threshold`](crate::EvalContext::gc_threshold).
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
///     guard.define("x", Value::Integer(10)); // Shadows outer x
///
///     assert_eq!(guard.get("x"), Some(&Value::Integer(10)));
///     assert_eq!(guard.get("y"), Some(&Value::Integer(2)));
/// }
///
/// assert_eq!(env.get("x"), Some(&Value::Integer(1)));
/// assert_eq!(env.get("y"), None);
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    /// All scopes, live and recycled
    arena: ScopeArena,

    /// The session scope; never released
    root: ScopeId,

    /// Scope new bindings go into and lookups start from
    current: ScopeId,

    /// Current call depth (for recursion limiting)
    call_depth: usize,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create a fresh environment with a single, empty root scope.
    pub fn new() -> Self {
        let mut arena = ScopeArena::default();
        let root = arena.alloc(None);
        arena.pin_chain(root);
        Self {
            arena,
            root,
            current: root,
            call_depth: 0,
        }
    }

    /// The session's root scope.
    pub fn root(&self) -> ScopeId {
        self.root
    }

    /// The scope evaluation is currently in.
    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Check if we're at the root scope.
    pub fn is_root_scope(&self) -> bool {
        self.current == self.root
    }

    // ═══════════════════════════════════════════════════════════════════
    // Scope Entry/Exit
    // ═══════════════════════════════════════════════════════════════════

    /// Make a new scope enclosed by `outer` current, returning the previous
    /// current scope for [`Environment::exit_scope`].
    pub(crate) fn enter_scope(&mut self, outer: ScopeId) -> Result<ScopeId, EvalError> {
        if !self.arena.contains(outer) {
            return Err(EvalError::DanglingScope);
        }
        let scope = self.arena.alloc(Some(outer));
        Ok(std::mem::replace(&mut self.current, scope))
    }

    /// Leave the current scope, restoring `previous`. The scope is freed
    /// unless a function captured it.
    pub(crate) fn exit_scope(&mut self, previous: ScopeId) {
        let scope = std::mem::replace(&mut self.current, previous);
        self.arena.release(scope);
    }

    /// Capture the current scope for a new function value.
    ///
    /// Pins the current scope and its enclosing chain so they outlive the
    /// activation that created them.
    pub fn capture(&mut self) -> ScopeId {
        self.arena.pin_chain(self.current);
        self.current
    }

    // ═══════════════════════════════════════════════════════════════════
    // Call Depth Tracking (Stack Overflow Protection)
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a function call. Returns error if `max_depth` would be exceeded.
    pub fn enter_call(&mut self, max_depth: Option<usize>) -> Result<(), EvalError> {
        if let Some(max) = max_depth {
            if self.call_depth >= max {
                return Err(EvalError::StackOverflow {
                    depth: self.call_depth + 1,
                    max,
                });
            }
        }
        self.call_depth += 1;
        Ok(())
    }

    /// Exit a function call.
    pub fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    /// Get current call depth.
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    // ═══════════════════════════════════════════════════════════════════
    // Bindings
    // ═══════════════════════════════════════════════════════════════════

    /// Bind `name` in the current scope, replacing any binding of the same
    /// name in that scope. Enclosing scopes are never modified.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        // The current scope is live: it is only released after `current`
        // has moved back to its parent.
        if let Some(scope) = self.arena.get_mut(self.current) {
            scope.store.insert(name.into(), value);
        }
    }

    /// Look up `name` from the current scope outward.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.arena.lookup(self.current, name).ok().flatten()
    }

    /// Look up `name` from the current scope outward, reporting a
    /// reclaimed scope in the chain as an error.
    pub fn resolve(&self, name: &str) -> Result<Option<&Value>, EvalError> {
        self.arena.lookup(self.current, name)
    }

    /// Check if `name` resolves from the current scope.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Check if `name` is bound in the current scope itself.
    pub fn contains_in_current_scope(&self, name: &str) -> bool {
        self.arena
            .get(self.current)
            .is_some_and(|scope| scope.store.contains_key(name))
    }

    /// Names bound in the current scope, sorted.
    pub fn names_in_current_scope(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .arena
            .get(self.current)
            .map(|scope| scope.store.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Number of scopes currently allocated.
    pub fn live_scopes(&self) -> usize {
        self.arena.live()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Reclamation
    // ═══════════════════════════════════════════════════════════════════

    /// Free every scope unreachable from the root scope, the current scope
    /// and `roots`. Returns the number of scopes freed.
    ///
    /// Values not passed in `roots` and not stored in a reachable scope may
    /// hold functions whose scopes are freed here; calling such a function
    /// later fails with [`EvalError::DanglingScope`].
    pub fn collect_garbage(&mut self, roots: &[&Value]) -> usize {
        let before = self.arena.live();
        let freed = self.arena.collect(&[self.root, self.current], roots);
        debug!(before, freed, "collected scopes");
        freed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_single_root_scope() {
        let env = Environment::new();
        assert_eq!(env.live_scopes(), 1);
        assert!(env.is_root_scope());
        assert_eq!(env.call_depth(), 0);
    }

    #[test]
    fn test_enter_exit_scope_releases() {
        let mut env = Environment::new();
        let previous = env.enter_scope(env.root()).unwrap();
        assert_eq!(env.live_scopes(), 2);

        env.exit_scope(previous);
        assert_eq!(env.live_scopes(), 1);
        assert!(env.is_root_scope());
    }

    #[test]
    fn test_captured_scope_survives_exit() {
        let mut env = Environment::new();
        let previous = env.enter_scope(env.root()).unwrap();
        let captured = env.capture();
        env.exit_scope(previous);

        assert_eq!(env.live_scopes(), 2);

        // Nothing refers to it, so a collection frees it
        assert_eq!(env.collect_garbage(&[]), 1);
        assert!(env.enter_scope(captured).is_err());
    }

    #[test]
    fn test_call_depth_limit() {
        let mut env = Environment::new();
        env.enter_call(Some(1)).unwrap();
        let err = env.enter_call(Some(1)).unwrap_err();
        assert!(matches!(err, EvalError::StackOverflow { depth: 2, max: 1 }));

        env.exit_call();
        assert_eq!(env.call_depth(), 0);
    }

    #[test]
    fn test_unlimited_call_depth() {
        let mut env = Environment::new();
        for _ in 0..10_000 {
            env.enter_call(None).unwrap();
        }
        assert_eq!(env.call_depth(), 10_000);
    }
}
