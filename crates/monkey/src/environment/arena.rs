//! Scope storage: a generational arena with mark-and-sweep reclamation

use std::collections::HashMap;

use crate::error::EvalError;
use crate::value::Value;

/// Handle to a scope in the arena.
///
/// The generation distinguishes a live scope from a later occupant of the
/// same slot, so a stale handle is detected instead of silently aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId {
    index: u32,
    generation: u32,
}

/// One scope: its bindings plus the link used for lookup fallback.
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub(crate) store: HashMap<String, Value>,
    pub(crate) outer: Option<ScopeId>,
    /// Set once a function has captured this scope (or a descendant), which
    /// defers its reclamation to a collection pass.
    pub(crate) pinned: bool,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    scope: Option<Scope>,
}

/// Arena of scopes addressed by [`ScopeId`].
#[derive(Debug, Clone, Default)]
pub(crate) struct ScopeArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ScopeArena {
    /// Allocate an empty scope enclosed by `outer`.
    pub(crate) fn alloc(&mut self, outer: Option<ScopeId>) -> ScopeId {
        let scope = Scope {
            store: HashMap::new(),
            outer,
            pinned: false,
        };
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.scope = Some(scope);
            return ScopeId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            scope: Some(scope),
        });
        ScopeId {
            index,
            generation: 0,
        }
    }

    pub(crate) fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.scope.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.scope.as_mut())
    }

    pub(crate) fn contains(&self, id: ScopeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of scopes currently allocated.
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    /// Resolve `name` starting at `id` and walking outward.
    pub(crate) fn lookup(&self, id: ScopeId, name: &str) -> Result<Option<&Value>, EvalError> {
        let mut next = Some(id);
        while let Some(id) = next {
            let scope = self.get(id).ok_or(EvalError::DanglingScope)?;
            if let Some(value) = scope.store.get(name) {
                return Ok(Some(value));
            }
            next = scope.outer;
        }
        Ok(None)
    }

    /// Mark `id` and every enclosing scope as captured.
    pub(crate) fn pin_chain(&mut self, id: ScopeId) {
        let mut next = Some(id);
        while let Some(id) = next {
            match self.get_mut(id) {
                Some(scope) if !scope.pinned => {
                    scope.pinned = true;
                    next = scope.outer;
                }
                // Already pinned means its ancestors are too
                _ => return,
            }
        }
    }

    /// Free `id` unless a function has captured it. Returns whether it was freed.
    pub(crate) fn release(&mut self, id: ScopeId) -> bool {
        match self.get(id) {
            Some(scope) if !scope.pinned => {
                self.free_slot(id.index);
                true
            }
            _ => false,
        }
    }

    fn free_slot(&mut self, index: u32) {
        let slot = &mut self.slots[index as usize];
        if slot.scope.take().is_some() {
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
            self.live -= 1;
        }
    }

    /// Free every scope not reachable from `roots`.
    ///
    /// A scope is reachable if it is a root, encloses a reachable scope, or
    /// is captured by a function stored (directly or inside arrays and
    /// hashes) in a reachable scope or root value. Returns the number freed.
    pub(crate) fn collect(&mut self, root_scopes: &[ScopeId], root_values: &[&Value]) -> usize {
        let mut marked = vec![false; self.slots.len()];
        let mut worklist: Vec<ScopeId> = root_scopes.to_vec();
        for value in root_values {
            trace_value(value, &mut worklist);
        }

        while let Some(id) = worklist.pop() {
            let Some(scope) = self.get(id) else { continue };
            let seen = &mut marked[id.index as usize];
            if *seen {
                continue;
            }
            *seen = true;

            if let Some(outer) = scope.outer {
                worklist.push(outer);
            }
            for value in scope.store.values() {
                trace_value(value, &mut worklist);
            }
        }

        let mut freed = 0;
        for (index, is_marked) in marked.into_iter().enumerate() {
            if !is_marked && self.slots[index].scope.is_some() {
                self.free_slot(index as u32);
                freed += 1;
            }
        }
        freed
    }
}

/// Push every scope captured by functions inside `value`.
fn trace_value(value: &Value, worklist: &mut Vec<ScopeId>) {
    match value {
        Value::Function(func) => worklist.push(func.env),
        Value::Array(items) => items.iter().for_each(|v| trace_value(v, worklist)),
        Value::Hash(map) => map.values().for_each(|v| trace_value(v, worklist)),
        _ => {}
    }
}
