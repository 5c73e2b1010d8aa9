//! Binding frames for bound variables.
//!
//! A frame is attached to the node that introduces a bound variable for the
//! duration of one expansion. Each entry owns its current value: a detached
//! node that symbol lookups copy from, never alias.

use crate::node::NodeId;
use crate::symbol::SymbolId;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct ScopeEntry {
    value: Option<NodeId>,
    locked: bool,
}

impl ScopeEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new value, returning the one it displaces.
    pub fn set_value(&mut self, value: NodeId) -> Option<NodeId> {
        self.value.replace(value)
    }

    #[inline]
    pub fn value(&self) -> Option<NodeId> {
        self.value
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScopeFrame {
    entries: FxHashMap<SymbolId, ScopeEntry>,
}

impl ScopeFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, shadowing any entry of the same name in this frame.
    pub fn put(&mut self, name: SymbolId, entry: ScopeEntry) {
        self.entries.insert(name, entry);
    }

    pub fn get(&self, name: SymbolId) -> Option<&ScopeEntry> {
        self.entries.get(&name)
    }

    pub fn get_mut(&mut self, name: SymbolId) -> Option<&mut ScopeEntry> {
        self.entries.get_mut(&name)
    }

    pub fn lock(&mut self) {
        self.entries.values_mut().for_each(|e| e.locked = true);
    }

    pub fn unlock(&mut self) {
        self.entries.values_mut().for_each(|e| e.locked = false);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
