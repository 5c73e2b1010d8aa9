//! Interned names for predicates and bound variables.
//!
//! Scope lookups compare names on every symbol reduction, so names are
//! stored once and compared as integers.

use rustc_hash::FxHashMap;

/// Identifier of an interned name.
pub type SymbolId = usize;

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Canonical storage, indexed by SymbolId
    names: Vec<String>,
    index: FxHashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, returning the existing id when already known.
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    /// # Panics
    /// Panics if `id` was not produced by this table.
    #[inline]
    pub fn resolve(&self, id: SymbolId) -> &str {
        &self.names[id]
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
