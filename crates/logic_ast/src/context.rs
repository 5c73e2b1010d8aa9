//! Node arena and the in-place mutation primitives used by reducers.

use crate::display::DisplayNode;
use crate::error::AstError;
use crate::node::{Node, NodeId, Payload, Tag};
use crate::number::Number;
use crate::scope::{ScopeEntry, ScopeFrame};
use crate::symbol::{SymbolId, SymbolTable};

/// Owns every node of one or more formulas.
///
/// Nodes are never freed; detached subtrees simply become unreachable.
/// `revision` counts structural mutations so callers can tell whether a
/// pass changed anything.
#[derive(Debug, Clone, Default)]
pub struct Context {
    nodes: Vec<Node>,
    symbols: SymbolTable,
    revision: u64,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of arena slots, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// # Panics
    /// Panics if `id` does not belong to this context.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn tag(&self, id: NodeId) -> Tag {
        self.get(id).tag
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    #[inline]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.get(id).children.get(index).copied()
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    pub fn display(&self, id: NodeId) -> DisplayNode<'_> {
        DisplayNode { context: self, id }
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Build an operator node over detached `children`, without arity checks.
    pub fn add(&mut self, tag: Tag, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        let id = self.push(Node::new(tag, None));
        for child in children {
            debug_assert!(
                self.get(child).parent.is_none(),
                "child {:?} is already attached",
                child
            );
            self.get_mut(child).parent = Some(id);
            self.get_mut(id).children.push(child);
        }
        id
    }

    /// Build an operator node, rejecting child counts the tag does not accept.
    pub fn try_add(&mut self, tag: Tag, children: Vec<NodeId>) -> Result<NodeId, AstError> {
        if tag.has_payload() {
            return Err(AstError::MissingPayload(tag));
        }
        let (min, max) = tag.arity();
        let found = children.len();
        if found < min || max.is_some_and(|max| found > max) {
            return Err(AstError::Arity {
                tag,
                expected: tag.arity_text(),
                found,
            });
        }
        Ok(self.add(tag, children))
    }

    pub fn boolean(&mut self, value: bool) -> NodeId {
        self.push(Node::new(Tag::literal(value), None))
    }

    pub fn negation(&mut self, operand: NodeId) -> NodeId {
        self.add(Tag::Negation, [operand])
    }

    pub fn number(&mut self, value: Number) -> NodeId {
        self.push(Node::new(Tag::Number, Some(Payload::Number(value))))
    }

    pub fn integer(&mut self, value: i64) -> NodeId {
        self.number(Number::integer(value))
    }

    pub fn list(&mut self, elements: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.add(Tag::List, elements)
    }

    pub fn to_number(&mut self, operand: NodeId) -> NodeId {
        self.add(Tag::ToNumber, [operand])
    }

    /// A named predicate applied to `args` (zero args: a propositional atom).
    pub fn predicate(
        &mut self,
        name: &str,
        args: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, AstError> {
        let sym = self.checked_name(Tag::Predicate, name)?;
        let id = self.add(Tag::Predicate, args);
        self.get_mut(id).payload = Some(Payload::Name(sym));
        Ok(id)
    }

    /// A bound-variable reference.
    pub fn symbol(&mut self, name: &str) -> Result<NodeId, AstError> {
        let sym = self.checked_name(Tag::Symbol, name)?;
        Ok(self.push(Node::new(Tag::Symbol, Some(Payload::Name(sym)))))
    }

    fn checked_name(&mut self, tag: Tag, name: &str) -> Result<SymbolId, AstError> {
        if name.is_empty() {
            return Err(AstError::EmptyName { tag });
        }
        Ok(self.symbols.intern(name))
    }

    // ------------------------------------------------------------------
    // Payload access
    // ------------------------------------------------------------------

    pub fn intern(&mut self, name: &str) -> SymbolId {
        self.symbols.intern(name)
    }

    pub fn sym_name(&self, sym: SymbolId) -> &str {
        self.symbols.resolve(sym)
    }

    pub fn name_id(&self, id: NodeId) -> Option<SymbolId> {
        match self.get(id).payload {
            Some(Payload::Name(sym)) => Some(sym),
            _ => None,
        }
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.name_id(id).map(|sym| self.sym_name(sym))
    }

    /// Rename a predicate or symbol.
    pub fn set_name(&mut self, id: NodeId, name: &str) -> Result<(), AstError> {
        let tag = self.tag(id);
        if !matches!(tag, Tag::Predicate | Tag::Symbol) {
            return Err(AstError::MissingPayload(tag));
        }
        let sym = self.checked_name(tag, name)?;
        self.get_mut(id).payload = Some(Payload::Name(sym));
        self.touch(id);
        Ok(())
    }

    pub fn as_number(&self, id: NodeId) -> Option<&Number> {
        match &self.get(id).payload {
            Some(Payload::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Whether `id` is an internal number node.
    pub fn is_internal_number(&self, id: NodeId) -> bool {
        self.as_number(id).is_some()
    }

    // ------------------------------------------------------------------
    // Reduced marker
    // ------------------------------------------------------------------

    #[inline]
    pub fn is_reduced(&self, id: NodeId) -> bool {
        self.get(id).reduced
    }

    #[inline]
    pub fn set_reduced(&mut self, id: NodeId) {
        self.get_mut(id).reduced = true;
    }

    /// Mark `id` and every descendant reduced.
    pub fn set_reduced_subtree(&mut self, id: NodeId) {
        self.get_mut(id).reduced = true;
        let children = self.get(id).children.to_vec();
        for child in children {
            self.set_reduced_subtree(child);
        }
    }

    /// Record a structural change at `id`: bump the revision and clear the
    /// reduced marker of `id` and every ancestor.
    fn touch(&mut self, id: NodeId) {
        self.revision += 1;
        let mut current = Some(id);
        while let Some(node) = current {
            let slot = self.get_mut(node);
            slot.reduced = false;
            current = slot.parent;
        }
    }

    fn invalidate_ancestors(&mut self, id: NodeId) {
        self.revision += 1;
        let mut current = self.get(id).parent;
        while let Some(node) = current {
            let slot = self.get_mut(node);
            slot.reduced = false;
            current = slot.parent;
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.get(child).parent.is_none());
        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.push(child);
        self.touch(parent);
    }

    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        debug_assert!(self.get(child).parent.is_none());
        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.insert(index, child);
        self.touch(parent);
    }

    /// Put `child` in slot `index`, returning the detached previous occupant.
    pub fn set_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> NodeId {
        debug_assert!(self.get(child).parent.is_none());
        let old = std::mem::replace(&mut self.get_mut(parent).children[index], child);
        self.get_mut(old).parent = None;
        self.get_mut(child).parent = Some(parent);
        self.touch(parent);
        old
    }

    /// Detach and return the child at `index`.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> NodeId {
        let old = self.get_mut(parent).children.remove(index);
        self.get_mut(old).parent = None;
        self.touch(parent);
        old
    }

    /// Detach every child of `parent`, in order.
    pub fn take_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let children: Vec<NodeId> = std::mem::take(&mut self.get_mut(parent).children).into_vec();
        for &child in &children {
            self.get_mut(child).parent = None;
        }
        self.touch(parent);
        children
    }

    /// Change the operator of `id`, keeping its children.
    pub fn retag(&mut self, id: NodeId, tag: Tag) {
        self.get_mut(id).tag = tag;
        self.touch(id);
    }

    /// Replace the node at `target` by `source`.
    ///
    /// `source`'s content (tag, payload, children, reduced marker, scope) is
    /// moved into `target`'s slot, so `target` keeps its position in its
    /// parent, or stays the root. `source` may be a descendant of `target`.
    /// Children of `target` that are not carried over become detached, and
    /// `source` itself is left as an empty husk.
    pub fn replace(&mut self, target: NodeId, source: NodeId) {
        if target == source {
            return;
        }
        let src = self.get_mut(source);
        let tag = src.tag;
        let payload = src.payload.take();
        let children = std::mem::take(&mut src.children);
        let reduced = src.reduced;
        let scope = src.scope.take();
        src.parent = None;

        let dst = self.get_mut(target);
        dst.tag = tag;
        dst.payload = payload;
        dst.reduced = reduced;
        dst.scope = scope;
        let old_children = std::mem::replace(&mut dst.children, children);

        for old in old_children {
            if self.get(old).parent == Some(target) {
                self.get_mut(old).parent = None;
            }
        }
        let moved: Vec<NodeId> = self.get(target).children.to_vec();
        for child in moved {
            self.get_mut(child).parent = Some(target);
        }
        self.invalidate_ancestors(target);
    }

    /// Deep, independent copy of the subtree at `id`.
    ///
    /// The copy is detached, unreduced and carries no scope frames.
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let (tag, payload, children) = {
            let node = self.get(id);
            (node.tag, node.payload.clone(), node.children.clone())
        };
        let copy = self.push(Node::new(tag, payload));
        for child in children {
            let child_copy = self.deep_clone(child);
            self.get_mut(child_copy).parent = Some(copy);
            self.get_mut(copy).children.push(child_copy);
        }
        copy
    }

    /// Structural equality of two subtrees (tag, payload, children).
    pub fn structurally_equal(&self, a: NodeId, b: NodeId) -> bool {
        let (na, nb) = (self.get(a), self.get(b));
        na.tag == nb.tag
            && na.payload == nb.payload
            && na.children.len() == nb.children.len()
            && na
                .children
                .iter()
                .zip(nb.children.iter())
                .all(|(&ca, &cb)| self.structurally_equal(ca, cb))
    }

    // ------------------------------------------------------------------
    // Scopes
    // ------------------------------------------------------------------

    pub fn create_scope(&mut self, id: NodeId) {
        self.get_mut(id).scope = Some(ScopeFrame::new());
    }

    pub fn remove_scope(&mut self, id: NodeId) -> Option<ScopeFrame> {
        self.get_mut(id).scope.take()
    }

    pub fn scope(&self, id: NodeId) -> Option<&ScopeFrame> {
        self.get(id).scope.as_ref()
    }

    /// Bind `name` in the frame on `id`, creating the frame if needed.
    pub fn put_into_scope(&mut self, id: NodeId, name: SymbolId, entry: ScopeEntry) {
        self.get_mut(id)
            .scope
            .get_or_insert_with(ScopeFrame::new)
            .put(name, entry);
    }

    /// Returns false when `id` has no frame binding `name`.
    pub fn set_scope_value(&mut self, id: NodeId, name: SymbolId, value: NodeId) -> bool {
        match self.get_mut(id).scope.as_mut().and_then(|f| f.get_mut(name)) {
            Some(entry) => {
                entry.set_value(value);
                true
            }
            None => false,
        }
    }

    pub fn lock_scope(&mut self, id: NodeId) {
        if let Some(frame) = self.get_mut(id).scope.as_mut() {
            frame.lock();
        }
    }

    pub fn unlock_scope(&mut self, id: NodeId) {
        if let Some(frame) = self.get_mut(id).scope.as_mut() {
            frame.unlock();
        }
    }

    /// Nearest binding of `name` visible from `id`, walking towards the root.
    ///
    /// Returns the node carrying the frame and the entry, locked or not.
    pub fn find_binding(&self, id: NodeId, name: SymbolId) -> Option<(NodeId, &ScopeEntry)> {
        let mut current = Some(id);
        while let Some(node) = current {
            if let Some(entry) = self.get(node).scope.as_ref().and_then(|f| f.get(name)) {
                return Some((node, entry));
            }
            current = self.get(node).parent;
        }
        None
    }
}
