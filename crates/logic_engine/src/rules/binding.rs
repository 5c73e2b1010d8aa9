//! Bound-variable lookup.

use crate::registry::RuleRegistry;
use logic_ast::Tag;

define_rule!(
    /// Replace a symbol by a copy of the value bound by the nearest enclosing
    /// frame. A locked frame hides its binding, and an unbound symbol stays
    /// symbolic.
    BoundSymbolRule,
    "Bound symbol",
    [Tag::Symbol],
    |session, node| {
        let ctx = &mut session.context;
        let Some(name) = ctx.name_id(node) else {
            return false;
        };
        let value = match ctx.find_binding(node, name) {
            Some((_, entry)) if !entry.is_locked() => entry.value(),
            _ => None,
        };
        let Some(value) = value else {
            return false;
        };
        let copy = ctx.deep_clone(value);
        // Bound values are already reduced
        ctx.set_reduced_subtree(copy);
        ctx.replace(node, copy);
        let description = format!("Substitute bound {}", ctx.sym_name(name));
        session.log(description);
        true
    }
);

pub fn register(registry: &mut RuleRegistry) {
    registry.add_rule(Box::new(BoundSymbolRule));
}
