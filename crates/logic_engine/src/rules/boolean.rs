//! Propositional connectives: negation, n-ary AND/OR, implication chains,
//! equivalence and exclusive-or parity, and boolean-to-number coercion.

use crate::registry::RuleRegistry;
use crate::session::Session;
use logic_ast::{NodeId, Tag};

define_rule!(DoubleNegationRule, "Double Negation", [Tag::Negation], |session, node| {
    let ctx = &mut session.context;
    let Some(arg) = ctx.child(node, 0) else {
        return false;
    };
    if ctx.tag(arg) != Tag::Negation {
        return false;
    }
    let Some(inner) = ctx.child(arg, 0) else {
        return false;
    };
    ctx.replace(node, inner);
    session.log("Negation of negation is cancelled");
    true
});

define_rule!(NegateLiteralRule, "Logical NOT", [Tag::Negation], |session, node| {
    let ctx = &mut session.context;
    let Some(value) = ctx.child(node, 0).and_then(|arg| ctx.tag(arg).as_bool()) else {
        return false;
    };
    let opposite = ctx.boolean(!value);
    ctx.replace(node, opposite);
    session.log("Logical NOT");
    true
});

define_rule!(
    /// Any `False` operand decides the conjunction; operands after it are
    /// never reduced.
    ConjunctionRule,
    "Logical AND",
    [Tag::Conjunction],
    special,
    |session, node| { fold_short_circuit(session, node, false) }
);

define_rule!(
    /// Dual of [`ConjunctionRule`]: any `True` operand decides it.
    DisjunctionRule,
    "Logical OR",
    [Tag::Disjunction],
    special,
    |session, node| { fold_short_circuit(session, node, true) }
);

/// Shared AND/OR fold. `absorbing` is the literal that decides the whole
/// operator; its opposite is the identity and is dropped.
pub(crate) fn fold_short_circuit(session: &mut Session, node: NodeId, absorbing: bool) -> bool {
    let op = session.context.tag(node);
    let mut changed = false;
    let mut index = 0;
    while let Some(child) = session.context.child(node, index) {
        session.reduce(child);
        match session.context.tag(child).as_bool() {
            Some(value) if value == absorbing => {
                session.context.replace(node, child);
                session.log(format!("Any {} reduces whole {} to {}", value, op, value));
                return true;
            }
            Some(_) => {
                session.context.remove_child_at(node, index);
                changed = true;
            }
            None => index += 1,
        }
    }

    match session.context.children(node).len() {
        0 => {
            let identity = session.context.boolean(!absorbing);
            session.context.replace(node, identity);
            session.log(format!("All operands of {} were {}", op, !absorbing));
            true
        }
        1 => {
            let only = session.context.children(node)[0];
            session.context.replace(node, only);
            session.log(format!("{} of a single operand is that operand", op));
            true
        }
        _ if changed => {
            session.log(format!("{} elements in {} eliminated", !absorbing, op));
            true
        }
        _ => {
            session.context.set_reduced(node);
            false
        }
    }
}

define_rule!(
    /// Right-associative chain `o1 → o2 → … → on`, folded from the end.
    ///
    /// The last child always stands for the already folded tail, so each
    /// step only has to combine one antecedent with it.
    ImplicationRule,
    "Logical implication",
    [Tag::Implication],
    |session, node| {
        let ctx = &mut session.context;
        let mut changed = false;
        let mut i = ctx.children(node).len();
        while i >= 2 {
            i -= 1;
            let consequent = ctx.children(node)[i];
            let antecedent = ctx.children(node)[i - 1];
            match (ctx.tag(antecedent).as_bool(), ctx.tag(consequent).as_bool()) {
                // anything → True, False → anything
                (_, Some(true)) | (Some(false), _) => {
                    ctx.remove_child_at(node, i);
                    let t = ctx.boolean(true);
                    ctx.set_child(node, i - 1, t);
                }
                // True → q
                (Some(true), _) => {
                    ctx.remove_child_at(node, i - 1);
                }
                _ => break,
            }
            changed = true;
        }

        if ctx.children(node).len() == 1 {
            let only = ctx.children(node)[0];
            ctx.replace(node, only);
            session.log("Logical implication");
            return true;
        }
        if changed {
            session.log("Logical implication");
            return true;
        }
        ctx.set_reduced(node);
        false
    }
);

define_rule!(
    /// All-literal equivalence: true iff the number of `False` operands is even.
    EquivalenceRule,
    "Logical equivalence",
    [Tag::Equivalence],
    |session, node| { fold_parity(session, node, false) }
);

define_rule!(
    /// All-literal exclusive-or: true iff the number of `True` operands is odd.
    ExclusiveOrRule,
    "Logical exclusive OR",
    [Tag::ExclusiveDisjunction],
    |session, node| { fold_parity(session, node, true) }
);

/// Parity fold over literal operands. `counted` is the literal whose count
/// decides the result: an odd count gives `counted`, an even one its
/// opposite. Declines on any non-literal operand.
fn fold_parity(session: &mut Session, node: NodeId, counted: bool) -> bool {
    let ctx = &mut session.context;
    let mut count = 0usize;
    for &child in ctx.children(node) {
        match ctx.tag(child).as_bool() {
            Some(value) if value == counted => count += 1,
            Some(_) => {}
            None => return false,
        }
    }
    let value = if count % 2 == 1 { counted } else { !counted };
    let result = ctx.boolean(value);
    ctx.replace(node, result);
    session.log(format!(
        "{} reduction: {} {} operand(s)",
        Tag::literal(counted),
        count,
        if counted { "true" } else { "false" }
    ));
    true
}

define_rule!(
    /// `True` → 1, `False` → 0. Other operands are left to any numeric
    /// conversion rules registered after this one.
    BooleanToNumberRule,
    "Boolean to number",
    [Tag::ToNumber],
    |session, node| {
        let Some(value) = session
            .context
            .child(node, 0)
            .and_then(|arg| session.context.tag(arg).as_bool())
        else {
            return false;
        };
        let arithmetic = session.arithmetic();
        let number = if value {
            arithmetic.integer_one()
        } else {
            arithmetic.zero()
        };
        let result = arithmetic.create_internal_number(&mut session.context, number);
        session.context.replace(node, result);
        session.log("Conversion to number");
        true
    }
);

pub fn register(registry: &mut RuleRegistry) {
    // Cancelling is strictly simpler than folding through literals
    registry.add_rule(Box::new(DoubleNegationRule));
    registry.add_rule(Box::new(NegateLiteralRule));

    registry.add_rule(Box::new(ConjunctionRule));
    registry.add_rule(Box::new(DisjunctionRule));

    registry.add_rule(Box::new(ImplicationRule));
    registry.add_rule(Box::new(EquivalenceRule));
    registry.add_rule(Box::new(ExclusiveOrRule));

    registry.add_rule(Box::new(BooleanToNumberRule));
}
