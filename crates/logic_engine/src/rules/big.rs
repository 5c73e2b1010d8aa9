//! Generalized connectives.
//!
//! `BigConjunction(body, x, from, to, step)` and friends bind `x` to each
//! value of a numeric range, or each element of a list, instantiate `body`
//! once per value and fold the instances into the plain n-ary connective.
//!
//! Node shapes:
//! - `[body, x, list]` when the third child reduces to a `List`
//! - `[body, x, to]`, `[body, x, from, to]`, `[body, x, from, to, step]`
//!
//! Instances are reduced and folded as they are produced, so an absorbing
//! literal stops the expansion before later values are instantiated.

use crate::arithmetic::Arithmetic;
use crate::registry::RuleRegistry;
use crate::session::Session;
use logic_ast::{NodeId, Number, ScopeEntry, SymbolId, Tag};
use std::cmp::Ordering;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fold {
    /// AND/OR: `absorbing` decides the result, its opposite is dropped.
    ShortCircuit { absorbing: bool },
    /// XNOR/XOR: every `flips` literal toggles the parity, the other one is
    /// the identity and is dropped.
    Parity { flips: bool },
}

#[derive(Debug, Clone, Copy)]
struct Family {
    connective: Tag,
    fold: Fold,
}

impl Family {
    fn of(tag: Tag) -> Option<Family> {
        let (connective, fold) = match tag {
            Tag::BigConjunction => (Tag::Conjunction, Fold::ShortCircuit { absorbing: false }),
            Tag::BigDisjunction => (Tag::Disjunction, Fold::ShortCircuit { absorbing: true }),
            Tag::BigEquivalence => (Tag::Equivalence, Fold::Parity { flips: false }),
            Tag::BigExclusiveDisjunction => {
                (Tag::ExclusiveDisjunction, Fold::Parity { flips: true })
            }
            _ => return None,
        };
        Some(Family { connective, fold })
    }

    /// Value of the connective over zero operands.
    fn identity(self) -> bool {
        match self.fold {
            Fold::ShortCircuit { absorbing } => !absorbing,
            Fold::Parity { flips } => !flips,
        }
    }

    /// The connective that is the negation of this one for an even number
    /// of operands.
    fn dual(self) -> Tag {
        match self.connective {
            Tag::Equivalence => Tag::ExclusiveDisjunction,
            Tag::ExclusiveDisjunction => Tag::Equivalence,
            other => other,
        }
    }
}

enum Flow {
    Continue,
    /// An absorbing instance replaced the whole operator.
    Decided,
}

/// An expansion in progress. The operator node has already been turned into
/// the plain connective and carries the frame binding `name`.
struct Expansion {
    node: NodeId,
    body: NodeId,
    name: SymbolId,
    family: Family,
    odd: bool,
}

impl Expansion {
    fn begin(session: &mut Session, node: NodeId, family: Family, name: SymbolId) -> Self {
        let ctx = &mut session.context;
        let original = ctx.take_children(node);
        ctx.retag(node, family.connective);
        ctx.create_scope(node);
        ctx.put_into_scope(node, name, ScopeEntry::new());
        ctx.lock_scope(node);
        Expansion {
            node,
            body: original[0],
            name,
            family,
            odd: false,
        }
    }

    /// Bind `value`, append a fresh instance of the body and fold it.
    fn instantiate(&mut self, session: &mut Session, value: NodeId) -> Flow {
        let ctx = &mut session.context;
        ctx.set_scope_value(self.node, self.name, value);
        let instance = ctx.deep_clone(self.body);
        ctx.add_child(self.node, instance);

        ctx.unlock_scope(self.node);
        session.reduce(instance);
        session.context.lock_scope(self.node);

        self.fold(session, instance)
    }

    fn fold(&mut self, session: &mut Session, instance: NodeId) -> Flow {
        let ctx = &mut session.context;
        let Some(value) = ctx.tag(instance).as_bool() else {
            return Flow::Continue;
        };
        match self.family.fold {
            Fold::ShortCircuit { absorbing } if value == absorbing => {
                ctx.remove_scope(self.node);
                ctx.replace(self.node, instance);
                session.log(format!(
                    "Any {} reduces whole {} to {}",
                    value, self.family.connective, value
                ));
                return Flow::Decided;
            }
            Fold::Parity { flips } if value == flips => self.odd = !self.odd,
            _ => {}
        }
        let last = ctx.children(self.node).len() - 1;
        ctx.remove_child_at(self.node, last);
        Flow::Continue
    }

    fn finish(self, session: &mut Session) {
        let ctx = &mut session.context;
        ctx.remove_scope(self.node);
        let connective = self.family.connective;
        match ctx.children(self.node).len() {
            0 => {
                let literal = ctx.boolean(self.family.identity() != self.odd);
                ctx.replace(self.node, literal);
            }
            1 => {
                let only = ctx.remove_child_at(self.node, 0);
                let result = if self.odd { ctx.negation(only) } else { only };
                ctx.replace(self.node, result);
            }
            _ if !self.odd => {}
            m if m % 2 == 0 => ctx.retag(self.node, self.family.dual()),
            _ => {
                // For an odd operand count XNOR and XOR coincide
                let residue = ctx.take_children(self.node);
                let inner = ctx.add(connective, residue);
                let negated = ctx.negation(inner);
                ctx.replace(self.node, negated);
            }
        }
        session.log(format!("Expanded into {}", connective));
    }
}

/// Bound variable name of a big operator, if child 1 is a symbol.
fn bound_name(session: &Session, node: NodeId) -> Option<SymbolId> {
    let ctx = &session.context;
    let sym = ctx.child(node, 1)?;
    match ctx.tag(sym) {
        Tag::Symbol => ctx.name_id(sym),
        _ => None,
    }
}

/// Charge `count` instantiations, declining with a warning when refused.
fn reserve(session: &mut Session, node: NodeId, count: u64) -> bool {
    match session.charge_expansion(count) {
        Ok(()) => true,
        Err(err) => {
            let tag = session.context.tag(node);
            warn!(node = node.index(), %tag, "expansion declined: {}", err);
            false
        }
    }
}

fn expand_list(session: &mut Session, node: NodeId) -> bool {
    let tag = session.context.tag(node);
    let Some(family) = Family::of(tag) else {
        return false;
    };
    if session.context.children(node).len() != 3 {
        return false;
    }
    let Some(name) = bound_name(session, node) else {
        return false;
    };
    let Some(list) = session.reduce_and_get(node, 2) else {
        return false;
    };
    if session.context.tag(list) != Tag::List {
        return false;
    }
    let elements = session.context.children(list).to_vec();
    if !reserve(session, node, elements.len() as u64) {
        return false;
    }

    let mut expansion = Expansion::begin(session, node, family, name);
    session.log(format!("Expanding {} over {} list element(s)", tag, elements.len()));
    for element in elements {
        let value = session.context.deep_clone(element);
        if let Flow::Decided = expansion.instantiate(session, value) {
            return true;
        }
    }
    expansion.finish(session);
    true
}

/// Reduce the child at `index` and read it as a real internal number.
fn real_bound(session: &mut Session, node: NodeId, index: usize) -> Option<Number> {
    let slot = session.reduce_and_get(node, index)?;
    let value = session.context.as_number(slot)?;
    if session.arithmetic().is_complex(value) {
        return None;
    }
    Some(value.clone())
}

/// Number of values visited from `from` towards `to`, capped one past `cap`.
fn range_len(
    arithmetic: &dyn Arithmetic,
    from: &Number,
    to: &Number,
    step: &Number,
    cap: Option<u64>,
) -> u64 {
    let past = if arithmetic.is_negative(step) {
        Ordering::Less
    } else {
        Ordering::Greater
    };
    let mut value = from.clone();
    let mut count = 0u64;
    while arithmetic.comparison(&value, to).is_some_and(|ord| ord != past) {
        count += 1;
        if cap.is_some_and(|cap| count > cap) {
            break;
        }
        value = arithmetic.addition(&value, step);
    }
    count
}

fn expand_range(session: &mut Session, node: NodeId) -> bool {
    let tag = session.context.tag(node);
    let Some(family) = Family::of(tag) else {
        return false;
    };
    let arity = session.context.children(node).len();
    if !(3..=5).contains(&arity) {
        return false;
    }
    let Some(name) = bound_name(session, node) else {
        return false;
    };

    let arithmetic = session.arithmetic();
    let (from, to) = if arity == 3 {
        (Some(arithmetic.integer_one()), real_bound(session, node, 2))
    } else {
        (real_bound(session, node, 2), real_bound(session, node, 3))
    };
    let step = if arity == 5 {
        real_bound(session, node, 4)
    } else {
        Some(arithmetic.integer_one())
    };
    let (Some(from), Some(to), Some(step)) = (from, to, step) else {
        return false;
    };
    if arithmetic.is_zero(&step) {
        return false;
    }

    let count = range_len(
        arithmetic.as_ref(),
        &from,
        &to,
        &step,
        session.budget().per_operator(),
    );
    if !reserve(session, node, count) {
        return false;
    }

    let mut expansion = Expansion::begin(session, node, family, name);
    session.log(format!("Expanding {} over {} value(s) from {} to {}", tag, count, from, to));
    let mut current = from;
    for _ in 0..count {
        let value = arithmetic.create_internal_number(&mut session.context, current.clone());
        if let Flow::Decided = expansion.instantiate(session, value) {
            return true;
        }
        current = arithmetic.addition(&current, &step);
    }
    expansion.finish(session);
    true
}

define_rule!(
    /// `[body, x, list]`: one instance per list element, each bound to its
    /// own copy of the element.
    ListExpansionRule,
    "Big operator over list",
    [
        Tag::BigConjunction,
        Tag::BigDisjunction,
        Tag::BigEquivalence,
        Tag::BigExclusiveDisjunction,
    ],
    special,
    |session, node| { expand_list(session, node) }
);

define_rule!(
    /// Numeric range with optional `from` and `step`, both defaulting to one.
    /// Declines on non-numeric or complex bounds and on a zero step.
    RangeExpansionRule,
    "Big operator over range",
    [
        Tag::BigConjunction,
        Tag::BigDisjunction,
        Tag::BigEquivalence,
        Tag::BigExclusiveDisjunction,
    ],
    special,
    |session, node| { expand_range(session, node) }
);

/// Reduce the children of an operator neither expansion could take, with
/// its own variable locked so enclosing bindings of the same name stay out.
fn reduce_symbolic(session: &mut Session, node: NodeId) -> bool {
    let shielded = bound_name(session, node);
    if let Some(name) = shielded {
        session.context.create_scope(node);
        session.context.put_into_scope(node, name, ScopeEntry::new());
        session.context.lock_scope(node);
    }
    let mut index = 0;
    while let Some(child) = session.context.child(node, index) {
        session.reduce(child);
        index += 1;
    }
    if shielded.is_some() {
        session.context.remove_scope(node);
    }
    false
}

define_rule!(
    /// Runs after both expansions declined. Never rewrites the operator.
    SymbolicBodyRule,
    "Big operator left symbolic",
    [
        Tag::BigConjunction,
        Tag::BigDisjunction,
        Tag::BigEquivalence,
        Tag::BigExclusiveDisjunction,
    ],
    special,
    |session, node| { reduce_symbolic(session, node) }
);

pub fn register(registry: &mut RuleRegistry) {
    registry.add_rule(Box::new(ListExpansionRule));
    registry.add_rule(Box::new(RangeExpansionRule));
    registry.add_rule(Box::new(SymbolicBodyRule));
}
