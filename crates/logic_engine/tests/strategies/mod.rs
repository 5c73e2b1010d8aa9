use logic_ast::{Context, NodeId, Tag};
use proptest::prelude::*;

pub const ATOMS: usize = 3;

/// Tree-independent formula used to generate inputs and to evaluate them.
#[derive(Debug, Clone)]
pub enum Formula {
    Lit(bool),
    /// Propositional atom `P0`..`P2`
    Atom(usize),
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Implies(Vec<Formula>),
    Iff(Vec<Formula>),
    Xor(Vec<Formula>),
}

impl Formula {
    pub fn build(&self, ctx: &mut Context) -> NodeId {
        let (tag, args) = match self {
            Formula::Lit(b) => return ctx.boolean(*b),
            Formula::Atom(i) => return ctx.predicate(&format!("P{}", i), []).unwrap(),
            Formula::Not(f) => {
                let inner = f.build(ctx);
                return ctx.negation(inner);
            }
            Formula::And(fs) => (Tag::Conjunction, fs),
            Formula::Or(fs) => (Tag::Disjunction, fs),
            Formula::Implies(fs) => (Tag::Implication, fs),
            Formula::Iff(fs) => (Tag::Equivalence, fs),
            Formula::Xor(fs) => (Tag::ExclusiveDisjunction, fs),
        };
        let children: Vec<NodeId> = args.iter().map(|f| f.build(ctx)).collect();
        ctx.add(tag, children)
    }

    pub fn eval(&self, atoms: &[bool]) -> bool {
        match self {
            Formula::Lit(b) => *b,
            Formula::Atom(i) => atoms[*i],
            Formula::Not(f) => !f.eval(atoms),
            Formula::And(fs) => fs.iter().all(|f| f.eval(atoms)),
            Formula::Or(fs) => fs.iter().any(|f| f.eval(atoms)),
            Formula::Implies(fs) => implies(fs.iter().map(|f| f.eval(atoms)).collect()),
            Formula::Iff(fs) => fs.iter().filter(|f| !f.eval(atoms)).count() % 2 == 0,
            Formula::Xor(fs) => fs.iter().filter(|f| f.eval(atoms)).count() % 2 == 1,
        }
    }

    pub fn is_closed(&self) -> bool {
        match self {
            Formula::Lit(_) => true,
            Formula::Atom(_) => false,
            Formula::Not(f) => f.is_closed(),
            Formula::And(fs)
            | Formula::Or(fs)
            | Formula::Implies(fs)
            | Formula::Iff(fs)
            | Formula::Xor(fs) => fs.iter().all(Formula::is_closed),
        }
    }
}

/// Right-associative `o1 → (o2 → … → on)`.
fn implies(values: Vec<bool>) -> bool {
    let mut iter = values.into_iter().rev();
    let last = iter.next().unwrap_or(true);
    iter.fold(last, |acc, antecedent| !antecedent || acc)
}

/// Truth value of a reduced tree under `atoms`.
pub fn eval_node(ctx: &Context, id: NodeId, atoms: &[bool]) -> bool {
    let args: Vec<bool> = ctx
        .children(id)
        .iter()
        .map(|&c| eval_node(ctx, c, atoms))
        .collect();
    match ctx.tag(id) {
        Tag::True => true,
        Tag::False => false,
        Tag::Predicate => {
            let name = ctx.name(id).unwrap();
            atoms[name[1..].parse::<usize>().unwrap()]
        }
        Tag::Negation => !args[0],
        Tag::Conjunction => args.iter().all(|&b| b),
        Tag::Disjunction => args.iter().any(|&b| b),
        Tag::Implication => implies(args),
        Tag::Equivalence => args.iter().filter(|&&b| !b).count() % 2 == 0,
        Tag::ExclusiveDisjunction => args.iter().filter(|&&b| b).count() % 2 == 1,
        other => panic!("unexpected tag {} in reduced formula", other),
    }
}

pub fn assignments() -> impl Iterator<Item = Vec<bool>> {
    (0..1u32 << ATOMS).map(|bits| (0..ATOMS).map(|i| bits & (1 << i) != 0).collect())
}

fn arb_formula(leaf: BoxedStrategy<Formula>) -> impl Strategy<Value = Formula> {
    leaf.prop_recursive(
        4,  // levels deep
        48, // max size
        4,  // items per collection
        |inner| {
            prop_oneof![
                inner.clone().prop_map(|f| Formula::Not(Box::new(f))),
                prop::collection::vec(inner.clone(), 0..4).prop_map(Formula::And),
                prop::collection::vec(inner.clone(), 0..4).prop_map(Formula::Or),
                prop::collection::vec(inner.clone(), 2..4).prop_map(Formula::Implies),
                prop::collection::vec(inner.clone(), 0..4).prop_map(Formula::Iff),
                prop::collection::vec(inner, 0..4).prop_map(Formula::Xor),
            ]
        },
    )
}

/// Formulas over literals only.
pub fn arb_closed_formula() -> impl Strategy<Value = Formula> {
    arb_formula(any::<bool>().prop_map(Formula::Lit).boxed())
}

/// Formulas mixing literals and atoms.
pub fn arb_open_formula() -> impl Strategy<Value = Formula> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Formula::Lit),
        (0..ATOMS).prop_map(Formula::Atom),
    ];
    arb_formula(leaf.boxed())
}
