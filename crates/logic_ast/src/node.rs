use crate::number::Number;
use crate::scope::ScopeFrame;
use crate::symbol::SymbolId;
use smallvec::SmallVec;
use std::fmt;

/// Handle of a node inside a [`crate::Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }
}

/// Logical kind of a node. Rules are registered per tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    True,
    False,
    Negation,
    Conjunction,
    Disjunction,
    Implication,
    Equivalence,
    ExclusiveDisjunction,
    Predicate,
    ForAll,
    Exists,
    BigConjunction,
    BigDisjunction,
    BigEquivalence,
    BigExclusiveDisjunction,
    Symbol,
    List,
    Number,
    ToNumber,
}

impl Tag {
    pub const ALL: [Tag; 19] = [
        Tag::True,
        Tag::False,
        Tag::Negation,
        Tag::Conjunction,
        Tag::Disjunction,
        Tag::Implication,
        Tag::Equivalence,
        Tag::ExclusiveDisjunction,
        Tag::Predicate,
        Tag::ForAll,
        Tag::Exists,
        Tag::BigConjunction,
        Tag::BigDisjunction,
        Tag::BigEquivalence,
        Tag::BigExclusiveDisjunction,
        Tag::Symbol,
        Tag::List,
        Tag::Number,
        Tag::ToNumber,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tag::True => "True",
            Tag::False => "False",
            Tag::Negation => "Negation",
            Tag::Conjunction => "Conjunction",
            Tag::Disjunction => "Disjunction",
            Tag::Implication => "Implication",
            Tag::Equivalence => "Equivalence",
            Tag::ExclusiveDisjunction => "ExclusiveDisjunction",
            Tag::Predicate => "Predicate",
            Tag::ForAll => "ForAll",
            Tag::Exists => "Exists",
            Tag::BigConjunction => "BigConjunction",
            Tag::BigDisjunction => "BigDisjunction",
            Tag::BigEquivalence => "BigEquivalence",
            Tag::BigExclusiveDisjunction => "BigExclusiveDisjunction",
            Tag::Symbol => "Symbol",
            Tag::List => "List",
            Tag::Number => "Number",
            Tag::ToNumber => "ToNumber",
        }
    }

    /// The literal tag for `value`.
    #[inline]
    pub fn literal(value: bool) -> Tag {
        if value {
            Tag::True
        } else {
            Tag::False
        }
    }

    /// `Some(value)` for the two boolean literals.
    #[inline]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Tag::True => Some(true),
            Tag::False => Some(false),
            _ => None,
        }
    }

    pub fn is_big_operator(self) -> bool {
        matches!(
            self,
            Tag::BigConjunction
                | Tag::BigDisjunction
                | Tag::BigEquivalence
                | Tag::BigExclusiveDisjunction
        )
    }

    /// Whether nodes of this tag need a payload (name or number).
    pub fn has_payload(self) -> bool {
        matches!(self, Tag::Predicate | Tag::Symbol | Tag::Number)
    }

    /// Accepted child count as `(min, max)`; `None` means unbounded.
    pub fn arity(self) -> (usize, Option<usize>) {
        match self {
            Tag::True | Tag::False | Tag::Symbol | Tag::Number => (0, Some(0)),
            Tag::Negation | Tag::ToNumber => (1, Some(1)),
            Tag::Conjunction
            | Tag::Disjunction
            | Tag::Equivalence
            | Tag::ExclusiveDisjunction
            | Tag::Predicate
            | Tag::List => (0, None),
            Tag::Implication | Tag::ForAll | Tag::Exists => (2, None),
            Tag::BigConjunction
            | Tag::BigDisjunction
            | Tag::BigEquivalence
            | Tag::BigExclusiveDisjunction => (3, Some(5)),
        }
    }

    pub(crate) fn arity_text(self) -> &'static str {
        match self.arity() {
            (0, Some(0)) => "no",
            (1, Some(1)) => "exactly 1",
            (0, None) => "any number of",
            (2, None) => "at least 2",
            _ => "3 to 5",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar data attached to leaf-like nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Name(SymbolId),
    Number(Number),
}

/// One arena slot.
///
/// `reduced` is the session's memo: true once no rule can change the node.
/// `scope` only exists while a big operator is being expanded.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) tag: Tag,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) payload: Option<Payload>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) reduced: bool,
    pub(crate) scope: Option<ScopeFrame>,
}

impl Node {
    pub(crate) fn new(tag: Tag, payload: Option<Payload>) -> Self {
        Node {
            tag,
            children: SmallVec::new(),
            payload,
            parent: None,
            reduced: false,
            scope: None,
        }
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    #[inline]
    pub fn scope(&self) -> Option<&ScopeFrame> {
        self.scope.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_tags_round_trip_through_bool() {
        assert_eq!(Tag::literal(true).as_bool(), Some(true));
        assert_eq!(Tag::literal(false).as_bool(), Some(false));
        assert_eq!(Tag::Predicate.as_bool(), None);
    }

    #[test]
    fn big_operators_accept_three_to_five_children() {
        for tag in Tag::ALL.iter().filter(|t| t.is_big_operator()) {
            assert_eq!(tag.arity(), (3, Some(5)));
        }
    }
}
