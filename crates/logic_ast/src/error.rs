//! Error types for logic_ast crate.

use crate::node::Tag;
use thiserror::Error;

/// Structural misuse detected while building a tree.
///
/// These are caller bugs, never reducible cases: the reduction engine
/// does not produce them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// Predicates and symbols must carry a non-empty name
    #[error("invalid name of {tag}: name must not be empty")]
    EmptyName { tag: Tag },

    /// Operator built with a child count it does not accept
    #[error("{tag} takes {expected} operands, got {found}")]
    Arity {
        tag: Tag,
        expected: &'static str,
        found: usize,
    },

    /// Leaf tag that needs a payload was built without one
    #[error("{0} requires a payload; use its dedicated constructor")]
    MissingPayload(Tag),
}
