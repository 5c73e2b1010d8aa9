//! Tagged, mutable expression trees for logic formulas.
//!
//! Nodes live in an arena ([`Context`]) and are addressed by [`NodeId`].
//! Replacing a node moves the replacement's content into the replaced slot,
//! so a `NodeId` keeps naming "whatever currently occupies this position"
//! across rewrites.

pub mod context;
pub mod display;
pub mod error;
pub mod node;
pub mod number;
pub mod scope;
pub mod symbol;

pub use context::Context;
pub use display::DisplayNode;
pub use error::AstError;
pub use node::{Node, NodeId, Payload, Tag};
pub use number::Number;
pub use scope::{ScopeEntry, ScopeFrame};
pub use symbol::{SymbolId, SymbolTable};
