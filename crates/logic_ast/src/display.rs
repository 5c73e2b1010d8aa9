//! Compact functional-notation rendering for logs and test assertions.

use crate::context::Context;
use crate::node::{NodeId, Payload, Tag};
use std::fmt;

/// `Conjunction(P(1), Negation(Q))`, `[1, 2]`, `True`.
pub struct DisplayNode<'a> {
    pub context: &'a Context,
    pub id: NodeId,
}

impl DisplayNode<'_> {
    fn child(&self, id: NodeId) -> DisplayNode<'_> {
        DisplayNode {
            context: self.context,
            id,
        }
    }

    fn write_args(&self, f: &mut fmt::Formatter<'_>, open: &str, close: &str) -> fmt::Result {
        f.write_str(open)?;
        for (i, &child) in self.context.children(self.id).iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", self.child(child))?;
        }
        f.write_str(close)
    }
}

impl fmt::Display for DisplayNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.context.get(self.id);
        match (node.tag(), node.payload()) {
            (Tag::Number, Some(Payload::Number(n))) => write!(f, "{}", n),
            (Tag::Symbol, Some(Payload::Name(sym))) => {
                f.write_str(self.context.sym_name(*sym))
            }
            (Tag::Predicate, Some(Payload::Name(sym))) => {
                f.write_str(self.context.sym_name(*sym))?;
                if node.children().is_empty() {
                    Ok(())
                } else {
                    self.write_args(f, "(", ")")
                }
            }
            (Tag::List, _) => self.write_args(f, "[", "]"),
            (tag, _) if node.children().is_empty() && tag.arity().1 == Some(0) => {
                f.write_str(tag.name())
            }
            (tag, _) => {
                f.write_str(tag.name())?;
                self.write_args(f, "(", ")")
            }
        }
    }
}
