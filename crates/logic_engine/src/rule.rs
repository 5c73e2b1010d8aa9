use crate::session::Session;
use logic_ast::{NodeId, Tag};

/// A rewrite rule for one or more node tags.
///
/// `apply` mutates the tree through the session and returns true when it
/// rewrote the node; returning false is a decline, never an error.
pub trait Rule {
    fn name(&self) -> &str;

    /// Tags this rule is registered under.
    fn target_tags(&self) -> Vec<Tag>;

    /// Special rules reduce their own children (in whatever order they
    /// need); normal rules see children already reduced by the session.
    fn is_special(&self) -> bool {
        false
    }

    fn apply(&self, session: &mut Session, node: NodeId) -> bool;
}

/// Closure-backed rule for a single tag.
pub struct FnRule<F> {
    name: String,
    tag: Tag,
    special: bool,
    f: F,
}

impl<F> FnRule<F>
where
    F: Fn(&mut Session, NodeId) -> bool,
{
    pub fn new(tag: Tag, name: impl Into<String>, special: bool, f: F) -> Self {
        Self {
            name: name.into(),
            tag,
            special,
            f,
        }
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&mut Session, NodeId) -> bool,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn target_tags(&self) -> Vec<Tag> {
        vec![self.tag]
    }

    fn is_special(&self) -> bool {
        self.special
    }

    fn apply(&self, session: &mut Session, node: NodeId) -> bool {
        (self.f)(session, node)
    }
}
