use logic_ast::NodeId;
use std::fmt;

/// One logged rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub rule_name: String,
    pub description: String,
    /// Slot the rule was applied to
    pub node: NodeId,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule_name, self.description)
    }
}
