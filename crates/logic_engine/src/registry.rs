use crate::rule::{FnRule, Rule};
use crate::session::Session;
use logic_ast::{NodeId, Tag};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Ordered rule lists per tag. Registration order is trial order.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: FxHashMap<Tag, Vec<Rc<dyn Rule>>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_rules() -> Self {
        let mut registry = Self::new();
        registry.register_default_rules();
        registry
    }

    pub fn register_default_rules(&mut self) {
        use crate::rules::*;

        boolean::register(self);
        // Big operators expand into the plain connectives registered above
        big::register(self);
        binding::register(self);
    }

    /// Append `rule` to the list of every tag it targets.
    pub fn add_rule(&mut self, rule: Box<dyn Rule>) {
        let rule: Rc<dyn Rule> = rule.into();
        for tag in rule.target_tags() {
            self.rules.entry(tag).or_default().push(rule.clone());
        }
    }

    /// Append a closure rule for `tag`.
    pub fn add_reducer<F>(&mut self, tag: Tag, name: impl Into<String>, special: bool, f: F)
    where
        F: Fn(&mut Session, NodeId) -> bool + 'static,
    {
        self.add_rule(Box::new(FnRule::new(tag, name, special, f)));
    }

    pub fn rules_for(&self, tag: Tag) -> &[Rc<dyn Rule>] {
        self.rules.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sorted, deduplicated names of every registered rule.
    pub fn rule_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .rules
            .values()
            .flat_map(|rules| rules.iter().map(|r| r.name()))
            .collect();
        names.into_iter().map(str::to_string).collect()
    }
}
