use crate::arithmetic::{Arithmetic, RationalArithmetic};
use crate::budget::{Budget, BudgetExceeded};
use crate::config::EngineConfig;
use crate::profiler::RuleProfiler;
use crate::registry::RuleRegistry;
use crate::rule::Rule;
use crate::step::Step;
use logic_ast::{Context, NodeId};
use std::rc::Rc;
use tracing::{debug, trace};

/// Drives reduction of the formulas held in `context`.
///
/// The session assumes exclusive access to the tree for the duration of a
/// top-level [`Session::reduce`] call.
pub struct Session {
    pub context: Context,
    registry: Rc<RuleRegistry>,
    arithmetic: Rc<dyn Arithmetic>,
    config: EngineConfig,
    budget: Budget,
    profiler: RuleProfiler,
    steps: Vec<Step>,
    /// Rule and node being applied, for attributing `log` lines
    current: Option<(String, NodeId)>,
    depth: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

impl Session {
    pub fn new(context: Context, registry: RuleRegistry) -> Self {
        let config = EngineConfig::default();
        Self {
            context,
            registry: Rc::new(registry),
            arithmetic: Rc::new(RationalArithmetic),
            budget: Budget::new(Some(config.max_expansion), config.max_total_expansion),
            profiler: RuleProfiler::new(config.profile),
            config,
            steps: Vec::new(),
            current: None,
            depth: 0,
        }
    }

    pub fn with_default_rules() -> Self {
        Self::new(Context::new(), RuleRegistry::with_default_rules())
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.budget = Budget::new(Some(config.max_expansion), config.max_total_expansion);
        self.profiler = RuleProfiler::new(config.profile);
        self.config = config;
        self
    }

    pub fn with_arithmetic(mut self, arithmetic: Rc<dyn Arithmetic>) -> Self {
        self.arithmetic = arithmetic;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Shared handle to the arithmetic collaborator.
    pub fn arithmetic(&self) -> Rc<dyn Arithmetic> {
        Rc::clone(&self.arithmetic)
    }

    pub fn profiler(&self) -> &RuleProfiler {
        &self.profiler
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    /// Reserve `count` big-operator instantiations.
    pub fn charge_expansion(&mut self, count: u64) -> Result<(), BudgetExceeded> {
        self.budget.charge(count)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn take_steps(&mut self) -> Vec<Step> {
        std::mem::take(&mut self.steps)
    }

    /// Describe the rewrite the current rule just made.
    pub fn log(&mut self, description: impl Into<String>) {
        let description = description.into();
        match &self.current {
            Some((rule_name, node)) => {
                debug!(rule = %rule_name, node = node.index(), "{}", description);
                if self.config.collect_steps {
                    self.steps.push(Step {
                        rule_name: rule_name.clone(),
                        description,
                        node: *node,
                    });
                }
            }
            None => debug!("{}", description),
        }
    }

    /// Reduce the slot `node` to a fixed point.
    ///
    /// Returns true when anything in the slot's subtree changed. Reducing an
    /// already reduced node is a no-op returning false.
    pub fn reduce(&mut self, node: NodeId) -> bool {
        if self.context.is_reduced(node) {
            return false;
        }
        let tag = self.context.tag(node);
        trace!(depth = self.depth, node = node.index(), %tag, "visit");

        let revision = self.context.revision();
        let rules: Vec<Rc<dyn Rule>> = self.registry.rules_for(tag).to_vec();
        let mut children_reduced = false;

        for rule in &rules {
            if !rule.is_special() && !children_reduced {
                self.reduce_children(node);
                children_reduced = true;
            }
            if self.apply_rule(rule.as_ref(), node) {
                self.profiler.record(rule.name());
                // The slot now holds the rewrite; keep going until it settles
                self.reduce(node);
                return true;
            }
        }

        // Nothing applied; the children still settle in place
        if !children_reduced {
            self.reduce_children(node);
        }
        self.context.set_reduced(node);
        self.context.revision() != revision
    }

    /// Reduce the child at `index` of `parent` and return what occupies that
    /// slot afterwards.
    pub fn reduce_and_get(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        let child = self.context.child(parent, index)?;
        self.reduce(child);
        self.context.child(parent, index)
    }

    fn reduce_children(&mut self, node: NodeId) {
        let mut index = 0;
        while let Some(child) = self.context.child(node, index) {
            self.reduce(child);
            index += 1;
        }
    }

    fn apply_rule(&mut self, rule: &dyn Rule, node: NodeId) -> bool {
        let outer = self.current.replace((rule.name().to_string(), node));
        self.depth += 1;
        let applied = rule.apply(self, node);
        self.depth -= 1;
        self.current = outer;
        if applied {
            debug!(
                rule = rule.name(),
                node = node.index(),
                "applied: {}",
                self.context.display(node)
            );
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic_ast::Tag;
    use std::cell::Cell;

    #[test]
    fn node_without_rules_is_marked_reduced() {
        let mut session = Session::new(Context::new(), RuleRegistry::new());
        let p = session.context.predicate("P", []).unwrap();
        assert!(!session.reduce(p));
        assert!(session.context.is_reduced(p));
    }

    #[test]
    fn normal_rule_sees_reduced_children() {
        let mut registry = RuleRegistry::new();
        registry.add_reducer(Tag::Negation, "check children", false, |session, node| {
            let child = session.context.child(node, 0).unwrap();
            assert!(session.context.is_reduced(child));
            false
        });
        let mut session = Session::new(Context::new(), registry);
        let p = session.context.predicate("P", []).unwrap();
        let not = session.context.negation(p);
        session.reduce(not);
        assert!(session.context.is_reduced(not));
    }

    #[test]
    fn declined_special_rules_leave_children_to_the_session() {
        let mut registry = RuleRegistry::new();
        registry.add_reducer(Tag::Conjunction, "noop", true, |session, node| {
            let child = session.context.child(node, 0).unwrap();
            assert!(!session.context.is_reduced(child));
            false
        });
        let mut session = Session::new(Context::new(), registry);
        let p = session.context.predicate("P", []).unwrap();
        let and = session.context.add(Tag::Conjunction, [p]);
        session.reduce(and);
        assert!(session.context.is_reduced(p));
        assert!(session.context.is_reduced(and));
    }

    #[test]
    fn first_applying_rule_wins() {
        let later = Rc::new(Cell::new(0));
        let counter = Rc::clone(&later);
        let mut registry = RuleRegistry::new();
        registry.add_reducer(Tag::ToNumber, "to zero", false, |session, node| {
            let zero = session.context.integer(0);
            session.context.replace(node, zero);
            true
        });
        registry.add_reducer(Tag::ToNumber, "never", false, move |_, _| {
            counter.set(counter.get() + 1);
            false
        });
        let mut session = Session::new(Context::new(), registry);
        let p = session.context.predicate("P", []).unwrap();
        let conv = session.context.to_number(p);

        assert!(session.reduce(conv));
        assert_eq!(session.context.tag(conv), Tag::Number);
        assert_eq!(later.get(), 0);
    }

    #[test]
    fn log_records_steps_when_enabled() {
        let mut registry = RuleRegistry::new();
        registry.add_reducer(Tag::ToNumber, "Conversion", false, |session, node| {
            let zero = session.context.integer(0);
            session.context.replace(node, zero);
            session.log("to zero");
            true
        });
        let config = EngineConfig {
            collect_steps: true,
            profile: true,
            ..Default::default()
        };
        let mut session = Session::new(Context::new(), registry).with_config(config);
        let t = session.context.boolean(true);
        let conv = session.context.to_number(t);
        session.reduce(conv);

        let steps = session.take_steps();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].rule_name, "Conversion");
        assert_eq!(steps[0].node, conv);
        assert_eq!(session.profiler().hits("Conversion"), 1);
        assert!(session.steps().is_empty());
    }
}
