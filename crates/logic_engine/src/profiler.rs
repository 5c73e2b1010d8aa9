use rustc_hash::FxHashMap;

/// Lightweight profiler for tracking rule application counts
#[derive(Debug, Default)]
pub struct RuleProfiler {
    hits: FxHashMap<String, usize>,
    enabled: bool,
}

impl RuleProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            hits: FxHashMap::default(),
            enabled,
        }
    }

    pub fn record(&mut self, rule_name: &str) {
        if !self.enabled {
            return;
        }
        *self.hits.entry(rule_name.to_string()).or_default() += 1;
    }

    pub fn hits(&self, rule_name: &str) -> usize {
        self.hits.get(rule_name).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.hits.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_profiler_records_nothing() {
        let mut profiler = RuleProfiler::default();
        profiler.record("Logical AND");
        assert_eq!(profiler.hits("Logical AND"), 0);
        assert_eq!(profiler.total(), 0);
    }

    #[test]
    fn hits_are_counted_per_rule() {
        let mut profiler = RuleProfiler::new(true);
        profiler.record("Logical OR");
        profiler.record("Logical AND");
        profiler.record("Logical AND");
        assert_eq!(profiler.hits("Logical AND"), 2);
        assert_eq!(profiler.hits("Logical OR"), 1);
        assert_eq!(profiler.total(), 3);
    }
}
