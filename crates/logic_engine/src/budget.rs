//! Expansion budget.
//!
//! Range expansion has no self-limiting property, so every big operator
//! charges the number of body instantiations it is about to perform before
//! it touches the tree. A refused charge makes the rule decline, leaving the
//! operator symbolic.

use std::fmt;

/// Error returned when a charge would exceed a limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetExceeded {
    /// Instantiations requested by this charge
    pub requested: u64,
    /// Instantiations already charged
    pub used: u64,
    /// The limit that would be crossed
    pub limit: u64,
}

impl fmt::Display for BudgetExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expansion budget exceeded: {} requested, {} used, limit {}",
            self.requested, self.used, self.limit
        )
    }
}

impl std::error::Error for BudgetExceeded {}

#[derive(Debug, Clone, Default)]
pub struct Budget {
    per_operator: Option<u64>,
    total: Option<u64>,
    used: u64,
}

impl Budget {
    pub fn new(per_operator: Option<u64>, total: Option<u64>) -> Self {
        Self {
            per_operator,
            total,
            used: 0,
        }
    }

    /// Largest expansion a single operator may request.
    pub fn per_operator(&self) -> Option<u64> {
        self.per_operator
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    /// Charge `count` instantiations, or refuse without charging anything.
    pub fn charge(&mut self, count: u64) -> Result<(), BudgetExceeded> {
        if let Some(limit) = self.per_operator {
            if count > limit {
                return Err(BudgetExceeded {
                    requested: count,
                    used: self.used,
                    limit,
                });
            }
        }
        if let Some(limit) = self.total {
            if self.used.saturating_add(count) > limit {
                return Err(BudgetExceeded {
                    requested: count,
                    used: self.used,
                    limit,
                });
            }
        }
        self.used += count;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }
}
