//! Reduction engine for logic formulas.
//!
//! A [`Session`] drives recursive simplification over a [`logic_ast::Context`],
//! dispatching on node tags through a [`RuleRegistry`]. Rules are either
//! *normal* (the session reduces their children first) or *special* (they
//! reduce their own children, which is what makes short-circuiting possible).

#[macro_use]
pub mod macros;

pub mod arithmetic;
pub mod budget;
pub mod config;
pub mod error;
pub mod profiler;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod session;
pub mod step;

pub use arithmetic::{Arithmetic, RationalArithmetic};
pub use budget::{Budget, BudgetExceeded};
pub use config::EngineConfig;
pub use error::EngineError;
pub use profiler::RuleProfiler;
pub use registry::RuleRegistry;
pub use rule::{FnRule, Rule};
pub use session::Session;
pub use step::Step;
