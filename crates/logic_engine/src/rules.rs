//! Built-in rule sets.

pub mod big;
pub mod binding;
pub mod boolean;
