//! Engine configuration.
//!
//! Every field has a default, so a TOML file only needs to name what it
//! overrides:
//!
//! ```toml
//! collect_steps = true
//! max_expansion = 10000
//! ```

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Record a [`crate::Step`] for every rewrite
    pub collect_steps: bool,
    /// Count rule hits in the session's profiler
    pub profile: bool,
    /// Most body instantiations a single big operator may produce
    pub max_expansion: u64,
    /// Instantiations shared by all expansions of one session
    pub max_total_expansion: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            collect_steps: false,
            profile: false,
            max_expansion: 100_000,
            max_total_expansion: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, EngineError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = EngineConfig::from_toml_str("collect_steps = true\n").unwrap();
        assert!(config.collect_steps);
        assert_eq!(config.max_expansion, 100_000);
        assert_eq!(config.max_total_expansion, None);
    }

    #[test]
    fn serialized_config_reads_back() {
        let config = EngineConfig {
            profile: true,
            max_total_expansion: Some(50),
            ..Default::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = EngineConfig::from_toml_str("max_expansion = \"lots\"").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EngineConfig::load("/nonexistent/logic_engine.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/logic_engine.toml"));
    }
}
