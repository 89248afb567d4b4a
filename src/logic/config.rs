//! Logic configuration: select connectives by name.

use serde::{Deserialize, Serialize};

use super::context::Logic;
use super::registry::{Family, OperatorRegistry};
use crate::Result;

/// Names of the AND / OR / NOT operators to activate.
///
/// ```
/// use pruf_rs::logic::{BinaryOp, LogicConfig, OperatorRegistry};
///
/// let config = LogicConfig::from_json(r#"{ "and": "PRODUCT" }"#).unwrap();
/// let logic = config.resolve(&OperatorRegistry::default()).unwrap();
/// assert_eq!(logic.and().name(), "PRODUCT");
/// assert_eq!(logic.or().name(), "MAX");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogicConfig {
    pub and: String,
    pub or: String,
    pub not: String,
}

impl LogicConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look every name up in `registry`.
    pub fn resolve(&self, registry: &OperatorRegistry) -> Result<Logic> {
        Ok(Logic::new(
            registry.binary(Family::And, &self.and)?,
            registry.binary(Family::Or, &self.or)?,
            registry.unary(Family::Not, &self.not)?,
        ))
    }
}

impl Default for LogicConfig {
    fn default() -> Self {
        Self {
            and: "MIN".into(),
            or: "MAX".into(),
            not: "STANDARD".into(),
        }
    }
}
