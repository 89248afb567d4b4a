//! Operator registry: named lookup of built-in and user-defined operators.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::ops::{BinaryOp, BinaryRef, Modifier, Negation, TConorm, TNorm, UnaryOp, UnaryRef};
use crate::{Error, Result};

/// Operator family. AND/OR are binary; NOT and modifiers are unary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    And,
    Or,
    Not,
    Modifier,
}

impl Family {
    pub fn is_binary(self) -> bool {
        matches!(self, Family::And | Family::Or)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::And => write!(f, "AND"),
            Family::Or => write!(f, "OR"),
            Family::Not => write!(f, "NOT"),
            Family::Modifier => write!(f, "MODIFIER"),
        }
    }
}

/// Names are stored upper-cased; lookups are case-insensitive.
fn key(family: Family, name: &str) -> (Family, String) {
    (family, name.to_ascii_uppercase())
}

/// Registry of operators keyed by `(family, name)`.
///
/// New t-norms, conorms, negations or hedges are added here; the relation
/// core never needs to change to use them.
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    unary: HashMap<(Family, String), UnaryRef>,
    binary: HashMap<(Family, String), BinaryRef>,
}

impl OperatorRegistry {
    /// A registry with no operators at all.
    pub fn empty() -> Self {
        Self {
            unary: HashMap::new(),
            binary: HashMap::new(),
        }
    }

    /// A registry preloaded with every built-in operator.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for t in TNorm::ALL {
            registry.binary.insert(key(Family::And, t.name()), Arc::new(t));
        }
        for s in TConorm::ALL {
            registry.binary.insert(key(Family::Or, s.name()), Arc::new(s));
        }
        for n in Negation::ALL {
            registry.unary.insert(key(Family::Not, n.name()), Arc::new(n));
        }
        for m in Modifier::ALL {
            registry.unary.insert(key(Family::Modifier, m.name()), Arc::new(m));
        }
        registry
    }

    /// Register (or replace) a unary operator under `name`.
    pub fn register_unary(&mut self, family: Family, name: &str, op: UnaryRef) -> Result<()> {
        if family.is_binary() {
            return Err(Error::OperatorArity { family, name: name.to_string() });
        }
        if self.unary.insert(key(family, name), op).is_some() {
            tracing::debug!(%family, name, "replaced registered operator");
        }
        Ok(())
    }

    /// Register (or replace) a binary operator under `name`.
    pub fn register_binary(&mut self, family: Family, name: &str, op: BinaryRef) -> Result<()> {
        if !family.is_binary() {
            return Err(Error::OperatorArity { family, name: name.to_string() });
        }
        if self.binary.insert(key(family, name), op).is_some() {
            tracing::debug!(%family, name, "replaced registered operator");
        }
        Ok(())
    }

    pub fn unary(&self, family: Family, name: &str) -> Result<UnaryRef> {
        self.unary
            .get(&key(family, name))
            .cloned()
            .ok_or_else(|| Error::UnknownOperator { family, name: name.to_string() })
    }

    pub fn binary(&self, family: Family, name: &str) -> Result<BinaryRef> {
        self.binary
            .get(&key(family, name))
            .cloned()
            .ok_or_else(|| Error::UnknownOperator { family, name: name.to_string() })
    }

    /// Registered names of a family, sorted.
    pub fn names(&self, family: Family) -> Vec<&str> {
        let mut names: Vec<&str> = if family.is_binary() {
            self.binary.keys().filter(|(f, _)| *f == family).map(|(_, n)| n.as_str()).collect()
        } else {
            self.unary.keys().filter(|(f, _)| *f == family).map(|(_, n)| n.as_str()).collect()
        };
        names.sort_unstable();
        names
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
