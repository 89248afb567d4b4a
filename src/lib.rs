//! # pruf-rs: Fuzzy Relational Algebra
//!
//! An in-memory engine for discrete fuzzy relations, the building block of
//! PRUF-style approximate reasoning ("most tall people are heavy").
//!
//! ## Design Principles
//!
//! 1. **Support-only storage**: a relation stores exactly the tuples with degree in `(0, 1]`
//! 2. **Explicit logic**: every operator that needs AND / OR / NOT takes a [`Logic`] value
//! 3. **Open operators**: t-norms, t-conorms and negations are trait objects found by name
//! 4. **Pure algebra**: operators return new relations; only point edits mutate
//!
//! ## Quick Start
//!
//! ```rust
//! use pruf_rs::{Domain, Engine, FuzzyRelation, TConorm, tuple};
//!
//! # fn example() -> pruf_rs::Result<()> {
//! let engine = Engine::new();
//! let d = Domain::new(["D"])?;
//! let a = FuzzyRelation::from_entries(d.clone(), vec![(tuple!["x"], 0.3), (tuple!["y"], 0.6)])?;
//! let b = FuzzyRelation::from_entries(d, vec![(tuple!["y"], 0.4), (tuple!["z"], 0.9)])?;
//!
//! let logic = engine.logic();
//! let both = a.intersection(&b, &logic)?;
//! assert_eq!(both.get(&tuple!["y"])?, 0.4);
//! assert_eq!(a.union(&b, &logic)?.collapse(&TConorm::Max), 0.9);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`model`] | `Value`, `Tuple`, `Domain`, degree rules |
//! | [`logic`] | operator traits, built-ins, registry, logic context, config |
//! | [`relation`] | `FuzzyRelation` and its algebra |
//! | [`membership`] | function-backed virtual relations |
//! | [`ingest`] | tabular load / dump |

// ============================================================================
// Modules
// ============================================================================

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub mod model;
pub mod logic;
pub mod relation;
pub mod membership;
pub mod ingest;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Domain, Tuple, Value};

// ============================================================================
// Re-exports: Logic
// ============================================================================

pub use logic::{
    BinaryOp, BinaryRef, Family, Logic, LogicConfig, LogicScope, Modifier, Negation,
    OperatorRegistry, SharedLogic, TConorm, TNorm, UnaryOp, UnaryRef, binary_fn, unary_fn,
};

// ============================================================================
// Re-exports: Relations
// ============================================================================

pub use relation::{
    COMPATIBILITY_ATTRIBUTE, Constraint, FuzzyRelation, MembershipSource, Particularization,
};
pub use membership::{MembershipFunction, VirtualRelation};
pub use ingest::{MEMBERSHIP_COLUMN, Table};

// ============================================================================
// Top-level Engine handle
// ============================================================================

/// Bundles an operator registry with a shared logic context.
///
/// Relations do not hold a reference to the engine: take a [`Logic`]
/// snapshot with [`Engine::logic`] and pass it to the operators. Changing the
/// selection afterwards affects later snapshots only.
///
/// Clones are handles onto the same engine: an operator registered or
/// selected through one is visible through every other.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    registry: Arc<RwLock<OperatorRegistry>>,
    logic: SharedLogic,
}

impl Engine {
    /// Built-in operators, MIN / MAX / STANDARD selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in operators with the selection named in `config`.
    pub fn from_config(config: &LogicConfig) -> Result<Self> {
        Self::with_registry(OperatorRegistry::with_builtins(), config)
    }

    /// A custom registry with the selection named in `config`.
    pub fn with_registry(registry: OperatorRegistry, config: &LogicConfig) -> Result<Self> {
        let logic = config.resolve(&registry)?;
        tracing::debug!(and = %config.and, or = %config.or, not = %config.not, "engine configured");
        Ok(Self { registry: Arc::new(RwLock::new(registry)), logic: SharedLogic::new(logic) })
    }

    /// The current AND / OR / NOT.
    pub fn logic(&self) -> Logic {
        self.logic.snapshot()
    }

    pub fn shared(&self) -> &SharedLogic {
        &self.logic
    }

    pub fn registry(&self) -> RwLockReadGuard<'_, OperatorRegistry> {
        self.registry.read()
    }

    /// Register custom operators here before selecting them. Do not hold the
    /// guard across a call to [`Engine::select`].
    pub fn registry_mut(&self) -> RwLockWriteGuard<'_, OperatorRegistry> {
        self.registry.write()
    }

    /// Make the registered operator `name` the current one for `family`.
    pub fn select(&self, family: Family, name: &str) -> Result<()> {
        self.logic.select(&self.registry.read(), family, name)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Arity mismatch: expected {expected} values, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("Membership degree {0} is outside [0, 1]")]
    MembershipOutOfRange(f64),

    #[error("Domain mismatch: {0}")]
    DomainMismatch(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),

    #[error("Invalid rename mapping: {0}")]
    InvalidRenameMapping(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Unknown {family} operator: {name}")]
    UnknownOperator { family: Family, name: String },

    #[error("Operator {name} has the wrong arity for {family}")]
    OperatorArity { family: Family, name: String },

    #[error("{0} operators cannot be selected as a connective")]
    NotSelectable(Family),

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
