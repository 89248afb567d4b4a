//! Logic context: the active AND / OR / NOT used by relation operators.
//!
//! `Logic` is a plain value: relation operators take `&Logic` and read it at
//! call time, so swapping an operator only affects calls made afterwards.
//! `SharedLogic` is the synchronized variant for when several call sites
//! genuinely share one selection.

use std::sync::Arc;

use parking_lot::RwLock;

use super::ops::{BinaryOp, BinaryRef, Negation, TConorm, TNorm, UnaryOp, UnaryRef};
use super::registry::{Family, OperatorRegistry};
use crate::{Error, Result};

/// The active fuzzy connectives.
#[derive(Debug, Clone)]
pub struct Logic {
    and: BinaryRef,
    or: BinaryRef,
    not: UnaryRef,
}

impl Logic {
    pub fn new(and: BinaryRef, or: BinaryRef, not: UnaryRef) -> Self {
        Self { and, or, not }
    }

    pub fn and(&self) -> &dyn BinaryOp { self.and.as_ref() }
    pub fn or(&self) -> &dyn BinaryOp { self.or.as_ref() }
    pub fn not(&self) -> &dyn UnaryOp { self.not.as_ref() }

    pub fn set_and(&mut self, op: BinaryRef) { self.and = op; }
    pub fn set_or(&mut self, op: BinaryRef) { self.or = op; }
    pub fn set_not(&mut self, op: UnaryRef) { self.not = op; }

    pub fn with_and(mut self, op: impl BinaryOp + 'static) -> Self {
        self.and = Arc::new(op);
        self
    }

    pub fn with_or(mut self, op: impl BinaryOp + 'static) -> Self {
        self.or = Arc::new(op);
        self
    }

    pub fn with_not(mut self, op: impl UnaryOp + 'static) -> Self {
        self.not = Arc::new(op);
        self
    }

    /// Replace the connective of `family` with the registry entry `name`.
    pub fn select(&mut self, registry: &OperatorRegistry, family: Family, name: &str) -> Result<()> {
        match family {
            Family::And => self.and = registry.binary(family, name)?,
            Family::Or => self.or = registry.binary(family, name)?,
            Family::Not => self.not = registry.unary(family, name)?,
            Family::Modifier => return Err(Error::NotSelectable(family)),
        }
        tracing::debug!(%family, name, "selected operator");
        Ok(())
    }
}

/// MIN / MAX / STANDARD, Zadeh's original connectives.
impl Default for Logic {
    fn default() -> Self {
        Self {
            and: Arc::new(TNorm::Min),
            or: Arc::new(TConorm::Max),
            not: Arc::new(Negation::Standard),
        }
    }
}

// ============================================================================
// SharedLogic
// ============================================================================

/// A `Logic` shared between call sites behind a read/write lock.
///
/// Readers take a [`snapshot`](SharedLogic::snapshot) per operation; a
/// relation operator never observes a half-updated selection.
#[derive(Debug, Clone, Default)]
pub struct SharedLogic {
    inner: Arc<RwLock<Logic>>,
}

impl SharedLogic {
    pub fn new(logic: Logic) -> Self {
        Self { inner: Arc::new(RwLock::new(logic)) }
    }

    pub fn snapshot(&self) -> Logic {
        self.inner.read().clone()
    }

    pub fn and(&self) -> BinaryRef { self.inner.read().and.clone() }
    pub fn or(&self) -> BinaryRef { self.inner.read().or.clone() }
    pub fn not(&self) -> UnaryRef { self.inner.read().not.clone() }

    pub fn set_and(&self, op: BinaryRef) { self.inner.write().set_and(op); }
    pub fn set_or(&self, op: BinaryRef) { self.inner.write().set_or(op); }
    pub fn set_not(&self, op: UnaryRef) { self.inner.write().set_not(op); }

    pub fn replace(&self, logic: Logic) -> Logic {
        std::mem::replace(&mut *self.inner.write(), logic)
    }

    pub fn select(&self, registry: &OperatorRegistry, family: Family, name: &str) -> Result<()> {
        self.inner.write().select(registry, family, name)
    }

    /// Install `logic` until the returned guard drops, then restore the
    /// previous selection.
    pub fn scoped(&self, logic: Logic) -> LogicScope<'_> {
        let previous = self.replace(logic);
        LogicScope { shared: self, previous: Some(previous) }
    }
}

/// Guard returned by [`SharedLogic::scoped`].
#[must_use = "the previous logic is restored as soon as the scope is dropped"]
pub struct LogicScope<'a> {
    shared: &'a SharedLogic,
    previous: Option<Logic>,
}

impl Drop for LogicScope<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.shared.replace(previous);
        }
    }
}
