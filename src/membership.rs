//! Membership-function adapter.
//!
//! A [`VirtualRelation`] puts a continuous membership function behind the
//! same [`MembershipSource`] interface a stored relation has, so "tall" can
//! be `|h| ((h - 170) / 20).clamp(0, 1)` instead of a table of heights.
//! Nothing is materialized unless [`VirtualRelation::discretize`] is called.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::model::{Domain, Tuple, Value, computed_degree};
use crate::relation::{FuzzyRelation, MembershipSource};
use crate::{Error, Result};

/// A function from a numeric value to a degree.
pub trait MembershipFunction: Send + Sync {
    fn degree(&self, x: f64) -> f64;
}

impl<F> MembershipFunction for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn degree(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Single-attribute relation whose degrees come from a membership function.
#[derive(Clone)]
pub struct VirtualRelation {
    domain: Domain,
    mf: Arc<dyn MembershipFunction>,
}

impl VirtualRelation {
    /// Fails with `InvalidDomain` when `attribute` is the reserved
    /// membership column name.
    pub fn new(attribute: impl Into<String>, mf: impl MembershipFunction + 'static) -> Result<Self> {
        Ok(Self {
            domain: Domain::new([attribute.into()])?,
            mf: Arc::new(mf),
        })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Degree at `value`. Non-numeric values have degree `0`; the function's
    /// output is clamped to `[0, 1]` and NaN reads as `0`.
    pub fn at(&self, value: &Value) -> f64 {
        let Some(x) = value.as_float() else { return 0.0 };
        let mu = self.mf.degree(x);
        if mu.is_nan() { 0.0 } else { mu.clamp(0.0, 1.0) }
    }

    pub fn get(&self, tuple: &[Value]) -> Result<f64> {
        if tuple.len() != 1 {
            return Err(Error::ArityMismatch { expected: 1, got: tuple.len() });
        }
        Ok(self.at(&tuple[0]))
    }

    /// Sample the function at `values` into a stored relation. Values where
    /// the degree is `0` are left out.
    pub fn discretize<I, V>(&self, values: I) -> FuzzyRelation
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut support: HashMap<Tuple, f64> = HashMap::new();
        for value in values {
            let value = value.into();
            if let Some(mu) = computed_degree(self.at(&value)) {
                support.insert(smallvec::smallvec![value], mu);
            }
        }
        FuzzyRelation::from_support(self.domain.clone(), support)
    }
}

impl MembershipSource for VirtualRelation {
    fn arity(&self) -> usize {
        1
    }

    fn membership(&self, tuple: &[Value]) -> f64 {
        tuple.first().map_or(0.0, |v| self.at(v))
    }
}

impl fmt::Debug for VirtualRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualRelation").field("domain", &self.domain).finish_non_exhaustive()
    }
}
