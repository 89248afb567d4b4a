//! Scalar quantifiers and relation-to-relation measures used by PRUF-style
//! queries.

use hashbrown::HashMap;

use super::FuzzyRelation;
use crate::logic::{BinaryOp, Logic};
use crate::model::{Domain, Tuple, Value};
use crate::{Error, Result};

/// Attribute name of the one-column relation returned by
/// [`FuzzyRelation::compatibility`].
pub const COMPATIBILITY_ATTRIBUTE: &str = "value";

impl FuzzyRelation {
    /// Reduce every supported degree to one scalar with `op`, in ascending
    /// tuple order. An empty relation collapses to `0`.
    pub fn collapse(&self, op: &dyn BinaryOp) -> f64 {
        self.sorted_entries()
            .into_iter()
            .map(|(_, mu)| mu)
            .reduce(|acc, mu| op.call(acc, mu))
            .unwrap_or(0.0)
    }

    /// Sigma-count: the sum of supported degrees.
    pub fn cardinality(&self) -> f64 {
        self.memberships().sum()
    }

    /// Average degree over the support; `0` when empty.
    pub fn mean_cardinality(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.cardinality() / self.len() as f64
    }

    /// Relative sigma-count `|self ∩ other| / |other|`.
    ///
    /// With identical domains the numerator is the intersection; otherwise
    /// it is the natural join over the shared attributes.
    pub fn proportion(&self, other: &FuzzyRelation, logic: &Logic) -> Result<f64> {
        let denominator = other.cardinality();
        if denominator == 0.0 {
            return Err(Error::DivisionByZero(format!("proportion over an empty relation on {}", other.domain)));
        }
        let overlap = if self.domain == other.domain {
            self.intersection(other, logic)?
        } else {
            self.natural_join(other, logic)?
        };
        Ok(overlap.cardinality() / denominator)
    }

    /// Height of the intersection: `sup AND(μA(x), μB(x))`.
    pub fn consistency(&self, other: &FuzzyRelation, logic: &Logic) -> Result<f64> {
        let both = self.intersection(other, logic)?;
        Ok(both.memberships().fold(0.0, f64::max))
    }

    /// Degree to which `other` is compatible with `self`, as a fuzzy set over
    /// the degrees `other` takes.
    ///
    /// For every `x` in `other`'s support the value `y = μB(x)` receives
    /// `μA(x)`; several `x` landing on the same `y` keep the largest.
    pub fn compatibility(&self, other: &FuzzyRelation) -> Result<FuzzyRelation> {
        if self.domain != other.domain {
            return Err(Error::DomainMismatch(format!(
                "compatibility needs identical domains, got {} and {}",
                self.domain, other.domain
            )));
        }
        let mut support: HashMap<Tuple, f64> = HashMap::new();
        for (x, &nu) in other.support() {
            let Some(mu) = self.support().get(x).copied() else { continue };
            support
                .entry(smallvec::smallvec![Value::Float(nu)])
                .and_modify(|acc| *acc = acc.max(mu))
                .or_insert(mu);
        }
        let domain = Domain::new([COMPATIBILITY_ATTRIBUTE])?;
        Ok(FuzzyRelation::from_support(domain, support))
    }

    /// Probability of the fuzzy event `self` under the point probabilities
    /// `p`: `Σ μ(x) · p(x)`.
    pub fn probability<P>(&self, p: P) -> f64
    where
        P: Fn(&[Value]) -> f64,
    {
        self.iter().map(|(t, mu)| mu * p(t)).sum()
    }
}
