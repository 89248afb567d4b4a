//! # Fuzzy Relations
//!
//! A [`FuzzyRelation`] is a discrete fuzzy set over the tuples of a
//! [`Domain`]. Only the support is stored: every entry has a membership in
//! `(0, 1]`, and anything that would drop to `0` is removed.
//!
//! Point edits (`set` / `delete`) mutate in place. Every algebra operator
//! returns a new relation and leaves its operands untouched.
//!
//! | Submodule | Operators |
//! |-----------|-----------|
//! | `algebra` | union, intersection, difference, cartesian product, natural join, selection |
//! | `restructure` | projection, rename, reorder, cylindrical extension |
//! | `particularize` | literal and fuzzy constraints |
//! | `extension` | apply, complement, extension principle |
//! | `quantify` | collapse, cardinalities, proportion, consistency, compatibility |

mod algebra;
mod restructure;
mod particularize;
mod extension;
mod quantify;

pub use particularize::{Constraint, Particularization};
pub use quantify::COMPATIBILITY_ATTRIBUTE;

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ingest::Table;
use crate::model::{Domain, Tuple, Value, computed_degree, written_degree};
use crate::{Error, Result};

/// Anything that assigns a membership degree to a tuple of fixed arity.
///
/// Implemented by stored relations and by virtual (function-backed) ones, so
/// either can constrain a particularization.
pub trait MembershipSource {
    fn arity(&self) -> usize;

    /// Degree of `tuple`; `0` outside the support. Callers check arity.
    fn membership(&self, tuple: &[Value]) -> f64;
}

/// Discrete fuzzy relation: tuple → membership degree in `(0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Table", try_from = "Table")]
pub struct FuzzyRelation {
    domain: Domain,
    support: HashMap<Tuple, f64>,
}

// ============================================================================
// Construction
// ============================================================================

impl FuzzyRelation {
    /// An empty relation over `domain`.
    pub fn new(domain: Domain) -> Self {
        Self { domain, support: HashMap::new() }
    }

    /// Build from explicit `(tuple, degree)` pairs. Degrees follow the write
    /// rule: `[0, 1]`, with `0` meaning "absent".
    pub fn from_entries<I, T>(domain: Domain, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
        T: Into<Tuple>,
    {
        let mut relation = Self::new(domain);
        for (tuple, mu) in entries {
            relation.set(tuple, mu)?;
        }
        Ok(relation)
    }

    /// Build from row-oriented input where the degree is optional and
    /// defaults to `1`.
    pub fn from_rows<I, T>(domain: Domain, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, Option<f64>)>,
        T: Into<Tuple>,
    {
        Self::from_entries(domain, rows.into_iter().map(|(t, mu)| (t, mu.unwrap_or(1.0))))
    }

    /// Assemble from an already-validated support.
    pub(crate) fn from_support(domain: Domain, support: HashMap<Tuple, f64>) -> Self {
        debug_assert!(support.keys().all(|t| t.len() == domain.len()));
        debug_assert!(support.values().all(|mu| *mu > 0.0 && *mu <= 1.0));
        Self { domain, support }
    }

    /// Insert a computed degree, dropping it if it settles to nothing.
    pub(crate) fn insert_computed(support: &mut HashMap<Tuple, f64>, tuple: Tuple, mu: f64) {
        if let Some(mu) = computed_degree(mu) {
            support.insert(tuple, mu);
        }
    }
}

// ============================================================================
// Point access
// ============================================================================

impl FuzzyRelation {
    fn check_arity(&self, got: usize) -> Result<()> {
        if got != self.domain.len() {
            return Err(Error::ArityMismatch { expected: self.domain.len(), got });
        }
        Ok(())
    }

    /// Membership of `tuple`; `0.0` when it is outside the support.
    pub fn get(&self, tuple: &[Value]) -> Result<f64> {
        self.check_arity(tuple.len())?;
        Ok(self.membership(tuple))
    }

    /// Add or update `tuple`. A degree of exactly `0` deletes it.
    pub fn set(&mut self, tuple: impl Into<Tuple>, mu: f64) -> Result<()> {
        let tuple = tuple.into();
        self.check_arity(tuple.len())?;
        match written_degree(mu)? {
            Some(mu) => {
                tracing::trace!(mu, "set membership");
                self.support.insert(tuple, mu);
            }
            None => {
                self.support.remove(tuple.as_slice());
            }
        }
        Ok(())
    }

    /// Remove `tuple`, returning its previous degree if it was supported.
    pub fn delete(&mut self, tuple: &[Value]) -> Result<Option<f64>> {
        self.check_arity(tuple.len())?;
        Ok(self.support.remove(tuple))
    }

    pub fn contains(&self, tuple: &[Value]) -> bool {
        self.support.contains_key(tuple)
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl FuzzyRelation {
    pub fn domain(&self) -> &Domain { &self.domain }

    /// Size of the support.
    pub fn len(&self) -> usize { self.support.len() }

    pub fn is_empty(&self) -> bool { self.support.is_empty() }

    /// Supported `(tuple, degree)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&[Value], f64)> + '_ {
        self.support.iter().map(|(t, mu)| (t.as_slice(), *mu))
    }

    /// Supported tuples in unspecified order.
    pub fn elements(&self) -> impl Iterator<Item = &[Value]> + '_ {
        self.support.keys().map(|t| t.as_slice())
    }

    /// Supported degrees in unspecified order.
    pub fn memberships(&self) -> impl Iterator<Item = f64> + '_ {
        self.support.values().copied()
    }

    /// Supported pairs in ascending tuple order.
    pub fn sorted_entries(&self) -> Vec<(&Tuple, f64)> {
        let mut entries: Vec<(&Tuple, f64)> = self.support.iter().map(|(t, mu)| (t, *mu)).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub(crate) fn support(&self) -> &HashMap<Tuple, f64> { &self.support }
}

impl MembershipSource for FuzzyRelation {
    fn arity(&self) -> usize { self.domain.len() }

    fn membership(&self, tuple: &[Value]) -> f64 {
        self.support.get(tuple).copied().unwrap_or(0.0)
    }
}

// ============================================================================
// Display
// ============================================================================

/// Zadeh notation: `0.3/("x") + 0.6/("y")`, `∅` when empty.
impl fmt::Display for FuzzyRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "∅");
        }
        for (i, (tuple, mu)) in self.sorted_entries().into_iter().enumerate() {
            if i > 0 { write!(f, " + ")?; }
            write!(f, "{mu}/(")?;
            for (j, v) in tuple.iter().enumerate() {
                if j > 0 { write!(f, ", ")?; }
                write!(f, "{v}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple;

    fn dom(names: &[&str]) -> Domain {
        Domain::new(names.iter().copied()).unwrap()
    }

    #[test]
    fn test_get_set_delete() {
        let mut r = FuzzyRelation::new(dom(&["a"]));
        r.set(tuple!["x"], 0.7).unwrap();
        assert_eq!(r.get(&tuple!["x"]).unwrap(), 0.7);
        assert_eq!(r.get(&tuple!["z"]).unwrap(), 0.0);
        r.set(tuple!["x"], 0.8).unwrap();
        assert_eq!(r.get(&tuple!["x"]).unwrap(), 0.8);
        assert_eq!(r.delete(&tuple!["x"]).unwrap(), Some(0.8));
        assert_eq!(r.delete(&tuple!["x"]).unwrap(), None);
        assert!(r.is_empty());
    }

    #[test]
    fn test_zero_deletes() {
        let mut r = FuzzyRelation::new(dom(&["a"]));
        r.set(tuple!["x"], 0.4).unwrap();
        r.set(tuple!["x"], 0.0).unwrap();
        assert!(!r.contains(&tuple!["x"]));
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn test_bad_writes_leave_relation_unchanged() {
        let mut r = FuzzyRelation::new(dom(&["a", "b"]));
        r.set(tuple!["x", 1], 0.5).unwrap();
        let before = r.clone();

        let err = r.set(tuple!["x", 1], 1.5).unwrap_err();
        assert!(matches!(err, Error::MembershipOutOfRange(_)));
        let err = r.set(tuple!["x"], 0.5).unwrap_err();
        assert!(matches!(err, Error::ArityMismatch { expected: 2, got: 1 }));
        assert!(r.get(&tuple!["x", 1, 2]).is_err());
        assert!(r.delete(&tuple!["x"]).is_err());

        assert_eq!(r, before);
    }

    #[test]
    fn test_from_rows_defaults_to_one() {
        let r = FuzzyRelation::from_rows(
            dom(&["name"]),
            vec![(tuple!["Ann"], None), (tuple!["Bob"], Some(0.4))],
        )
        .unwrap();
        assert_eq!(r.get(&tuple!["Ann"]).unwrap(), 1.0);
        assert_eq!(r.get(&tuple!["Bob"]).unwrap(), 0.4);
    }

    #[test]
    fn test_equality_needs_same_domain_order() {
        let r1 = FuzzyRelation::from_entries(dom(&["a", "b"]), vec![(tuple![1, 2], 0.5)]).unwrap();
        let r2 = FuzzyRelation::from_entries(dom(&["b", "a"]), vec![(tuple![1, 2], 0.5)]).unwrap();
        let r3 = FuzzyRelation::from_entries(dom(&["a", "b"]), vec![(tuple![1, 2], 0.5)]).unwrap();
        assert_ne!(r1, r2);
        assert_eq!(r1, r3);
    }

    #[test]
    fn test_display() {
        let mut r = FuzzyRelation::new(dom(&["a"]));
        assert_eq!(r.to_string(), "∅");
        r.set(tuple!["y"], 0.6).unwrap();
        r.set(tuple!["x"], 0.3).unwrap();
        assert_eq!(r.to_string(), "0.3/(\"x\") + 0.6/(\"y\")");
    }
}
