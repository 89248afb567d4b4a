//! Membership transforms and the extension principle.

use hashbrown::HashMap;

use super::FuzzyRelation;
use crate::logic::{Logic, UnaryOp};
use crate::model::{Domain, Tuple, Value};
use crate::{Error, Result};

impl FuzzyRelation {
    /// Map every supported degree through `op`.
    pub fn apply(&self, op: &dyn UnaryOp) -> FuzzyRelation {
        let mut support = HashMap::with_capacity(self.len());
        for (tuple, &mu) in self.support() {
            Self::insert_computed(&mut support, tuple.clone(), op.call(mu));
        }
        FuzzyRelation::from_support(self.domain.clone(), support)
    }

    /// `NOT` of every supported degree. Tuples outside the support stay out,
    /// so this is not the complement over the full universe.
    pub fn complement(&self, logic: &Logic) -> FuzzyRelation {
        self.apply(logic.not())
    }

    /// Push the relation through the crisp map `f` onto `other_domain`.
    /// Preimages that meet at the same image keep the largest degree.
    pub fn image<F>(&self, f: F, other_domain: Domain) -> Result<FuzzyRelation>
    where
        F: Fn(&[Value]) -> Tuple,
    {
        let mut support: HashMap<Tuple, f64> = HashMap::new();
        for (tuple, &mu) in self.support() {
            let image = f(tuple);
            if image.len() != other_domain.len() {
                return Err(Error::ArityMismatch { expected: other_domain.len(), got: image.len() });
            }
            support
                .entry(image)
                .and_modify(|acc| *acc = acc.max(mu))
                .or_insert(mu);
        }
        Ok(FuzzyRelation::from_support(other_domain, support))
    }
}
