//! Set operators, cartesian product, natural join and selection.

use hashbrown::HashMap;

use super::FuzzyRelation;
use crate::logic::{BinaryOp, Logic, UnaryOp};
use crate::model::{Domain, Tuple, Value};
use crate::{Error, Result};

impl FuzzyRelation {
    fn require_same_domain(&self, other: &FuzzyRelation, op: &str) -> Result<()> {
        if self.domain != other.domain {
            return Err(Error::DomainMismatch(format!(
                "{op} needs identical domains, got {} and {}",
                self.domain, other.domain
            )));
        }
        Ok(())
    }

    /// Combine memberships key-by-key over the union of both supports;
    /// a key missing on one side counts as `0`.
    fn zip_with<F>(&self, other: &FuzzyRelation, f: F) -> FuzzyRelation
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut support = HashMap::with_capacity(self.len().max(other.len()));
        for (tuple, &mu) in self.support() {
            let nu = other.support().get(tuple).copied().unwrap_or(0.0);
            Self::insert_computed(&mut support, tuple.clone(), f(mu, nu));
        }
        for (tuple, &nu) in other.support() {
            if !self.support().contains_key(tuple) {
                Self::insert_computed(&mut support, tuple.clone(), f(0.0, nu));
            }
        }
        FuzzyRelation::from_support(self.domain.clone(), support)
    }

    /// `μ(x) = OR(μA(x), μB(x))`
    pub fn union(&self, other: &FuzzyRelation, logic: &Logic) -> Result<FuzzyRelation> {
        self.require_same_domain(other, "union")?;
        let or = logic.or();
        Ok(self.zip_with(other, |a, b| or.call(a, b)))
    }

    /// `μ(x) = AND(μA(x), μB(x))`
    pub fn intersection(&self, other: &FuzzyRelation, logic: &Logic) -> Result<FuzzyRelation> {
        self.require_same_domain(other, "intersection")?;
        let and = logic.and();
        Ok(self.zip_with(other, |a, b| and.call(a, b)))
    }

    /// `μ(x) = AND(μA(x), NOT(μB(x)))`
    pub fn difference(&self, other: &FuzzyRelation, logic: &Logic) -> Result<FuzzyRelation> {
        self.require_same_domain(other, "difference")?;
        let (and, not) = (logic.and(), logic.not());
        Ok(self.zip_with(other, |a, b| and.call(a, not.call(b))))
    }

    /// Pair every supported tuple of `self` with every one of `other`.
    /// The domains must be disjoint; the result domain is their concatenation.
    pub fn cartesian_product(&self, other: &FuzzyRelation, logic: &Logic) -> Result<FuzzyRelation> {
        if !self.domain.is_disjoint(&other.domain) {
            return Err(Error::DomainMismatch(format!(
                "cartesian product needs disjoint domains, got {} and {}",
                self.domain, other.domain
            )));
        }
        let domain = self.domain.concat(&other.domain)?;
        tracing::debug!(left = self.len(), right = other.len(), "cartesian product");

        let and = logic.and();
        let mut support = HashMap::with_capacity(self.len() * other.len());
        for (a, &mu) in self.support() {
            for (b, &nu) in other.support() {
                let mut tuple = Tuple::with_capacity(a.len() + b.len());
                tuple.extend(a.iter().cloned());
                tuple.extend(b.iter().cloned());
                Self::insert_computed(&mut support, tuple, and.call(mu, nu));
            }
        }
        Ok(FuzzyRelation::from_support(domain, support))
    }

    /// Match tuples that agree on every shared attribute.
    ///
    /// The result domain is `self`'s domain followed by `other`'s
    /// non-shared attributes in `other`'s order. `other` is indexed by its
    /// shared sub-tuple, so matching is linear in both supports plus output.
    pub fn natural_join(&self, other: &FuzzyRelation, logic: &Logic) -> Result<FuzzyRelation> {
        let shared = self.domain.shared_positions(&other.domain);
        if shared.is_empty() {
            return Err(Error::DomainMismatch(format!(
                "natural join needs a shared attribute, got {} and {}",
                self.domain, other.domain
            )));
        }
        let rest: Vec<usize> = (0..other.domain.len())
            .filter(|j| !shared.iter().any(|&(_, s)| s == *j))
            .collect();
        let domain = Domain::new(
            self.domain
                .iter()
                .chain(rest.iter().map(|&j| other.domain.names()[j].as_str()))
                .map(str::to_string),
        )?;

        let mut index: HashMap<Tuple, Vec<(&Tuple, f64)>> = HashMap::new();
        for (b, &nu) in other.support() {
            let key: Tuple = shared.iter().map(|&(_, j)| b[j].clone()).collect();
            index.entry(key).or_default().push((b, nu));
        }
        tracing::debug!(
            left = self.len(),
            right = other.len(),
            groups = index.len(),
            shared = shared.len(),
            "natural join"
        );

        let and = logic.and();
        let mut support = HashMap::new();
        for (a, &mu) in self.support() {
            let key: Tuple = shared.iter().map(|&(i, _)| a[i].clone()).collect();
            let Some(matches) = index.get(&key) else { continue };
            for &(b, nu) in matches {
                let mut tuple = Tuple::with_capacity(domain.len());
                tuple.extend(a.iter().cloned());
                tuple.extend(rest.iter().map(|&j| b[j].clone()));
                Self::insert_computed(&mut support, tuple, and.call(mu, nu));
            }
        }
        Ok(FuzzyRelation::from_support(domain, support))
    }

    /// Keep the tuples for which `predicate(tuple, degree)` holds.
    pub fn selection<P>(&self, predicate: P) -> FuzzyRelation
    where
        P: Fn(&[Value], f64) -> bool,
    {
        let support = self
            .support()
            .iter()
            .filter(|(t, mu)| predicate(t.as_slice(), **mu))
            .map(|(t, mu)| (t.clone(), *mu))
            .collect();
        FuzzyRelation::from_support(self.domain.clone(), support)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{TConorm, TNorm};
    use crate::tuple;

    fn rel(names: &[&str], entries: Vec<(Tuple, f64)>) -> FuzzyRelation {
        FuzzyRelation::from_entries(Domain::new(names.iter().copied()).unwrap(), entries).unwrap()
    }

    fn abc() -> (FuzzyRelation, FuzzyRelation) {
        let a = rel(&["D"], vec![(tuple!["x"], 0.3), (tuple!["y"], 0.6)]);
        let b = rel(&["D"], vec![(tuple!["y"], 0.4), (tuple!["z"], 0.9)]);
        (a, b)
    }

    #[test]
    fn test_union_intersection_difference() {
        let (a, b) = abc();
        let logic = Logic::default();

        let u = a.union(&b, &logic).unwrap();
        assert_eq!(u, rel(&["D"], vec![(tuple!["x"], 0.3), (tuple!["y"], 0.6), (tuple!["z"], 0.9)]));

        let i = a.intersection(&b, &logic).unwrap();
        assert_eq!(i, rel(&["D"], vec![(tuple!["y"], 0.4)]));

        // NOT(0.4) = 0.6, MIN(0.6, 0.6) = 0.6; z has μA = 0 and drops out
        let d = a.difference(&b, &logic).unwrap();
        assert_eq!(d, rel(&["D"], vec![(tuple!["x"], 0.3), (tuple!["y"], 0.6)]));
    }

    #[test]
    fn test_set_ops_use_the_given_logic() {
        let (a, b) = abc();
        let logic = Logic::default().with_and(TNorm::Product).with_or(TConorm::BoundedSum);
        let i = a.intersection(&b, &logic).unwrap();
        assert!((i.get(&tuple!["y"]).unwrap() - 0.24).abs() < 1e-12);
        let u = a.union(&b, &logic).unwrap();
        assert_eq!(u.get(&tuple!["y"]).unwrap(), 1.0);
    }

    #[test]
    fn test_set_ops_reject_reordered_domains() {
        let a = rel(&["p", "q"], vec![(tuple![1, 2], 0.5)]);
        let b = rel(&["q", "p"], vec![(tuple![2, 1], 0.5)]);
        let logic = Logic::default();
        assert!(matches!(a.union(&b, &logic), Err(Error::DomainMismatch(_))));
        assert!(matches!(a.intersection(&b, &logic), Err(Error::DomainMismatch(_))));
        assert!(matches!(a.difference(&b, &logic), Err(Error::DomainMismatch(_))));
    }

    #[test]
    fn test_cartesian_product() {
        let a = rel(&["x"], vec![(tuple![1], 0.5), (tuple![2], 1.0)]);
        let b = rel(&["y"], vec![(tuple!["u"], 0.7), (tuple!["v"], 0.2), (tuple!["w"], 1.0)]);
        let p = a.cartesian_product(&b, &Logic::default()).unwrap();
        assert_eq!(p.domain().names(), &["x".to_string(), "y".to_string()]);
        assert_eq!(p.len(), 6);
        assert_eq!(p.get(&tuple![1, "u"]).unwrap(), 0.5);
        assert_eq!(p.get(&tuple![2, "v"]).unwrap(), 0.2);

        let err = a.cartesian_product(&a, &Logic::default()).unwrap_err();
        assert!(matches!(err, Error::DomainMismatch(_)));
    }

    #[test]
    fn test_natural_join() {
        let people = rel(
            &["name", "city"],
            vec![(tuple!["ann", "rome"], 1.0), (tuple!["bob", "milan"], 0.8), (tuple!["cid", "oslo"], 0.5)],
        );
        let warm = rel(&["city", "temp"], vec![(tuple!["rome", 30], 0.9), (tuple!["milan", 25], 0.6)]);
        let j = people.natural_join(&warm, &Logic::default()).unwrap();
        assert_eq!(
            j,
            rel(
                &["name", "city", "temp"],
                vec![(tuple!["ann", "rome", 30], 0.9), (tuple!["bob", "milan", 25], 0.6)]
            )
        );
    }

    #[test]
    fn test_natural_join_many_to_many() {
        let a = rel(&["k", "a"], vec![(tuple![1, "a1"], 1.0), (tuple![1, "a2"], 0.5)]);
        let b = rel(&["b", "k"], vec![(tuple!["b1", 1], 0.7), (tuple!["b2", 1], 0.2), (tuple!["b3", 2], 1.0)]);
        let j = a.natural_join(&b, &Logic::default()).unwrap();
        assert_eq!(j.domain().names(), &["k".to_string(), "a".to_string(), "b".to_string()]);
        assert_eq!(j.len(), 4);
        assert_eq!(j.get(&tuple![1, "a2", "b1"]).unwrap(), 0.5);
    }

    #[test]
    fn test_natural_join_requires_shared_attribute() {
        let a = rel(&["x"], vec![(tuple![1], 1.0)]);
        let b = rel(&["y"], vec![(tuple![1], 1.0)]);
        assert!(matches!(a.natural_join(&b, &Logic::default()), Err(Error::DomainMismatch(_))));
    }

    #[test]
    fn test_selection_keeps_memberships() {
        let (a, _) = abc();
        let s = a.selection(|_, mu| mu > 0.5);
        assert_eq!(s, rel(&["D"], vec![(tuple!["y"], 0.6)]));
        let s = a.selection(|t, _| t[0] == Value::from("x"));
        assert_eq!(s.get(&tuple!["x"]).unwrap(), 0.3);
    }
}
