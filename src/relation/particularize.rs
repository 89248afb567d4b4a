//! Particularization: restrict a relation by a conjunction of constraints.

use hashbrown::HashMap;

use super::{FuzzyRelation, MembershipSource};
use crate::logic::{BinaryOp, Logic};
use crate::model::Value;
use crate::{Error, Result};

/// One conjunct of a particularization.
#[derive(Clone)]
pub enum Constraint<'a> {
    /// Hard filter: keep tuples whose `attribute` equals `value`.
    Equals { attribute: String, value: Value },
    /// Soft filter: AND the tuple's degree with `source`'s degree at the
    /// sub-tuple formed by `attributes`.
    Fuzzy { attributes: Vec<String>, source: &'a dyn MembershipSource },
}

/// Constraints applied together, in the order they were added.
///
/// ```
/// use pruf_rs::{Domain, FuzzyRelation, Logic, Particularization, VirtualRelation, tuple};
///
/// let people = FuzzyRelation::from_entries(
///     Domain::new(["name", "height"]).unwrap(),
///     vec![(tuple!["ann", 160], 1.0), (tuple!["bob", 190], 1.0)],
/// )
/// .unwrap();
/// let tall = VirtualRelation::new("height", |h: f64| ((h - 160.0) / 30.0).clamp(0.0, 1.0)).unwrap();
///
/// let who = people
///     .particularize(&Particularization::new().fuzzy(["height"], &tall), &Logic::default())
///     .unwrap();
/// assert_eq!(who.len(), 1);
/// assert_eq!(who.get(&tuple!["bob", 190]).unwrap(), 1.0);
/// ```
#[derive(Clone, Default)]
pub struct Particularization<'a> {
    constraints: Vec<Constraint<'a>>,
}

impl<'a> Particularization<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push(Constraint::Equals { attribute: attribute.into(), value: value.into() });
        self
    }

    pub fn fuzzy<I, S>(mut self, attributes: I, source: &'a dyn MembershipSource) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.push(Constraint::Fuzzy {
            attributes: attributes.into_iter().map(Into::into).collect(),
            source,
        });
        self
    }

    pub fn push(&mut self, constraint: Constraint<'a>) {
        self.constraints.push(constraint);
    }

    pub fn constraints(&self) -> &[Constraint<'a>] {
        &self.constraints
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// A constraint with its attribute names resolved to positions.
enum Bound<'a> {
    Equals(usize, &'a Value),
    Fuzzy(Vec<usize>, &'a dyn MembershipSource),
}

impl FuzzyRelation {
    /// Apply every constraint in `filter`. Literal constraints drop tuples that
    /// do not match; fuzzy ones lower the degree via the logic's AND and drop
    /// the tuple when it reaches `0`. No constraints returns a copy.
    pub fn particularize(&self, filter: &Particularization<'_>, logic: &Logic) -> Result<FuzzyRelation> {
        let bound = filter
            .constraints
            .iter()
            .map(|c| match c {
                Constraint::Equals { attribute, value } => self
                    .domain
                    .position(attribute)
                    .map(|i| Bound::Equals(i, value))
                    .ok_or_else(|| Error::UnknownAttribute(attribute.clone())),
                Constraint::Fuzzy { attributes, source } => {
                    if attributes.len() != source.arity() {
                        return Err(Error::ArityMismatch { expected: source.arity(), got: attributes.len() });
                    }
                    Ok(Bound::Fuzzy(self.domain.positions(attributes)?, *source))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let and = logic.and();
        let mut support = HashMap::new();
        let mut key = Vec::new();
        'tuples: for (tuple, &mu) in self.support() {
            let mut degree = mu;
            for constraint in &bound {
                match constraint {
                    Bound::Equals(i, value) => {
                        if tuple[*i] != **value {
                            continue 'tuples;
                        }
                    }
                    Bound::Fuzzy(positions, source) => {
                        key.clear();
                        key.extend(positions.iter().map(|&i| tuple[i].clone()));
                        degree = and.call(degree, source.membership(&key));
                        if degree <= 0.0 {
                            continue 'tuples;
                        }
                    }
                }
            }
            Self::insert_computed(&mut support, tuple.clone(), degree);
        }
        Ok(FuzzyRelation::from_support(self.domain.clone(), support))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::TNorm;
    use crate::model::{Domain, Tuple};
    use crate::tuple;

    fn rel(names: &[&str], entries: Vec<(Tuple, f64)>) -> FuzzyRelation {
        FuzzyRelation::from_entries(Domain::new(names.iter().copied()).unwrap(), entries).unwrap()
    }

    fn people() -> FuzzyRelation {
        rel(
            &["name", "city"],
            vec![(tuple!["ann", "rome"], 1.0), (tuple!["bob", "oslo"], 0.8), (tuple!["cid", "rome"], 0.5)],
        )
    }

    #[test]
    fn test_literal_constraint() {
        let p = people()
            .particularize(&Particularization::new().equals("city", "rome"), &Logic::default())
            .unwrap();
        assert_eq!(p, rel(&["name", "city"], vec![(tuple!["ann", "rome"], 1.0), (tuple!["cid", "rome"], 0.5)]));
    }

    #[test]
    fn test_relation_constraint() {
        let sunny = rel(&["city"], vec![(tuple!["rome"], 0.7)]);
        let filter = Particularization::new().fuzzy(["city"], &sunny);
        let p = people().particularize(&filter, &Logic::default()).unwrap();
        // bob's city is outside the constraint's support and drops out
        assert_eq!(p, rel(&["name", "city"], vec![(tuple!["ann", "rome"], 0.7), (tuple!["cid", "rome"], 0.5)]));

        let p = people().particularize(&filter, &Logic::default().with_and(TNorm::Product)).unwrap();
        assert!((p.get(&tuple!["cid", "rome"]).unwrap() - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_multi_attribute_constraint() {
        let pairs = rel(&["c", "n"], vec![(tuple!["oslo", "bob"], 0.3)]);
        let p = people()
            .particularize(&Particularization::new().fuzzy(["city", "name"], &pairs), &Logic::default())
            .unwrap();
        assert_eq!(p, rel(&["name", "city"], vec![(tuple!["bob", "oslo"], 0.3)]));
    }

    #[test]
    fn test_constraints_conjoin() {
        let sunny = rel(&["city"], vec![(tuple!["rome"], 0.7), (tuple!["oslo"], 0.1)]);
        let filter = Particularization::new().fuzzy(["city"], &sunny).equals("name", "bob");
        let p = people().particularize(&filter, &Logic::default()).unwrap();
        assert_eq!(p, rel(&["name", "city"], vec![(tuple!["bob", "oslo"], 0.1)]));
    }

    #[test]
    fn test_no_constraints_is_identity() {
        let r = people();
        assert_eq!(r.particularize(&Particularization::new(), &Logic::default()).unwrap(), r);
    }

    #[test]
    fn test_errors() {
        let r = people();
        let logic = Logic::default();
        let err = r.particularize(&Particularization::new().equals("age", 3), &logic).unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute(a) if a == "age"));

        let pairs = rel(&["c", "n"], vec![(tuple!["oslo", "bob"], 0.3)]);
        let err = r.particularize(&Particularization::new().fuzzy(["city"], &pairs), &logic).unwrap_err();
        assert!(matches!(err, Error::ArityMismatch { expected: 2, got: 1 }));
    }
}
