//! Operators that reshape the domain: projection, rename, reorder and
//! cylindrical extension.

use hashbrown::HashMap;

use super::FuzzyRelation;
use crate::logic::BinaryOp;
use crate::model::{Domain, Tuple, Value};
use crate::{Error, Result};

impl FuzzyRelation {
    /// Project onto `attributes` (in the order given), folding the degrees
    /// of tuples that collapse onto the same sub-tuple with `aggregator`.
    ///
    /// Degrees are folded in ascending tuple order, so the result is
    /// reproducible even for an aggregator that is not commutative and
    /// associative; it is only order-independent for one that is.
    pub fn projection<S: AsRef<str>>(
        &self,
        attributes: &[S],
        aggregator: &dyn BinaryOp,
    ) -> Result<FuzzyRelation> {
        let positions = self.domain.positions(attributes)?;
        let domain = Domain::new(attributes.iter().map(|a| a.as_ref()))?;

        let mut folded: HashMap<Tuple, f64> = HashMap::new();
        for (tuple, mu) in self.sorted_entries() {
            let key: Tuple = positions.iter().map(|&i| tuple[i].clone()).collect();
            folded
                .entry(key)
                .and_modify(|acc| *acc = aggregator.call(*acc, mu))
                .or_insert(mu);
        }
        tracing::debug!(
            from = self.len(),
            to = folded.len(),
            aggregator = aggregator.name(),
            "projection"
        );

        let mut support = HashMap::with_capacity(folded.len());
        for (tuple, mu) in folded {
            Self::insert_computed(&mut support, tuple, mu);
        }
        Ok(FuzzyRelation::from_support(domain, support))
    }

    /// Relabel attributes via `old → new` pairs. Attributes not mentioned keep
    /// their names; the mapping must be injective and may not collide with
    /// them.
    pub fn rename_domain(&self, mapping: &[(&str, &str)]) -> Result<FuzzyRelation> {
        let mut names: Vec<String> = self.domain.names().to_vec();
        for (i, &(old, new)) in mapping.iter().enumerate() {
            let pos = self
                .domain
                .position(old)
                .ok_or_else(|| Error::UnknownAttribute(old.to_string()))?;
            if mapping[..i].iter().any(|&(o, _)| o == old) {
                return Err(Error::InvalidRenameMapping(format!("'{old}' is renamed twice")));
            }
            if mapping[..i].iter().any(|&(_, n)| n == new) {
                return Err(Error::InvalidRenameMapping(format!("two attributes renamed to '{new}'")));
            }
            names[pos] = new.to_string();
        }
        let domain = Domain::new(names).map_err(|_| {
            Error::InvalidRenameMapping(format!(
                "renaming {} collides with an existing attribute",
                self.domain
            ))
        })?;
        Ok(FuzzyRelation::from_support(domain, self.support().clone()))
    }

    /// Permute the domain (and every tuple) into `order`, which must contain
    /// exactly the current attributes.
    pub fn reorder<S: AsRef<str>>(&self, order: &[S]) -> Result<FuzzyRelation> {
        let invalid = || {
            let order: Vec<&str> = order.iter().map(|s| s.as_ref()).collect();
            Error::InvalidPermutation(format!("({}) is not a permutation of {}", order.join(", "), self.domain))
        };
        if order.len() != self.domain.len() {
            return Err(invalid());
        }
        let perm = self.domain.positions(order).map_err(|_| invalid())?;
        let domain = Domain::new(order.iter().map(|s| s.as_ref())).map_err(|_| invalid())?;

        let support = self
            .support()
            .iter()
            .map(|(t, mu)| (perm.iter().map(|&i| t[i].clone()).collect::<Tuple>(), *mu))
            .collect();
        Ok(FuzzyRelation::from_support(domain, support))
    }

    /// Lift `self` and `other` onto one common domain.
    ///
    /// Each side is extended over the attributes it lacks. An attribute's
    /// values are not stored anywhere: they are read off the other relation's
    /// support (its distinct values for that attribute), and every
    /// combination of them is paired with each original tuple at the
    /// original degree.
    ///
    /// Both results share the domain `self.domain ++ (other's extra
    /// attributes)`, so they can be fed straight into union, intersection
    /// or difference.
    pub fn cylindrical_extension(&self, other: &FuzzyRelation) -> Result<(FuzzyRelation, FuzzyRelation)> {
        let extra_from_other = self.domain.missing_from(&other.domain);
        let extra_from_self = other.domain.missing_from(&self.domain);

        let left = self.extend_over(&extra_from_other, other)?;
        let right = other.extend_over(&extra_from_self, self)?;
        let right = if right.domain == left.domain {
            right
        } else {
            right.reorder(left.domain.names())?
        };
        tracing::debug!(
            left = left.len(),
            right = right.len(),
            domain = %left.domain,
            "cylindrical extension"
        );
        Ok((left, right))
    }

    /// Append `attributes` to the domain, taking each one's values from
    /// `source`'s support.
    fn extend_over(&self, attributes: &[String], source: &FuzzyRelation) -> Result<FuzzyRelation> {
        if attributes.is_empty() {
            return Ok(self.clone());
        }
        let domain = Domain::new(self.domain.iter().chain(attributes.iter().map(String::as_str)))?;
        let combinations = combinations(&source.attribute_values(attributes)?);

        let mut support = HashMap::with_capacity(self.len() * combinations.len());
        for (tuple, &mu) in self.support() {
            for combo in &combinations {
                let mut extended = Tuple::with_capacity(domain.len());
                extended.extend(tuple.iter().cloned());
                extended.extend(combo.iter().cloned());
                support.insert(extended, mu);
            }
        }
        Ok(FuzzyRelation::from_support(domain, support))
    }

    /// Distinct values (ascending) each of `attributes` takes across the
    /// support.
    pub fn attribute_values<S: AsRef<str>>(&self, attributes: &[S]) -> Result<Vec<Vec<Value>>> {
        let positions = self.domain.positions(attributes)?;
        Ok(positions
            .into_iter()
            .map(|i| {
                let mut values: Vec<Value> = self.elements().map(|t| t[i].clone()).collect();
                values.sort_unstable();
                values.dedup();
                values
            })
            .collect())
    }
}

/// Every combination picking one value per column.
fn combinations(columns: &[Vec<Value>]) -> Vec<Tuple> {
    columns.iter().fold(vec![Tuple::new()], |acc, column| {
        acc.iter()
            .flat_map(|prefix| {
                column.iter().map(move |v| {
                    let mut next = prefix.clone();
                    next.push(v.clone());
                    next
                })
            })
            .collect()
    })
}
