//! Tabular ingestion: the column/row shape relations are loaded from and
//! serialized through.
//!
//! A table carries one column per attribute plus an optional membership
//! column named [`MEMBERSHIP_COLUMN`]. Rows without it are fully members.
//!
//! ```
//! use pruf_rs::{FuzzyRelation, Table, Value, tuple};
//!
//! let table = Table::new(
//!     ["name", "mu"],
//!     vec![vec![Value::from("ann"), Value::from(0.8)], vec![Value::from("bob"), Value::from(1.0)]],
//! );
//! let r = FuzzyRelation::from_table(&table).unwrap();
//! assert_eq!(r.get(&tuple!["ann"]).unwrap(), 0.8);
//! assert_eq!(r.to_table(), table);
//! ```

use serde::{Deserialize, Serialize};

pub use crate::model::MEMBERSHIP_COLUMN;

use crate::model::{Domain, Tuple, Value};
use crate::relation::FuzzyRelation;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { columns: columns.into_iter().map(Into::into).collect(), rows }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FuzzyRelation {
    /// Load a relation from `table`. The domain is every column except the
    /// membership column, in column order.
    pub fn from_table(table: &Table) -> Result<FuzzyRelation> {
        let mu_col = table.columns.iter().position(|c| c == MEMBERSHIP_COLUMN);
        if table.columns.iter().filter(|c| *c == MEMBERSHIP_COLUMN).count() > 1 {
            return Err(Error::InvalidTable(format!("more than one '{MEMBERSHIP_COLUMN}' column")));
        }
        let attributes: Vec<&str> = table
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != mu_col)
            .map(|(_, c)| c.as_str())
            .collect();
        let domain = Domain::new(attributes.iter().copied())
            .map_err(|e| Error::InvalidTable(format!("bad columns: {e}")))?;

        let mut relation = FuzzyRelation::new(domain);
        for (n, row) in table.rows.iter().enumerate() {
            if row.len() != table.columns.len() {
                return Err(Error::InvalidTable(format!(
                    "row {n} has {} values for {} columns",
                    row.len(),
                    table.columns.len()
                )));
            }
            let mu = match mu_col {
                Some(i) => row[i].as_float().ok_or_else(|| {
                    Error::InvalidTable(format!("row {n}: membership must be numeric, got {}", row[i].type_name()))
                })?,
                None => 1.0,
            };
            let tuple: Tuple = row
                .iter()
                .enumerate()
                .filter(|(i, _)| Some(*i) != mu_col)
                .map(|(_, v)| v.clone())
                .collect();
            relation.set(tuple, mu)?;
        }
        tracing::debug!(rows = table.rows.len(), support = relation.len(), "loaded table");
        Ok(relation)
    }

    /// Rows in ascending tuple order with a trailing membership column.
    pub fn to_table(&self) -> Table {
        let columns = self
            .domain()
            .iter()
            .chain(std::iter::once(MEMBERSHIP_COLUMN))
            .map(str::to_string)
            .collect();
        let rows = self
            .sorted_entries()
            .into_iter()
            .map(|(tuple, mu)| tuple.iter().cloned().chain(std::iter::once(Value::Float(mu))).collect())
            .collect();
        Table { columns, rows }
    }
}

impl From<FuzzyRelation> for Table {
    fn from(relation: FuzzyRelation) -> Self {
        relation.to_table()
    }
}

impl TryFrom<Table> for FuzzyRelation {
    type Error = Error;

    fn try_from(table: Table) -> Result<Self> {
        FuzzyRelation::from_table(&table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple;

    #[test]
    fn test_missing_mu_defaults_to_one() {
        let table = Table::new(["a", "b"], vec![vec![Value::from(1), Value::from("x")]]);
        let r = FuzzyRelation::from_table(&table).unwrap();
        assert_eq!(r.get(&tuple![1, "x"]).unwrap(), 1.0);
    }

    #[test]
    fn test_mu_column_anywhere() {
        let table = Table::new(["mu", "a"], vec![vec![Value::from(0.5), Value::from("x")]]);
        let r = FuzzyRelation::from_table(&table).unwrap();
        assert_eq!(r.domain().names(), &["a".to_string()]);
        assert_eq!(r.get(&tuple!["x"]).unwrap(), 0.5);
    }

    #[test]
    fn test_zero_rows_are_skipped() {
        let table = Table::new(
            ["a", "mu"],
            vec![vec![Value::from("x"), Value::from(0)], vec![Value::from("y"), Value::from(0.2)]],
        );
        assert_eq!(FuzzyRelation::from_table(&table).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_tables() {
        let ragged = Table::new(["a", "b"], vec![vec![Value::from(1)]]);
        assert!(matches!(FuzzyRelation::from_table(&ragged), Err(Error::InvalidTable(_))));

        let only_mu = Table::new(["mu"], vec![]);
        assert!(matches!(FuzzyRelation::from_table(&only_mu), Err(Error::InvalidTable(_))));

        let dup = Table::new(["a", "a"], vec![]);
        assert!(matches!(FuzzyRelation::from_table(&dup), Err(Error::InvalidTable(_))));

        let text_mu = Table::new(["a", "mu"], vec![vec![Value::from(1), Value::from("high")]]);
        assert!(matches!(FuzzyRelation::from_table(&text_mu), Err(Error::InvalidTable(_))));

        let big_mu = Table::new(["a", "mu"], vec![vec![Value::from(1), Value::from(2.0)]]);
        assert!(matches!(FuzzyRelation::from_table(&big_mu), Err(Error::MembershipOutOfRange(_))));
    }

    #[test]
    fn test_membership_column_is_never_an_attribute() {
        let twice = Table::new(["mu", "mu"], vec![vec![Value::from(0.5), Value::from(0.9)]]);
        assert!(matches!(FuzzyRelation::from_table(&twice), Err(Error::InvalidTable(_))));

        let err = Domain::new([MEMBERSHIP_COLUMN]).unwrap_err();
        assert!(matches!(err, Error::InvalidDomain(_)));
        assert!(serde_json::from_str::<FuzzyRelation>(r#"{"columns":["mu","mu"],"rows":[]}"#).is_err());
    }

    #[test]
    fn test_float_attribute_round_trips() {
        let r = FuzzyRelation::from_entries(Domain::new(["score"]).unwrap(), vec![(tuple![0.5], 0.9)]).unwrap();
        let back: FuzzyRelation = serde_json::from_str(&serde_json::to_string(&r).unwrap()).unwrap();
        assert_eq!(back.get(&tuple![0.5]).unwrap(), 0.9);
        assert_eq!(back, r);
    }

    #[test]
    fn test_relation_serde_goes_through_table() {
        let r = FuzzyRelation::from_entries(
            Domain::new(["name", "age"]).unwrap(),
            vec![(tuple!["bob", 40], 0.25), (tuple!["ann", 30], 1.0)],
        )
        .unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let table = Table::from_json(&json).unwrap();
        assert_eq!(table.columns, vec!["name", "age", "mu"]);
        assert_eq!(table.rows[0][0], Value::from("ann"));

        let back: FuzzyRelation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
