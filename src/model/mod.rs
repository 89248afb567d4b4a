//! # Relation Data Model
//!
//! Plain data shared by every layer: attribute values, tuples, domains and
//! the rules for what counts as a storable membership degree.
//!
//! This module is pure data without operators or a logic context.

pub mod value;
pub mod domain;

pub use value::Value;
pub use domain::Domain;

use smallvec::SmallVec;

use crate::{Error, Result};

/// Column name that carries membership degrees in tabular form. It is
/// reserved: no domain may use it as an attribute.
pub const MEMBERSHIP_COLUMN: &str = "mu";

/// One element of a relation: a value per domain attribute.
pub type Tuple = SmallVec<[Value; 4]>;

/// Build a [`Tuple`] from expressions convertible into [`Value`].
///
/// ```
/// use pruf_rs::{tuple, Value};
///
/// let t = tuple!["Alice", 34, 1.72];
/// assert_eq!(t[1], Value::Int(34));
/// ```
#[macro_export]
macro_rules! tuple {
    () => {
        $crate::model::Tuple::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::model::Tuple::from_vec(vec![$($crate::model::Value::from($value)),+])
    };
}

/// Validate a degree supplied by a caller on write.
///
/// Degrees must lie in `[0, 1]`. Returns `None` for exactly `0`, which
/// callers treat as deletion.
pub fn written_degree(mu: f64) -> Result<Option<f64>> {
    if mu.is_nan() || !(0.0..=1.0).contains(&mu) {
        return Err(Error::MembershipOutOfRange(mu));
    }
    Ok(if mu > 0.0 { Some(mu) } else { None })
}

/// Settle a degree produced by an operator: keep only `> 0`, clamp to `1`.
pub fn computed_degree(mu: f64) -> Option<f64> {
    if mu > 0.0 { Some(mu.min(1.0)) } else { None }
}
