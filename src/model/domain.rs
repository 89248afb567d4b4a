//! Domain: the ordered attribute list (schema) of a relation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::MEMBERSHIP_COLUMN;
use crate::{Error, Result};

/// Ordered, duplicate-free, non-empty sequence of attribute identifiers.
///
/// Order defines tuple positions: two domains are equal only if they are
/// identical as sequences. Use [`Domain::same_attributes`] for set equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Domain {
    attributes: Vec<String>,
}

impl Domain {
    /// Build a domain, rejecting empty or duplicated attribute lists and the
    /// reserved name [`MEMBERSHIP_COLUMN`].
    pub fn new<I, S>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes: Vec<String> = attributes.into_iter().map(Into::into).collect();
        if attributes.is_empty() {
            return Err(Error::InvalidDomain("a domain needs at least one attribute".into()));
        }
        for (i, name) in attributes.iter().enumerate() {
            if name == MEMBERSHIP_COLUMN {
                return Err(Error::InvalidDomain(format!("'{MEMBERSHIP_COLUMN}' is reserved for membership degrees")));
            }
            if attributes[..i].contains(name) {
                return Err(Error::InvalidDomain(format!("duplicate attribute '{name}'")));
            }
        }
        Ok(Self { attributes })
    }

    pub fn len(&self) -> usize { self.attributes.len() }

    /// A valid domain has at least one attribute, so this is `false` for
    /// every constructed domain.
    pub fn is_empty(&self) -> bool { self.attributes.is_empty() }

    pub fn names(&self) -> &[String] { &self.attributes }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.position(attribute).is_some()
    }

    pub fn position(&self, attribute: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a == attribute)
    }

    /// Positions of `attributes` in this domain, in the order given.
    pub fn positions<S: AsRef<str>>(&self, attributes: &[S]) -> Result<Vec<usize>> {
        attributes
            .iter()
            .map(|a| {
                let a = a.as_ref();
                self.position(a).ok_or_else(|| Error::UnknownAttribute(a.to_string()))
            })
            .collect()
    }

    /// `(position here, position in other)` for every shared attribute,
    /// in this domain's order.
    pub fn shared_positions(&self, other: &Domain) -> Vec<(usize, usize)> {
        self.attributes
            .iter()
            .enumerate()
            .filter_map(|(i, a)| other.position(a).map(|j| (i, j)))
            .collect()
    }

    pub fn is_disjoint(&self, other: &Domain) -> bool {
        self.attributes.iter().all(|a| !other.contains(a))
    }

    /// Set equality: same attributes, any order.
    pub fn same_attributes(&self, other: &Domain) -> bool {
        self.len() == other.len() && self.attributes.iter().all(|a| other.contains(a))
    }

    /// Attributes of `other` that this domain lacks, in `other`'s order.
    pub fn missing_from(&self, other: &Domain) -> Vec<String> {
        other.attributes.iter().filter(|a| !self.contains(a)).cloned().collect()
    }

    /// This domain followed by `other`. Fails if they overlap.
    pub fn concat(&self, other: &Domain) -> Result<Domain> {
        Domain::new(self.attributes.iter().chain(other.attributes.iter()).cloned())
    }
}

impl TryFrom<Vec<String>> for Domain {
    type Error = Error;

    fn try_from(attributes: Vec<String>) -> Result<Self> {
        Domain::new(attributes)
    }
}

impl From<Domain> for Vec<String> {
    fn from(domain: Domain) -> Self {
        domain.attributes
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.attributes.join(", "))
    }
}
