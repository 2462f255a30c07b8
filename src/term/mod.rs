//! [`Term`]s are the nodes of the ontology, connected to their parents
//!
//! Terms are keyed by their stable string id ([`TermId`]), never by
//! object identity, so the same logical term resolved through separate
//! calls always compares equal.

use core::fmt::Debug;
use std::borrow::Borrow;
use std::fmt::Display;

mod group;
pub(crate) mod internal;
mod view;

pub use group::TermGroup;
pub use view::Term;

/// The stable identifier of an ontology term, e.g. `HP:0000118`
///
/// # Examples
///
/// ```
/// use phenomatch::TermId;
///
/// let id = TermId::from("HP:0000118");
/// assert_eq!(id.as_str(), "HP:0000118");
/// assert_eq!(id.to_string(), "HP:0000118");
/// assert!(id == "HP:0000118");
/// ```
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TermId {
    inner: String,
}

impl TermId {
    /// Returns the id as string slice
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl From<&str> for TermId {
    fn from(s: &str) -> Self {
        Self {
            inner: s.to_string(),
        }
    }
}

impl From<String> for TermId {
    fn from(inner: String) -> Self {
        Self { inner }
    }
}

impl From<&TermId> for TermId {
    fn from(id: &TermId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for TermId {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

// Allows `HashMap<TermId, _>` lookups with a plain `&str`
impl Borrow<str> for TermId {
    fn borrow(&self) -> &str {
        &self.inner
    }
}

impl Debug for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TermId({})", self)
    }
}

impl Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl PartialEq<str> for TermId {
    fn eq(&self, other: &str) -> bool {
        self.inner == other
    }
}

impl PartialEq<&str> for TermId {
    fn eq(&self, other: &&str) -> bool {
        self.inner == *other
    }
}
