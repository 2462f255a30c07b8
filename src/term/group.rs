use std::cmp::Ordering;
use std::ops::{BitAnd, BitOr};

use crate::term::TermId;

/// A set of [`TermId`]s representing a group of ontology terms
///
/// Each term can occur only once in the group and the ids are
/// kept sorted, so iteration order is deterministic.
///
/// This group is used e.g. for the parents of a term, the ancestor closure
/// of a phenotype or the descendant set of a term.
///
/// # Examples
///
/// ```
/// use phenomatch::TermGroup;
///
/// let a: TermGroup = ["HP:0000002", "HP:0000001"].into_iter().collect();
/// let b: TermGroup = ["HP:0000003", "HP:0000002"].into_iter().collect();
///
/// assert_eq!((&a & &b).len(), 1);
/// assert_eq!((&a | &b).len(), 3);
/// assert!(a.contains("HP:0000001"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TermGroup {
    ids: Vec<TermId>,
}

impl TermGroup {
    /// Constructs a new, empty [`TermGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) const fn empty() -> Self {
        Self { ids: Vec::new() }
    }

    /// Constructs a new, empty [`TermGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Builds a group from an arbitrary vector of ids
    ///
    /// Sorts and de-duplicates in one go, which is much cheaper than
    /// inserting the ids one by one for large sets.
    pub fn from_unsorted(mut ids: Vec<TermId>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    /// Returns `true` if the group contains no [`TermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`TermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`TermId`] to the group
    ///
    /// Returns whether the `TermId` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `TermId`, true is returned.
    /// - If the group already contained this `TermId`, false is returned.
    ///
    pub fn insert<I: Into<TermId>>(&mut self, id: I) -> bool {
        let id = id.into();
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Returns `true` if the group contains the id
    pub fn contains(&self, id: &str) -> bool {
        self.ids
            .binary_search_by(|probe| probe.as_str().cmp(id))
            .is_ok()
    }

    /// Returns an Iterator of the [`TermId`]s inside the group, in sorted order
    pub fn iter(&self) -> std::slice::Iter<'_, TermId> {
        self.ids.iter()
    }
}

impl<I: Into<TermId>> FromIterator<I> for TermGroup {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::from_unsorted(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a TermGroup {
    type Item = &'a TermId;
    type IntoIter = std::slice::Iter<'a, TermId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl BitOr for &TermGroup {
    type Output = TermGroup;

    fn bitor(self, rhs: &TermGroup) -> TermGroup {
        let mut group = TermGroup::with_capacity(self.len() + rhs.len());
        let mut lhs_iter = self.ids.iter().peekable();
        let mut rhs_iter = rhs.ids.iter().peekable();

        loop {
            let next = match (lhs_iter.peek(), rhs_iter.peek()) {
                (Some(l), Some(r)) => match l.cmp(r) {
                    Ordering::Less => lhs_iter.next(),
                    Ordering::Greater => rhs_iter.next(),
                    Ordering::Equal => {
                        rhs_iter.next();
                        lhs_iter.next()
                    }
                },
                (Some(_), None) => lhs_iter.next(),
                (None, Some(_)) => rhs_iter.next(),
                (None, None) => break,
            };
            if let Some(id) = next {
                group.ids.push(id.clone());
            }
        }
        group
    }
}

impl BitAnd for &TermGroup {
    type Output = TermGroup;

    fn bitand(self, rhs: &TermGroup) -> TermGroup {
        let mut group = TermGroup::with_capacity(self.len().min(rhs.len()));
        let mut lhs_iter = self.ids.iter().peekable();
        let mut rhs_iter = rhs.ids.iter().peekable();

        while let (Some(l), Some(r)) = (lhs_iter.peek(), rhs_iter.peek()) {
            match l.cmp(r) {
                Ordering::Less => {
                    lhs_iter.next();
                }
                Ordering::Greater => {
                    rhs_iter.next();
                }
                Ordering::Equal => {
                    group.ids.push((*l).clone());
                    lhs_iter.next();
                    rhs_iter.next();
                }
            }
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(ids: &[&str]) -> TermGroup {
        let mut group = TermGroup::new();
        for id in ids {
            group.insert(*id);
        }
        group
    }

    #[test]
    fn test_termgroup_iter() {
        let terms = group(&["HP:03", "HP:01", "HP:02"]);

        let ids: Vec<&str> = terms.iter().map(TermId::as_str).collect();
        assert_eq!(ids, vec!["HP:01", "HP:02", "HP:03"]);
    }

    #[test]
    fn test_insert_twice() {
        let mut group = TermGroup::new();
        assert!(group.insert("HP:01"));
        assert!(!group.insert("HP:01"));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_from_unsorted() {
        let result = TermGroup::from_unsorted(vec![
            "HP:05".into(),
            "HP:01".into(),
            "HP:05".into(),
            "HP:03".into(),
        ]);
        assert_eq!(result, group(&["HP:01", "HP:03", "HP:05"]));
    }

    #[test]
    fn test_bitor_set1() {
        let group1 = group(&["HP:01", "HP:02", "HP:03"]);
        let group2 = group(&["HP:02", "HP:04"]);

        let result = group1.bitor(&group2);
        assert_eq!(result, group(&["HP:01", "HP:02", "HP:03", "HP:04"]));
    }

    #[test]
    fn test_bitor_empty() {
        let group1 = group(&["HP:01", "HP:02"]);
        let group2 = TermGroup::new();

        assert_eq!(group1.bitor(&group2), group1);
        assert_eq!(group2.bitor(&group1), group1);
    }

    #[test]
    fn test_bitand() {
        let group1 = group(&["HP:01", "HP:02", "HP:03"]);
        let group2 = group(&["HP:02", "HP:04", "HP:05", "HP:01"]);

        let result = group1.bitand(&group2);
        assert_eq!(result, group(&["HP:01", "HP:02"]));
        assert_eq!(group2.bitand(&group1), result);
    }

    #[test]
    fn test_bitand_disjoint() {
        let group1 = group(&["HP:01", "HP:02"]);
        let group2 = group(&["HP:03"]);
        assert!(group1.bitand(&group2).is_empty());
    }

    #[test]
    fn test_contains() {
        let terms = group(&["HP:01", "HP:02"]);
        assert!(terms.contains("HP:02"));
        assert!(!terms.contains("HP:03"));
    }
}
