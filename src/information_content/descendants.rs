use std::collections::{HashMap, HashSet};

use smallvec::SmallVec;
use tracing::{info, warn};

use crate::term::{Term, TermGroup, TermId};

/// The direct children of every term that has at least one
pub type ChildrenMap = HashMap<TermId, SmallVec<[TermId; 4]>>;

/// Inverts the parent links of all terms into a children lookup
pub fn children_map<'a, I: IntoIterator<Item = &'a Term<'a>>>(terms: I) -> ChildrenMap {
    let mut children = ChildrenMap::new();
    for term in terms {
        for parent in term.parent_ids() {
            children
                .entry(parent.clone())
                .or_default()
                .push(term.id().clone());
        }
    }
    info!("Cached children of {} ontology terms", children.len());
    children
}

/// The descendant set (the term itself and all more specific terms) of
/// every term below a root
///
/// The keys of the index are the term universe of the engine: only terms
/// below the root are considered when estimating frequencies.
///
/// # Examples
///
/// ```
/// use phenomatch::information_content::{children_map, DescendantIndex};
/// use phenomatch::{Ontology, TermGraph};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("Root".into(), "T:1");
/// ontology.insert_term("Left".into(), "T:2");
/// ontology.insert_term("Right".into(), "T:3");
/// ontology.insert_term("Bottom".into(), "T:4");
/// ontology.add_parent("T:1", "T:2").unwrap();
/// ontology.add_parent("T:1", "T:3").unwrap();
/// ontology.add_parent("T:2", "T:4").unwrap();
/// ontology.add_parent("T:3", "T:4").unwrap();
///
/// let terms = ontology.all_terms("HPO").unwrap();
/// let index = DescendantIndex::build(&"T:1".into(), &children_map(&terms));
///
/// assert_eq!(index.len(), 4);
/// assert_eq!(index.get("T:1").unwrap().len(), 4);
/// assert_eq!(index.get("T:2").unwrap().len(), 2);
/// assert_eq!(index.get("T:4").unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DescendantIndex {
    descendants: HashMap<TermId, TermGroup>,
}

impl DescendantIndex {
    /// Computes the descendant set of `root` and every term below it
    ///
    /// The traversal is an iterative post-order walk with an explicit memo
    /// table, so every term is calculated exactly once, even when it is
    /// reachable via multiple parents, and the depth of the ontology does not
    /// matter. A child whose descendants are unavailable (which only happens
    /// for cyclic relations) is logged and skipped.
    pub fn build(root: &TermId, children: &ChildrenMap) -> Self {
        let mut descendants: HashMap<TermId, TermGroup> = HashMap::new();
        let mut in_progress: HashSet<TermId> = HashSet::new();
        // (term, children already pushed)
        let mut stack: Vec<(TermId, bool)> = vec![(root.clone(), false)];

        while let Some((id, expanded)) = stack.pop() {
            if descendants.contains_key(&id) {
                continue;
            }

            if !expanded {
                if !in_progress.insert(id.clone()) {
                    // the term is one of its own ancestors
                    continue;
                }
                let kids = children.get(&id);
                stack.push((id, true));
                for child in kids.into_iter().flatten().rev() {
                    if !descendants.contains_key(child) {
                        stack.push((child.clone(), false));
                    }
                }
                continue;
            }

            let mut res: Vec<TermId> = vec![id.clone()];
            for child in children.get(&id).into_iter().flatten() {
                match descendants.get(child) {
                    Some(child_descendants) => res.extend(child_descendants.iter().cloned()),
                    None => warn!("Descendants of {} were missing after traversal", child),
                }
            }
            in_progress.remove(&id);
            descendants.insert(id, TermGroup::from_unsorted(res));
        }

        info!("Cached descendants of {} ontology terms", descendants.len());
        Self { descendants }
    }

    /// Returns the descendant set of the term, including the term itself
    pub fn get(&self, id: &str) -> Option<&TermGroup> {
        self.descendants.get(id)
    }

    /// Returns `true` if the term is below the root (or the root itself)
    pub fn contains(&self, id: &str) -> bool {
        self.descendants.contains_key(id)
    }

    /// Returns the number of indexed terms
    pub fn len(&self) -> usize {
        self.descendants.len()
    }

    /// Returns `true` if no term is indexed
    pub fn is_empty(&self) -> bool {
        self.descendants.is_empty()
    }

    /// Returns an iterator of all terms with their descendant sets
    pub fn iter(&self) -> impl Iterator<Item = (&TermId, &TermGroup)> {
        self.descendants.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures;
    use crate::TermGraph;

    fn edges(pairs: &[(&str, &str)]) -> ChildrenMap {
        let mut children = ChildrenMap::new();
        for (parent, child) in pairs {
            children
                .entry((*parent).into())
                .or_default()
                .push((*child).into());
        }
        children
    }

    #[test]
    fn leaf_is_its_own_descendant() {
        let index = DescendantIndex::build(&"T:1".into(), &ChildrenMap::new());
        assert_eq!(index.len(), 1);
        assert!(index.get("T:1").unwrap().contains("T:1"));
    }

    #[test]
    fn reconvergent_paths() {
        let children = edges(&[
            ("T:1", "T:2"),
            ("T:1", "T:3"),
            ("T:2", "T:4"),
            ("T:3", "T:4"),
            ("T:4", "T:5"),
        ]);
        let index = DescendantIndex::build(&"T:1".into(), &children);
        assert_eq!(index.len(), 5);
        assert_eq!(index.get("T:1").unwrap().len(), 5);
        assert_eq!(index.get("T:2").unwrap().len(), 3);
        assert_eq!(index.get("T:3").unwrap().len(), 3);
        assert_eq!(index.get("T:4").unwrap().len(), 2);
    }

    #[test]
    fn only_terms_below_root() {
        let children = edges(&[("T:0", "T:1"), ("T:1", "T:2"), ("T:0", "T:9")]);
        let index = DescendantIndex::build(&"T:1".into(), &children);
        assert_eq!(index.len(), 2);
        assert!(!index.contains("T:0"));
        assert!(!index.contains("T:9"));
    }

    #[test]
    fn cycles_are_survived() {
        let children = edges(&[("T:1", "T:2"), ("T:2", "T:3"), ("T:3", "T:2")]);
        let index = DescendantIndex::build(&"T:1".into(), &children);
        assert_eq!(index.len(), 3);
        assert!(index.get("T:1").unwrap().contains("T:3"));
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let ids: Vec<String> = (0..2_000).map(|i| format!("T:{i}")).collect();
        let pairs: Vec<(&str, &str)> = ids
            .windows(2)
            .map(|w| (w[0].as_str(), w[1].as_str()))
            .collect();
        let index = DescendantIndex::build(&"T:0".into(), &edges(&pairs));
        assert_eq!(index.len(), 2_000);
        assert_eq!(index.get("T:0").unwrap().len(), 2_000);
        assert_eq!(index.get("T:1999").unwrap().len(), 1);
    }

    #[test]
    fn fixture_ontology() {
        let ontology = fixtures::ontology();
        let terms = ontology.all_terms("HPO").unwrap();
        let children = children_map(&terms);
        assert_eq!(children.get("HP:0000118").unwrap().len(), 2);

        let index = DescendantIndex::build(&"HP:0000118".into(), &children);
        assert_eq!(index.len(), 12);
        assert_eq!(index.get("HP:0000118").unwrap().len(), 12);
        assert_eq!(index.get("HP:0000924").unwrap().len(), 5);
        assert!(!index.contains("HP:0000001"));
    }
}
