use crate::term::internal::TermInternal;
use crate::term::{TermGroup, TermId};

/// The `Term` represents a single term of the ontology
///
/// It is a cheap, borrowed view into a term graph and holds the
/// id, the name and the parent relations of the term.
#[derive(Debug, Clone, Copy)]
pub struct Term<'a> {
    id: &'a TermId,
    name: &'a str,
    parents: &'a TermGroup,
    all_parents: &'a TermGroup,
}

impl<'a> Term<'a> {
    /// Constructs a new [`Term`]
    ///
    /// `all_parents` must contain every direct and indirect parent of the term,
    /// but not the term itself. Term graph implementations use this to hand out
    /// views into their own storage.
    pub fn new(
        id: &'a TermId,
        name: &'a str,
        parents: &'a TermGroup,
        all_parents: &'a TermGroup,
    ) -> Term<'a> {
        Term {
            id,
            name,
            parents,
            all_parents,
        }
    }

    pub(crate) fn from_internal(term: &'a TermInternal) -> Term<'a> {
        Term::new(term.id(), term.name(), term.parents(), term.all_parents())
    }

    /// Returns the [`TermId`] of the term
    ///
    /// e.g.: `HP:0012345`
    pub fn id(&self) -> &'a TermId {
        self.id
    }

    /// Returns the name of the term
    ///
    /// e.g.: `Abnormality of the nervous system`
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the [`TermId`]s of the direct parents
    pub fn parent_ids(&self) -> &'a TermGroup {
        self.parents
    }

    /// Returns the [`TermId`]s of all direct and indirect parents
    pub fn all_parent_ids(&self) -> &'a TermGroup {
        self.all_parents
    }

    /// Returns the ancestor closure of the term: the term itself and all its ancestors
    pub fn ancestors_and_self(&self) -> TermGroup {
        let mut res = self.all_parents.clone();
        res.insert(self.id);
        res
    }

    /// Returns `true` if `self` is a child (direct or indirect) of `other`
    pub fn child_of(&self, other: &Term) -> bool {
        self.all_parents.contains(other.id().as_str())
    }

    /// Returns `true` if `self` is a parent (direct or indirect) of `other`
    pub fn parent_of(&self, other: &Term) -> bool {
        other.child_of(self)
    }
}

impl PartialEq for Term<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Term<'_> {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ancestors_include_self() {
        let id = TermId::from("HP:0000003");
        let parents: TermGroup = ["HP:0000002"].into_iter().collect();
        let all_parents: TermGroup = ["HP:0000001", "HP:0000002"].into_iter().collect();
        let term = Term::new(&id, "Foo", &parents, &all_parents);

        let closure = term.ancestors_and_self();
        assert_eq!(closure.len(), 3);
        assert!(closure.contains("HP:0000003"));
        assert_eq!(term.all_parent_ids().len(), 2);
    }

    #[test]
    fn child_and_parent() {
        let root_id = TermId::from("HP:0000001");
        let child_id = TermId::from("HP:0000002");
        let empty = TermGroup::new();
        let parents: TermGroup = ["HP:0000001"].into_iter().collect();

        let root = Term::new(&root_id, "All", &empty, &empty);
        let child = Term::new(&child_id, "Foo", &parents, &parents);

        assert!(child.child_of(&root));
        assert!(root.parent_of(&child));
        assert!(!root.child_of(&child));
    }
}
