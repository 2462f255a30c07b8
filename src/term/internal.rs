use crate::term::{TermGroup, TermId};
use crate::{DEFAULT_NUM_ALL_PARENTS, DEFAULT_NUM_PARENTS};

#[derive(Debug)]
pub(crate) struct TermInternal {
    id: TermId,
    name: String,
    parents: TermGroup,
    all_parents: TermGroup,
    ancestors_cached: bool,
}

impl TermInternal {
    pub fn new(name: String, id: TermId) -> TermInternal {
        TermInternal {
            id,
            name,
            parents: TermGroup::with_capacity(DEFAULT_NUM_PARENTS),
            all_parents: TermGroup::with_capacity(DEFAULT_NUM_ALL_PARENTS),
            ancestors_cached: false,
        }
    }

    pub fn id(&self) -> &TermId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parents(&self) -> &TermGroup {
        &self.parents
    }

    pub fn all_parents(&self) -> &TermGroup {
        &self.all_parents
    }

    pub fn all_parents_mut(&mut self) -> &mut TermGroup {
        &mut self.all_parents
    }

    pub fn parents_cached(&self) -> bool {
        self.ancestors_cached || self.parents.is_empty()
    }

    pub fn set_parents_cached(&mut self) {
        self.ancestors_cached = true;
    }

    pub fn add_parent<I: Into<TermId>>(&mut self, parent_id: I) -> bool {
        // a new edge invalidates the cached closure
        self.ancestors_cached = false;
        self.parents.insert(parent_id)
    }
}

impl PartialEq for TermInternal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TermInternal {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn root_is_always_cached() {
        let term = TermInternal::new("All".to_string(), "HP:0000001".into());
        assert!(term.parents_cached());
    }

    #[test]
    fn new_parent_invalidates_cache() {
        let mut term = TermInternal::new("Foo".to_string(), "HP:0000002".into());
        term.add_parent("HP:0000001");
        assert!(!term.parents_cached());
        term.set_parents_cached();
        assert!(term.parents_cached());
        term.add_parent("HP:0000003");
        assert!(!term.parents_cached());
    }
}
