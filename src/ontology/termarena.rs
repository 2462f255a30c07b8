use crate::term::internal::TermInternal;
use crate::term::TermId;
use std::collections::hash_map::Values;
use std::collections::HashMap;

pub(crate) struct Arena {
    terms: HashMap<TermId, TermInternal>,
}

impl Arena {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn insert(&mut self, term: TermInternal) {
        let id = term.id().clone();
        self.terms.insert(id, term);
    }

    pub fn get(&self, id: &str) -> Option<&TermInternal> {
        self.terms.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut TermInternal> {
        self.terms.get_mut(id)
    }

    pub fn values(&self) -> Values<'_, TermId, TermInternal> {
        self.terms.values()
    }

    pub fn keys(&self) -> Vec<TermId> {
        self.terms.keys().cloned().collect()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            terms: HashMap::with_capacity(20_000),
        }
    }
}
