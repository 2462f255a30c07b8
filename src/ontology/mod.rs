use core::fmt::Debug;
use std::collections::HashSet;

use tracing::{debug, warn};

use crate::provider::TermGraph;
use crate::term::internal::TermInternal;
use crate::term::{Term, TermGroup, TermId};
use crate::{PhenoError, PhenoResult};

mod termarena;
use termarena::Arena;

/// `Ontology` is an in-memory term graph
///
/// It holds all terms of one vocabulary and their parent relations and
/// implements [`TermGraph`], so it can be handed to the
/// [`PhenotypeEngine`](crate::PhenotypeEngine) directly.
///
/// # Examples
///
/// ```
/// use phenomatch::{Ontology, TermGraph};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("All".into(), "HP:0000001");
/// ontology.insert_term("Phenotypic abnormality".into(), "HP:0000118");
/// ontology.add_parent("HP:0000001", "HP:0000118").unwrap();
/// ontology.create_cache();
///
/// let term = ontology.term("HP:0000118").unwrap();
/// assert_eq!(term.name(), "Phenotypic abnormality");
/// assert!(term.all_parent_ids().contains("HP:0000001"));
/// assert!(ontology.term("HP:9999999").is_none());
///
/// assert_eq!(ontology.all_terms("HPO").unwrap().len(), 2);
/// ```
///
/// # Construction
///
/// 1. Add all terms with [`Ontology::insert_term`]
/// 2. Connect terms to their parents with [`Ontology::add_parent`]
/// 3. Cache the ancestor closure of every term with [`Ontology::create_cache`]
pub struct Ontology {
    vocabulary: String,
    terms: Arena,
}

impl Default for Ontology {
    fn default() -> Self {
        Ontology::new("HPO")
    }
}

impl Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ontology {} with {} terms",
            self.vocabulary,
            self.terms.len()
        )
    }
}

impl Ontology {
    /// Constructs a new, empty `Ontology` for the given vocabulary
    pub fn new(vocabulary: &str) -> Self {
        Self {
            vocabulary: vocabulary.to_string(),
            terms: Arena::default(),
        }
    }

    /// Returns the name of the vocabulary, e.g. `HPO`
    pub fn vocabulary(&self) -> &str {
        &self.vocabulary
    }

    /// Returns the number of terms in the Ontology
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the Ontology does not contain any terms
    pub fn is_empty(&self) -> bool {
        self.terms.len() == 0
    }

    /// Returns the [`Term`] with the given id
    ///
    /// Returns `None` if no such term is present
    pub fn term(&self, id: &str) -> Option<Term<'_>> {
        self.terms.get(id).map(Term::from_internal)
    }

    /// Returns an iterator of all [`Term`]s, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = Term<'_>> {
        self.terms.values().map(Term::from_internal)
    }
}

/// Methods to build the Ontology
impl Ontology {
    /// Creates and inserts a new term to the ontology
    ///
    /// This method does not link the term to its parents.
    /// Inserting an id a second time replaces the previous term.
    pub fn insert_term<I: Into<TermId>>(&mut self, name: String, id: I) {
        let term = TermInternal::new(name, id.into());
        self.terms.insert(term);
    }

    /// Add a connection from a term to its parent
    ///
    /// # Errors
    ///
    /// Returns [`PhenoError::DoesNotExist`] if either term is not present
    pub fn add_parent(&mut self, parent_id: &str, child_id: &str) -> PhenoResult<()> {
        if self.terms.get(parent_id).is_none() {
            return Err(PhenoError::DoesNotExist);
        }
        let child = self
            .terms
            .get_mut(child_id)
            .ok_or(PhenoError::DoesNotExist)?;
        child.add_parent(parent_id);
        Ok(())
    }

    /// Creates and caches the ancestor closure of every term
    ///
    /// Must be called once all terms and parent connections are added.
    /// Terms that are already cached are not calculated again.
    pub fn create_cache(&mut self) {
        let term_ids = self.terms.keys();
        let mut visiting = HashSet::new();

        for id in term_ids {
            if !self.is_cached(&id) {
                self.create_cache_of_grandparents(&id, &mut visiting);
            }
        }
        debug!("Cached ancestors of {} terms", self.terms.len());
    }
}

/// Crate-only functions for setting up the ancestor cache
impl Ontology {
    fn is_cached(&self, term_id: &TermId) -> bool {
        self.terms
            .get(term_id.as_str())
            .map_or(true, TermInternal::parents_cached)
    }

    /// Returns all direct and indirect parents of the term, creating the cache
    /// first if needed
    fn all_grandparents(&mut self, term_id: &TermId, visiting: &mut HashSet<TermId>) -> &TermGroup {
        if !self.is_cached(term_id) {
            self.create_cache_of_grandparents(term_id, visiting);
        }
        match self.terms.get(term_id.as_str()) {
            Some(term) => term.all_parents(),
            None => &EMPTY_GROUP,
        }
    }

    /// Recursively collects the parents of all parents
    ///
    /// The recursion bubbles up to the top of the ontology and caches the
    /// ancestors of every term on the way back down. It stops at terms that are
    /// already cached, so every term is calculated only once.
    fn create_cache_of_grandparents(&mut self, term_id: &TermId, visiting: &mut HashSet<TermId>) {
        if !visiting.insert(term_id.clone()) {
            warn!("Cyclic parent relation at {}", term_id);
            return;
        }
        let parents = match self.terms.get(term_id.as_str()) {
            Some(term) => term.parents().clone(),
            None => {
                visiting.remove(term_id);
                return;
            }
        };

        let mut res: Vec<TermId> = parents.iter().cloned().collect();
        for parent in &parents {
            for gp in self.all_grandparents(parent, visiting) {
                res.push(gp.clone());
            }
        }

        if let Some(term) = self.terms.get_mut(term_id.as_str()) {
            *term.all_parents_mut() = TermGroup::from_unsorted(res);
            term.set_parents_cached();
        }
        visiting.remove(term_id);
    }
}

static EMPTY_GROUP: TermGroup = TermGroup::empty();

impl TermGraph for Ontology {
    fn term(&self, id: &str) -> Option<Term<'_>> {
        self.terms.get(id).map(Term::from_internal)
    }

    fn all_terms(&self, vocabulary: &str) -> PhenoResult<Vec<Term<'_>>> {
        if vocabulary != self.vocabulary {
            return Err(PhenoError::ProviderError(format!(
                "unknown vocabulary {vocabulary}, expected {}",
                self.vocabulary
            )));
        }
        Ok(self.iter().collect())
    }
}
