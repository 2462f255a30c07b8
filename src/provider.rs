//! The seams to the two external collaborators of the engine
//!
//! The engine never fetches or persists ontology or disease data itself.
//! It consumes an already-queryable [`TermGraph`] and an [`AnnotationCorpus`].
//! [`crate::Ontology`] and [`crate::annotations::DiseaseCorpus`] are
//! in-memory implementations of both.

use crate::annotations::Disease;
use crate::term::Term;
use crate::PhenoResult;

/// Resolves term ids to [`Term`]s with their parent links
pub trait TermGraph {
    /// Returns the term with the given id, if it exists
    fn term(&self, id: &str) -> Option<Term<'_>>;

    /// Returns every term of the vocabulary
    ///
    /// # Errors
    ///
    /// Fails if the provider cannot deliver the listing. The engine treats
    /// this as fatal during initialization.
    fn all_terms(&self, vocabulary: &str) -> PhenoResult<Vec<Term<'_>>>;
}

/// Supplies the disease records with their annotated symptoms
pub trait AnnotationCorpus {
    /// Returns every disease record of the vocabulary
    ///
    /// # Errors
    ///
    /// Fails if the provider cannot deliver the listing. The engine treats
    /// this as fatal during initialization.
    fn diseases(&self, vocabulary: &str) -> PhenoResult<Vec<Disease>>;
}
