//! Methods to calculate the similarity between two sets of terms
//!
//! Both sets are expanded to their ancestor closure: every term plus all of
//! its ancestors. The similarity is the summed information content of the
//! terms the closures have in common, divided by
//!
//! - the summed information content of the union of both closures
//!   ([`ScoreKind::Symmetric`]), or
//! - the summed information content of the reference closure
//!   ([`ScoreKind::AgainstReference`]).
//!
//! Scores are always within `0.0..=1.0`. Empty or unresolvable input is not an
//! error and scores `0.0`.

use tracing::trace;

use crate::provider::TermGraph;
use crate::term::{Term, TermGroup, TermId};
use crate::InformationContentTable;

mod matching;
pub use matching::{MatchRecord, MatchedTerm};

/// Selects the denominator of the similarity score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreKind {
    /// Both sets are treated equally, the denominator is the union of both closures
    #[default]
    Symmetric,
    /// The query is compared to the reference, the denominator is the reference closure
    AgainstReference,
}

/// Calculates similarity scores and term matches between sets of terms
///
/// The scorer only borrows the term graph and the information content table.
/// It is cheap to copy and can be shared across threads.
///
/// # Examples
///
/// ```
/// use phenomatch::annotations::{Disease, DiseaseCorpus};
/// use phenomatch::{InformationContentTable, Ontology, PhenotypeScorer, Settings};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("Phenotypic abnormality".into(), "HP:0000118");
/// ontology.insert_term("Foo".into(), "HP:0000002");
/// ontology.insert_term("Bar".into(), "HP:0000003");
/// ontology.add_parent("HP:0000118", "HP:0000002").unwrap();
/// ontology.add_parent("HP:0000002", "HP:0000003").unwrap();
/// ontology.create_cache();
///
/// let mut corpus = DiseaseCorpus::default();
/// let mut disease = Disease::new("MIM:1".into(), "Foobar disease");
/// disease.add_symptom("HP:0000002");
/// disease.add_symptom("HP:0000003");
/// corpus.add_disease(disease);
///
/// let table = InformationContentTable::build(&ontology, &corpus, &Settings::default()).unwrap();
/// let scorer = PhenotypeScorer::new(&ontology, &table);
///
/// // "Bar" is a child of "Foo", so its closure includes all of "Foo"
/// assert_eq!(scorer.score_against_reference(&["HP:0000003"], &["HP:0000002"]), 1.0);
/// assert!(scorer.score_against_reference(&["HP:0000002"], &["HP:0000003"]) < 0.01);
/// ```
pub struct PhenotypeScorer<'a, G> {
    graph: &'a G,
    table: &'a InformationContentTable,
}

impl<G> Clone for PhenotypeScorer<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for PhenotypeScorer<'_, G> {}

impl<'a, G: TermGraph> PhenotypeScorer<'a, G> {
    /// Constructs a new scorer from a term graph and its information content
    pub fn new(graph: &'a G, table: &'a InformationContentTable) -> Self {
        Self { graph, table }
    }

    /// Returns the term graph
    pub fn graph(&self) -> &'a G {
        self.graph
    }

    /// Returns the information content table
    pub fn information_content(&self) -> &'a InformationContentTable {
        self.table
    }

    /// Returns the symmetric similarity of two sets of term ids
    ///
    /// `score(a, b) == score(b, a)` always holds.
    pub fn score<A: AsRef<str>, B: AsRef<str>>(&self, a: &[A], b: &[B]) -> f64 {
        self.score_with(a, b, ScoreKind::Symmetric)
    }

    /// Returns how well `query` covers the `reference` set of term ids
    ///
    /// This score is not symmetric.
    pub fn score_against_reference<A: AsRef<str>, B: AsRef<str>>(
        &self,
        query: &[A],
        reference: &[B],
    ) -> f64 {
        self.score_with(query, reference, ScoreKind::AgainstReference)
    }

    /// Returns the similarity of two sets of term ids using the given [`ScoreKind`]
    pub fn score_with<A: AsRef<str>, B: AsRef<str>>(
        &self,
        query: &[A],
        reference: &[B],
        kind: ScoreKind,
    ) -> f64 {
        if query.is_empty() || reference.is_empty() {
            return 0.0;
        }
        let query = self.ancestor_closure(self.resolve(query));
        let reference = self.ancestor_closure(self.resolve(reference));
        self.score_closures(&query, &reference, kind)
    }

    /// Resolves term ids through the term graph
    ///
    /// Ids that do not resolve become `None`.
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Vec<Option<Term<'a>>> {
        ids.iter()
            .map(|id| {
                let term = self.graph.term(id.as_ref());
                if term.is_none() {
                    trace!("Unable to resolve term {}", id.as_ref());
                }
                term
            })
            .collect()
    }

    /// Returns all given terms and their ancestors
    ///
    /// `None` entries are dropped.
    pub fn ancestor_closure<I: IntoIterator<Item = Option<Term<'a>>>>(&self, terms: I) -> TermGroup {
        let mut ids: Vec<TermId> = Vec::new();
        for term in terms.into_iter().flatten() {
            ids.push(term.id().clone());
            ids.extend(term.all_parent_ids().iter().cloned());
        }
        TermGroup::from_unsorted(ids)
    }

    /// Returns the similarity of two ancestor closures
    ///
    /// If the denominator is `0.0`, e.g. because none of the terms has an
    /// information content, the similarity is `0.0`.
    pub fn score_closures(&self, query: &TermGroup, reference: &TermGroup, kind: ScoreKind) -> f64 {
        if query.is_empty() || reference.is_empty() {
            return 0.0;
        }

        let denominator = match kind {
            ScoreKind::Symmetric => self.table.total(&(query | reference)),
            ScoreKind::AgainstReference => self.table.total(reference),
        };
        if denominator == 0.0 {
            return 0.0;
        }

        self.table.total(&(query & reference)) / denominator
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{fixtures, Ontology, Settings};

    const EMPTY: [&str; 0] = [];

    fn setup() -> (Ontology, InformationContentTable) {
        let ontology = fixtures::ontology();
        let table =
            InformationContentTable::build(&ontology, &fixtures::corpus(), &Settings::default())
                .unwrap();
        (ontology, table)
    }

    #[test]
    fn identical_phenotypes() {
        let (ontology, table) = setup();
        let scorer = PhenotypeScorer::new(&ontology, &table);
        let p = ["HP:0100543", "HP:0011842", "HP:0001382"];

        assert!((scorer.score(&p, &p) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_phenotypes() {
        let (ontology, table) = setup();
        let scorer = PhenotypeScorer::new(&ontology, &table);
        let p = ["HP:0100543", "HP:0011842", "HP:0001382"];

        assert_eq!(scorer.score(&p, &EMPTY), 0.0);
        assert_eq!(scorer.score(&EMPTY, &p), 0.0);
        assert_eq!(scorer.score(&EMPTY, &EMPTY), 0.0);
        assert_eq!(scorer.score_against_reference(&p, &EMPTY), 0.0);
        assert_eq!(scorer.score_against_reference(&EMPTY, &p), 0.0);
    }

    #[test]
    fn unresolvable_terms() {
        let (ontology, table) = setup();
        let scorer = PhenotypeScorer::new(&ontology, &table);
        let p1 = ["HP:9999999"];
        let p2 = ["HP:0100543"];

        assert_eq!(scorer.score(&p1, &p2), 0.0);
        assert_eq!(scorer.score(&p2, &p1), 0.0);
    }

    #[test]
    fn terms_without_information_content() {
        // none of the terms in the nervous branch are annotated, so the
        // denominator is zero
        let (ontology, table) = setup();
        let scorer = PhenotypeScorer::new(&ontology, &table);
        let p1 = ["HP:9999999", "HP:0100543"];
        let p2 = ["HP:0100543"];

        assert_eq!(scorer.score(&p1, &p2), 0.0);
        assert_eq!(scorer.score(&p2, &p1), 0.0);
        assert_eq!(scorer.score_against_reference(&p1, &p2), 0.0);
    }

    #[test]
    fn null_terms_are_dropped_from_closure() {
        let (ontology, table) = setup();
        let scorer = PhenotypeScorer::new(&ontology, &table);

        let closure = scorer.ancestor_closure([None, ontology.term("HP:0000924")]);
        assert_eq!(closure.len(), 3);
        assert!(closure.contains("HP:0000001"));

        assert!(scorer.ancestor_closure([None]).is_empty());
        let none = scorer.ancestor_closure([None]);
        let some = scorer.ancestor_closure([ontology.term("HP:0000924")]);
        assert_eq!(scorer.score_closures(&none, &some, ScoreKind::Symmetric), 0.0);
    }

    #[test]
    fn reference_score_is_not_symmetric() {
        let (ontology, table) = setup();
        let scorer = PhenotypeScorer::new(&ontology, &table);
        let specific = ["HP:0001382"];
        let general = ["HP:0011729"];

        let covered = scorer.score_against_reference(&specific, &general);
        let partial = scorer.score_against_reference(&general, &specific);
        assert_eq!(covered, 1.0);
        assert!(partial < 1.0);
        assert_ne!(covered, partial);

        let general_ic = table.total(&scorer.ancestor_closure(scorer.resolve(&general)));
        let specific_ic = table.total(&scorer.ancestor_closure(scorer.resolve(&specific)));
        assert!((partial - general_ic / specific_ic).abs() < 1e-12);
        assert!((general_ic - fixtures::IC_JOINT_MOBILITY).abs() < 1e-8);
    }

    #[test]
    fn symmetry_and_bounds() {
        let (ontology, table) = setup();
        let scorer = PhenotypeScorer::new(&ontology, &table);
        let ids: Vec<&str> = ontology.iter().map(|t| t.id().as_str()).collect();

        for a in &ids {
            for b in &ids {
                let sets: [Vec<&str>; 2] = [vec![*a], vec![*a, *b]];
                for set in &sets {
                    let other = [*b];
                    let ab = scorer.score(set, &other);
                    let ba = scorer.score(&other, set);
                    assert_eq!(ab, ba);
                    assert!((0.0..=1.0).contains(&ab));
                    let r = scorer.score_against_reference(set, &other);
                    assert!((0.0..=1.0).contains(&r));
                }
            }
        }
    }

    #[test]
    fn partial_overlap() {
        let (ontology, table) = setup();
        let scorer = PhenotypeScorer::new(&ontology, &table);

        // closures share HP:0001367 and HP:0011729, the union adds HP:0001382
        let a = ["HP:0011729", "HP:0100543"];
        let b = ["HP:0001382"];
        let expected = (fixtures::IC_JOINT_MOBILITY + table.ic_or_zero("HP:0001367"))
            / (fixtures::IC_JOINT_MOBILITY
                + table.ic_or_zero("HP:0001367")
                + fixtures::IC_JOINT_HYPERMOBILITY);
        assert!((scorer.score(&a, &b) - expected).abs() < 1e-12);
    }
}
