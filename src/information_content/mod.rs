//! Precomputation of the information content of every ontology term
//!
//! The information content (IC) of a term is `-ln(p)`, where `p` is the
//! summed annotation frequency of the term and all of its descendants
//! (Resnik, 1995). Calculating it takes three steps:
//!
//! 1. [`DescendantIndex`]: the descendant set of every term below the root
//! 2. [`FrequencyDistribution`]: how often each term is annotated in the disease corpus
//! 3. [`InformationContentTable`]: the IC of each annotated term
//!
//! All three are built once and never updated. A changed ontology or corpus
//! requires building a new table.

use std::collections::hash_map::Iter;
use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::provider::{AnnotationCorpus, TermGraph};
use crate::term::TermId;
use crate::{limit_prob, PhenoError, PhenoResult, Settings};

mod descendants;
mod frequency;

pub use descendants::{children_map, ChildrenMap, DescendantIndex};
pub use frequency::FrequencyDistribution;

/// The information content of every term with annotation mass above `eps`
///
/// A term that is missing from the table has an information content of `0.0`
/// for all downstream calculations.
///
/// For every term `t` and descendant `d` of `t` that are both present in the
/// table, `IC(t) <= IC(d)` holds, because the mass of `t` includes the mass of `d`.
///
/// # Examples
///
/// ```
/// use phenomatch::annotations::{Disease, DiseaseCorpus};
/// use phenomatch::{InformationContentTable, Ontology, Settings};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("Phenotypic abnormality".into(), "HP:0000118");
/// ontology.insert_term("Foo".into(), "HP:0000002");
/// ontology.insert_term("Bar".into(), "HP:0000003");
/// ontology.add_parent("HP:0000118", "HP:0000002").unwrap();
/// ontology.add_parent("HP:0000002", "HP:0000003").unwrap();
/// ontology.create_cache();
///
/// let mut disease = Disease::new("MIM:1".into(), "Foobar disease");
/// disease.add_symptom("HP:0000002");
/// disease.add_symptom("HP:0000003");
/// let mut corpus = DiseaseCorpus::default();
/// corpus.add_disease(disease);
///
/// let table = InformationContentTable::build(&ontology, &corpus, &Settings::default()).unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert!((table.ic_or_zero("HP:0000003") - 2f64.ln()).abs() < 1e-12);
/// assert!(table.ic_or_zero("HP:0000002") < 1e-8);
/// // The root itself was never annotated
/// assert_eq!(table.get("HP:0000118"), None);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InformationContentTable {
    ics: HashMap<TermId, f64>,
}

impl InformationContentTable {
    /// Pulls all terms and diseases from the providers and calculates the table
    ///
    /// # Errors
    ///
    /// - [`PhenoError::MissingRoot`] if the root of `settings` does not exist
    /// - [`PhenoError::ProviderError`] if a provider cannot list its records
    /// - [`PhenoError::MalformedAnnotation`] if a disease has non-collection symptoms
    /// - [`PhenoError::InvalidInput`] if the epsilon is not within `(0.0, 0.5)`
    pub fn build<G: TermGraph, C: AnnotationCorpus>(
        graph: &G,
        corpus: &C,
        settings: &Settings,
    ) -> PhenoResult<Self> {
        let eps = settings.epsilon();
        if !(eps > 0.0 && eps < 0.5) {
            return Err(PhenoError::InvalidInput(format!(
                "epsilon must be within (0.0, 0.5), was {eps}"
            )));
        }

        let root = graph
            .term(settings.root().as_str())
            .ok_or_else(|| PhenoError::MissingRoot(settings.root().clone()))?;

        info!("Getting all children of ontology terms...");
        let terms = graph.all_terms(settings.vocabulary())?;
        info!("  ... found {} entries.", terms.len());
        let children = children_map(&terms);
        let descendants = DescendantIndex::build(root.id(), &children);

        let diseases = corpus.diseases(settings.disease_vocabulary())?;
        info!("  ... found {} diseases.", diseases.len());
        let frequencies =
            FrequencyDistribution::estimate(&diseases, graph, &descendants, eps)?;

        Ok(Self::from_parts(&frequencies, &descendants, root.id(), eps))
    }

    /// Calculates the table from a frequency distribution and descendant index
    ///
    /// The probability mass of every annotated term is the summed frequency of
    /// all of its descendants. Terms with a mass of at most `eps` are left out.
    pub fn from_parts(
        frequencies: &FrequencyDistribution,
        descendants: &DescendantIndex,
        root: &TermId,
        eps: f64,
    ) -> Self {
        let mut ics = HashMap::with_capacity(frequencies.len());

        for (term, _) in frequencies.iter() {
            let Some(term_descendants) = descendants.get(term.as_str()) else {
                warn!("Found no descendants of term: {}", term);
                continue;
            };
            let prob_mass = frequencies.mass(term_descendants);

            if term == root {
                if (prob_mass - 1.0).abs() > 1e-6 {
                    warn!("Probability mass under {} should be 1.0, was: {:.6}", root, prob_mass);
                } else {
                    debug!("Probability mass under {}: {:.6}", root, prob_mass);
                }
            }

            if prob_mass > eps {
                ics.insert(term.clone(), -limit_prob(prob_mass, eps).ln());
            }
        }
        info!("Calculated information content of {} terms", ics.len());
        Self { ics }
    }

    /// Returns the information content of the term, if present
    pub fn get(&self, id: &str) -> Option<f64> {
        self.ics.get(id).copied()
    }

    /// Returns the information content of the term or `0.0` if it is not present
    pub fn ic_or_zero(&self, id: &str) -> f64 {
        self.get(id).unwrap_or(0.0)
    }

    /// Returns the summed information content of all given terms
    ///
    /// Terms that are missing from the table contribute nothing.
    pub fn total<'a, I: IntoIterator<Item = &'a TermId>>(&self, terms: I) -> f64 {
        terms
            .into_iter()
            .map(|id| self.ic_or_zero(id.as_str()))
            .sum()
    }

    /// Returns the number of terms with an information content
    pub fn len(&self) -> usize {
        self.ics.len()
    }

    /// Returns `true` if no term has an information content
    pub fn is_empty(&self) -> bool {
        self.ics.is_empty()
    }

    /// Returns an iterator of all terms with their information content
    pub fn iter(&self) -> Iter<'_, TermId, f64> {
        self.ics.iter()
    }
}
