use std::collections::hash_map::Iter;
use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::annotations::Disease;
use crate::information_content::DescendantIndex;
use crate::provider::TermGraph;
use crate::term::{TermGroup, TermId};
use crate::{limit_prob, PhenoResult};

/// The observed frequency of every annotated term across all diseases
///
/// Each annotation of a term in a disease adds `1.0` to the raw count
/// of that term. The corpus does not carry reliable prevalence data for
/// the symptoms of a disease, so all annotations have the same weight.
/// After accumulation the counts are divided by the total and clamped to
/// `(eps, 1 - eps)`.
///
/// Annotations that do not resolve to a term of the universe are ignored
/// and collected for diagnostics.
#[derive(Debug, Default)]
pub struct FrequencyDistribution {
    frequencies: HashMap<TermId, f64>,
    total: f64,
    ignored: HashSet<String>,
}

impl FrequencyDistribution {
    /// Estimates the frequency distribution from the disease corpus
    ///
    /// # Errors
    ///
    /// Returns [`crate::PhenoError::MalformedAnnotation`] if any disease has a
    /// symptom field that is not a collection. The distribution cannot be
    /// trusted in that case.
    pub fn estimate<G: TermGraph>(
        diseases: &[Disease],
        graph: &G,
        universe: &DescendantIndex,
        eps: f64,
    ) -> PhenoResult<Self> {
        let mut counts: HashMap<TermId, f64> = HashMap::new();
        let mut total = 0.0;
        let mut ignored: HashSet<String> = HashSet::new();

        for disease in diseases {
            let Some(symptoms) = disease.annotated_symptom_ids()? else {
                continue;
            };
            for symptom in symptoms {
                let term_id = match graph.term(symptom) {
                    Some(term) if universe.contains(term.id().as_str()) => term.id(),
                    _ => {
                        ignored.insert(symptom.clone());
                        continue;
                    }
                };
                let freq = 1.0;
                total += freq;
                *counts.entry(term_id.clone()).or_insert(0.0) += freq;
            }
        }

        if !ignored.is_empty() {
            warn!("Ignored {} symptoms", ignored.len());
        }

        info!("Normalizing term frequency distribution...");
        for freq in counts.values_mut() {
            *freq = limit_prob(*freq / total, eps);
        }
        debug!(
            "{} terms annotated, {} annotations in total",
            counts.len(),
            total
        );

        Ok(Self {
            frequencies: counts,
            total,
            ignored,
        })
    }

    /// Returns the normalized frequency of the term, if it was annotated
    pub fn get(&self, id: &str) -> Option<f64> {
        self.frequencies.get(id).copied()
    }

    /// Returns the summed frequency of all terms of the group
    ///
    /// Terms without annotations contribute nothing.
    pub fn mass(&self, group: &TermGroup) -> f64 {
        group.iter().filter_map(|id| self.get(id.as_str())).sum()
    }

    /// Returns the total number of accumulated annotations
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Returns the raw ids of all annotations that were ignored
    pub fn ignored(&self) -> &HashSet<String> {
        &self.ignored
    }

    /// Returns the number of annotated terms
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns `true` if no term was annotated
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Returns an iterator of all annotated terms with their frequency
    pub fn iter(&self) -> Iter<'_, TermId, f64> {
        self.frequencies.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::annotations::{Disease, SymptomField};
    use crate::information_content::children_map;
    use crate::{fixtures, AnnotationCorpus, Ontology, PhenoError, EPS};

    fn flat_ontology() -> Ontology {
        let mut ontology = Ontology::default();
        ontology.insert_term("Root".into(), "R");
        for id in ["S1", "S2", "S3"] {
            ontology.insert_term(id.into(), id);
            ontology.add_parent("R", id).unwrap();
        }
        ontology.create_cache();
        ontology
    }

    fn universe(ontology: &Ontology, root: &str) -> DescendantIndex {
        let terms = ontology.all_terms("HPO").unwrap();
        DescendantIndex::build(&root.into(), &children_map(&terms))
    }

    fn disease(id: &str, symptoms: &[&str]) -> Disease {
        let mut disease = Disease::new(id.into(), id);
        for symptom in symptoms {
            disease.add_symptom(symptom);
        }
        disease
    }

    #[test]
    fn two_disease_corpus() {
        let ontology = flat_ontology();
        let universe = universe(&ontology, "R");
        let diseases = vec![disease("D1", &["S1", "S2"]), disease("D2", &["S2", "S3"])];

        let freqs = FrequencyDistribution::estimate(&diseases, &ontology, &universe, EPS).unwrap();

        assert_eq!(freqs.total(), 4.0);
        assert_eq!(freqs.len(), 3);
        assert_eq!(freqs.get("S1"), Some(0.25));
        assert_eq!(freqs.get("S2"), Some(0.5));
        assert_eq!(freqs.get("S3"), Some(0.25));
        assert_eq!(freqs.get("R"), None);
        assert!(freqs.ignored().is_empty());
    }

    #[test]
    fn single_annotation_is_clamped() {
        let ontology = flat_ontology();
        let universe = universe(&ontology, "R");
        let diseases = vec![disease("D1", &["S1"])];

        let freqs = FrequencyDistribution::estimate(&diseases, &ontology, &universe, EPS).unwrap();
        assert_eq!(freqs.get("S1"), Some(1.0 - EPS));
    }

    #[test]
    fn annotations_outside_universe_are_ignored() {
        let ontology = flat_ontology();
        let universe = universe(&ontology, "S1");
        let diseases = vec![disease("D1", &["S1", "S2", "S9", "S9"])];

        let freqs = FrequencyDistribution::estimate(&diseases, &ontology, &universe, EPS).unwrap();
        assert_eq!(freqs.total(), 1.0);
        assert_eq!(freqs.len(), 1);
        assert_eq!(freqs.ignored().len(), 2);
        assert!(freqs.ignored().contains("S2"));
        assert!(freqs.ignored().contains("S9"));
    }

    #[test]
    fn malformed_annotation_is_fatal() {
        let ontology = flat_ontology();
        let universe = universe(&ontology, "R");
        let diseases = vec![
            disease("D1", &["S1"]),
            Disease::with_symptoms(
                "D2".into(),
                "D2",
                SymptomField::Unrecognized("S2".to_string()),
            ),
        ];

        let res = FrequencyDistribution::estimate(&diseases, &ontology, &universe, EPS);
        assert!(matches!(res, Err(PhenoError::MalformedAnnotation { .. })));
    }

    #[test]
    fn fixture_corpus() {
        let ontology = fixtures::ontology();
        let universe = universe(&ontology, "HP:0000118");
        let diseases = fixtures::corpus().diseases("MIM").unwrap();

        let freqs = FrequencyDistribution::estimate(&diseases, &ontology, &universe, EPS).unwrap();
        assert_eq!(freqs.total(), 4.0);
        assert_eq!(freqs.get("HP:0011729"), Some(0.5));
        assert_eq!(freqs.get("HP:0001367"), Some(0.25));
        assert_eq!(freqs.get("HP:0001382"), Some(0.25));
        assert_eq!(freqs.ignored().len(), 1);

        let skeletal = universe.get("HP:0000924").unwrap();
        assert_eq!(freqs.mass(skeletal), 1.0);
    }
}
