//! Scoring patients against a phenotype
//!
//! A [`Patient`] carries a list of [`Feature`]s: ontology terms that were
//! observed (present) or explicitly ruled out (absent). Only present features
//! that resolve in the term graph are scored.

use std::collections::HashMap;

use tracing::debug;

use crate::provider::TermGraph;
use crate::similarity::{PhenotypeScorer, ScoreKind};

/// A single phenotypic feature of a patient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    id: String,
    present: bool,
}

impl Feature {
    /// A feature that was observed in the patient
    pub fn present(id: &str) -> Self {
        Self {
            id: id.to_string(),
            present: true,
        }
    }

    /// A feature that was ruled out for the patient
    pub fn absent(id: &str) -> Self {
        Self {
            id: id.to_string(),
            present: false,
        }
    }

    /// Returns the term id of the feature
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `true` if the feature was observed
    pub fn is_present(&self) -> bool {
        self.present
    }
}

/// A patient with an id and phenotypic features
#[derive(Debug, Clone, Default)]
pub struct Patient {
    id: String,
    features: Vec<Feature>,
}

impl Patient {
    /// Constructs a new patient without features
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            features: Vec::new(),
        }
    }

    /// Adds a feature to the patient
    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Returns the id of the patient
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns all features of the patient
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Returns the term ids of all present features
    pub fn present_feature_ids(&self) -> Vec<&str> {
        self.features
            .iter()
            .filter(|feature| feature.is_present())
            .map(Feature::id)
            .collect()
    }
}

/// Scores patients against a phenotype with the symmetric similarity score
///
/// # Examples
///
/// ```
/// use phenomatch::annotations::{Disease, DiseaseCorpus};
/// use phenomatch::patient::{Feature, Patient};
/// use phenomatch::{Ontology, PhenotypeEngine, Settings};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("Phenotypic abnormality".into(), "HP:0000118");
/// ontology.insert_term("Foo".into(), "HP:0000002");
/// ontology.insert_term("Bar".into(), "HP:0000003");
/// ontology.add_parent("HP:0000118", "HP:0000002").unwrap();
/// ontology.add_parent("HP:0000118", "HP:0000003").unwrap();
/// ontology.create_cache();
///
/// let mut corpus = DiseaseCorpus::default();
/// let mut disease = Disease::new("MIM:1".into(), "Foobar disease");
/// disease.add_symptom("HP:0000002");
/// disease.add_symptom("HP:0000003");
/// corpus.add_disease(disease);
///
/// let engine = PhenotypeEngine::initialize(ontology, &corpus, Settings::default()).unwrap();
///
/// let mut patient = Patient::new("P1");
/// patient.add_feature(Feature::present("HP:0000002"));
/// patient.add_feature(Feature::absent("HP:0000003"));
///
/// let scores = engine.patient_scorer().scores(&["HP:0000002"], [&patient]);
/// assert_eq!(scores["P1"], 1.0);
/// ```
pub struct PatientScorer<'a, G> {
    scorer: PhenotypeScorer<'a, G>,
}

impl<'a, G: TermGraph> PatientScorer<'a, G> {
    /// Constructs a new `PatientScorer`
    pub fn new(scorer: PhenotypeScorer<'a, G>) -> Self {
        Self { scorer }
    }

    /// Returns the score of every patient, keyed by patient id
    pub fn scores<'p, S, I>(&self, phenotype: &[S], patients: I) -> HashMap<&'p str, f64>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = &'p Patient>,
    {
        let phenotype = self
            .scorer
            .ancestor_closure(self.scorer.resolve(phenotype));

        let scores: HashMap<&'p str, f64> = patients
            .into_iter()
            .map(|patient| {
                let features = self
                    .scorer
                    .ancestor_closure(self.scorer.resolve(&patient.present_feature_ids()));
                let score = self
                    .scorer
                    .score_closures(&phenotype, &features, ScoreKind::Symmetric);
                (patient.id(), score)
            })
            .collect();
        debug!("Scored {} patients", scores.len());
        scores
    }
}
