//! One-shot initialization of the phenotype similarity engine

use tracing::info;

use crate::patient::PatientScorer;
use crate::provider::{AnnotationCorpus, TermGraph};
use crate::similarity::PhenotypeScorer;
use crate::term::TermId;
use crate::{InformationContentTable, PhenoResult, EPS, PHENOTYPE_ROOT};

/// Configuration of the engine
///
/// # Examples
///
/// ```
/// use phenomatch::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.root().as_str(), "HP:0000118");
/// assert_eq!(settings.vocabulary(), "HPO");
/// assert_eq!(settings.disease_vocabulary(), "MIM");
/// assert_eq!(settings.epsilon(), 1e-9);
///
/// let settings = Settings::default().with_root("HP:0000001");
/// assert_eq!(settings.root().as_str(), "HP:0000001");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    root: TermId,
    vocabulary: String,
    disease_vocabulary: String,
    epsilon: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PHENOTYPE_ROOT.into(),
            vocabulary: "HPO".to_string(),
            disease_vocabulary: "MIM".to_string(),
            epsilon: EPS,
        }
    }
}

impl Settings {
    /// The root term of the descendant index
    ///
    /// Only terms below the root take part in the frequency estimation
    pub fn root(&self) -> &TermId {
        &self.root
    }

    /// The vocabulary requested from the [`TermGraph`]
    pub fn vocabulary(&self) -> &str {
        &self.vocabulary
    }

    /// The vocabulary requested from the [`AnnotationCorpus`]
    pub fn disease_vocabulary(&self) -> &str {
        &self.disease_vocabulary
    }

    /// Probabilities are clamped to `(epsilon, 1 - epsilon)`
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Sets the root term
    #[must_use]
    pub fn with_root<I: Into<TermId>>(mut self, root: I) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the term vocabulary
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: &str) -> Self {
        self.vocabulary = vocabulary.to_string();
        self
    }

    /// Sets the disease vocabulary
    #[must_use]
    pub fn with_disease_vocabulary(mut self, vocabulary: &str) -> Self {
        self.disease_vocabulary = vocabulary.to_string();
        self
    }

    /// Sets the probability clamp
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// The phenotype similarity engine
///
/// `PhenotypeEngine` owns the term graph and the immutable
/// [`InformationContentTable`] calculated from it. Once initialized, any
/// number of threads can score and match phenotypes through
/// [`PhenotypeEngine::scorer`] without locking: no query mutates the engine.
///
/// ```mermaid
/// graph LR
///     G[TermGraph] --> D[DescendantIndex]
///     C[AnnotationCorpus] --> F[FrequencyDistribution]
///     D --> F
///     D --> I[InformationContentTable]
///     F --> I
///     I --> S[PhenotypeScorer]
///     G --> S
/// ```
///
/// There is no incremental update. If the ontology or the corpus change,
/// initialize a new engine and drop the old one.
///
/// # Examples
///
/// ```
/// use phenomatch::annotations::{Disease, DiseaseCorpus};
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
/// let mut disease = Disease::new("MIM:1".into(), "Foobar disease");
/// disease.add_symptom("HP:0000002");
/// disease.add_symptom("HP:0000003");
/// let mut corpus = DiseaseCorpus::default();
/// corpus.add_disease(disease);
///
/// let engine = PhenotypeEngine::initialize(ontology, &corpus, Settings::default()).unwrap();
/// let scorer = engine.scorer();
///
/// assert_eq!(scorer.score(&["HP:0000002"], &["HP:0000002"]), 1.0);
/// assert_eq!(scorer.score(&["HP:0000002"], &["HP:0000003"]), 0.0);
/// assert_eq!(scorer.score(&["HP:0000002"], &[] as &[&str]), 0.0);
/// ```
#[derive(Debug)]
pub struct PhenotypeEngine<G> {
    graph: G,
    table: InformationContentTable,
    settings: Settings,
}

impl<G: TermGraph> PhenotypeEngine<G> {
    /// Builds all tables from the providers
    ///
    /// This is a blocking batch step and must finish before any query is served.
    ///
    /// # Errors
    ///
    /// Fails if the root term cannot be resolved, if a provider cannot deliver
    /// its records or if the annotation corpus is malformed.
    /// See [`InformationContentTable::build`].
    pub fn initialize<C: AnnotationCorpus>(
        graph: G,
        corpus: &C,
        settings: Settings,
    ) -> PhenoResult<Self> {
        info!("Initializing...");
        let table = InformationContentTable::build(&graph, corpus, &settings)?;
        info!("Initialized.");
        Ok(Self {
            graph,
            table,
            settings,
        })
    }

    /// Returns a scorer for symmetric and asymmetric scores and term matches
    pub fn scorer(&self) -> PhenotypeScorer<'_, G> {
        PhenotypeScorer::new(&self.graph, &self.table)
    }

    /// Returns a scorer that compares patients to a phenotype
    pub fn patient_scorer(&self) -> PatientScorer<'_, G> {
        PatientScorer::new(self.scorer())
    }

    /// Returns the term graph
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Returns the information content table
    pub fn information_content(&self) -> &InformationContentTable {
        &self.table
    }

    /// Returns the settings the engine was initialized with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
