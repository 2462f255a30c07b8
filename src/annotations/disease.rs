use std::fmt::Display;

use tracing::error;

use crate::provider::AnnotationCorpus;
use crate::{PhenoError, PhenoResult, DEFAULT_NUM_SYMPTOMS};

/// A unique identifier for a [`Disease`], e.g. `MIM:101600`
#[derive(Clone, Debug, Default, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct DiseaseId {
    inner: String,
}

impl DiseaseId {
    /// Returns the id as string slice
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl From<&str> for DiseaseId {
    fn from(s: &str) -> Self {
        Self {
            inner: s.to_string(),
        }
    }
}

impl Display for DiseaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// The raw symptom annotation of a disease record, as the corpus delivers it
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SymptomField {
    /// The record has no symptom annotation at all
    #[default]
    Missing,
    /// A collection of annotated term ids
    Collection(Vec<String>),
    /// The field is present but holds something other than a collection
    Unrecognized(String),
}

/// A single disease record
///
/// A disease has a unique [`DiseaseId`], a name and a
/// [`SymptomField`] with the term ids annotated to it.
///
/// # Examples
///
/// ```
/// use phenomatch::annotations::Disease;
///
/// let mut disease = Disease::new("MIM:1".into(), "Arthritis");
/// assert_eq!(disease.annotated_symptom_ids().unwrap(), None);
///
/// disease.add_symptom("HP:0011729");
/// disease.add_symptom("HP:0001367");
/// assert_eq!(disease.annotated_symptom_ids().unwrap().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Disease {
    id: DiseaseId,
    name: String,
    symptoms: SymptomField,
}

impl Disease {
    /// Initializes a new disease without symptom annotations
    pub fn new(id: DiseaseId, name: &str) -> Disease {
        Disease {
            id,
            name: name.to_string(),
            symptoms: SymptomField::Missing,
        }
    }

    /// Initializes a new disease with the given symptom field
    pub fn with_symptoms(id: DiseaseId, name: &str, symptoms: SymptomField) -> Disease {
        Disease {
            id,
            name: name.to_string(),
            symptoms,
        }
    }

    /// Returns the [`DiseaseId`] of the disease
    pub fn id(&self) -> &DiseaseId {
        &self.id
    }

    /// Returns the name of the disease
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw symptom field
    pub fn symptoms(&self) -> &SymptomField {
        &self.symptoms
    }

    /// Annotates another term id to the disease
    ///
    /// A `Missing` field becomes a collection. An `Unrecognized` field
    /// stays as it is and the id is not added.
    pub fn add_symptom(&mut self, term_id: &str) -> bool {
        match &mut self.symptoms {
            SymptomField::Collection(ids) => {
                ids.push(term_id.to_string());
                true
            }
            SymptomField::Missing => {
                let mut ids = Vec::with_capacity(DEFAULT_NUM_SYMPTOMS);
                ids.push(term_id.to_string());
                self.symptoms = SymptomField::Collection(ids);
                true
            }
            SymptomField::Unrecognized(_) => false,
        }
    }

    /// Returns the annotated term ids, or `None` if the disease has no annotation
    ///
    /// # Errors
    ///
    /// Returns [`PhenoError::MalformedAnnotation`] if the symptom field is
    /// present but not a collection of ids
    pub fn annotated_symptom_ids(&self) -> PhenoResult<Option<&[String]>> {
        match &self.symptoms {
            SymptomField::Missing => Ok(None),
            SymptomField::Collection(ids) => Ok(Some(ids.as_slice())),
            SymptomField::Unrecognized(value) => {
                error!("Non-collection symptoms in {}: {}", self.id, value);
                Err(PhenoError::MalformedAnnotation {
                    disease: self.id.to_string(),
                    value: value.clone(),
                })
            }
        }
    }
}

impl PartialEq for Disease {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Disease {}

/// An in-memory [`AnnotationCorpus`] of [`Disease`]s
///
/// # Examples
///
/// ```
/// use phenomatch::AnnotationCorpus;
/// use phenomatch::annotations::{Disease, DiseaseCorpus};
///
/// let mut corpus = DiseaseCorpus::new("MIM");
/// corpus.add_disease(Disease::new("MIM:1".into(), "Arthritis"));
///
/// assert_eq!(corpus.len(), 1);
/// assert_eq!(corpus.diseases("MIM").unwrap().len(), 1);
/// assert!(corpus.diseases("ORPHA").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DiseaseCorpus {
    vocabulary: String,
    diseases: Vec<Disease>,
}

impl Default for DiseaseCorpus {
    fn default() -> Self {
        DiseaseCorpus::new("MIM")
    }
}

impl DiseaseCorpus {
    /// Constructs a new, empty corpus for the given vocabulary
    pub fn new(vocabulary: &str) -> Self {
        Self {
            vocabulary: vocabulary.to_string(),
            diseases: Vec::new(),
        }
    }

    /// Adds a disease record to the corpus
    pub fn add_disease(&mut self, disease: Disease) {
        self.diseases.push(disease);
    }

    /// Returns the number of disease records
    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    /// Returns `true` if the corpus has no disease records
    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}

impl AnnotationCorpus for DiseaseCorpus {
    fn diseases(&self, vocabulary: &str) -> PhenoResult<Vec<Disease>> {
        if vocabulary != self.vocabulary {
            return Err(PhenoError::ProviderError(format!(
                "unknown vocabulary {vocabulary}, expected {}",
                self.vocabulary
            )));
        }
        Ok(self.diseases.clone())
    }
}
