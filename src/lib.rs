#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

use thiserror::Error;

pub mod annotations;
pub mod engine;
pub mod information_content;
mod ontology;
pub mod patient;
pub mod provider;
pub mod similarity;
pub mod term;

pub use engine::{PhenotypeEngine, Settings};
pub use information_content::InformationContentTable;
pub use ontology::Ontology;
pub use provider::{AnnotationCorpus, TermGraph};
pub use similarity::{MatchRecord, PhenotypeScorer, ScoreKind};
pub use term::{Term, TermGroup, TermId};

/// Small value used to keep probabilities away from 0 and 1
pub const EPS: f64 = 1e-9;

/// The root of the phenotypic abnormality portion of HPO
pub const PHENOTYPE_ROOT: &str = "HP:0000118";

const DEFAULT_NUM_PARENTS: usize = 10;
const DEFAULT_NUM_ALL_PARENTS: usize = 30;
const DEFAULT_NUM_SYMPTOMS: usize = 20;

/// Main Error type for this crate
#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum PhenoError {
    /// The term does not exist in the ontology
    #[error("term does not exist")]
    DoesNotExist,
    /// The configured ontology root could not be resolved
    #[error("ontology root {0} does not exist")]
    MissingRoot(TermId),
    /// A provider failed to deliver its bulk listing
    #[error("provider error: {0}")]
    ProviderError(String),
    /// The symptom annotation of a disease is present but is not a collection
    #[error("disease {disease} has non-collection symptoms: {value}")]
    MalformedAnnotation {
        /// ID of the offending disease
        disease: String,
        /// The raw value of the symptom field
        value: String,
    },
    /// Input data is invalid
    #[error("Invalid input data: {0}")]
    InvalidInput(String),
}

/// Shortcut for `Result<T, PhenoError>`
pub type PhenoResult<T> = Result<T, PhenoError>;

/// Bound a probability to the open interval `(eps, 1 - eps)`
///
/// # Examples
///
/// ```
/// use phenomatch::{limit_prob, EPS};
///
/// assert_eq!(limit_prob(0.0, EPS), EPS);
/// assert_eq!(limit_prob(1.0, EPS), 1.0 - EPS);
/// assert_eq!(limit_prob(0.25, EPS), 0.25);
/// ```
pub fn limit_prob(prob: f64, eps: f64) -> f64 {
    prob.max(eps).min(1.0 - eps)
}

#[cfg(test)]
pub(crate) mod fixtures;
