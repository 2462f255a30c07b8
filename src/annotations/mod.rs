//! Diseases are annotated with the ontology terms observed in them
//!
//! The annotation corpus is only used to estimate how frequent each term is.
//! Disease records are read once during initialization and are not retained.

mod disease;
pub use disease::{Disease, DiseaseCorpus, DiseaseId, SymptomField};
