//! Small ontology and disease corpus shared by the unit tests
//!
//! ```text
//! HP:0000001 All
//! └── HP:0000118 Phenotypic abnormality
//!     ├── HP:0000707 Abnormality of the nervous system
//!     │   └── HP:0002011 Morphological central nervous system abnormality
//!     │       └── HP:0011446 Abnormality of higher mental function
//!     │           └── HP:0100543 Cognitive impairment
//!     │               └── HP:0001249 Intellectual disability
//!     │                   └── HP:0001256 Intellectual disability, mild
//!     └── HP:0000924 Abnormality of the skeletal system
//!         └── HP:0011842 Abnormality of skeletal morphology
//!             └── HP:0001367 Abnormal joint morphology
//!                 └── HP:0011729 Abnormality of joint mobility
//!                     └── HP:0001382 Joint hypermobility
//! ```
//!
//! The corpus only annotates the skeletal branch:
//! `HP:0011729` twice, `HP:0001367` and `HP:0001382` once each.

use crate::annotations::{Disease, DiseaseCorpus, SymptomField};
use crate::Ontology;

const TERMS: [(&str, &str, Option<&str>); 13] = [
    ("HP:0000001", "All", None),
    ("HP:0000118", "Phenotypic abnormality", Some("HP:0000001")),
    ("HP:0000707", "Abnormality of the nervous system", Some("HP:0000118")),
    (
        "HP:0002011",
        "Morphological central nervous system abnormality",
        Some("HP:0000707"),
    ),
    (
        "HP:0011446",
        "Abnormality of higher mental function",
        Some("HP:0002011"),
    ),
    ("HP:0100543", "Cognitive impairment", Some("HP:0011446")),
    ("HP:0001249", "Intellectual disability", Some("HP:0100543")),
    ("HP:0001256", "Intellectual disability, mild", Some("HP:0001249")),
    ("HP:0000924", "Abnormality of the skeletal system", Some("HP:0000118")),
    ("HP:0011842", "Abnormality of skeletal morphology", Some("HP:0000924")),
    ("HP:0001367", "Abnormal joint morphology", Some("HP:0011842")),
    ("HP:0011729", "Abnormality of joint mobility", Some("HP:0001367")),
    ("HP:0001382", "Joint hypermobility", Some("HP:0011729")),
];

pub(crate) fn ontology() -> Ontology {
    let mut ontology = Ontology::default();
    for (id, name, _) in TERMS {
        ontology.insert_term(name.to_string(), id);
    }
    for (id, _, parent) in TERMS {
        if let Some(parent) = parent {
            ontology
                .add_parent(parent, id)
                .expect("fixture terms are all inserted");
        }
    }
    ontology.create_cache();
    ontology
}

pub(crate) fn corpus() -> DiseaseCorpus {
    let mut corpus = DiseaseCorpus::default();

    let mut arthritis = Disease::new("MIM:1".into(), "arthritis");
    arthritis.add_symptom("HP:0011729");
    arthritis.add_symptom("HP:0001367");
    corpus.add_disease(arthritis);

    let mut too_flexible = Disease::new("MIM:2".into(), "tooFlexible");
    too_flexible.add_symptom("HP:0001382");
    too_flexible.add_symptom("HP:0011729");
    corpus.add_disease(too_flexible);

    // stands in for a null symptom entry
    let mut normal = Disease::new("MIM:3".into(), "normal");
    normal.add_symptom("HP:9999999");
    corpus.add_disease(normal);

    corpus.add_disease(Disease::with_symptoms(
        "MIM:4".into(),
        "NullSymptoms",
        SymptomField::Missing,
    ));

    corpus
}

/// `-ln(0.75)`, the information content of `HP:0011729`
pub(crate) const IC_JOINT_MOBILITY: f64 = 0.287_682_072_451_780_9;

/// `-ln(0.25)`, the information content of `HP:0001382`
pub(crate) const IC_JOINT_HYPERMOBILITY: f64 = 1.386_294_361_119_890_6;
