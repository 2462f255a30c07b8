//! Ranks a few patients against a query phenotype and explains the matches
//!
//! Run with `RUST_LOG=info cargo run --example match_patients` to see the
//! initialization log.

use phenomatch::annotations::{Disease, DiseaseCorpus};
use phenomatch::patient::{Feature, Patient};
use phenomatch::{Ontology, PhenotypeEngine, Settings};

const TERMS: [(&str, &str, Option<&str>); 9] = [
    ("HP:0000001", "All", None),
    ("HP:0000118", "Phenotypic abnormality", Some("HP:0000001")),
    ("HP:0000707", "Abnormality of the nervous system", Some("HP:0000118")),
    ("HP:0100543", "Cognitive impairment", Some("HP:0000707")),
    ("HP:0001249", "Intellectual disability", Some("HP:0100543")),
    ("HP:0000924", "Abnormality of the skeletal system", Some("HP:0000118")),
    ("HP:0001367", "Abnormal joint morphology", Some("HP:0000924")),
    ("HP:0011729", "Abnormality of joint mobility", Some("HP:0001367")),
    ("HP:0001382", "Joint hypermobility", Some("HP:0011729")),
];

fn main() {
    simple_logger::init_with_env().unwrap();

    let mut ontology = Ontology::default();
    for (id, name, _) in TERMS {
        ontology.insert_term(name.to_string(), id);
    }
    for (id, _, parent) in TERMS {
        if let Some(parent) = parent {
            ontology.add_parent(parent, id).unwrap();
        }
    }
    ontology.create_cache();

    let mut corpus = DiseaseCorpus::default();
    for (mim, symptoms) in [
        ("MIM:1", vec!["HP:0011729", "HP:0001367"]),
        ("MIM:2", vec!["HP:0001382", "HP:0011729"]),
        ("MIM:3", vec!["HP:0001249", "HP:0001382"]),
    ] {
        let mut disease = Disease::new(mim.into(), mim);
        for symptom in symptoms {
            disease.add_symptom(symptom);
        }
        corpus.add_disease(disease);
    }

    let engine = PhenotypeEngine::initialize(ontology, &corpus, Settings::default()).unwrap();

    let mut ic: Vec<_> = engine.information_content().iter().collect();
    ic.sort_by(|a, b| a.0.cmp(b.0));
    for (id, ic) in ic {
        println!("{id}\t{ic:.4}");
    }

    let query = ["HP:0001382", "HP:0001249"];
    let mut patients = Vec::new();
    for (id, features) in [
        ("P1", vec![Feature::present("HP:0001382")]),
        ("P2", vec![Feature::present("HP:0011729"), Feature::present("HP:0001249")]),
        ("P3", vec![Feature::absent("HP:0001382"), Feature::present("HP:0100543")]),
    ] {
        let mut patient = Patient::new(id);
        for feature in features {
            patient.add_feature(feature);
        }
        patients.push(patient);
    }

    let scores = engine.patient_scorer().scores(&query, &patients);
    let mut ranked: Vec<_> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let scorer = engine.scorer();
    for (patient_id, score) in ranked {
        println!("{patient_id}\t{score:.4}");
        let Some(patient) = patients.iter().find(|p| p.id() == patient_id) else {
            continue;
        };
        for record in scorer.detailed_matches(&query, &patient.present_feature_ids()) {
            println!(
                "\t{} ({}) ~ {} ({}) via {} [{:.4}]",
                record.query().id(),
                record.query().label(),
                record.matched().id(),
                record.matched().label(),
                record.lca().label(),
                record.lca_ic(),
            );
        }
    }
}
