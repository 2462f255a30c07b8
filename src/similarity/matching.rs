use tracing::warn;

use crate::provider::TermGraph;
use crate::similarity::PhenotypeScorer;
use crate::term::{Term, TermGroup, TermId};

/// A term of a [`MatchRecord`] with its label and information content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedTerm<'a> {
    id: &'a TermId,
    label: &'a str,
    ic: Option<f64>,
}

impl<'a> MatchedTerm<'a> {
    /// Returns the id of the term
    pub fn id(&self) -> &'a TermId {
        self.id
    }

    /// Returns the name of the term
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// Returns the information content of the term, if it has one
    pub fn ic(&self) -> Option<f64> {
        self.ic
    }
}

/// The pairing of a query term with a matched term via their most
/// informative common ancestor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchRecord<'a> {
    query: MatchedTerm<'a>,
    matched: MatchedTerm<'a>,
    lca: MatchedTerm<'a>,
}

impl<'a> MatchRecord<'a> {
    /// Returns the term from the query
    pub fn query(&self) -> &MatchedTerm<'a> {
        &self.query
    }

    /// Returns the term from the match pool it was paired with
    pub fn matched(&self) -> &MatchedTerm<'a> {
        &self.matched
    }

    /// Returns the common ancestor with the highest information content
    pub fn lca(&self) -> &MatchedTerm<'a> {
        &self.lca
    }

    /// Returns the information content of the common ancestor
    pub fn lca_ic(&self) -> f64 {
        self.lca.ic.unwrap_or(0.0)
    }
}

/// Term matching
impl<'a, G: TermGraph> PhenotypeScorer<'a, G> {
    /// Pairs every query term with its best match from a pool of terms
    ///
    /// Returns at most one [`MatchRecord`] per query term, in query order.
    /// Ids that do not resolve take no part in the matching.
    /// See [`PhenotypeScorer::match_terms`] for the details.
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
    /// ontology.insert_term("Baz".into(), "HP:0000004");
    /// ontology.add_parent("HP:0000118", "HP:0000002").unwrap();
    /// ontology.add_parent("HP:0000002", "HP:0000003").unwrap();
    /// ontology.add_parent("HP:0000002", "HP:0000004").unwrap();
    /// ontology.create_cache();
    ///
    /// let mut corpus = DiseaseCorpus::default();
    /// let mut disease = Disease::new("MIM:1".into(), "Foobar disease");
    /// disease.add_symptom("HP:0000003");
    /// disease.add_symptom("HP:0000004");
    /// corpus.add_disease(disease);
    ///
    /// let table = InformationContentTable::build(&ontology, &corpus, &Settings::default()).unwrap();
    /// let scorer = PhenotypeScorer::new(&ontology, &table);
    ///
    /// let matches = scorer.detailed_matches(&["HP:0000003"], &["HP:0000004", "HP:0000003"]);
    /// assert_eq!(matches.len(), 1);
    /// assert_eq!(matches[0].matched().id().as_str(), "HP:0000003");
    /// assert_eq!(matches[0].lca().label(), "Bar");
    /// ```
    pub fn detailed_matches<A: AsRef<str>, B: AsRef<str>>(
        &self,
        query: &[A],
        matches: &[B],
    ) -> Vec<MatchRecord<'a>> {
        let query = self.resolve(query);
        let mut pool: Vec<Term<'a>> = self.resolve(matches).into_iter().flatten().collect();
        self.match_terms(query, &mut pool)
    }

    /// Greedily pairs every query term with its best match from `pool`
    ///
    /// The query terms are processed in order. For each one, every term still
    /// in the pool is compared and the one whose best common ancestor has the
    /// highest information content wins. Only ancestors with an information
    /// content above `0.0` count. On ties, the candidate that comes first in
    /// the pool is kept.
    ///
    /// The winning term is removed from `pool` and cannot be matched by a later
    /// query term, even if it would fit that one better. Matching stops once
    /// the pool is empty. Pass a copy of the pool if you need it afterwards.
    pub fn match_terms<I: IntoIterator<Item = Option<Term<'a>>>>(
        &self,
        query: I,
        pool: &mut Vec<Term<'a>>,
    ) -> Vec<MatchRecord<'a>> {
        let mut result = Vec::new();
        let mut pool_closures: Vec<TermGroup> =
            pool.iter().map(Term::ancestors_and_self).collect();

        for term in query {
            if pool.is_empty() {
                break;
            }
            let Some(term) = term else {
                continue;
            };
            let closure = term.ancestors_and_self();

            let mut max_ic = 0.0;
            let mut best: Option<(usize, &TermId)> = None;
            for (idx, candidate_closure) in pool_closures.iter().enumerate() {
                if let Some((lca, ic)) = self.best_common_ancestor(&closure, candidate_closure) {
                    if ic > max_ic {
                        max_ic = ic;
                        best = Some((idx, lca));
                    }
                }
            }

            let Some((idx, lca_id)) = best else {
                continue;
            };
            let Some(lca) = self.graph.term(lca_id.as_str()) else {
                warn!("Common ancestor {} is not in the ontology", lca_id);
                continue;
            };
            let matched = pool.remove(idx);
            pool_closures.remove(idx);
            result.push(MatchRecord {
                query: self.matched_term(&term),
                matched: self.matched_term(&matched),
                lca: self.matched_term(&lca),
            });
        }
        result
    }

    /// Returns the common ancestor with the highest information content
    ///
    /// Both arguments are ancestor closures. Ancestors without information
    /// content are never returned. Ties are won by the ancestor that comes
    /// first in id order.
    fn best_common_ancestor<'c>(
        &self,
        a: &TermGroup,
        b: &'c TermGroup,
    ) -> Option<(&'c TermId, f64)> {
        let mut max_ic = 0.0;
        let mut best = None;
        for ancestor in b.iter().filter(|id| a.contains(id.as_str())) {
            if let Some(ic) = self.table.get(ancestor.as_str()) {
                if ic > max_ic {
                    max_ic = ic;
                    best = Some((ancestor, ic));
                }
            }
        }
        best
    }

    fn matched_term(&self, term: &Term<'a>) -> MatchedTerm<'a> {
        MatchedTerm {
            id: term.id(),
            label: term.name(),
            ic: self.table.get(term.id().as_str()),
        }
    }
}
