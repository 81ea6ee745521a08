//! Okapi BM25+ ranking over a caller-owned candidate set.
//!
//! Two entry points share the same weighting primitives:
//! [`find_relevant_for_phrase`] treats the query as a short human-typed phrase
//! whose terms are weighted by rarity alone, while [`find_relevant_documents`]
//! treats it as document-length text where repetition carries meaning.

use crate::error::{Error, Result};
use crate::index::{CorpusIndex, DocumentIndex, Score};
use crate::indexer::index_document;
use crate::tokenizer::Tokenizer;
use std::f64::consts::E;

/// Term-frequency saturation.
pub const K1: f64 = 1.4;
/// Document-length normalization.
pub const B: f64 = 0.75;
/// Results must score strictly above this to be returned.
pub const RELEVANCE_FLOOR: f64 = 1.0;

/// Weighting primitives bound to one corpus.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    corpus: &'a CorpusIndex,
    avg_len: f64,
}

impl<'a> Scorer<'a> {
    /// Fails with [`Error::EmptyCorpus`] when no document has been indexed yet.
    pub fn new(corpus: &'a CorpusIndex) -> Result<Self> {
        let avg_len = corpus.average_document_length().ok_or(Error::EmptyCorpus)?;
        Ok(Self { corpus, avg_len })
    }

    pub fn average_document_length(&self) -> f64 {
        self.avg_len
    }

    /// Inverse document frequency of `term`.
    ///
    /// Clamped to zero while the log argument is below `e`, so very common
    /// terms never pull a score down.
    pub fn idf(&self, term: &str) -> f64 {
        let n = f64::from(self.corpus.documents_number());
        let n_t = f64::from(self.corpus.document_frequency(term));
        let arg = 1.0 + (n - n_t + 0.5) / (n_t + 0.5);
        if arg < E {
            0.0
        } else {
            arg.ln()
        }
    }

    /// Saturated, length-normalized term frequency.
    ///
    /// A corpus whose documents all filtered down to nothing has no average
    /// length; the length ratio is taken as zero then.
    pub fn term_weight(&self, tf: u32, doc_len: u32) -> f64 {
        if tf == 0 {
            return 0.0;
        }
        let tf = f64::from(tf);
        let ratio = if self.avg_len > 0.0 { f64::from(doc_len) / self.avg_len } else { 0.0 };
        let norm = 1.0 - B + B * ratio;
        tf * (K1 + 1.0) / (tf + K1 * norm)
    }

    /// Sum of `query_weight(t) * weight(tf(t))` over pre-weighted query terms.
    pub fn score_weighted_terms<D>(&self, weights: &[(&str, f64)], doc: &DocumentIndex<D>) -> Score {
        let mut score = Score::default();
        for (term, query_weight) in weights {
            let tf = doc.term_frequency(term);
            if tf == 0 {
                continue;
            }
            score.add(term, query_weight * self.term_weight(tf, doc.words_number()));
        }
        score
    }

    /// IDF of every distinct phrase term; a typed phrase is weighted by rarity alone.
    pub fn phrase_weights<'q, Q>(&self, phrase: &'q DocumentIndex<Q>) -> Vec<(&'q str, f64)> {
        phrase
            .terms()
            .map(|(term, _)| (term, self.idf(term)))
            .filter(|(_, weight)| *weight > 0.0)
            .collect()
    }

    /// Weight of every term of a query document, from its own frequencies.
    pub fn query_weights<'q, Q>(&self, query: &'q DocumentIndex<Q>) -> Vec<(&'q str, f64)> {
        query
            .terms()
            .map(|(term, tf)| (term, self.idf(term) * self.term_weight(tf, query.words_number())))
            .filter(|(_, weight)| *weight > 0.0)
            .collect()
    }
}

/// Ranks `documents` against a human-typed `phrase`.
///
/// Each distinct phrase term counts once regardless of how often it was typed.
pub fn find_relevant_for_phrase<'d, D, T>(
    phrase: &str,
    limit: usize,
    corpus: &CorpusIndex,
    documents: impl IntoIterator<Item = &'d DocumentIndex<D>>,
    tokenizer: &T,
) -> Result<Vec<(&'d D, Score)>>
where
    D: 'd,
    T: Tokenizer + ?Sized,
{
    let scorer = Scorer::new(corpus)?;
    if limit == 0 {
        return Ok(Vec::new());
    }
    let query = index_document(phrase, (), tokenizer)?;
    let weights = scorer.phrase_weights(&query);
    if weights.is_empty() {
        return Ok(Vec::new());
    }

    let scored = documents
        .into_iter()
        .map(|doc| (doc.doc_id(), scorer.score_weighted_terms(&weights, doc)));
    let ranked = top_relevant(scored, limit);
    tracing::debug!(terms = weights.len(), results = ranked.len(), "ranked phrase");
    Ok(ranked)
}

/// Ranks `documents` by similarity to the document-length `query_text`.
pub fn find_relevant_documents<'d, D, T>(
    query_text: &str,
    limit: usize,
    corpus: &CorpusIndex,
    documents: impl IntoIterator<Item = &'d DocumentIndex<D>>,
    tokenizer: &T,
) -> Result<Vec<(&'d D, Score)>>
where
    D: 'd,
    T: Tokenizer + ?Sized,
{
    let scorer = Scorer::new(corpus)?;
    if limit == 0 {
        return Ok(Vec::new());
    }
    let query = index_document(query_text, (), tokenizer)?;
    let weights = scorer.query_weights(&query);
    if weights.is_empty() {
        return Ok(Vec::new());
    }

    let scored = documents
        .into_iter()
        .map(|doc| (doc.doc_id(), scorer.score_weighted_terms(&weights, doc)));
    let ranked = top_relevant(scored, limit);
    tracing::debug!(terms = weights.len(), results = ranked.len(), "ranked similar documents");
    Ok(ranked)
}

/// Drops scores at or below the floor, sorts descending and keeps `limit`.
/// Equal totals keep their input order.
fn top_relevant<'d, D: 'd>(
    scored: impl Iterator<Item = (&'d D, Score)>,
    limit: usize,
) -> Vec<(&'d D, Score)> {
    let mut hits: Vec<(&'d D, Score)> = scored.filter(|(_, s)| s.total > RELEVANCE_FLOOR).collect();
    hits.sort_by(|a, b| b.1.total.partial_cmp(&a.1.total).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(limit);
    hits
}
