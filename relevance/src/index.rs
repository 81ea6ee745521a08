use std::collections::HashMap;

/// Algorithm tag written alongside every serialized index.
pub const ALGORITHM: &str = "Okapi BM25+";
pub const VERSION: u32 = 1;

/// Corpus-wide statistics: document frequency per term and aggregate sizes.
///
/// Append-only. Counters are only ever increased by
/// [`add_document`](crate::add_document); removing a document from the
/// caller's collection does not retract its contribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusIndex {
    pub(crate) bag_of_words: HashMap<String, u32>,
    pub(crate) documents_number: u32,
    pub(crate) words_in_all_documents: u64,
}

impl CorpusIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    pub fn version(&self) -> u32 {
        VERSION
    }

    pub fn documents_number(&self) -> u32 {
        self.documents_number
    }

    pub fn words_in_all_documents(&self) -> u64 {
        self.words_in_all_documents
    }

    /// Number of documents containing `term`; 0 for unseen terms.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.bag_of_words.get(term).copied().unwrap_or(0)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.bag_of_words.iter().map(|(t, n)| (t.as_str(), *n))
    }

    pub fn is_empty(&self) -> bool {
        self.documents_number == 0
    }

    /// `None` until at least one document has been folded in.
    pub fn average_document_length(&self) -> Option<f64> {
        if self.documents_number == 0 {
            return None;
        }
        Some(self.words_in_all_documents as f64 / self.documents_number as f64)
    }

    /// Adds one document's statistics. Each distinct term counts once.
    pub(crate) fn fold<D>(&mut self, doc: &DocumentIndex<D>) {
        for term in doc.bag_of_words.keys() {
            *self.bag_of_words.entry(term.clone()).or_insert(0) += 1;
        }
        self.documents_number += 1;
        self.words_in_all_documents += u64::from(doc.words_number);
    }
}

/// Term frequencies of a single document, keyed by an opaque caller id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentIndex<D> {
    pub(crate) doc_id: D,
    pub(crate) bag_of_words: HashMap<String, u32>,
    pub(crate) words_number: u32,
}

impl<D> DocumentIndex<D> {
    pub(crate) fn empty(doc_id: D) -> Self {
        Self { doc_id, bag_of_words: HashMap::new(), words_number: 0 }
    }

    pub(crate) fn count(&mut self, lemma: &str) {
        match self.bag_of_words.get_mut(lemma) {
            Some(n) => *n += 1,
            None => {
                self.bag_of_words.insert(lemma.to_owned(), 1);
            }
        }
        self.words_number += 1;
    }

    pub fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    pub fn version(&self) -> u32 {
        VERSION
    }

    pub fn doc_id(&self) -> &D {
        &self.doc_id
    }

    pub fn into_doc_id(self) -> D {
        self.doc_id
    }

    /// Count of retained tokens, equal to the sum of all term frequencies.
    pub fn words_number(&self) -> u32 {
        self.words_number
    }

    pub fn term_frequency(&self, term: &str) -> u32 {
        self.bag_of_words.get(term).copied().unwrap_or(0)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.bag_of_words.iter().map(|(t, n)| (t.as_str(), *n))
    }

    pub fn is_empty(&self) -> bool {
        self.words_number == 0
    }
}

/// Relevance of one document. `per_word` breaks the total down by term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Score {
    pub total: f64,
    pub per_word: HashMap<String, f64>,
}

impl Score {
    pub(crate) fn add(&mut self, term: &str, value: f64) {
        self.total += value;
        *self.per_word.entry(term.to_owned()).or_insert(0.0) += value;
    }
}
