use crate::error::{Error, Result};
use crate::filter;
use crate::index::{CorpusIndex, DocumentIndex};
use crate::tokenizer::Tokenizer;

/// Indexes `text` under `doc_id` and folds its statistics into `corpus`.
///
/// The returned index is the caller's to keep; the corpus only remembers the
/// aggregate counts. Text with no surviving tokens still counts as a document.
pub fn add_document<D, T>(
    corpus: &mut CorpusIndex,
    text: &str,
    doc_id: D,
    tokenizer: &T,
) -> Result<DocumentIndex<D>>
where
    T: Tokenizer + ?Sized,
{
    let doc = index_document(text, doc_id, tokenizer)?;
    corpus.fold(&doc);
    tracing::debug!(
        terms = doc.bag_of_words.len(),
        words = doc.words_number,
        documents = corpus.documents_number,
        "indexed document"
    );
    Ok(doc)
}

/// Builds a document index without touching any corpus.
pub fn index_document<D, T>(text: &str, doc_id: D, tokenizer: &T) -> Result<DocumentIndex<D>>
where
    T: Tokenizer + ?Sized,
{
    let tokens = tokenizer.tokenize(text).map_err(Error::tokenizer)?;
    let mut doc = DocumentIndex::empty(doc_id);
    for token in tokens.iter().filter(|t| filter::retain(t)) {
        doc.count(&token.lemma);
    }
    Ok(doc)
}
