//! JSON wire format for [`CorpusIndex`] and [`DocumentIndex`].
//!
//! Term maps are written as lists of `[term, count]` pairs rather than JSON
//! objects so that no term can collide with a reserved key in a consumer's
//! object model. Pairs are sorted by term, so equal indexes encode to equal
//! bytes.

use crate::error::{Error, Result};
use crate::index::{CorpusIndex, DocumentIndex, ALGORITHM, VERSION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Deserialize)]
struct Header {
    algorithm: String,
    version: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CorpusRecord<S> {
    algorithm: S,
    version: u32,
    documents_number: u32,
    words_in_all_documents: u64,
    bag_of_words: Vec<(S, u32)>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct DocumentRecord<S, D> {
    algorithm: S,
    version: u32,
    doc_id: D,
    words_number: u32,
    bag_of_words: Vec<(S, u32)>,
}

pub fn serialize_corpus_index(corpus: &CorpusIndex) -> Result<Vec<u8>> {
    let record = CorpusRecord {
        algorithm: ALGORITHM,
        version: VERSION,
        documents_number: corpus.documents_number,
        words_in_all_documents: corpus.words_in_all_documents,
        bag_of_words: sorted_pairs(&corpus.bag_of_words),
    };
    Ok(serde_json::to_vec(&record)?)
}

pub fn deserialize_corpus_index(bytes: &[u8]) -> Result<CorpusIndex> {
    check_header(bytes)?;
    let record: CorpusRecord<String> = serde_json::from_slice(bytes)?;
    let documents_number = record.documents_number;
    let bag_of_words = collect_pairs(record.bag_of_words, |term, count| {
        if count > documents_number {
            return Err(Error::Malformed(format!(
                "term {term:?} appears in {count} documents but the corpus has {documents_number}"
            )));
        }
        Ok(())
    })?;
    Ok(CorpusIndex {
        bag_of_words,
        documents_number,
        words_in_all_documents: record.words_in_all_documents,
    })
}

pub fn serialize_document_index<D: Serialize>(doc: &DocumentIndex<D>) -> Result<Vec<u8>> {
    let record = DocumentRecord {
        algorithm: ALGORITHM,
        version: VERSION,
        doc_id: &doc.doc_id,
        words_number: doc.words_number,
        bag_of_words: sorted_pairs(&doc.bag_of_words),
    };
    Ok(serde_json::to_vec(&record)?)
}

pub fn deserialize_document_index<D: DeserializeOwned>(bytes: &[u8]) -> Result<DocumentIndex<D>> {
    check_header(bytes)?;
    let record: DocumentRecord<String, D> = serde_json::from_slice(bytes)?;
    let bag_of_words = collect_pairs(record.bag_of_words, |_, _| Ok(()))?;
    let total: u64 = bag_of_words.values().map(|&n| u64::from(n)).sum();
    if total != u64::from(record.words_number) {
        return Err(Error::Malformed(format!(
            "wordsNumber is {} but term counts add up to {total}",
            record.words_number
        )));
    }
    Ok(DocumentIndex {
        doc_id: record.doc_id,
        bag_of_words,
        words_number: record.words_number,
    })
}

fn check_header(bytes: &[u8]) -> Result<()> {
    let header: Header = serde_json::from_slice(bytes)?;
    if header.algorithm != ALGORITHM || header.version != VERSION {
        return Err(Error::IncompatibleVersion {
            algorithm: header.algorithm,
            version: header.version,
        });
    }
    Ok(())
}

fn sorted_pairs(bag: &HashMap<String, u32>) -> Vec<(&str, u32)> {
    let mut pairs: Vec<(&str, u32)> = bag.iter().map(|(t, n)| (t.as_str(), *n)).collect();
    pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
    pairs
}

fn collect_pairs<F>(pairs: Vec<(String, u32)>, check: F) -> Result<HashMap<String, u32>>
where
    F: Fn(&str, u32) -> Result<()>,
{
    let mut bag = HashMap::with_capacity(pairs.len());
    for (term, count) in pairs {
        if count == 0 {
            return Err(Error::Malformed(format!("term {term:?} has a zero count")));
        }
        check(&term, count)?;
        if bag.insert(term.clone(), count).is_some() {
            return Err(Error::Malformed(format!("term {term:?} is listed twice")));
        }
    }
    Ok(bag)
}
