//! Okapi BM25+ relevance ranking.
//!
//! A caller-owned [`CorpusIndex`] accumulates document frequencies as documents
//! are added with [`add_document`]; the returned [`DocumentIndex`] values are
//! kept by the caller and ranked later with [`find_relevant_for_phrase`] or
//! [`find_relevant_documents`]. Both index types round-trip through the JSON
//! format in [`codec`].
//!
//! ```
//! use relevance::{add_document, find_relevant_for_phrase, CorpusIndex, StemmingTokenizer};
//!
//! let tokenizer = StemmingTokenizer::new();
//! let mut corpus = CorpusIndex::new();
//! let docs = vec![
//!     add_document(&mut corpus, "Kayaking down the river at dawn", "river", &tokenizer)?,
//!     add_document(&mut corpus, "A long hike up the mountain", "mountain", &tokenizer)?,
//!     add_document(&mut corpus, "Camels crossing the desert", "desert", &tokenizer)?,
//!     add_document(&mut corpus, "Moss on the forest floor", "forest", &tokenizer)?,
//! ];
//! let hits = find_relevant_for_phrase("kayak", 10, &corpus, &docs, &tokenizer)?;
//! assert_eq!(hits.len(), 1);
//! assert_eq!(*hits[0].0, "river");
//! # Ok::<(), relevance::Error>(())
//! ```

pub mod codec;
pub mod error;
pub mod filter;
pub mod index;
pub mod indexer;
pub mod scorer;
pub mod tokenizer;

pub use codec::{
    deserialize_corpus_index, deserialize_document_index, serialize_corpus_index, serialize_document_index,
};
pub use error::{Error, Result};
pub use index::{CorpusIndex, DocumentIndex, Score, ALGORITHM, VERSION};
pub use indexer::{add_document, index_document};
pub use scorer::{find_relevant_documents, find_relevant_for_phrase, Scorer};
pub use tokenizer::{StemmingTokenizer, Token, TokenKind, Tokenizer};
