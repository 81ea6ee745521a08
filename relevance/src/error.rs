use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Ranking needs at least one document folded into the corpus to know the average length.
    #[error("empty corpus: no documents have been indexed")]
    EmptyCorpus,

    #[error("incompatible index version: found {algorithm:?} v{version}, expected {expected_algorithm:?} v{expected_version}", expected_algorithm = crate::index::ALGORITHM, expected_version = crate::index::VERSION)]
    IncompatibleVersion { algorithm: String, version: u32 },

    #[error("failed to parse serialized index: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed serialized index: {0}")]
    Malformed(String),

    #[error("tokenizer failed: {0}")]
    Tokenizer(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn tokenizer<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Tokenizer(Box::new(err))
    }
}
