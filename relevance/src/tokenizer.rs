//! Tokenizer boundary and the built-in stemming tokenizer.
//!
//! The engine only consumes `(lemma, kind)` pairs; anything that can produce
//! them deterministically can stand in for [`StemmingTokenizer`].

use crate::filter::is_stop_word;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use rust_stemmers::{Algorithm, Stemmer};
use std::convert::Infallible;
use unicode_normalization::UnicodeNormalization;

/// Classification attached to every token by a [`Tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Word,
    Number,
    Punctuation,
    Symbol,
    Emoticon,
    LineBreak,
    ParagraphBreak,
    /// Letters from a script the tokenizer has no rules for.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub lemma: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(lemma: impl Into<String>, kind: TokenKind) -> Self {
        Self { lemma: lemma.into(), kind }
    }
}

/// Converts raw text into an ordered sequence of tokens.
///
/// Implementations must return the same tokens for the same input.
pub trait Tokenizer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn tokenize(&self, text: &str) -> Result<Vec<Token>, Self::Error>;
}

lazy_static! {
    static ref RE: Regex = Regex::new(concat!(
        r"(?P<paragraph>\r?\n[ \t]*(?:\r?\n[ \t]*)+)",
        r"|(?P<line>\r?\n)",
        r#"|(?P<emoticon>[:;=]['^-]?(?:[)(\]\[|*]|[DPO]\b)|<3|\^_\^)"#,
        r"|(?P<emoji>\p{Extended_Pictographic}\x{FE0F}?)",
        r"|(?P<number>\p{N}+(?:[.,]\p{N}+)*)",
        r"|(?P<word>\p{L}[\p{L}\p{M}\p{N}_']*)",
        r"|(?P<punct>\p{P})",
        r"|(?P<symbol>\p{S})",
    ))
    .expect("valid regex");
    static ref LATIN: Regex = Regex::new(r"^[\p{Latin}\p{M}\p{N}_']+$").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// NFKC-normalizing tokenizer that stems Latin-script words with the Snowball
/// English stemmer.
///
/// Words in other scripts are reported as [`TokenKind::Unknown`] and passed
/// through lowercased. Function words from the built-in stop-word list keep
/// their surface form so the stop-word filter can recognise them.
#[derive(Debug, Clone, Copy, Default)]
pub struct StemmingTokenizer;

impl StemmingTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for StemmingTokenizer {
    type Error = Infallible;

    fn tokenize(&self, text: &str) -> Result<Vec<Token>, Self::Error> {
        let normalized = text.nfkc().map(fold_apostrophe).collect::<String>();
        Ok(RE.captures_iter(&normalized).filter_map(|caps| classify(&caps)).collect())
    }
}

/// Typographic apostrophes become ASCII so contractions stay one word.
fn fold_apostrophe(c: char) -> char {
    match c {
        '\u{2019}' | '\u{02BC}' => '\'',
        _ => c,
    }
}

fn classify(caps: &Captures<'_>) -> Option<Token> {
    const SIMPLE: [(&str, TokenKind); 7] = [
        ("paragraph", TokenKind::ParagraphBreak),
        ("line", TokenKind::LineBreak),
        ("emoticon", TokenKind::Emoticon),
        ("emoji", TokenKind::Emoticon),
        ("number", TokenKind::Number),
        ("punct", TokenKind::Punctuation),
        ("symbol", TokenKind::Symbol),
    ];
    if let Some(word) = caps.name("word") {
        return Some(lemmatize(word.as_str()));
    }
    SIMPLE
        .iter()
        .find_map(|(group, kind)| caps.name(group).map(|m| Token::new(m.as_str(), *kind)))
}

fn lemmatize(word: &str) -> Token {
    let lowered = word.to_lowercase();
    if !LATIN.is_match(&lowered) {
        return Token::new(lowered, TokenKind::Unknown);
    }
    if is_stop_word(&lowered) {
        return Token::new(lowered, TokenKind::Word);
    }
    let stem = STEMMER.stem(&lowered).into_owned();
    Token::new(stem, TokenKind::Word)
}
