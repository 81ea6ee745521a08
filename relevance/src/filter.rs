//! Token filters applied before counting.
//!
//! Each predicate rejects a different kind of noise and they are applied
//! independently; [`retain`] is their conjunction.

use crate::tokenizer::{Token, TokenKind};
use lazy_static::lazy_static;
use std::collections::HashSet;

/// Unknown-script tokens shorter than this (in chars) are dropped.
pub const MIN_UNKNOWN_LEN: usize = 4;

lazy_static! {
    // Function words only. Numerals ("one", "two", ...) are meaningful here and stay out.
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","shan't","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","will","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves",
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stop_word(lemma: &str) -> bool {
    STOPWORDS.contains(lemma)
}

/// Punctuation, symbols, line/paragraph control and emoticons carry no topic.
pub fn is_ignored_kind(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Punctuation
            | TokenKind::Symbol
            | TokenKind::LineBreak
            | TokenKind::ParagraphBreak
            | TokenKind::Emoticon
    )
}

/// Short tokens in unsupported scripts are usually mis-tagged fragments.
pub fn is_short_unknown(token: &Token) -> bool {
    token.kind == TokenKind::Unknown && token.lemma.chars().count() < MIN_UNKNOWN_LEN
}

pub fn retain(token: &Token) -> bool {
    !is_ignored_kind(token.kind) && !is_stop_word(&token.lemma) && !is_short_unknown(token)
}
