//! Tokenizer shared by job-description and resume text.
//!
//! A token is a maximal run of ASCII letters, digits, `+`, `#` or `.`, so
//! `c++`, `c#` and `node.js` survive intact. Tokens are lowercased and
//! anything of length 1 is dropped. Sets are `BTreeSet`s: iteration is
//! lexicographic, which keeps every downstream list reproducible.

use std::collections::BTreeSet;

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '.')
}

/// Splits `text` into the set of normalized tokens used for overlap scoring.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !is_token_char(c))
        .filter(|t| t.len() > 1)
        .map(|t| t.to_ascii_lowercase())
        .collect()
}

/// Whitespace-split, lowercased words with no further normalization.
/// Only the legacy missing-skill policy uses this.
pub fn raw_words(text: &str) -> BTreeSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
