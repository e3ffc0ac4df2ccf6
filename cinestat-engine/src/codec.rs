//! Genre flag-string codec
//!
//! Titles store their genres as a fixed-length flag string ("TFFT..."),
//! one character per vocabulary entry. The codec translates between flag
//! strings and genre-name lists. Malformed input never fails: short codes
//! are padded with 'F', non-T characters mean absent, and a title with no
//! genres at all decodes to the "Unknown" sentinel.

use crate::vocab::GenreVocabulary;

/// Sentinel label for titles whose code carries no 'T' flags
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Encoder/decoder over one genre vocabulary
#[derive(Debug, Clone)]
pub struct GenreCodec {
    vocab: GenreVocabulary,
}

impl GenreCodec {
    pub fn new(vocab: GenreVocabulary) -> Self {
        Self { vocab }
    }

    pub fn vocabulary(&self) -> &GenreVocabulary {
        &self.vocab
    }

    /// Decode a flag string into genre names, in vocabulary order.
    ///
    /// Character i (case-insensitive) equals 'T' ⇒ vocabulary[i] is present.
    /// Positions beyond the string length count as 'F'; characters beyond
    /// the vocabulary length are ignored. `None`, empty, or all-'F' input
    /// yields `["Unknown"]`.
    pub fn decode(&self, code: Option<&str>) -> Vec<String> {
        let mut decoded = Vec::new();

        if let Some(code) = code {
            for (idx, flag) in code.chars().enumerate() {
                if idx >= self.vocab.len() {
                    break;
                }
                if flag.eq_ignore_ascii_case(&'T') {
                    if let Some(name) = self.vocab.name(idx) {
                        decoded.push(name.to_string());
                    }
                }
            }
        }

        if decoded.is_empty() {
            decoded.push(UNKNOWN_GENRE.to_string());
        }
        decoded
    }

    /// Encode a set of genre names into a flag string of vocabulary length.
    ///
    /// Matching is case-sensitive against vocabulary names. Names not in
    /// the vocabulary are ignored silently, so an all-unknown request
    /// yields an all-'F' string.
    pub fn encode<'a, I>(&self, names: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut flags = vec!['F'; self.vocab.len()];
        for name in names {
            if let Some(idx) = self.vocab.index_of(name) {
                flags[idx] = 'T';
            }
        }
        flags.into_iter().collect()
    }
}

impl Default for GenreCodec {
    fn default() -> Self {
        Self::new(GenreVocabulary::default())
    }
}
