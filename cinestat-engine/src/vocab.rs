//! Genre vocabulary
//!
//! Ordered list of genre names. Position i of the vocabulary corresponds to
//! character i (0-based) of the `genre_code` flag strings on `dim_title`.
//! The vocabulary is loaded once at startup and is the single source of
//! truth for both `encode` and `decode`.

use std::collections::HashMap;

/// Default genre vocabulary, alphabetical, as loaded by the dashboard when
/// the warehouse carries no `dim_genre` rows.
pub const DEFAULT_GENRES: &[&str] = &[
    "Action",
    "Adult",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Film-Noir",
    "Game-Show",
    "History",
    "Horror",
    "Music",
    "Musical",
    "Mystery",
    "News",
    "Reality-TV",
    "Romance",
    "Sci-Fi",
    "Short",
    "Sport",
    "Talk-Show",
    "Thriller",
    "War",
    "Western",
];

/// Immutable, ordered genre vocabulary
#[derive(Debug, Clone)]
pub struct GenreVocabulary {
    names: Vec<String>,
    index_by_name: HashMap<String, usize>,
}

impl GenreVocabulary {
    /// Build a vocabulary from an ordered list of genre names.
    ///
    /// Position in the list is the 0-based flag-string position. Duplicate
    /// names keep their first position.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index_by_name = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            index_by_name.entry(name.clone()).or_insert(idx);
        }
        Self {
            names,
            index_by_name,
        }
    }

    /// Number of genres (equals the expected flag-string length)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Genre name at flag-string position `idx`
    pub fn name(&self, idx: usize) -> Option<&str> {
        self.names.get(idx).map(String::as_str)
    }

    /// Flag-string position of `name` (case-sensitive exact match)
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index_by_name.get(name).copied()
    }

    /// All genre names in vocabulary order
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for GenreVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_GENRES.iter().copied())
    }
}
