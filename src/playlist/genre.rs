//! Grouping of related artists by genre signature.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Display form of the "no genre" sentinel.
pub const NO_GENRES: &str = "No genres found";

/// Grouping key: the ordered tag list of the source artist, or the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GenreKey {
    Tags(Vec<String>),
    NoGenres,
}

impl GenreKey {
    /// `Tags` for a non-empty list, `NoGenres` otherwise.
    pub fn from_genres(genres: &[String]) -> Self {
        if genres.is_empty() {
            Self::NoGenres
        } else {
            Self::Tags(genres.to_vec())
        }
    }

    /// Playlist label: the first tag. `None` for the sentinel.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Tags(tags) => tags.first().map(String::as_str),
            Self::NoGenres => None,
        }
    }
}

impl fmt::Display for GenreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tags(tags) => write!(f, "({})", tags.join(", ")),
            Self::NoGenres => write!(f, "({})", NO_GENRES),
        }
    }
}

/// Genre key -> set of related-artist names.
///
/// Names are deduplicated within a group. The same name may still appear
/// under several keys when it came from sources with different signatures.
#[derive(Debug, Clone, Default)]
pub struct GenreAggregator {
    groups: BTreeMap<GenreKey, BTreeSet<String>>,
}

impl GenreAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one resolved artist's related names under its genre signature.
    ///
    /// The key is created even when `related` is empty.
    pub fn add(&mut self, artist_name: &str, genres: &[String], related: &[String]) {
        let key = GenreKey::from_genres(genres);
        let group = self.groups.entry(key).or_default();
        let before = group.len();
        group.extend(related.iter().cloned());

        tracing::debug!(
            artist = artist_name,
            "Added {} new related artists ({} offered)",
            group.len() - before,
            related.len()
        );
    }

    pub fn groups(&self) -> &BTreeMap<GenreKey, BTreeSet<String>> {
        &self.groups
    }

    pub fn into_groups(self) -> BTreeMap<GenreKey, BTreeSet<String>> {
        self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
