//! Artist-name normalization.
//!
//! Folder names in a local library are typed by humans: `AC/DC`, `Simon & Garfunkel`,
//! `10,000 Maniacs`, `Twenty One Pilots`. Search indexes tokenize these differently, so
//! we canonicalize the name and then generate a handful of cheap alternate spellings.
//! At least one of them usually lines up with the index.

use std::collections::BTreeSet;

/// Sentinel used whenever the raw name is empty.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// The number table used for the first-token swap.
const NUMBER_WORDS: [(u32, &str); 27] = [
    (1, "one"),
    (2, "two"),
    (3, "three"),
    (4, "four"),
    (5, "five"),
    (6, "six"),
    (7, "seven"),
    (8, "eight"),
    (9, "nine"),
    (10, "ten"),
    (11, "eleven"),
    (12, "twelve"),
    (13, "thirteen"),
    (14, "fourteen"),
    (15, "fifteen"),
    (16, "sixteen"),
    (17, "seventeen"),
    (18, "eighteen"),
    (19, "nineteen"),
    (20, "twenty"),
    (30, "thirty"),
    (40, "forty"),
    (50, "fifty"),
    (60, "sixty"),
    (70, "seventy"),
    (80, "eighty"),
    (90, "ninety"),
];

fn number_to_word(n: u32) -> Option<&'static str> {
    NUMBER_WORDS
        .iter()
        .find(|(value, _)| *value == n)
        .map(|(_, word)| *word)
}

fn word_to_number(word: &str) -> Option<u32> {
    let lower = word.to_lowercase();
    NUMBER_WORDS
        .iter()
        .find(|(_, w)| *w == lower)
        .map(|(value, _)| *value)
}

/// Canonicalize a raw artist name for searching.
///
/// Commas become spaces, `/` becomes `_` and `&` becomes `and`. Then only the
/// first token is checked against the number table: digits are spelled out,
/// spelled-out numbers become digits.
pub fn canonicalize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return UNKNOWN_ARTIST.to_string();
    }

    let cleaned = raw.replace(',', " ").replace('/', "_").replace('&', "and");

    let mut words: Vec<String> = cleaned.split_whitespace().map(str::to_string).collect();

    // A name made only of commas cleans down to nothing
    let Some(first) = words.first_mut() else {
        return UNKNOWN_ARTIST.to_string();
    };

    if first.chars().all(|c| c.is_ascii_digit()) {
        if let Some(word) = first.parse::<u32>().ok().and_then(number_to_word) {
            *first = word.to_string();
        }
    } else if let Some(n) = word_to_number(first) {
        *first = n.to_string();
    }

    words.join(" ")
}

/// Generate alternate spellings of a raw artist name.
///
/// Always contains the raw name itself. Empty input yields only the sentinel.
pub fn variants(raw: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();

    if raw.trim().is_empty() {
        names.insert(UNKNOWN_ARTIST.to_string());
        return names;
    }

    let canonical = canonicalize(raw);

    names.insert(raw.to_string());
    names.insert(canonical.to_lowercase());
    names.insert(
        canonical
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '!' | '.' | '?'))
            .collect::<String>()
            .to_lowercase(),
    );
    names.insert(canonical.replace('/', "_"));
    names.insert(canonical.replace(' ', "_"));
    names.insert(canonical.replace(',', " "));
    names.insert(canonical.replace("and", "&"));

    names.retain(|n| !n.is_empty());
    names
}

/// One local artist, normalized once and then read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistQuery {
    raw: String,
    canonical: String,
    variants: BTreeSet<String>,
}

impl ArtistQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let canonical = canonicalize(&raw);
        let variants = variants(&raw);
        Self {
            raw,
            canonical,
            variants,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn variants(&self) -> &BTreeSet<String> {
        &self.variants
    }

    /// True when the raw name was empty and the query is just the sentinel.
    pub fn is_unknown(&self) -> bool {
        self.canonical == UNKNOWN_ARTIST
    }

    /// Names to try against the search service, canonical form first,
    /// then the remaining variants in lexical order.
    pub fn search_order(&self) -> Vec<&str> {
        let mut order = vec![self.canonical.as_str()];
        order.extend(
            self.variants
                .iter()
                .map(String::as_str)
                .filter(|v| *v != self.canonical),
        );
        order
    }
}
