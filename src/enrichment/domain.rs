//! Internal domain models for artist resolution and enrichment.
//!
//! These types are OUR types - they don't change when external APIs change.
//! All external API responses get converted into these types via adapters.

/// A search hit from the metadata service, validated at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRecord {
    /// External (MusicBrainz) artist ID
    pub id: String,
    /// Display name as the service spells it
    pub name: String,
}

impl ArtistRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A scored search hit. Produced per search response and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    pub id: String,
    pub name: String,
    /// Similarity against the query, 0-100
    pub score: u8,
}

/// Outcome of resolving one artist query.
///
/// An absent `artist_id` means no candidate cleared the acceptance threshold;
/// both lists are then empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub artist_id: Option<String>,
    pub related: Vec<String>,
    pub genres: Vec<String>,
}

impl MatchResult {
    /// The "no strong match" result.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_match(&self) -> bool {
        self.artist_id.is_some()
    }
}

/// A playlist owned or followed by the current streaming-catalog user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub owner_id: String,
}

/// Errors that can occur talking to the metadata or streaming services
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}
