//! Spotify Web API Data Transfer Objects
//!
//! Only the fields we consume. DO NOT use these types outside the spotify
//! module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api

use serde::{Deserialize, Serialize};

/// `GET /search?type=artist`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub artists: Paging<Artist>,
}

/// Generic paging object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// URL of the next page, if any
    pub next: Option<String>,
    pub total: Option<u32>,
}

/// Simplified artist object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// `GET /artists/{id}/top-tracks`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Track object (only the ID matters to us)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    /// Local files and unavailable tracks can have a null ID
    pub id: Option<String>,
    pub name: Option<String>,
}

/// `GET /me`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

/// `POST /users/{user_id}/playlists` request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub public: bool,
    pub description: String,
}

/// Playlist object (created or listed)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: Option<PlaylistOwner>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistOwner {
    pub id: String,
}

/// `POST /playlists/{id}/tracks` request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

/// Error envelope: `{"error": {"status": 401, "message": "..."}}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================
