//! MusicBrainz API Data Transfer Objects
//!
//! These types match what the MusicBrainz API returns for the fields we consume.
//! DO NOT use these types outside the musicbrainz module - convert to domain types.
//!
//! API Reference: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! We use two endpoints:
//! - `/artist?query=...` (search) for candidate matching
//! - `/artist/{mbid}?inc=tags` and `?inc=artist-rels` for enrichment

use serde::{Deserialize, Serialize};

/// Artist search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistSearchResponse {
    /// Total hits on the server (not the page size)
    pub count: Option<u32>,
    /// Hits on this page
    #[serde(default)]
    pub artists: Vec<ArtistHit>,
}

/// One search hit.
///
/// `id` and `name` are optional here on purpose: the adapter validates them
/// and drops malformed hits instead of failing the whole response.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArtistHit {
    pub id: Option<String>,
    pub name: Option<String>,
    pub sort_name: Option<String>,
    /// MusicBrainz' own relevance score (0-100), not used for matching
    pub score: Option<u32>,
    pub disambiguation: Option<String>,
}

/// Artist lookup response (single artist with includes)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistLookupResponse {
    pub id: String,
    pub name: String,
    /// Present with `inc=tags`
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Present with `inc=artist-rels`
    #[serde(default)]
    pub relations: Vec<Relation>,
}

/// Folksonomy tag
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tag {
    pub name: String,
    /// Vote count (can be negative)
    #[serde(default)]
    pub count: i32,
}

/// Relationship to another entity
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Relation {
    /// Relation type, e.g. "member of band", "collaboration"
    #[serde(rename = "type")]
    pub relation_type: Option<String>,
    /// "artist" for artist-artist relations
    pub target_type: Option<String>,
    pub direction: Option<String>,
    /// Set when target-type is "artist"
    pub artist: Option<RelatedArtist>,
}

/// Artist on the other end of a relation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelatedArtist {
    pub id: String,
    pub name: String,
}

/// Error response from MusicBrainz API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    pub help: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "created": "2025-01-01T00:00:00.000Z",
            "count": 2,
            "offset": 0,
            "artists": [
                {
                    "id": "66fc5bf8-daa4-4241-b378-9bc9077939d2",
                    "type": "Group",
                    "score": 100,
                    "name": "Tool",
                    "sort-name": "Tool",
                    "country": "US",
                    "disambiguation": "US rock band"
                },
                {
                    "id": "00000000-0000-0000-0000-000000000000",
                    "score": 62,
                    "name": "Tool Shed"
                }
            ]
        }"#;

        let response: ArtistSearchResponse =
            serde_json::from_str(json).expect("Should parse search response");

        assert_eq!(response.count, Some(2));
        assert_eq!(response.artists.len(), 2);
        assert_eq!(response.artists[0].name.as_deref(), Some("Tool"));
        assert_eq!(response.artists[0].sort_name.as_deref(), Some("Tool"));
        assert_eq!(response.artists[1].score, Some(62));
    }

    #[test]
    fn test_parse_search_hit_missing_fields() {
        let json = r#"{ "artists": [ { "score": 10 } ] }"#;

        let response: ArtistSearchResponse =
            serde_json::from_str(json).expect("Should tolerate malformed hits");

        assert!(response.artists[0].id.is_none());
        assert!(response.artists[0].name.is_none());
    }

    #[test]
    fn test_parse_empty_search() {
        let json = r#"{ "count": 0, "offset": 0 }"#;
        let response: ArtistSearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.artists.is_empty());
    }

    #[test]
    fn test_parse_lookup_with_tags() {
        let json = r#"{
            "id": "tool-id",
            "name": "Tool",
            "tags": [
                { "count": 12, "name": "progressive metal" },
                { "count": 5, "name": "alternative metal" }
            ]
        }"#;

        let response: ArtistLookupResponse =
            serde_json::from_str(json).expect("Should parse tags lookup");

        assert_eq!(response.tags.len(), 2);
        assert_eq!(response.tags[0].name, "progressive metal");
        assert_eq!(response.tags[0].count, 12);
        assert!(response.relations.is_empty());
    }

    #[test]
    fn test_parse_lookup_with_relations() {
        let json = r#"{
            "id": "tool-id",
            "name": "Tool",
            "relations": [
                {
                    "type": "member of band",
                    "target-type": "artist",
                    "direction": "backward",
                    "artist": { "id": "mjk-id", "name": "Maynard James Keenan", "sort-name": "Keenan, Maynard James" }
                },
                {
                    "type": "official homepage",
                    "target-type": "url",
                    "url": { "resource": "https://toolband.com/" }
                }
            ]
        }"#;

        let response: ArtistLookupResponse =
            serde_json::from_str(json).expect("Should parse relations lookup");

        assert_eq!(response.relations.len(), 2);
        let rel = &response.relations[0];
        assert_eq!(rel.relation_type.as_deref(), Some("member of band"));
        assert_eq!(rel.target_type.as_deref(), Some("artist"));
        assert_eq!(rel.artist.as_ref().unwrap().name, "Maynard James Keenan");
        assert!(response.relations[1].artist.is_none());
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{
            "error": "Not Found",
            "help": "For usage, please see: https://musicbrainz.org/doc/MusicBrainz_API"
        }"#;

        let error: ApiError = serde_json::from_str(json).expect("Should parse error");
        assert_eq!(error.error, "Not Found");
        assert!(error.help.is_some());
    }
}
