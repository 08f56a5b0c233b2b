//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.

use serde::de::DeserializeOwned;

use super::{adapter, dto};
use crate::enrichment::domain::{ArtistRecord, EnrichmentError};
use crate::enrichment::rate_limiter::RateLimiter;

/// Floor between requests; MusicBrainz allows one per second.
const MIN_REQUEST_INTERVAL_MS: u64 = 1100;

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
    rate_limiter: RateLimiter,
}

const DEFAULT_CONTACT: &str = "https://github.com/playlist-gen";

/// Build the User-Agent MusicBrainz asks for: `app/version (contact)`.
fn user_agent(contact: &str) -> String {
    format!(
        "PlaylistGen/{} ({})",
        env!("CARGO_PKG_VERSION"),
        if contact.is_empty() { DEFAULT_CONTACT } else { contact }
    )
}

impl MusicBrainzClient {
    /// Create a new client. `contact` goes into the User-Agent (email or URL).
    pub fn new(contact: &str) -> Self {
        Self::with_base_url(contact, "https://musicbrainz.org/ws/2")
    }

    /// Create a client against a custom base URL (mirrors, tests)
    pub fn with_base_url(contact: &str, base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(user_agent(contact))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: base_url.into(),
            rate_limiter: RateLimiter::from_millis("MusicBrainz", MIN_REQUEST_INTERVAL_MS),
        }
    }

    /// Search artists by name, returning validated records in service order
    pub async fn search_artists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ArtistRecord>, EnrichmentError> {
        let url = format!(
            "{}/artist?query={}&limit={}&fmt=json",
            self.base_url,
            urlencoding::encode(query),
            limit
        );
        let response: dto::ArtistSearchResponse = self.get_json(&url).await?;
        Ok(adapter::to_artist_records(response))
    }

    /// Fetch tag names for an artist
    pub async fn get_tags(&self, artist_id: &str) -> Result<Vec<String>, EnrichmentError> {
        let response = self.lookup_artist(artist_id, "tags").await?;
        Ok(adapter::to_genres(&response))
    }

    /// Fetch names of related artists
    pub async fn get_relations(&self, artist_id: &str) -> Result<Vec<String>, EnrichmentError> {
        let response = self.lookup_artist(artist_id, "artist-rels").await?;
        Ok(adapter::to_related_names(&response))
    }

    async fn lookup_artist(
        &self,
        artist_id: &str,
        inc: &str,
    ) -> Result<dto::ArtistLookupResponse, EnrichmentError> {
        let url = format!(
            "{}/artist/{}?inc={}&fmt=json",
            self.base_url,
            urlencoding::encode(artist_id),
            inc
        );
        self.get_json(&url).await
    }

    /// Send a GET request and parse the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, EnrichmentError> {
        self.rate_limiter.wait_if_needed().await;

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(EnrichmentError::NotFound(url.to_string()));
        }

        // MusicBrainz answers 503 when its rate limit is exceeded
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        {
            return Err(EnrichmentError::RateLimited);
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(EnrichmentError::ApiError(error.error));
            }
            return Err(EnrichmentError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

impl Default for MusicBrainzClient {
    fn default() -> Self {
        Self::new("")
    }
}
