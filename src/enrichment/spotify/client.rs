//! Spotify Web API client
//!
//! The streaming catalog: artist search, top tracks and playlist management.
//! Authentication is out of scope here; the client takes a ready bearer token
//! (from config or `SPOTIFY_ACCESS_TOKEN`).

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{adapter, dto};
use crate::enrichment::domain::{EnrichmentError, PlaylistSummary};

/// Maximum items the playlist-add endpoint accepts per request.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Spotify Web API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: String,
    access_token: String,
    public_playlists: bool,
}

impl SpotifyClient {
    /// Create a new client with the given bearer token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, "https://api.spotify.com/v1")
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: base_url.into(),
            access_token: access_token.into(),
            public_playlists: true,
        }
    }

    /// Whether created playlists are public
    pub fn public_playlists(mut self, public: bool) -> Self {
        self.public_playlists = public;
        self
    }

    /// First artist ID matching `name`, if any
    pub async fn search_artist(&self, name: &str) -> Result<Option<String>, EnrichmentError> {
        let url = format!(
            "{}/search?q={}&type=artist&limit=1",
            self.base_url,
            urlencoding::encode(name)
        );
        let response: dto::SearchResponse = self.get_json(&url).await?;
        Ok(adapter::to_artist_id(response))
    }

    /// Top track IDs for an artist in a market (ISO 3166-1 alpha-2)
    pub async fn top_tracks(
        &self,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<String>, EnrichmentError> {
        let url = format!(
            "{}/artists/{}/top-tracks?market={}",
            self.base_url,
            urlencoding::encode(artist_id),
            urlencoding::encode(market)
        );
        let response: dto::TopTracksResponse = self.get_json(&url).await?;
        Ok(adapter::to_track_ids(response))
    }

    /// ID of the user the bearer token belongs to
    pub async fn current_user_id(&self) -> Result<String, EnrichmentError> {
        let user: dto::CurrentUser = self.get_json(&format!("{}/me", self.base_url)).await?;
        Ok(user.id)
    }

    /// Create a playlist for the current user and fill it.
    ///
    /// Tracks are added in chunks of at most [`MAX_TRACKS_PER_REQUEST`].
    pub async fn create_playlist(
        &self,
        name: &str,
        track_ids: &[String],
    ) -> Result<String, EnrichmentError> {
        let user_id = self.current_user_id().await?;

        let body = dto::CreatePlaylistRequest {
            name: name.to_string(),
            public: self.public_playlists,
            description: String::new(),
        };
        let url = format!(
            "{}/users/{}/playlists",
            self.base_url,
            urlencoding::encode(&user_id)
        );
        let playlist: dto::Playlist = self.post_json(&url, &body).await?;

        for chunk in track_ids.chunks(MAX_TRACKS_PER_REQUEST) {
            let body = dto::AddTracksRequest {
                uris: chunk.iter().map(|id| adapter::track_uri(id)).collect(),
            };
            let url = format!("{}/playlists/{}/tracks", self.base_url, playlist.id);
            let _: serde_json::Value = self.post_json(&url, &body).await?;
            tracing::info!("Added {} tracks to playlist '{}'", chunk.len(), name);
        }

        Ok(playlist.id)
    }

    /// All playlists in the current user's library, following pagination
    pub async fn list_playlists(&self) -> Result<Vec<PlaylistSummary>, EnrichmentError> {
        let mut playlists = Vec::new();
        let mut next = Some(format!("{}/me/playlists?limit=50", self.base_url));

        while let Some(url) = next {
            let page: dto::Paging<dto::Playlist> = self.get_json(&url).await?;
            playlists.extend(page.items.into_iter().map(adapter::to_playlist_summary));
            next = page.next;
        }

        Ok(playlists)
    }

    /// Remove a playlist from the current user's library
    pub async fn unfollow_playlist(&self, playlist_id: &str) -> Result<(), EnrichmentError> {
        let url = format!(
            "{}/playlists/{}/followers",
            self.base_url,
            urlencoding::encode(playlist_id)
        );
        let response = self
            .http_client
            .delete(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        Self::check_status(response).await.map(|_| ())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, EnrichmentError> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        Self::parse(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, EnrichmentError> {
        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, EnrichmentError> {
        Self::check_status(response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }

    /// Map non-success statuses to errors
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, EnrichmentError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }

        let message = match response.json::<dto::ErrorResponse>().await {
            Ok(body) => body.error.message,
            Err(_) => status.canonical_reason().unwrap_or("Unknown").to_string(),
        };

        Err(match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                EnrichmentError::Unauthorized(message)
            }
            reqwest::StatusCode::NOT_FOUND => EnrichmentError::NotFound(message),
            _ => EnrichmentError::ApiError(format!("HTTP {}: {}", status, message)),
        })
    }
}
