//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.

use async_trait::async_trait;

use super::domain::{ArtistRecord, EnrichmentError, PlaylistSummary};

/// The metadata search service (MusicBrainz in production).
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// Search for artists by name.
    async fn search_artists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ArtistRecord>, EnrichmentError>;

    /// Genre tags for a resolved artist.
    async fn get_tags(&self, artist_id: &str) -> Result<Vec<String>, EnrichmentError>;

    /// Names of artists related to a resolved artist.
    async fn get_relations(&self, artist_id: &str) -> Result<Vec<String>, EnrichmentError>;
}

/// The streaming catalog (Spotify in production).
#[async_trait]
pub trait StreamingApi: Send + Sync {
    /// Catalog ID of the first artist matching `name`.
    async fn search_artist(&self, name: &str) -> Result<Option<String>, EnrichmentError>;

    /// Top track IDs for an artist in a market.
    async fn top_tracks(&self, artist_id: &str, market: &str)
    -> Result<Vec<String>, EnrichmentError>;

    /// Create a playlist holding `track_ids`, returning its ID.
    async fn create_playlist(
        &self,
        name: &str,
        track_ids: &[String],
    ) -> Result<String, EnrichmentError>;

    /// ID of the authenticated user.
    async fn current_user_id(&self) -> Result<String, EnrichmentError>;

    /// Playlists in the current user's library.
    async fn list_playlists(&self) -> Result<Vec<PlaylistSummary>, EnrichmentError>;

    /// Remove a playlist from the current user's library.
    async fn unfollow_playlist(&self, playlist_id: &str) -> Result<(), EnrichmentError>;
}

// Implement traits for real clients

#[async_trait]
impl MetadataApi for super::musicbrainz::MusicBrainzClient {
    async fn search_artists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ArtistRecord>, EnrichmentError> {
        self.search_artists(query, limit).await
    }

    async fn get_tags(&self, artist_id: &str) -> Result<Vec<String>, EnrichmentError> {
        self.get_tags(artist_id).await
    }

    async fn get_relations(&self, artist_id: &str) -> Result<Vec<String>, EnrichmentError> {
        self.get_relations(artist_id).await
    }
}

#[async_trait]
impl StreamingApi for super::spotify::SpotifyClient {
    async fn search_artist(&self, name: &str) -> Result<Option<String>, EnrichmentError> {
        self.search_artist(name).await
    }

    async fn top_tracks(
        &self,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<String>, EnrichmentError> {
        self.top_tracks(artist_id, market).await
    }

    async fn create_playlist(
        &self,
        name: &str,
        track_ids: &[String],
    ) -> Result<String, EnrichmentError> {
        self.create_playlist(name, track_ids).await
    }

    async fn current_user_id(&self) -> Result<String, EnrichmentError> {
        self.current_user_id().await
    }

    async fn list_playlists(&self) -> Result<Vec<PlaylistSummary>, EnrichmentError> {
        self.list_playlists().await
    }

    async fn unfollow_playlist(&self, playlist_id: &str) -> Result<(), EnrichmentError> {
        self.unfollow_playlist(playlist_id).await
    }
}

/// Mock API clients for testing.
///
/// Return configurable responses and record every call.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::{HashMap, HashSet};
    use tokio::time::Instant;

    fn network_error() -> EnrichmentError {
        EnrichmentError::Network("mock transport failure".to_string())
    }

    /// Mock metadata service keyed by exact query / artist ID.
    #[derive(Default)]
    pub struct MockMetadata {
        /// Search hits per query; unknown queries return no hits
        pub search_results: HashMap<String, Vec<ArtistRecord>>,
        /// Queries that fail this many more times before answering
        pub transient_failures: Mutex<HashMap<String, u32>>,
        pub tags: HashMap<String, Vec<String>>,
        pub relations: HashMap<String, Vec<String>>,
        /// Artist IDs whose tag lookup errors
        pub failing_tags: HashSet<String>,
        /// Artist IDs whose relation lookup errors
        pub failing_relations: HashSet<String>,
        /// Every search query, in call order
        pub searches: Mutex<Vec<String>>,
        /// Every call as (kind, clock time), in call order
        pub calls: Mutex<Vec<(String, Instant)>>,
    }

    impl MockMetadata {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register an artist that the search finds under its exact name.
        pub fn with_artist(mut self, id: &str, name: &str, genres: &[&str], related: &[&str]) -> Self {
            self.search_results
                .insert(name.to_string(), vec![ArtistRecord::new(id, name)]);
            self.tags
                .insert(id.to_string(), genres.iter().map(|s| s.to_string()).collect());
            self.relations
                .insert(id.to_string(), related.iter().map(|s| s.to_string()).collect());
            self
        }

        /// Make `query` return weak hits only.
        pub fn with_hits(mut self, query: &str, hits: Vec<ArtistRecord>) -> Self {
            self.search_results.insert(query.to_string(), hits);
            self
        }

        /// Make `query` fail `times` times before answering normally.
        pub fn failing(self, query: &str, times: u32) -> Self {
            self.transient_failures.lock().insert(query.to_string(), times);
            self
        }

        pub fn search_count(&self, query: &str) -> usize {
            self.searches.lock().iter().filter(|q| *q == query).count()
        }

        pub fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().iter().map(|(_, at)| *at).collect()
        }

        fn record(&self, kind: &str) {
            self.calls.lock().push((kind.to_string(), Instant::now()));
        }
    }

    #[async_trait]
    impl MetadataApi for MockMetadata {
        async fn search_artists(
            &self,
            query: &str,
            _limit: u32,
        ) -> Result<Vec<ArtistRecord>, EnrichmentError> {
            self.searches.lock().push(query.to_string());
            self.record("search");

            if let Some(remaining) = self.transient_failures.lock().get_mut(query)
                && *remaining > 0
            {
                *remaining -= 1;
                return Err(network_error());
            }

            Ok(self.search_results.get(query).cloned().unwrap_or_default())
        }

        async fn get_tags(&self, artist_id: &str) -> Result<Vec<String>, EnrichmentError> {
            self.record("tags");
            if self.failing_tags.contains(artist_id) {
                return Err(network_error());
            }
            Ok(self.tags.get(artist_id).cloned().unwrap_or_default())
        }

        async fn get_relations(&self, artist_id: &str) -> Result<Vec<String>, EnrichmentError> {
            self.record("relations");
            if self.failing_relations.contains(artist_id) {
                return Err(network_error());
            }
            Ok(self.relations.get(artist_id).cloned().unwrap_or_default())
        }
    }

    /// Mock streaming catalog.
    #[derive(Default)]
    pub struct MockStreaming {
        /// Artist name -> catalog ID
        pub artists: HashMap<String, String>,
        /// Catalog ID -> top tracks
        pub tracks: HashMap<String, Vec<String>>,
        /// Names whose search always errors
        pub failing_searches: HashSet<String>,
        /// Playlist names whose creation errors
        pub failing_playlists: HashSet<String>,
        pub user_id: String,
        pub library: Vec<PlaylistSummary>,
        /// Created playlists, in call order
        pub created: Mutex<Vec<(String, Vec<String>)>>,
        pub unfollowed: Mutex<Vec<String>>,
        /// Every call as (kind, clock time), in call order
        pub calls: Mutex<Vec<(String, Instant)>>,
    }

    impl MockStreaming {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register an artist with `count` top tracks named `<id>-t<n>`.
        pub fn with_artist(mut self, name: &str, id: &str, count: usize) -> Self {
            self.artists.insert(name.to_string(), id.to_string());
            self.tracks.insert(
                id.to_string(),
                (1..=count).map(|n| format!("{}-t{}", id, n)).collect(),
            );
            self
        }

        pub fn created_names(&self) -> Vec<String> {
            self.created.lock().iter().map(|(n, _)| n.clone()).collect()
        }

        pub fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().iter().map(|(_, at)| *at).collect()
        }

        fn record(&self, kind: &str) {
            self.calls.lock().push((kind.to_string(), Instant::now()));
        }
    }

    #[async_trait]
    impl StreamingApi for MockStreaming {
        async fn search_artist(&self, name: &str) -> Result<Option<String>, EnrichmentError> {
            self.record("search");
            if self.failing_searches.contains(name) {
                return Err(network_error());
            }
            Ok(self.artists.get(name).cloned())
        }

        async fn top_tracks(
            &self,
            artist_id: &str,
            _market: &str,
        ) -> Result<Vec<String>, EnrichmentError> {
            self.record("top_tracks");
            Ok(self.tracks.get(artist_id).cloned().unwrap_or_default())
        }

        async fn create_playlist(
            &self,
            name: &str,
            track_ids: &[String],
        ) -> Result<String, EnrichmentError> {
            self.record("create");
            if self.failing_playlists.contains(name) {
                return Err(EnrichmentError::ApiError("mock create failure".to_string()));
            }
            let mut created = self.created.lock();
            created.push((name.to_string(), track_ids.to_vec()));
            Ok(format!("playlist-{}", created.len()))
        }

        async fn current_user_id(&self) -> Result<String, EnrichmentError> {
            Ok(self.user_id.clone())
        }

        async fn list_playlists(&self) -> Result<Vec<PlaylistSummary>, EnrichmentError> {
            Ok(self.library.clone())
        }

        async fn unfollow_playlist(&self, playlist_id: &str) -> Result<(), EnrichmentError> {
            self.unfollowed.lock().push(playlist_id.to_string());
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_metadata_transient_failures() {
            let mock = MockMetadata::new()
                .with_artist("tool-id", "Tool", &["progressive metal"], &[])
                .failing("Tool", 2);

            assert!(mock.search_artists("Tool", 5).await.is_err());
            assert!(mock.search_artists("Tool", 5).await.is_err());
            let hits = mock.search_artists("Tool", 5).await.unwrap();

            assert_eq!(hits, vec![ArtistRecord::new("tool-id", "Tool")]);
            assert_eq!(mock.search_count("Tool"), 3);
        }

        #[tokio::test]
        async fn test_mock_streaming_records_playlists() {
            let mock = MockStreaming::new().with_artist("Tool", "tool", 2);

            let id = mock.search_artist("Tool").await.unwrap().unwrap();
            let tracks = mock.top_tracks(&id, "GB").await.unwrap();
            mock.create_playlist("metal 1", &tracks).await.unwrap();

            assert_eq!(tracks, vec!["tool-t1", "tool-t2"]);
            assert_eq!(mock.created_names(), vec!["metal 1"]);
        }
    }
}
