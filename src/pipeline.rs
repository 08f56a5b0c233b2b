//! Playlist pipeline - orchestrates resolution, grouping and playlist creation
//!
//! 1. Normalize each local artist name into an [`ArtistQuery`]
//! 2. Search the metadata service for each variant (with retry) and pick the
//!    best candidate above the threshold
//! 3. Fetch genres and related artists for the match
//! 4. Group related artists by genre signature
//! 5. Resolve each group on the streaming catalog and pack tracks into batches
//! 6. Create one playlist per batch
//!
//! Queries whose lookup is exhausted on the first pass are deferred and retried
//! once after every other query has been processed.
//!
//! One pacer is shared by every remote call of a run, so consecutive requests
//! are always at least `request_delay` apart whichever service they hit.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::enrichment::{MatchResult, MetadataApi, RateLimiter, StreamingApi};
use crate::error_log::ErrorLog;
use crate::playlist::{BATCH_CEILING, GenreAggregator, PlaylistBatcher, PlaylistNamer, PlaylistSpec};
use crate::resolve::{
    ArtistLookup, ArtistQuery, LookupOutcome, MatchResolver, RetryPolicy, RetryingLookup,
};

/// Settings for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Candidates requested per metadata search
    pub search_limit: u32,
    /// Market for top-track lookups (ISO 3166-1 alpha-2)
    pub market: String,
    /// Maximum tracks per playlist
    pub batch_ceiling: usize,
    /// Minimum gap between consecutive remote calls
    pub request_delay: Duration,
    /// Backoff applied to every retried search
    pub retry: RetryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_limit: 5,
            market: "GB".to_string(),
            batch_ceiling: BATCH_CEILING,
            request_delay: Duration::from_millis(200),
            retry: RetryPolicy::default(),
        }
    }
}

/// Queries whose lookup failed transiently, in the order they failed.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    queries: Vec<ArtistQuery>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, query: ArtistQuery) {
        self.queries.push(query);
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

impl IntoIterator for DeferredQueue {
    type Item = ArtistQuery;
    type IntoIter = std::vec::IntoIter<ArtistQuery>;

    fn into_iter(self) -> Self::IntoIter {
        self.queries.into_iter()
    }
}

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Genre groups discovered
    pub groups: usize,
    /// Every playlist that was planned
    pub playlists: Vec<PlaylistSpec>,
    /// Names of playlists created
    pub created: Vec<String>,
    /// Names of playlists whose creation failed
    pub failed: Vec<String>,
}

/// The orchestrator. Owns both service clients and the failure log.
pub struct Pipeline<M: MetadataApi, S: StreamingApi> {
    config: PipelineConfig,
    artists: ArtistLookup<M>,
    streaming: S,
    retry: RetryingLookup,
    pacer: Arc<RateLimiter>,
    error_log: ErrorLog,
}

impl<M: MetadataApi, S: StreamingApi> Pipeline<M, S> {
    pub fn new(config: PipelineConfig, metadata: M, streaming: S, error_log: ErrorLog) -> Self {
        let pacer = Arc::new(RateLimiter::new("pipeline", config.request_delay));
        let artists = ArtistLookup::new(metadata, error_log.clone())
            .retry_policy(config.retry)
            .search_limit(config.search_limit)
            .pacer(Arc::clone(&pacer));

        Self {
            retry: RetryingLookup::new(config.retry),
            config,
            artists,
            streaming,
            pacer,
            error_log,
        }
    }

    /// Replace the default matcher (threshold 85, indel similarity).
    pub fn with_matcher(mut self, matcher: MatchResolver) -> Self {
        self.artists = self.artists.matcher(matcher);
        self
    }

    pub fn metadata(&self) -> &M {
        self.artists.metadata()
    }

    pub fn streaming(&self) -> &S {
        &self.streaming
    }

    /// Resolve every local artist and group the related artists by genre.
    pub async fn process_artists(&self, artist_names: &[String]) -> GenreAggregator {
        let mut aggregator = GenreAggregator::new();
        let mut deferred = DeferredQueue::new();

        for raw in artist_names {
            let query = ArtistQuery::new(raw.as_str());
            if query.is_unknown() {
                tracing::warn!("Skipping unnamed artist entry {:?}", raw);
                continue;
            }

            tracing::info!("Processing artist: {}", query.raw());
            match self.artists.lookup(&query).await {
                LookupOutcome::Resolved(result) => Self::collect(&mut aggregator, &query, result),
                LookupOutcome::Exhausted { .. } => {
                    tracing::warn!("Deferring '{}' for a later retry", query.raw());
                    deferred.push(query);
                }
            }
        }

        if !deferred.is_empty() {
            tracing::info!("Retrying {} deferred artists", deferred.len());
        }

        for query in deferred {
            match self.artists.lookup(&query).await {
                LookupOutcome::Resolved(result) => Self::collect(&mut aggregator, &query, result),
                LookupOutcome::Exhausted {
                    attempts,
                    last_error,
                } => {
                    tracing::error!(
                        "Giving up on '{}' after deferred retry: {}",
                        query.raw(),
                        last_error
                    );
                    self.error_log.record(format!(
                        "Failed to resolve '{}' after {} attempts on deferred retry: {}",
                        query.raw(),
                        attempts,
                        last_error
                    ));
                }
            }
        }

        aggregator
    }

    fn collect(aggregator: &mut GenreAggregator, query: &ArtistQuery, result: MatchResult) {
        if result.is_match() {
            aggregator.add(query.raw(), &result.genres, &result.related);
        }
    }

    /// Turn genre groups into named playlists with shuffled track order.
    pub async fn build_playlists<R: Rng + ?Sized>(
        &self,
        aggregator: &GenreAggregator,
        rng: &mut R,
    ) -> Vec<PlaylistSpec> {
        let batcher = PlaylistBatcher::new(&self.streaming, &self.retry, &self.error_log)
            .market(self.config.market.as_str())
            .ceiling(self.config.batch_ceiling)
            .pacer(&self.pacer);
        let mut namer = PlaylistNamer::new();
        let mut specs = Vec::new();

        for (key, artists) in aggregator.groups() {
            tracing::info!("Building playlists for {} ({} artists)", key, artists.len());
            let batches = batcher.make_batches(artists, rng).await;
            specs.extend(namer.name_batches(key, batches));
        }

        for spec in &mut specs {
            spec.tracks.shuffle(rng);
        }

        specs
    }

    /// Create every playlist. A failed playlist never stops the next one.
    pub async fn create_playlists(&self, specs: &[PlaylistSpec]) -> (Vec<String>, Vec<String>) {
        let mut created = Vec::new();
        let mut failed = Vec::new();

        for spec in specs {
            self.pacer.wait_if_needed().await;
            match self.streaming.create_playlist(&spec.name, &spec.tracks).await {
                Ok(id) => {
                    tracing::info!(
                        "Created playlist '{}' with {} tracks (ID: {})",
                        spec.name,
                        spec.tracks.len(),
                        id
                    );
                    created.push(spec.name.clone());
                }
                Err(e) => {
                    tracing::error!("Failed to create playlist '{}': {}", spec.name, e);
                    self.error_log
                        .record(format!("create playlist '{}': {}", spec.name, e));
                    failed.push(spec.name.clone());
                }
            }
        }

        (created, failed)
    }

    /// Full run: resolve, group, batch and (unless `dry_run`) create.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        artist_names: &[String],
        rng: &mut R,
        dry_run: bool,
    ) -> RunReport {
        let aggregator = self.process_artists(artist_names).await;
        tracing::info!("Found {} genre groups", aggregator.len());

        let playlists = self.build_playlists(&aggregator, rng).await;

        let (created, failed) = if dry_run {
            tracing::info!("Dry run: skipping creation of {} playlists", playlists.len());
            (Vec::new(), Vec::new())
        } else {
            self.create_playlists(&playlists).await
        };

        RunReport {
            groups: aggregator.len(),
            playlists,
            created,
            failed,
        }
    }
}
