//! Track batching and playlist naming.
//!
//! A genre group's artists are shuffled, resolved on the streaming catalog and
//! their top tracks packed into batches no longer than the playlist-add ceiling.
//! An artist's tracks always stay together in one batch.

use std::collections::{BTreeSet, HashMap};

use rand::Rng;
use rand::seq::SliceRandom;

use super::genre::GenreKey;
use crate::enrichment::rate_limiter::RateLimiter;
use crate::enrichment::traits::StreamingApi;
use crate::error_log::ErrorLog;
use crate::resolve::retry::{LookupOutcome, RetryingLookup};

/// Maximum tracks per playlist-add request.
pub const BATCH_CEILING: usize = 100;

/// Ordered track IDs, at most the batch ceiling long.
pub type TrackBatch = Vec<String>;

/// A playlist ready to hand to the streaming catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSpec {
    pub name: String,
    pub tracks: TrackBatch,
}

/// Pack per-artist track lists into batches of at most `ceiling` tracks.
///
/// When the next artist doesn't fit, the current batch is closed and the artist
/// starts a new one. Empty lists are skipped and no empty batch is emitted. A
/// single list longer than the ceiling is truncated to it.
pub fn pack_batches<I>(per_artist: I, ceiling: usize) -> Vec<TrackBatch>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let ceiling = ceiling.max(1);
    let mut batches = Vec::new();
    let mut current: TrackBatch = Vec::new();

    for mut tracks in per_artist {
        if tracks.is_empty() {
            continue;
        }

        if tracks.len() > ceiling {
            tracing::warn!(
                "Artist has {} tracks, more than a whole batch; keeping the first {}",
                tracks.len(),
                ceiling
            );
            tracks.truncate(ceiling);
        }

        if current.len() + tracks.len() > ceiling {
            batches.push(std::mem::take(&mut current));
        }
        current.extend(tracks);
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}

/// Hands out sequential playlist names.
///
/// Each genre label has its own counter, bumped once per batch: "metal 1",
/// "metal 2". Groups without genres are named "Playlist 1", "Playlist 2", ...
#[derive(Debug, Default)]
pub struct PlaylistNamer {
    counters: HashMap<String, u32>,
    unknown: u32,
}

impl PlaylistNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_name(&mut self, key: &GenreKey) -> String {
        match key.label() {
            Some(label) => {
                let n = self.counters.entry(label.to_string()).or_insert(0);
                *n += 1;
                format!("{} {}", label, n)
            }
            None => {
                self.unknown += 1;
                format!("Playlist {}", self.unknown)
            }
        }
    }

    /// Name every batch of one group.
    pub fn name_batches(&mut self, key: &GenreKey, batches: Vec<TrackBatch>) -> Vec<PlaylistSpec> {
        batches
            .into_iter()
            .map(|tracks| PlaylistSpec {
                name: self.next_name(key),
                tracks,
            })
            .collect()
    }
}

/// Resolves a group's artists on the streaming catalog and batches their tracks.
pub struct PlaylistBatcher<'a, S: StreamingApi + ?Sized> {
    api: &'a S,
    retry: &'a RetryingLookup,
    error_log: &'a ErrorLog,
    market: String,
    ceiling: usize,
    pacer: Option<&'a RateLimiter>,
}

impl<'a, S: StreamingApi + ?Sized> PlaylistBatcher<'a, S> {
    pub fn new(api: &'a S, retry: &'a RetryingLookup, error_log: &'a ErrorLog) -> Self {
        Self {
            api,
            retry,
            error_log,
            market: "GB".to_string(),
            ceiling: BATCH_CEILING,
            pacer: None,
        }
    }

    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    pub fn ceiling(mut self, ceiling: usize) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Space every catalog request through `pacer`.
    pub fn pacer(mut self, pacer: &'a RateLimiter) -> Self {
        self.pacer = Some(pacer);
        self
    }

    /// Build the track batches for one group of artist names.
    ///
    /// Artists that can't be resolved are skipped; the rest of the group goes on.
    pub async fn make_batches<'n, I, R>(&self, artists: I, rng: &mut R) -> Vec<TrackBatch>
    where
        I: IntoIterator<Item = &'n String>,
        R: Rng + ?Sized,
    {
        let unique: BTreeSet<&str> = artists.into_iter().map(String::as_str).collect();
        let mut order: Vec<&str> = unique.into_iter().collect();
        order.shuffle(rng);

        let mut per_artist = Vec::with_capacity(order.len());
        for name in order {
            if let Some(tracks) = self.tracks_for(name).await {
                per_artist.push(tracks);
            }
        }

        pack_batches(per_artist, self.ceiling)
    }

    /// Top tracks for one artist name, or `None` to skip the artist.
    async fn tracks_for(&self, name: &str) -> Option<Vec<String>> {
        let api = self.api;
        let pacer = self.pacer;
        let search = move || async move {
            pace(pacer).await;
            api.search_artist(name).await
        };

        let artist_id = match self.retry.run(name, search).await {
            LookupOutcome::Resolved(Some(id)) => {
                tracing::info!("[Spotify] Matched '{}'", name);
                tracing::debug!("[Spotify] Matched '{}' -> ID: {}", name, id);
                id
            }
            LookupOutcome::Resolved(None) => {
                tracing::warn!("[Spotify] No match found for '{}'", name);
                return None;
            }
            LookupOutcome::Exhausted { attempts, last_error } => {
                self.error_log.record(format!(
                    "Failed to retrieve Spotify artist ID for '{}' after {} attempts: {}",
                    name, attempts, last_error
                ));
                return None;
            }
        };

        pace(self.pacer).await;
        match self.api.top_tracks(&artist_id, &self.market).await {
            Ok(tracks) => {
                tracing::debug!("Found {} top tracks for artist ID: {}", tracks.len(), artist_id);
                Some(tracks)
            }
            Err(e) => {
                tracing::error!("Error fetching top tracks for artist {}: {}", artist_id, e);
                self.error_log
                    .record(format!("top tracks {} ({}): {}", name, artist_id, e));
                Some(Vec::new())
            }
        }
    }
}

async fn pace(pacer: Option<&RateLimiter>) {
    if let Some(pacer) = pacer {
        pacer.wait_if_needed().await;
    }
}
