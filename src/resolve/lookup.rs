//! Artist lookup against the metadata service.
//!
//! Ties the pieces of this module together: each variant of an [`ArtistQuery`]
//! is searched (under retry), scored by the [`MatchResolver`], and the first
//! accepted candidate is enriched with genres and related artists. Every
//! request, retries included, waits for its slot on the shared pacer.

use std::sync::Arc;
use std::time::Duration;

use super::matcher::MatchResolver;
use super::normalize::ArtistQuery;
use super::retry::{LookupOutcome, RetryPolicy, RetryingLookup};
use crate::enrichment::{CatalogEnricher, MatchResult, MetadataApi, RateLimiter};
use crate::error_log::ErrorLog;

/// Resolves artist queries on the metadata service.
pub struct ArtistLookup<M: MetadataApi> {
    metadata: M,
    matcher: MatchResolver,
    retry: RetryingLookup,
    error_log: ErrorLog,
    search_limit: u32,
    pacer: Arc<RateLimiter>,
}

impl<M: MetadataApi> ArtistLookup<M> {
    pub fn new(metadata: M, error_log: ErrorLog) -> Self {
        Self {
            metadata,
            matcher: MatchResolver::default(),
            retry: RetryingLookup::default(),
            error_log,
            search_limit: 5,
            pacer: Arc::new(RateLimiter::unlimited("metadata")),
        }
    }

    pub fn matcher(mut self, matcher: MatchResolver) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = RetryingLookup::new(policy);
        self
    }

    pub fn search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    /// Minimum gap between consecutive metadata requests.
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.pacer = Arc::new(RateLimiter::new("metadata", delay));
        self
    }

    /// Share a pacer with other callers so the gap holds across all of them.
    pub fn pacer(mut self, pacer: Arc<RateLimiter>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    /// Resolve one query.
    ///
    /// Variants are tried in search order until one yields a match. An
    /// exhausted search on any variant exhausts the whole query so that the
    /// caller can defer it as a unit. The unknown-artist sentinel is never
    /// searched.
    pub async fn lookup(&self, query: &ArtistQuery) -> LookupOutcome<MatchResult> {
        if query.is_unknown() {
            return LookupOutcome::Resolved(MatchResult::absent());
        }

        let metadata = &self.metadata;
        let pacer: &RateLimiter = &self.pacer;
        let limit = self.search_limit;

        for name in query.search_order() {
            let search = move || async move {
                pacer.wait_if_needed().await;
                metadata.search_artists(name, limit).await
            };

            let records = match self.retry.run(name, search).await {
                LookupOutcome::Resolved(records) => records,
                LookupOutcome::Exhausted {
                    attempts,
                    last_error,
                } => {
                    return LookupOutcome::Exhausted {
                        attempts,
                        last_error,
                    };
                }
            };

            let Some(best) = self.matcher.select_best(name, &records) else {
                tracing::debug!("No strong match for variant '{}'", name);
                continue;
            };

            tracing::info!(
                "Matched '{}' -> '{}' (ID: {}, score: {})",
                query.raw(),
                best.name,
                best.id,
                best.score
            );

            let enrichment = CatalogEnricher::new(&self.metadata, &self.error_log)
                .pacer(pacer)
                .enrich(&best.id)
                .await;

            return LookupOutcome::Resolved(MatchResult {
                artist_id: Some(best.id),
                related: enrichment.related,
                genres: enrichment.genres,
            });
        }

        tracing::warn!("No strong match found for '{}'", query.raw());
        LookupOutcome::Resolved(MatchResult::absent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::ArtistRecord;
    use crate::enrichment::traits::mocks::MockMetadata;
    use crate::test_utils::fast_retry;

    fn lookup(metadata: MockMetadata) -> ArtistLookup<MockMetadata> {
        ArtistLookup::new(metadata, ErrorLog::disabled()).retry_policy(fast_retry())
    }

    #[tokio::test(start_paused = true)]
    async fn test_match_is_enriched() {
        let lookup = lookup(MockMetadata::new().with_artist(
            "tool-id",
            "Tool",
            &["progressive metal"],
            &["A Perfect Circle"],
        ));

        let result = lookup.lookup(&ArtistQuery::new("Tool")).await.into_option().unwrap();

        assert_eq!(result.artist_id.as_deref(), Some("tool-id"));
        assert_eq!(result.genres, vec!["progressive metal"]);
        assert_eq!(result.related, vec!["A Perfect Circle"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_variants_tried_until_match() {
        let lookup =
            lookup(MockMetadata::new().with_artist("acdc-id", "AC/DC", &["hard rock"], &["Airbourne"]));

        let result = lookup
            .lookup(&ArtistQuery::new("AC/DC"))
            .await
            .into_option()
            .unwrap();

        assert_eq!(result.artist_id.as_deref(), Some("acdc-id"));
        // Canonical form first, then stop at the first match
        assert_eq!(lookup.metadata().search_count("AC_DC"), 1);
        assert_eq!(lookup.metadata().search_count("AC/DC"), 1);
        assert_eq!(lookup.metadata().search_count("ac_dc"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_weak_hits_are_absent_not_errors() {
        let lookup = lookup(
            MockMetadata::new()
                .with_hits("Tool", vec![ArtistRecord::new("x", "Toolbox Murders")]),
        );

        let outcome = lookup.lookup(&ArtistQuery::new("Tool")).await;

        let result = outcome.into_option().unwrap();
        assert!(!result.is_match());
        assert!(result.genres.is_empty());
        assert!(result.related.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_artist_never_searched() {
        let lookup = lookup(MockMetadata::new());

        let outcome = lookup.lookup(&ArtistQuery::new("")).await;

        assert_eq!(outcome.into_option(), Some(MatchResult::absent()));
        assert!(lookup.metadata().searches.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_variant_exhausts_query() {
        let lookup = lookup(
            MockMetadata::new()
                .with_artist("tool-id", "Tool", &[], &[])
                .failing("Tool", 5),
        );

        let outcome = lookup.lookup(&ArtistQuery::new("Tool")).await;

        assert!(outcome.is_exhausted());
        assert_eq!(lookup.metadata().search_count("Tool"), 2);
        assert_eq!(lookup.metadata().search_count("tool"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_and_enrichment_calls_are_spaced() {
        let delay = Duration::from_millis(250);
        let lookup = lookup(
            MockMetadata::new()
                .with_artist("tool-id", "Tool", &["progressive metal"], &["Puscifer"])
                .failing("Tool", 1),
        )
        .request_delay(delay);

        lookup.lookup(&ArtistQuery::new("Tool")).await;

        // failed search, retried search, tags, relations
        let times = lookup.metadata().call_times();
        assert_eq!(times.len(), 4);
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= delay);
        }
    }
}
