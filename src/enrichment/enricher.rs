//! Genre and related-artist enrichment for a resolved artist.
//!
//! Tags and relations are fetched independently. Each call has its own failure
//! boundary: a failed tag lookup still lets the relation lookup through, and
//! vice versa. With a pacer attached, each call waits for its slot first.

use crate::enrichment::rate_limiter::RateLimiter;
use crate::enrichment::traits::MetadataApi;
use crate::error_log::ErrorLog;

/// Genres and related artists for one resolved identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub genres: Vec<String>,
    pub related: Vec<String>,
}

pub struct CatalogEnricher<'a, M: MetadataApi + ?Sized> {
    api: &'a M,
    error_log: &'a ErrorLog,
    pacer: Option<&'a RateLimiter>,
}

impl<'a, M: MetadataApi + ?Sized> CatalogEnricher<'a, M> {
    pub fn new(api: &'a M, error_log: &'a ErrorLog) -> Self {
        Self {
            api,
            error_log,
            pacer: None,
        }
    }

    /// Space both lookups through `pacer`.
    pub fn pacer(mut self, pacer: &'a RateLimiter) -> Self {
        self.pacer = Some(pacer);
        self
    }

    async fn pace(&self) {
        if let Some(pacer) = self.pacer {
            pacer.wait_if_needed().await;
        }
    }

    pub async fn enrich(&self, artist_id: &str) -> Enrichment {
        self.pace().await;
        let genres = match self.api.get_tags(artist_id).await {
            Ok(genres) => genres,
            Err(e) => {
                tracing::error!("Error fetching genres for {}: {}", artist_id, e);
                self.error_log
                    .record(format!("genres {}: {}", artist_id, e));
                Vec::new()
            }
        };

        self.pace().await;
        let related = match self.api.get_relations(artist_id).await {
            Ok(related) => related,
            Err(e) => {
                tracing::error!("Error fetching related artists for {}: {}", artist_id, e);
                self.error_log
                    .record(format!("related artists {}: {}", artist_id, e));
                Vec::new()
            }
        };

        Enrichment { genres, related }
    }
}
