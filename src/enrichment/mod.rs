//! External catalog integration - searches, metadata lookups and playlist writes.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`musicbrainz/dto.rs`, `spotify/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models, validating at the boundary
//! - **Clients** - HTTP clients for external APIs
//! - **Traits** - Seams for injecting mock clients in tests
//! - **Enricher** - Genre and related-artist lookups for a resolved artist
//! - **Rate limiter** - Minimum gap between consecutive remote requests
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::{CatalogEnricher, MusicBrainzClient};
//!
//! let client = MusicBrainzClient::new("me@example.com");
//! let enrichment = CatalogEnricher::new(&client, &error_log).enrich(artist_id).await;
//! println!("Genres: {:?}", enrichment.genres);
//! ```

pub mod domain;
pub mod enricher;
pub mod musicbrainz;
pub mod rate_limiter;
pub mod spotify;
pub mod traits;

pub use domain::{ArtistRecord, EnrichmentError, MatchCandidate, MatchResult, PlaylistSummary};
pub use enricher::{CatalogEnricher, Enrichment};
pub use musicbrainz::MusicBrainzClient;
pub use rate_limiter::RateLimiter;
pub use spotify::SpotifyClient;
pub use traits::{MetadataApi, StreamingApi};
