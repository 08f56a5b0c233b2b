//! Entity resolution: turn a local folder name into an external artist identity.
//!
//! - [`normalize`] - canonical form and alternate spellings
//! - [`matcher`] - candidate scoring against a fixed threshold
//! - [`retry`] - bounded exponential backoff around remote calls
//! - [`lookup`] - variant search, selection and enrichment for one query

pub mod lookup;
pub mod matcher;
pub mod normalize;
pub mod retry;

pub use lookup::ArtistLookup;
pub use matcher::{MatchResolver, Scorer, similarity_ratio};
pub use normalize::{ArtistQuery, UNKNOWN_ARTIST, canonicalize, variants};
pub use retry::{LookupOutcome, RetryPolicy, RetryingLookup};
