//! Genre grouping and playlist assembly.
//!
//! - [`genre`] - [`GenreAggregator`] groups related artists by genre signature
//! - [`batcher`] - [`PlaylistBatcher`] turns a group into track batches,
//!   [`PlaylistNamer`] names them
//! - [`purge`] - removal of generated playlists

pub mod batcher;
pub mod genre;
pub mod purge;

pub use batcher::{
    BATCH_CEILING, PlaylistBatcher, PlaylistNamer, PlaylistSpec, TrackBatch, pack_batches,
};
pub use genre::{GenreAggregator, GenreKey, NO_GENRES};
