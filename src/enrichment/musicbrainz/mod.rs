//! MusicBrainz API integration
//!
//! The metadata search service: artist search for candidate matching, plus
//! tag and relationship lookups for resolved artists.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API

pub mod dto;
mod adapter;
mod client;

pub use client::MusicBrainzClient;
