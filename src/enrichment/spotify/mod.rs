//! Spotify Web API integration
//!
//! The streaming catalog: resolves related-artist names to catalog IDs,
//! fetches their top tracks and creates the final playlists.
//!
//! API docs: https://developer.spotify.com/documentation/web-api

pub mod dto;
mod adapter;
mod client;

pub use client::{MAX_TRACKS_PER_REQUEST, SpotifyClient};
