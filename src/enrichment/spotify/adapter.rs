//! Adapter layer: Convert Spotify DTOs to domain models

use super::dto;
use crate::enrichment::domain::PlaylistSummary;

/// First artist ID in a search response.
pub fn to_artist_id(response: dto::SearchResponse) -> Option<String> {
    response.artists.items.into_iter().next().map(|a| a.id)
}

/// Track IDs, skipping tracks without one.
pub fn to_track_ids(response: dto::TopTracksResponse) -> Vec<String> {
    response.tracks.into_iter().filter_map(|t| t.id).collect()
}

pub fn to_playlist_summary(playlist: dto::Playlist) -> PlaylistSummary {
    PlaylistSummary {
        id: playlist.id,
        name: playlist.name,
        owner_id: playlist.owner.map(|o| o.id).unwrap_or_default(),
    }
}

/// Track ID to the URI form the playlist endpoints expect.
pub fn track_uri(track_id: &str) -> String {
    if track_id.starts_with("spotify:track:") {
        track_id.to_string()
    } else {
        format!("spotify:track:{}", track_id)
    }
}
