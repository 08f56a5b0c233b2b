//! Adapter layer: Convert MusicBrainz DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! Malformed search hits are dropped here with a warning rather than
//! surfacing as lookup errors further down the pipeline.

use super::dto;
use crate::enrichment::domain::ArtistRecord;

/// Convert a search response into validated artist records, preserving order.
pub fn to_artist_records(response: dto::ArtistSearchResponse) -> Vec<ArtistRecord> {
    response
        .artists
        .into_iter()
        .filter_map(|hit| match (hit.id, hit.name) {
            (Some(id), Some(name)) if !id.is_empty() && !name.is_empty() => {
                Some(ArtistRecord { id, name })
            }
            (id, name) => {
                tracing::warn!(
                    "Skipping MusicBrainz search hit with missing fields (id: {:?}, name: {:?})",
                    id,
                    name
                );
                None
            }
        })
        .collect()
}

/// Tag names in the order the service returned them.
pub fn to_genres(response: &dto::ArtistLookupResponse) -> Vec<String> {
    response.tags.iter().map(|t| t.name.clone()).collect()
}

/// Names of artists on the other end of artist-artist relations.
pub fn to_related_names(response: &dto::ArtistLookupResponse) -> Vec<String> {
    response
        .relations
        .iter()
        .filter(|r| r.target_type.as_deref().is_none_or(|t| t == "artist"))
        .filter_map(|r| r.artist.as_ref().map(|a| a.name.clone()))
        .collect()
}
