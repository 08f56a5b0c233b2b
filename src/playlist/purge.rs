//! Removal of generated playlists from the streaming library.

use crate::enrichment::{EnrichmentError, PlaylistSummary, StreamingApi};
use crate::error_log::ErrorLog;

/// Suffix of auto-generated playlists that are removed regardless of owner.
pub const RECOMMENDATIONS_SUFFIX: &str = "Recommendations";

/// Playlists owned by the current user, or generated recommendations.
pub async fn purge_candidates<S: StreamingApi + ?Sized>(
    api: &S,
) -> Result<Vec<PlaylistSummary>, EnrichmentError> {
    let user_id = api.current_user_id().await?;
    let playlists = api.list_playlists().await?;

    Ok(playlists
        .into_iter()
        .filter(|p| p.owner_id == user_id || p.name.ends_with(RECOMMENDATIONS_SUFFIX))
        .collect())
}

/// Unfollow each playlist, returning how many were removed.
///
/// A failure is logged and the rest are still attempted.
pub async fn unfollow_all<S: StreamingApi + ?Sized>(
    api: &S,
    playlists: &[PlaylistSummary],
    error_log: &ErrorLog,
) -> usize {
    let mut removed = 0;
    for playlist in playlists {
        match api.unfollow_playlist(&playlist.id).await {
            Ok(()) => {
                tracing::info!("Deleted playlist: {}", playlist.name);
                removed += 1;
            }
            Err(e) => {
                tracing::error!("Failed to delete playlist '{}': {}", playlist.name, e);
                error_log.record(format!("unfollow playlist '{}': {}", playlist.name, e));
            }
        }
    }
    removed
}
