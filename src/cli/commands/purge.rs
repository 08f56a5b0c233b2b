//! Playlist purge command.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::ResultExt;
use crate::playlist::purge;

use super::spotify_client;

/// List (and with `yes`, remove) your own playlists and generated recommendations
pub fn cmd_purge(rt: &Runtime, config: &Config, yes: bool) -> anyhow::Result<()> {
    let client = spotify_client(config)?;
    let error_log = config.error_log();

    let candidates = rt
        .block_on(purge::purge_candidates(&client))
        .with_context("listing playlists")?;

    if candidates.is_empty() {
        println!("No playlists to remove.");
        return Ok(());
    }

    for playlist in &candidates {
        println!("  {} ({})", playlist.name, playlist.id);
    }

    if !yes {
        println!(
            "\n{} playlists would be removed. Re-run with --yes to remove them.",
            candidates.len()
        );
        return Ok(());
    }

    let removed = rt.block_on(purge::unfollow_all(&client, &candidates, &error_log));
    println!("\n✓ Removed {} of {} playlists", removed, candidates.len());

    Ok(())
}
