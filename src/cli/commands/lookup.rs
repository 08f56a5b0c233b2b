//! One-off artist lookups.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::resolve::{
    ArtistLookup, ArtistQuery, LookupOutcome, MatchResolver, RetryPolicy, RetryingLookup,
};

use super::{musicbrainz_client, spotify_client};

/// Show how a library name is normalized and what it resolves to
pub fn cmd_resolve(rt: &Runtime, config: &Config, name: &str) -> anyhow::Result<()> {
    let query = ArtistQuery::new(name);

    println!("Name:      {}", query.raw());
    println!("Canonical: {}", query.canonical());
    println!("Variants:");
    for variant in query.search_order() {
        println!("  {}", variant);
    }
    println!();

    let lookup = ArtistLookup::new(musicbrainz_client(config), config.error_log())
        .matcher(MatchResolver::with_threshold(config.matching.threshold))
        .retry_policy(RetryPolicy::from(&config.retry))
        .search_limit(config.matching.search_limit)
        .request_delay(config.pipeline_config().request_delay);

    match rt.block_on(lookup.lookup(&query)) {
        LookupOutcome::Resolved(result) => match &result.artist_id {
            Some(id) => {
                println!("✓ Match found");
                println!("  MusicBrainz: https://musicbrainz.org/artist/{}", id);
                if result.genres.is_empty() {
                    println!("  Genres:  (none)");
                } else {
                    println!("  Genres:  {}", result.genres.join(", "));
                }
                println!("  Related: {}", result.related.len());
                for related in &result.related {
                    println!("    {}", related);
                }
            }
            None => {
                println!("✗ No strong match (threshold {})", config.matching.threshold);
            }
        },
        LookupOutcome::Exhausted {
            attempts,
            last_error,
        } => {
            anyhow::bail!("Lookup failed after {} attempts: {}", attempts, last_error);
        }
    }

    Ok(())
}

/// Look up an artist's Spotify ID
pub fn cmd_artist_id(rt: &Runtime, config: &Config, name: &str) -> anyhow::Result<()> {
    let client = spotify_client(config)?;
    let retry = RetryingLookup::new(RetryPolicy::from(&config.retry));

    match rt.block_on(retry.run(name, || client.search_artist(name))) {
        LookupOutcome::Resolved(Some(id)) => println!("{}", id),
        LookupOutcome::Resolved(None) => println!("✗ No Spotify artist found for '{}'", name),
        LookupOutcome::Exhausted {
            attempts,
            last_error,
        } => {
            anyhow::bail!("Search failed after {} attempts: {}", attempts, last_error);
        }
    }

    Ok(())
}
