//! Pipeline and library commands.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::library;
use crate::pipeline::Pipeline;
use crate::resolve::MatchResolver;

use super::{music_dir, musicbrainz_client, spotify_client};

/// Resolve the library, group by genre and create playlists
pub fn cmd_run(rt: &Runtime, config: &Config, dry_run: bool) -> anyhow::Result<()> {
    let dir = music_dir(config)?;
    let error_log = config.error_log();

    let artists = library::list_artist_dirs(&dir, &error_log);
    if artists.is_empty() {
        println!("No artist folders found in {:?}", dir);
        return Ok(());
    }
    println!("Found {} artists in {:?}", artists.len(), dir);

    let spotify = spotify_client(config)?;

    let pipeline = Pipeline::new(
        config.pipeline_config(),
        musicbrainz_client(config),
        spotify,
        error_log,
    )
    .with_matcher(MatchResolver::with_threshold(config.matching.threshold));

    let report = rt.block_on(async {
        let mut rng = rand::rng();
        pipeline.run(&artists, &mut rng, dry_run).await
    });

    println!();
    println!("Genre groups: {}", report.groups);
    if dry_run {
        println!("Playlists that would be created:");
        for spec in &report.playlists {
            println!("  {} ({} tracks)", spec.name, spec.tracks.len());
        }
        return Ok(());
    }

    for name in &report.created {
        println!("✓ {}", name);
    }
    for name in &report.failed {
        println!("✗ {}", name);
    }
    println!(
        "Created {} of {} playlists",
        report.created.len(),
        report.playlists.len()
    );

    Ok(())
}

/// List the artist folders in the library
pub fn cmd_artists(config: &Config) -> anyhow::Result<()> {
    let dir = music_dir(config)?;
    let artists = library::list_artist_dirs(&dir, &config.error_log());

    for artist in &artists {
        println!("{}", artist);
    }
    println!("\nTotal: {} artists", artists.len());

    Ok(())
}
