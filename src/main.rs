//! Playlist Gen - genre playlists from a local music library.
//!
//! Reads the artist folders of a local library, resolves each artist on
//! MusicBrainz, groups their related artists by genre, and builds Spotify
//! playlists from those artists' top tracks.

pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod error_log;
pub mod library;
pub mod pipeline;
pub mod playlist;
pub mod resolve;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("playlist_gen=info".parse()?))
        .init();

    cli::run_command(&args)
}
