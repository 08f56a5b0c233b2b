//! CLI command definitions and dispatch.
//!
//! Each subcommand group is implemented in its own submodule:
//! - `run`: the full pipeline and local library listing
//! - `lookup`: one-off artist resolution against either service
//! - `purge`: removal of generated playlists
//! - `settings`: config file inspection

mod lookup;
mod purge;
mod run;
mod settings;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::enrichment::{MusicBrainzClient, SpotifyClient};
use crate::error::{Error, Result};

pub use lookup::{cmd_artist_id, cmd_resolve};
pub use purge::cmd_purge;
pub use run::{cmd_artists, cmd_run};
pub use settings::cmd_config;

/// Genre playlist generator
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: the OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Folder holding one sub-folder per artist
    #[arg(long, global = true, env = "MUSIC_DIR")]
    pub music_dir: Option<PathBuf>,

    /// Spotify bearer token
    #[arg(long, global = true, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
    pub spotify_token: Option<String>,

    /// Contact address for the MusicBrainz User-Agent
    #[arg(long, global = true, env = "MUSICBRAINZ_CONTACT")]
    pub contact: Option<String>,

    /// Append failures to this file
    #[arg(long, global = true)]
    pub error_log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the library, group by genre and create playlists
    Run {
        /// Show the playlists that would be created without creating them
        #[arg(long)]
        dry_run: bool,
    },
    /// List the artist folders in the library
    Artists,
    /// Resolve one artist name on MusicBrainz
    Resolve {
        /// Artist name as it appears in the library
        name: String,
    },
    /// Look up an artist's Spotify ID
    ArtistId {
        /// Artist name
        name: String,
    },
    /// Remove your own playlists and generated recommendations
    Purge {
        /// Actually remove them (otherwise only list)
        #[arg(long)]
        yes: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config = effective_config(cli);

    match &cli.command {
        Commands::Run { dry_run } => cmd_run(&rt, &config, *dry_run),
        Commands::Artists => cmd_artists(&config),
        Commands::Resolve { name } => cmd_resolve(&rt, &config, name),
        Commands::ArtistId { name } => cmd_artist_id(&rt, &config, name),
        Commands::Purge { yes } => cmd_purge(&rt, &config, *yes),
        Commands::Config { save } => cmd_config(&config, *save),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Config file values with command-line overrides applied
pub(crate) fn effective_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    if let Some(dir) = &cli.music_dir {
        config.library.music_dir = Some(dir.clone());
    }
    if let Some(token) = &cli.spotify_token {
        config.credentials.spotify_access_token = Some(token.clone());
    }
    if let Some(contact) = &cli.contact {
        config.credentials.contact = Some(contact.clone());
    }
    if let Some(path) = &cli.error_log {
        config.logging.error_log = Some(path.clone());
    }

    config
}

/// The configured music folder. Whether it exists is left to the library
/// listing, which treats a missing folder as an empty library.
pub(crate) fn music_dir(config: &Config) -> Result<PathBuf> {
    config
        .library
        .music_dir
        .clone()
        .ok_or_else(|| Error::missing_setting("music directory (--music-dir or MUSIC_DIR)"))
}

pub(crate) fn musicbrainz_client(config: &Config) -> MusicBrainzClient {
    MusicBrainzClient::new(config.credentials.contact.as_deref().unwrap_or_default())
}

pub(crate) fn spotify_client(config: &Config) -> Result<SpotifyClient> {
    let token = config
        .credentials
        .spotify_access_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            Error::missing_setting("Spotify access token (--spotify-token or SPOTIFY_ACCESS_TOKEN)")
        })?;

    Ok(SpotifyClient::new(token).public_playlists(config.playlists.public))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_dry_run() {
        let cli = Cli::try_parse_from(["playlist-gen", "run", "--dry-run"]).unwrap();
        assert!(matches!(cli.command, Commands::Run { dry_run: true }));
    }

    #[test]
    fn test_overrides_applied_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[library]\nmusic_dir = \"/from/file\"\n\n[credentials]\ncontact = \"file@example.com\"\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "playlist-gen",
            "--config",
            path.to_str().unwrap(),
            "--music-dir",
            "/from/flag",
            "artists",
        ])
        .unwrap();
        let config = effective_config(&cli);

        assert_eq!(config.library.music_dir, Some(PathBuf::from("/from/flag")));
        assert_eq!(config.credentials.contact.as_deref(), Some("file@example.com"));
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let mut config = Config::default();
        config.credentials.spotify_access_token = Some(String::new());

        let err = spotify_client(&config).err().unwrap();
        assert!(matches!(err, Error::MissingSetting(_)));
    }

    #[test]
    fn test_music_dir_must_be_set() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();

        assert!(matches!(music_dir(&config), Err(Error::MissingSetting(_))));

        // Existence is checked by the library listing, not here
        let missing = dir.path().join("missing");
        config.library.music_dir = Some(missing.clone());
        assert_eq!(music_dir(&config).unwrap(), missing);
    }
}
