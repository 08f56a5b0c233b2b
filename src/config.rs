//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\playlist-gen\config.toml
//! - macOS: ~/Library/Application Support/playlist-gen/config.toml
//! - Linux: ~/.config/playlist-gen/config.toml
//!
//! The config file is human-readable and editable. Every section is optional;
//! missing values fall back to defaults. CLI flags override what is loaded here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error_log::ErrorLog;
use crate::pipeline::PipelineConfig;
use crate::resolve::RetryPolicy;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Local library settings
    pub library: LibraryConfig,

    /// API credentials
    pub credentials: Credentials,

    /// Candidate matching
    pub matching: MatchingConfig,

    /// Backoff for remote searches
    pub retry: RetryConfig,

    /// Delay between remote calls
    pub pacing: PacingConfig,

    /// Playlist creation
    pub playlists: PlaylistConfig,

    /// Failure log
    pub logging: LoggingConfig,
}

/// Local library settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Folder holding one sub-folder per artist
    pub music_dir: Option<PathBuf>,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Spotify bearer token (SPOTIFY_ACCESS_TOKEN takes precedence on the CLI)
    pub spotify_access_token: Option<String>,

    /// Contact address sent in the MusicBrainz User-Agent
    pub contact: Option<String>,
}

/// Candidate matching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// A candidate must score strictly above this (0-100)
    pub threshold: u8,

    /// Candidates requested per search
    pub search_limit: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: crate::resolve::matcher::DEFAULT_THRESHOLD,
            search_limit: 5,
        }
    }
}

/// Retry backoff settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub initial_backoff_secs: u64,
    pub multiplier: u32,
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_backoff_secs: 4,
            multiplier: 2,
            max_attempts: 5,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            initial_backoff: Duration::from_secs(config.initial_backoff_secs),
            multiplier: config.multiplier,
            max_attempts: config.max_attempts,
        }
    }
}

/// Request pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Minimum gap between consecutive remote calls, in milliseconds
    pub request_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 200,
        }
    }
}

/// Playlist creation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    /// Market for top tracks (ISO 3166-1 alpha-2)
    pub market: String,

    /// Maximum tracks per playlist
    pub batch_ceiling: usize,

    /// Whether created playlists are public
    pub public: bool,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            market: "GB".to_string(),
            batch_ceiling: crate::playlist::BATCH_CEILING,
            public: true,
        }
    }
}

/// Failure log settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append-only failure log; disabled when unset
    pub error_log: Option<PathBuf>,
}

impl Config {
    /// Pipeline settings derived from this config
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            search_limit: self.matching.search_limit,
            market: self.playlists.market.clone(),
            batch_ceiling: self.playlists.batch_ceiling,
            request_delay: Duration::from_millis(self.pacing.request_delay_ms),
            retry: RetryPolicy::from(&self.retry),
        }
    }

    pub fn error_log(&self) -> ErrorLog {
        ErrorLog::from_option(self.logging.error_log.clone())
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("playlist-gen"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    load_from(&path)
}

/// Load configuration from a specific file, with the same fallbacks as [`load`]
pub fn load_from(path: &std::path::Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &dir).map(|_| ())
}

fn save_to(config: &Config, dir: &std::path::Path) -> Result<PathBuf, ConfigError> {
    let path = dir.join("config.toml");

    std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(path)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
