//! Config inspection command.

use crate::config::{self, Config};
use crate::error::ResultExt;

/// Print the effective configuration, optionally saving it
pub fn cmd_config(config: &Config, save: bool) -> anyhow::Result<()> {
    match config::config_path() {
        Some(path) => println!("# Config file: {}", path.display()),
        None => println!("# Config file: (no config directory on this system)"),
    }

    // Never echo the token
    let mut shown = config.clone();
    if shown.credentials.spotify_access_token.is_some() {
        shown.credentials.spotify_access_token = Some("<set>".to_string());
    }
    println!("{}", toml::to_string_pretty(&shown)?);

    if save {
        config::save(config).with_context("saving config")?;
        println!("✓ Saved");
    }

    Ok(())
}
