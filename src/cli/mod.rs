//! Command-line interface for playlist-gen.
//!
//! This module provides CLI commands for running the playlist pipeline,
//! inspecting how artists resolve, and cleaning up generated playlists.

mod commands;

pub use commands::{Cli, Commands, run_command};
