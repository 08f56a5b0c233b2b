//! Flat append-only failure log.
//!
//! One line per failure: `<rfc3339 timestamp> <message>`. No schema, no rotation.
//! Writing is best-effort; a failure to write is reported through tracing and
//! never interrupts the pipeline.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Optional failure log. A disabled log silently drops records.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    path: Option<PathBuf>,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn from_option(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append one line.
    pub fn record(&self, message: impl AsRef<str>) {
        let Some(path) = &self.path else {
            return;
        };

        // Keep it to one line per record
        let line = message.as_ref().replace(['\r', '\n'], " ");

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut f| writeln!(f, "{} {}", chrono::Utc::now().to_rfc3339(), line));

        if let Err(e) = result {
            tracing::warn!("Failed to write error log {:?}: {}", path, e);
        }
    }
}
