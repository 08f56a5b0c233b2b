//! Local library listing.
//!
//! The library is a folder of artist folders. Only the top level is read: each
//! directory name is one artist. Files and anything deeper are ignored.

use std::path::Path;

use walkdir::WalkDir;

use crate::error_log::ErrorLog;

/// Top-level directory names under `root`, sorted.
///
/// A missing or unreadable root yields an empty list plus an error-log line.
pub fn list_artist_dirs(root: &Path, error_log: &ErrorLog) -> Vec<String> {
    if !root.is_dir() {
        tracing::error!("Music directory {:?} does not exist or is not a directory", root);
        error_log.record(format!("music directory not found: {}", root.display()));
        return Vec::new();
    }

    let mut names: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable library entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();

    names.sort();
    tracing::debug!(count = names.len(), "Listed artist folders in {:?}", root);
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_lists_top_level_dirs_sorted() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("Tool")).unwrap();
        fs::create_dir(root.join("20 Questions")).unwrap();
        fs::create_dir_all(root.join("AC_DC/Back in Black")).unwrap();
        File::create(root.join("cover.jpg")).unwrap();

        let names = list_artist_dirs(root, &ErrorLog::disabled());

        assert_eq!(names, vec!["20 Questions", "AC_DC", "Tool"]);
    }

    #[test]
    fn test_empty_library() {
        let dir = tempdir().unwrap();
        assert!(list_artist_dirs(dir.path(), &ErrorLog::disabled()).is_empty());
    }

    #[test]
    fn test_missing_root_is_logged_not_fatal() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("errors.txt");
        let log = ErrorLog::new(&log_path);

        let names = list_artist_dirs(&dir.path().join("nope"), &log);

        assert!(names.is_empty());
        let logged = fs::read_to_string(&log_path).unwrap();
        assert!(logged.contains("music directory not found"));
    }
}
