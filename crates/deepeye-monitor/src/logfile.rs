//! Watched-file creation with fallback locations.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::DEFAULT_LOG_FILE;
use crate::error::{MonitorError, Result};

/// Ensure a watched file exists, returning the path that was adopted.
///
/// If the configured path cannot be used, falls back to the home directory
/// and then the system temp directory, keeping the configured file name.
/// Each created file starts with a single timestamped header line. Only
/// exhausting every candidate is an error.
pub fn ensure_log_file(primary: &Path) -> Result<PathBuf> {
    let mut attempted = Vec::new();
    let mut last_error = String::new();

    for candidate in candidates(primary) {
        if candidate.is_file() {
            return Ok(candidate);
        }
        match create_with_header(&candidate) {
            Ok(()) => {
                info!(path = %candidate.display(), "created log file");
                return Ok(candidate);
            }
            Err(e) => {
                warn!(path = %candidate.display(), error = %e, "log file creation failed");
                last_error = e.to_string();
                attempted.push(candidate);
            }
        }
    }

    Err(MonitorError::FileCreation {
        attempted,
        message: last_error,
    })
}

/// Candidate paths in fallback order: configured, home dir, temp dir.
fn candidates(primary: &Path) -> Vec<PathBuf> {
    let file_name = primary
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let mut paths = vec![primary.to_path_buf()];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(&file_name));
    }
    paths.push(std::env::temp_dir().join(&file_name));
    paths.dedup();
    paths
}

fn create_with_header(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = fs::File::create(path)?;
    writeln!(file, "Log file created at {}", chrono::Local::now().to_rfc2822())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_missing_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server_log.txt");

        let adopted = ensure_log_file(&path).unwrap();
        assert_eq!(adopted, path);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Log file created at "));
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_existing_file_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server_log.txt");
        fs::write(&path, "existing content\n").unwrap();

        let adopted = ensure_log_file(&path).unwrap();
        assert_eq!(adopted, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing content\n");
    }

    #[test]
    fn test_unwritable_primary_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        // A file where a directory is needed makes the primary unusable.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        // Unique file name: the fallback location cannot pre-exist, so the
        // adopted file is always one this test created and may delete.
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .subsec_nanos();
        let name = format!("deepeye-fallback-{}-{}.txt", std::process::id(), nanos);
        let primary = blocker.join(&name);

        let adopted = ensure_log_file(&primary).unwrap();
        assert_ne!(adopted, primary);
        assert!(adopted.ends_with(&name));
        let content = fs::read_to_string(&adopted).unwrap();
        assert!(content.starts_with("Log file created at "));

        fs::remove_file(&adopted).unwrap();
    }

    #[test]
    fn test_candidates_order() {
        let primary = PathBuf::from("/srv/logs/audit.log");
        let paths = candidates(&primary);

        assert_eq!(paths[0], primary);
        assert!(paths
            .last()
            .unwrap()
            .ends_with("audit.log"));
        assert!(paths.len() >= 2);
    }
}
