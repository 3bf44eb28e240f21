use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::warn;
use walkdir::WalkDir;

/// Maximum number of log files to process (prevent resource exhaustion)
const MAX_LOG_FILES: usize = 100_000;

/// A chat log found on disk and the contact it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub email: String,
    pub path: PathBuf,
}

/// Find every chat log directly inside `dir`.
///
/// Messenger names archives after the contact, e.g. `alice@example.com.xml`
/// or `alice@example.com 2.xml`; everything before the first space (or the
/// extension) is taken as the contact's email. Files are returned sorted by
/// name so contacts are always processed in the same order. Symlinks and
/// subdirectories are skipped.
///
/// # Errors
///
/// Returns an error if `dir` is not a readable directory or holds more than
/// [`MAX_LOG_FILES`] logs.
pub fn discover_logs(dir: &Path) -> Result<Vec<LogFile>> {
    if !dir.is_dir() {
        bail!("Failed to open chat log directory: {}", dir.display());
    }

    let pattern = Regex::new(r"(?i)^([^ ]+).*\.xml$").context("Invalid log file pattern")?;
    let mut logs = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to read chat log directory: {}", dir.display()))?;

        if entry.path_is_symlink() {
            warn!("Skipping symlinked log file {}", entry.path().display());
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        let email = {
            let file_name = entry.file_name().to_string_lossy();
            let captured = pattern.captures(&file_name).and_then(|c| c.get(1));
            match captured.map(|m| m.as_str().to_string()) {
                Some(email) => email,
                None => continue,
            }
        };

        if logs.len() >= MAX_LOG_FILES {
            bail!(
                "Resource limit exceeded: Found more than {} chat logs in {}",
                MAX_LOG_FILES,
                dir.display()
            );
        }

        logs.push(LogFile { email, path: entry.into_path() });
    }

    Ok(logs)
}
