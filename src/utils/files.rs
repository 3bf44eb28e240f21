use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result, bail};

// Maximum size of a single chat log: 64MB
const MAX_FILE_SIZE_BYTES: u64 = 64 * 1024 * 1024;

/// Validates that a file's size is within acceptable limits (64MB)
///
/// Takes an open file handle so the size checked is the size of the file
/// actually being read.
///
/// # Errors
///
/// Returns an error if the metadata cannot be read or the file is too large.
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Opens a chat log for reading, refusing symlinks and oversized files
pub fn open_log_file(path: &Path) -> Result<File> {
    let link_meta = fs::symlink_metadata(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    if link_meta.file_type().is_symlink() {
        bail!("Refusing to follow symlink: {}", path.display());
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
    validate_file_size(&file, path)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_open_small_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"<Log/>").unwrap();
        assert!(open_log_file(file.path()).is_ok());
    }

    #[test]
    fn test_open_missing_file() {
        let err = open_log_file(Path::new("/nonexistent/alice@example.com.xml")).unwrap_err();
        assert!(err.to_string().contains("Failed to open log file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("real.xml");
        fs::write(&target, "<Log/>").unwrap();
        let link = dir.path().join("link.xml");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = open_log_file(&link).unwrap_err();
        assert!(err.to_string().contains("symlink"));
    }
}
