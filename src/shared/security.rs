use crate::shared::error::DashboardError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Largest fixture file the directory source will read (100 MB).
pub const MAX_FIXTURE_SIZE: u64 = 100 * 1024 * 1024;

/// Rejects `path` when it is a symbolic link.
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        return Err(DashboardError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} operations on symbolic links are not allowed", operation),
            hint: "Point at the real file instead of a link".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Reads a fixture file after checking that it is a regular,
/// non-symlinked file no larger than `max_size` bytes.
pub fn read_guarded(path: &Path, max_size: u64) -> Result<String> {
    validate_not_symlink(path, "read")?;

    let metadata = fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", path.display(), e))?;

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > max_size {
        return Err(DashboardError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "file is too large ({} bytes, limit {} bytes)",
                metadata.len(),
                max_size
            ),
            hint: "Fixtures should be pre-aggregated summaries, not raw dumps".to_string(),
        }
        .into());
    }

    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}
