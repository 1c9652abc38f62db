use crate::dashboard::domain::FixtureKind;
use crate::ports::outbound::FixtureSource;
use crate::shared::error::DashboardError;
use crate::shared::security::{read_guarded, MAX_FIXTURE_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// DirectoryFixtureSource adapter for reading fixtures from disk
///
/// Reads `<dir>/<file>.json` for each fixture. Symbolic links, non-regular
/// files and files over 100 MB are refused. There is no cache to bust, so
/// the token is ignored.
pub struct DirectoryFixtureSource {
    data_dir: PathBuf,
}

impl DirectoryFixtureSource {
    /// # Errors
    /// Returns an error if `data_dir` is not an existing directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        if !data_dir.is_dir() {
            return Err(DashboardError::InvalidDataDir {
                path: data_dir,
                reason: "Directory does not exist".to_string(),
            }
            .into());
        }
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[async_trait]
impl FixtureSource for DirectoryFixtureSource {
    async fn fetch_fixture(&self, kind: FixtureKind, _cache_bust: u64) -> Result<Value> {
        let path = self.data_dir.join(kind.file_name());
        let content = read_guarded(&path, MAX_FIXTURE_SIZE).map_err(|e| {
            DashboardError::FixtureUnavailable {
                resource: kind.resource_path(),
                details: e.to_string(),
            }
        })?;

        serde_json::from_str(&content).map_err(|e| {
            DashboardError::FixtureParseError {
                resource: kind.resource_path(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn describe(&self) -> String {
        self.data_dir.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_rejects_missing_directory() {
        let result = DirectoryFixtureSource::new("/nonexistent/fixtures");
        assert!(result.is_err());
        assert!(format!("{}", result.err().unwrap()).contains("Invalid data directory"));
    }

    #[tokio::test]
    async fn test_reads_fixture_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("image_inventory.json"),
            r#"{"images": [{"name": "frontend"}]}"#,
        )
        .unwrap();

        let source = DirectoryFixtureSource::new(dir.path()).unwrap();
        let value = source
            .fetch_fixture(FixtureKind::ImageInventory, 0)
            .await
            .unwrap();
        assert_eq!(value["images"][0]["name"], "frontend");
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = DirectoryFixtureSource::new(dir.path()).unwrap();

        let err = source
            .fetch_fixture(FixtureKind::ServiceOwner, 0)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/data/service_owner_data.json"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("security_findings.json"), "{broken").unwrap();
        let source = DirectoryFixtureSource::new(dir.path()).unwrap();

        let err = source
            .fetch_fixture(FixtureKind::SecurityFindings, 0)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to parse fixture"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_fixture_is_refused() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("real.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("technologies_data.json")).unwrap();
        let source = DirectoryFixtureSource::new(dir.path()).unwrap();

        let err = source
            .fetch_fixture(FixtureKind::Technologies, 0)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("symbolic links"));
    }
}
