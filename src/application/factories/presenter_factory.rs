use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Where a rendered dashboard view ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// `--output` given means a file, otherwise stdout.
    pub fn from_output(output: Option<PathBuf>) -> Self {
        output.map_or(PresenterType::Stdout, PresenterType::File)
    }
}

/// Picks the output adapter for a CLI run.
///
/// ```
/// use inventory_lens::application::factories::{PresenterFactory, PresenterType};
///
/// let presenter = PresenterFactory::create(PresenterType::from_output(None));
/// ```
pub struct PresenterFactory;

impl PresenterFactory {
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_output() {
        assert_eq!(PresenterType::from_output(None), PresenterType::Stdout);
        assert_eq!(
            PresenterType::from_output(Some(PathBuf::from("view.md"))),
            PresenterType::File(PathBuf::from("view.md"))
        );
    }

    #[test]
    fn test_file_presenter_writes_view() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metrics.md");

        let presenter = PresenterFactory::create(PresenterType::File(path.clone()));
        presenter.present("# Dashboard Metrics\n").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Dashboard Metrics\n"
        );
    }

    #[test]
    fn test_file_presenter_missing_parent_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("metrics.md");

        let presenter = PresenterFactory::create(PresenterType::File(path));
        assert!(presenter.present("x").is_err());
    }
}
