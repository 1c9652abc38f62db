/// Filesystem adapters for fixture input and view output
mod directory_fixture_source;
mod file_writer;

pub use directory_fixture_source::DirectoryFixtureSource;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
