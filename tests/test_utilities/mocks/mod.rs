/// Mock implementations for testing
mod mock_fixture_source;
mod mock_progress_reporter;

pub use mock_fixture_source::MockFixtureSource;
pub use mock_progress_reporter::MockProgressReporter;
