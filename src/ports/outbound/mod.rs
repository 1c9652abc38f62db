/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (network, file system, console).
pub mod fixture_source;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;

pub use fixture_source::FixtureSource;
pub use formatter::ViewFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
