use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Lets scripts tell a clean render apart from one produced over
/// placeholder data, and both apart from outright failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every required fixture loaded and the view was rendered
    Success = 0,
    /// A required fixture failed; the view was rendered from empty fixtures
    DegradedData = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (config error, unreadable data directory, write failure, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::DegradedData => write!(f, "Degraded Data (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the dashboard core.
///
/// Normalizers never produce these; they surface from loading, I/O,
/// configuration and the service-owner workspace.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to fetch fixture: {resource}\nDetails: {details}\n\n💡 Hint: Check that the base URL or data directory serves {resource}")]
    FixtureUnavailable { resource: String, details: String },

    #[error("Failed to parse fixture: {resource}\nDetails: {details}\n\n💡 Hint: Please verify that the fixture contains valid JSON")]
    FixtureParseError { resource: String, details: String },

    #[error("Required fixtures could not be loaded: {}\n\n💡 Hint: The dashboard is showing empty data. Fix the data source and refresh", resources.join(", "))]
    RequiredFixturesFailed { resources: Vec<String> },

    #[error("Invalid data directory: {path}\nReason: {reason}\n\n💡 Hint: Please specify a directory containing the dashboard JSON fixtures")]
    InvalidDataDir { path: PathBuf, reason: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid navigation: cannot {event} while in {state}\n\n💡 Hint: Select a service before asking for its detailed vulnerabilities")]
    InvalidTransition { state: String, event: String },

    #[error("Not signed in\n\n💡 Hint: Provide a non-empty --token to view the dashboard")]
    NotAuthenticated,

    #[error("Unknown service: {name}\n\n💡 Hint: Use a service name from the microservices view")]
    UnknownService { name: String },

    /// Validation error for builder patterns and config values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
