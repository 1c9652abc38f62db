use crate::application::dto::{OutputFormat, ViewKind};
use crate::dashboard::domain::Severity;
use crate::dashboard::policies::SeverityMatch;
use crate::dashboard::services::FixAvailability;
use clap::Parser;
use std::path::PathBuf;

/// Render the inventory dashboard from its JSON fixtures
#[derive(Parser, Debug)]
#[command(name = "inventory-lens")]
#[command(version)]
#[command(
    about = "Render the microservices inventory dashboard from its JSON fixtures",
    long_about = None
)]
pub struct Args {
    /// Origin serving /data/*.json (e.g. http://localhost:3000)
    #[arg(long, value_name = "URL", conflicts_with = "data_dir")]
    pub base_url: Option<String>,

    /// Directory containing the fixture files
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Tab to render: metrics, microservices, technologies, dependencies, apis,
    /// infrastructure, activity, images, base-images, security,
    /// opensource-security or service-owner
    #[arg(short, long)]
    pub view: Option<ViewKind>,

    /// Output format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a config file (defaults to ./inventory-lens.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Search term for the dependencies and open source security tabs
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Dependency type facet ("all" disables it)
    #[arg(long = "dep-type", value_name = "TYPE")]
    pub dep_type: Option<String>,

    /// Dependency source facet ("all" disables it)
    #[arg(long = "dep-source", value_name = "SOURCE")]
    pub dep_source: Option<String>,

    /// Severity filter: critical, high, medium or low
    #[arg(long)]
    pub severity: Option<Severity>,

    /// Vulnerability type filter for the open source security tab
    #[arg(long = "vuln-type", value_name = "TYPE")]
    pub vuln_type: Option<String>,

    /// Fix availability filter: all, fixed or not-fixed
    #[arg(long)]
    pub fix: Option<FixAvailability>,

    /// Service to select (service-owner) or filter by (security)
    #[arg(long, value_name = "NAME")]
    pub service: Option<String>,

    /// Question for the service-owner copilot. Can be specified multiple times
    #[arg(long = "ask", value_name = "QUESTION")]
    pub ask: Vec<String>,

    /// Open the granular vulnerability panel of the selected service
    #[arg(long)]
    pub granular: bool,

    /// Severity label comparison: exact or case-insensitive
    #[arg(long, value_name = "MODE")]
    pub severity_match: Option<SeverityMatch>,

    /// Per-request timeout in seconds for --base-url
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Session token; when given it must be non-empty
    #[arg(long)]
    pub token: Option<String>,

    /// Email shown as the signed-in user
    #[arg(long, value_name = "EMAIL", requires = "token")]
    pub user_email: Option<String>,

    /// Only print errors on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Same as `parse_args`, but lets the caller choose the exit code on error.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("inventory-lens").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_are_unset() {
        let args = parse(&[]).unwrap();
        assert!(args.view.is_none());
        assert!(args.format.is_none());
        assert!(args.ask.is_empty());
        assert!(!args.granular);
        assert!(!args.quiet);
    }

    #[test]
    fn test_view_and_format() {
        let args = parse(&["--view", "base-images", "--format", "md"]).unwrap();
        assert_eq!(args.view, Some(ViewKind::BaseImages));
        assert_eq!(args.format, Some(OutputFormat::Markdown));
    }

    #[test]
    fn test_invalid_view_is_rejected() {
        let err = parse(&["--view", "nope"]).unwrap_err();
        assert!(err.to_string().contains("Invalid view"));
    }

    #[test]
    fn test_base_url_conflicts_with_data_dir() {
        let result = parse(&["--base-url", "http://localhost", "--data-dir", "."]);
        assert!(result.is_err());
    }

    #[test]
    fn test_service_owner_flags() {
        let args = parse(&[
            "--view",
            "service-owner",
            "--service",
            "cartservice",
            "--ask",
            "risk?",
            "--ask",
            "vulnerabilities?",
            "--granular",
            "--severity",
            "HIGH",
        ])
        .unwrap();
        assert_eq!(args.service.as_deref(), Some("cartservice"));
        assert_eq!(args.ask, vec!["risk?", "vulnerabilities?"]);
        assert!(args.granular);
        assert_eq!(args.severity, Some(Severity::High));
    }

    #[test]
    fn test_filters() {
        let args = parse(&[
            "--search",
            "redis",
            "--dep-type",
            "runtime",
            "--dep-source",
            "npm",
            "--fix",
            "not-fixed",
            "--severity-match",
            "case-insensitive",
        ])
        .unwrap();
        assert_eq!(args.search.as_deref(), Some("redis"));
        assert_eq!(args.dep_type.as_deref(), Some("runtime"));
        assert_eq!(args.fix, Some(FixAvailability::NotFixed));
        assert_eq!(args.severity_match, Some(SeverityMatch::CaseInsensitive));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(parse(&["--timeout", "0"]).is_err());
        assert_eq!(parse(&["--timeout", "5"]).unwrap().timeout, Some(5));
    }

    #[test]
    fn test_user_email_requires_token() {
        assert!(parse(&["--user-email", "a@b.c"]).is_err());
        let args = parse(&["--token", "t", "--user-email", "a@b.c"]).unwrap();
        assert_eq!(args.user_email.as_deref(), Some("a@b.c"));
    }
}
