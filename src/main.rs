mod adapters;
mod application;
mod cli;
mod config;
mod dashboard;
mod ports;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::DirectoryFixtureSource;
use adapters::outbound::network::HttpFixtureSource;
use application::dto::{OutputFormat, ViewRequest};
use application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use application::use_cases::LoadDashboardUseCase;
use cli::Args;
use config::{ConfigFile, DEFAULT_REQUEST_TIMEOUT_SECS};
use dashboard::domain::Session;
use owo_colors::OwoColorize;
use ports::inbound::DashboardPort;
use ports::outbound::{FixtureSource, ProgressReporter};
use shared::error::ExitCode;
use shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Fixture directory used when neither the CLI nor the config names a source.
const DEFAULT_DATA_DIR: &str = "data";

#[tokio::main]
async fn main() {
    init_tracing();

    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\n{} {}", "Caused by:".yellow(), err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// `RUST_LOG` controls verbosity; warnings and errors only by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Where fixtures come from after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceSelection {
    Http { base_url: String, timeout: Duration },
    Directory(PathBuf),
}

impl SourceSelection {
    fn resolve(args: &Args, config: &ConfigFile) -> Self {
        let timeout = Duration::from_secs(
            args.timeout
                .or(config.request_timeout_secs)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );

        if let Some(base_url) = &args.base_url {
            return SourceSelection::Http {
                base_url: base_url.clone(),
                timeout,
            };
        }
        if let Some(dir) = &args.data_dir {
            return SourceSelection::Directory(dir.clone());
        }
        match (&config.base_url, &config.data_dir) {
            (Some(base_url), _) => SourceSelection::Http {
                base_url: base_url.clone(),
                timeout,
            },
            (None, Some(dir)) => SourceSelection::Directory(dir.clone()),
            (None, None) => SourceSelection::Directory(PathBuf::from(DEFAULT_DATA_DIR)),
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref(), args.quiet)?;

    let format = args.format.or_else(|| config.format()).unwrap_or_default();
    let request = build_request(&args, &config);
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    let presenter_type = PresenterType::from_output(args.output.clone());

    match SourceSelection::resolve(&args, &config) {
        SourceSelection::Http { base_url, timeout } => {
            let source = HttpFixtureSource::new(&base_url, timeout)?;
            render_dashboard(source, progress_reporter, &request, format, presenter_type).await
        }
        SourceSelection::Directory(dir) => {
            let source = DirectoryFixtureSource::new(dir)?;
            render_dashboard(source, progress_reporter, &request, format, presenter_type).await
        }
    }
}

fn load_config(explicit: Option<&Path>, quiet: bool) -> Result<ConfigFile> {
    let config = match explicit {
        Some(path) => {
            let config = config::load_config_from_path(path)?;
            if !quiet {
                eprintln!("📄 Loaded config from: {}", path.display());
            }
            Some(config)
        }
        None => {
            let config = config::discover_config(&std::env::current_dir()?)?;
            if config.is_some() && !quiet {
                eprintln!("📄 Auto-discovered config file: {}", config::CONFIG_FILENAME);
            }
            config
        }
    };
    Ok(config.unwrap_or_default())
}

fn build_request(args: &Args, config: &ConfigFile) -> ViewRequest {
    let view = args.view.or_else(|| config.view()).unwrap_or_default();
    let severity_match = args
        .severity_match
        .or_else(|| config.severity_match())
        .unwrap_or_default();
    let session = args.token.as_ref().map(|token| {
        Session::signed_in(token.clone(), args.user_email.clone().unwrap_or_default())
    });

    let mut request = ViewRequest::new(view)
        .with_severity(args.severity)
        .with_vulnerability_kind(args.vuln_type.clone())
        .with_fix(args.fix.unwrap_or_default())
        .with_service(args.service.clone())
        .with_questions(args.ask.clone())
        .with_granular(args.granular)
        .with_severity_match(severity_match)
        .with_session(session);
    if let Some(search) = &args.search {
        request = request.with_search(search.clone());
    }
    if args.dep_type.is_some() || args.dep_source.is_some() {
        request = request.with_dependency_facets(
            args.dep_type.as_deref().unwrap_or("all"),
            args.dep_source.as_deref().unwrap_or("all"),
        );
    }
    request
}

async fn render_dashboard<FS, PR>(
    fixture_source: FS,
    progress_reporter: PR,
    request: &ViewRequest,
    format: OutputFormat,
    presenter_type: PresenterType,
) -> Result<ExitCode>
where
    FS: FixtureSource,
    PR: ProgressReporter,
{
    tracing::info!(source = %fixture_source.describe(), view = request.view.name(), "rendering dashboard");
    let use_case = LoadDashboardUseCase::new(fixture_source, progress_reporter);

    let snapshot = use_case.refresh().await?;
    let view = use_case.render(request)?;

    use_case.progress_reporter().report(FormatterFactory::progress_message(format));
    let formatter = FormatterFactory::create(format);
    let output = formatter.format(&view)?;

    let presenter = PresenterFactory::create(presenter_type);
    presenter.present(&output)?;

    if snapshot.is_degraded() {
        Ok(ExitCode::DegradedData)
    } else {
        Ok(ExitCode::Success)
    }
}
