//! inventory-lens - data core of a microservices inventory dashboard
//!
//! Loads the dashboard's JSON fixtures (three required, seven optional),
//! normalizes them defensively into per-tab view models, and drives the
//! service-owner workspace with its rule-based copilot. The library follows
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dashboard`): Fixture vocabulary, severity and risk
//!   models, filters and the metrics aggregator
//! - **Application Layer** (`application`): Use cases, read models and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): HTTP and directory fixture sources, formatters,
//!   presenters and the console progress reporter
//! - **Shared** (`shared`): Error types, the safe accessor and file guards
//!
//! # Example
//!
//! ```no_run
//! use inventory_lens::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<()> {
//! let source = HttpFixtureSource::new("http://localhost:3000", Duration::from_secs(30))?;
//! let use_case = LoadDashboardUseCase::new(source, StderrProgressReporter::new());
//!
//! let snapshot = use_case.refresh().await?;
//! let view = use_case.render(&ViewRequest::new(ViewKind::Metrics))?;
//!
//! let output = MarkdownFormatter::new().format(&view)?;
//! println!("{}", output);
//! assert_eq!(view.generation, snapshot.generation);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod dashboard;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        DirectoryFixtureSource, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::network::HttpFixtureSource;
    pub use crate::application::dto::{DashboardSnapshot, OutputFormat, ViewKind, ViewRequest};
    pub use crate::application::read_models::{DashboardView, ViewContent};
    pub use crate::application::use_cases::{
        LoadDashboardUseCase, RenderViewUseCase, ServiceOwnerWorkspace, WorkspaceEvent,
        WorkspaceState,
    };
    pub use crate::dashboard::domain::{
        DashboardMetrics, FixtureKind, FixtureSet, RiskLevel, Session, Severity, SeverityCounts,
    };
    pub use crate::dashboard::policies::SeverityMatch;
    pub use crate::dashboard::services::MetricsAggregator;
    pub use crate::ports::inbound::DashboardPort;
    pub use crate::ports::outbound::{FixtureSource, OutputPresenter, ProgressReporter, ViewFormatter};
    pub use crate::shared::safe_get::safe_get;
    pub use crate::shared::Result;
}
