use crate::application::dto::{DashboardSnapshot, ViewRequest};
use crate::application::read_models::DashboardView;
use crate::shared::Result;
use async_trait::async_trait;

/// DashboardPort - Inbound port for loading and rendering the dashboard
///
/// This port defines the interface that external adapters (CLI, a future
/// UI shell) use to drive the dashboard. It represents the application's
/// public API.
#[async_trait]
pub trait DashboardPort: Send + Sync {
    /// Re-fetches every fixture and returns the snapshot now in effect
    ///
    /// A failed required fixture does not make this an error: the returned
    /// snapshot carries the load error and runs on empty fixtures.
    ///
    /// # Errors
    /// Returns an error only if the loader itself cannot run.
    async fn refresh(&self) -> Result<DashboardSnapshot>;

    /// Snapshot committed by the newest completed refresh.
    fn snapshot(&self) -> DashboardSnapshot;

    /// Renders one view from the current snapshot
    ///
    /// # Errors
    /// Returns an error if the request names a service that does not exist
    /// or asks for a workspace transition that is not allowed.
    fn render(&self, request: &ViewRequest) -> Result<DashboardView>;
}
