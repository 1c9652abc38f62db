use crate::dashboard::domain::FixtureKind;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;

/// FixtureSource port for fetching the dashboard's JSON fixtures
///
/// This port abstracts where fixtures come from (HTTP server, local
/// directory, in-memory mock). Every call fetches one whole fixture; the
/// loader issues all of them concurrently.
///
/// # Async Support
/// Implementations must be `Send + Sync` so a batch of fetches can share one
/// source across concurrent futures.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    /// Fetches one fixture as untyped JSON
    ///
    /// # Arguments
    /// * `kind` - Which fixture to fetch
    /// * `cache_bust` - Token appended to the request so no cache serves a
    ///   stale copy. Sources without caches may ignore it.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The fixture cannot be reached (transport error, missing file)
    /// - The source answers with a non-success status
    /// - The body is not valid JSON
    async fn fetch_fixture(&self, kind: FixtureKind, cache_bust: u64) -> Result<Value>;

    /// Short description of the source for progress messages.
    fn describe(&self) -> String;
}
