use crate::dashboard::domain::FixtureKind;
use crate::ports::outbound::FixtureSource;
use crate::shared::error::DashboardError;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// HttpFixtureSource adapter for fetching fixtures from a web server
///
/// This adapter implements the FixtureSource port over HTTP. Fixtures are
/// requested as `GET {base_url}/data/<file>.json?t=<cache_bust>`; the token
/// keeps intermediate caches from serving a stale document.
///
/// # Async Support
/// Uses the async reqwest client, so a whole batch of fetches can be in
/// flight at once over one connection pool.
pub struct HttpFixtureSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFixtureSource {
    /// Creates a new HTTP fixture source
    ///
    /// # Arguments
    /// * `base_url` - Origin serving the `/data` directory, e.g. `http://localhost:3000`
    /// * `timeout` - Per-request timeout; a timed-out fetch fails only its own fixture
    ///
    /// # Errors
    /// Returns an error if the base URL is not http(s) or the client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DashboardError::Validation {
                message: format!(
                    "Base URL must start with http:// or https://, got '{}'",
                    base_url
                ),
            }
            .into());
        }

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("inventory-lens/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Full request URL for one fixture.
    pub fn fixture_url(&self, kind: FixtureKind, cache_bust: u64) -> String {
        let token = cache_bust.to_string();
        format!(
            "{}{}?t={}",
            self.base_url,
            kind.resource_path(),
            urlencoding::encode(&token)
        )
    }
}

#[async_trait]
impl FixtureSource for HttpFixtureSource {
    async fn fetch_fixture(&self, kind: FixtureKind, cache_bust: u64) -> Result<Value> {
        let url = self.fixture_url(kind, cache_bust);
        tracing::debug!(%url, "fetching fixture");

        let response = self.client.get(&url).send().await.map_err(|e| {
            DashboardError::FixtureUnavailable {
                resource: kind.resource_path(),
                details: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(DashboardError::FixtureUnavailable {
                resource: kind.resource_path(),
                details: format!("server returned status code {}", response.status()),
            }
            .into());
        }

        let body = response.text().await.map_err(|e| DashboardError::FixtureUnavailable {
            resource: kind.resource_path(),
            details: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| {
            DashboardError::FixtureParseError {
                resource: kind.resource_path(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
