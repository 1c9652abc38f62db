use crate::application::dto::{DashboardSnapshot, ViewRequest};
use crate::application::read_models::DashboardView;
use crate::application::use_cases::RenderViewUseCase;
use crate::dashboard::domain::{DashboardMetrics, FixtureKind, FixtureSet};
use crate::dashboard::services::MetricsAggregator;
use crate::ports::inbound::DashboardPort;
use crate::ports::outbound::{FixtureSource, ProgressReporter};
use crate::shared::error::DashboardError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

#[cfg(test)]
mod tests;

/// Source of `?t=` cache-busting tokens
///
/// Tokens are seeded from the wall clock in epoch milliseconds and strictly
/// increase across calls, even when several fetches start within the same
/// millisecond.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicU64,
}

impl CacheBuster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next token: `max(now_ms, previous + 1)`.
    pub fn next_token(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }
}

type FetchOutcome = (FixtureKind, Result<Value>);

/// LoadDashboardUseCase - fetches every fixture and commits a snapshot
///
/// Each refresh is tagged with a generation number. All ten fetches of a
/// batch run concurrently; once they settle, the batch's snapshot is
/// committed only if no newer refresh has started in the meantime.
/// Superseded batches run to completion and are then discarded.
///
/// # Type Parameters
/// * `FS` - FixtureSource implementation
/// * `PR` - ProgressReporter implementation
pub struct LoadDashboardUseCase<FS, PR> {
    fixture_source: FS,
    progress_reporter: PR,
    cache_buster: CacheBuster,
    generation: AtomicU64,
    loading: AtomicBool,
    state: RwLock<DashboardSnapshot>,
}

impl<FS, PR> LoadDashboardUseCase<FS, PR>
where
    FS: FixtureSource,
    PR: ProgressReporter,
{
    /// Creates a new LoadDashboardUseCase with injected dependencies
    pub fn new(fixture_source: FS, progress_reporter: PR) -> Self {
        Self {
            fixture_source,
            progress_reporter,
            cache_buster: CacheBuster::new(),
            generation: AtomicU64::new(0),
            loading: AtomicBool::new(false),
            state: RwLock::new(DashboardSnapshot::initial()),
        }
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    /// Runs one load batch and returns the snapshot in effect afterwards
    ///
    /// That is this batch's snapshot unless a newer refresh committed first.
    pub async fn execute(&self) -> DashboardSnapshot {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.loading.store(true, Ordering::SeqCst);
        tracing::debug!(generation, "starting fixture batch");

        self.progress_reporter.report(&format!(
            "📡 Loading {} fixture(s) from: {}",
            FixtureKind::ALL.len(),
            self.fixture_source.describe()
        ));

        let settled = AtomicUsize::new(0);
        let (required, optional) = futures::join!(
            join_all(FixtureKind::required().map(|kind| self.fetch(kind, &settled))),
            join_all(FixtureKind::optional().map(|kind| self.fetch(kind, &settled))),
        );

        let snapshot = self.build_snapshot(generation, required, optional);
        self.commit(snapshot)
    }

    /// Snapshot committed by the newest completed batch.
    pub fn current(&self) -> DashboardSnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True while the newest batch has not settled.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    async fn fetch(&self, kind: FixtureKind, settled: &AtomicUsize) -> FetchOutcome {
        let token = self.cache_buster.next_token();
        let result = self.fixture_source.fetch_fixture(kind, token).await;

        let done = settled.fetch_add(1, Ordering::SeqCst) + 1;
        self.progress_reporter.report_progress(
            done,
            FixtureKind::ALL.len(),
            Some(kind.file_name()),
        );
        (kind, result)
    }

    fn build_snapshot(
        &self,
        generation: u64,
        required: Vec<FetchOutcome>,
        optional: Vec<FetchOutcome>,
    ) -> DashboardSnapshot {
        let mut fixtures = FixtureSet::new();
        let mut failed_required = Vec::new();

        for (kind, result) in required {
            match result {
                Ok(value) => fixtures.insert(kind, value),
                Err(e) => {
                    tracing::error!(fixture = %kind, error = %e, "required fixture failed");
                    failed_required.push(kind);
                }
            }
        }

        let mut load_error = None;
        let metrics = if failed_required.is_empty() {
            MetricsAggregator::from_fixtures(&fixtures)
        } else {
            // All or nothing: one failed required fixture empties all three.
            fixtures = FixtureSet::with_empty_required();
            let error = DashboardError::RequiredFixturesFailed {
                resources: failed_required.iter().map(|k| k.resource_path()).collect(),
            };
            self.progress_reporter.report_error(&format!("❌ {}", error));
            load_error = Some(error.to_string());
            DashboardMetrics::placeholder()
        };

        // A failed required fixture also clears every optional slot.
        let keep_optional = failed_required.is_empty();
        let mut missing_optional = Vec::new();
        for (kind, result) in optional {
            match result {
                Ok(value) if keep_optional => fixtures.insert(kind, value),
                Ok(_) => tracing::debug!(fixture = %kind, "optional fixture dropped with failed batch"),
                Err(e) => {
                    tracing::warn!(fixture = %kind, error = %e, "optional fixture unavailable");
                    missing_optional.push(kind);
                }
            }
        }

        if !missing_optional.is_empty() {
            self.progress_reporter.report(&format!(
                "⚠️  {} optional fixture(s) unavailable; their views will be empty",
                missing_optional.len()
            ));
        }

        DashboardSnapshot {
            fixtures,
            metrics,
            load_error,
            failed_required,
            missing_optional,
            generation,
            loaded_at: Some(Utc::now()),
        }
    }

    fn commit(&self, snapshot: DashboardSnapshot) -> DashboardSnapshot {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if snapshot.generation == self.generation.load(Ordering::SeqCst) {
            let degraded = snapshot.is_degraded();
            *state = snapshot;
            self.loading.store(false, Ordering::SeqCst);
            if !degraded {
                self.progress_reporter.report_completion(&format!(
                    "✅ Loaded {} fixture(s)",
                    state.fixtures.len()
                ));
            }
        } else {
            tracing::debug!(
                generation = snapshot.generation,
                "discarding superseded fixture batch"
            );
        }

        state.clone()
    }
}

#[async_trait]
impl<FS, PR> DashboardPort for LoadDashboardUseCase<FS, PR>
where
    FS: FixtureSource,
    PR: ProgressReporter,
{
    async fn refresh(&self) -> Result<DashboardSnapshot> {
        Ok(self.execute().await)
    }

    fn snapshot(&self) -> DashboardSnapshot {
        self.current()
    }

    fn render(&self, request: &ViewRequest) -> Result<DashboardView> {
        RenderViewUseCase::execute(&self.current(), request)
    }
}
