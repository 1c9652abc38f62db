use super::*;
use crate::application::dto::ViewKind;
use crate::application::read_models::ViewContent;
use anyhow::anyhow;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::AtomicUsize;
use std::sync::Mutex;
use std::time::Duration;

// Mock implementations for testing
struct MockFixtureSource {
    fixtures: HashMap<FixtureKind, Value>,
    failing: HashSet<FixtureKind>,
    tokens: Mutex<Vec<u64>>,
}

impl MockFixtureSource {
    fn new() -> Self {
        let fixtures = HashMap::from([
            (
                FixtureKind::MicroservicesInventory,
                json!({
                    "services": {"services": [{"name": "frontend"}, {"name": "cartservice"}]},
                    "technologies": {"languages": {"Go": 1, "C#": 1}},
                    "dependencies": {"total_count": 3},
                    "apis": {"endpoints": [{"path": "/cart"}]}
                }),
            ),
            (
                FixtureKind::RepoActivity,
                json!({"summary": {"total_pull_requests": 4, "total_commits": 40}}),
            ),
            (
                FixtureKind::ImageInventory,
                json!({
                    "images": [{"name": "frontend", "packages": ["a", "b"]}],
                    "infrastructure": {"clusters": 1, "nodes": 3, "namespaces": 2}
                }),
            ),
            (FixtureKind::SecurityFindings, json!([])),
            (FixtureKind::ServiceOwner, json!({"services": []})),
        ]);
        Self {
            fixtures,
            failing: HashSet::new(),
            tokens: Mutex::new(Vec::new()),
        }
    }

    fn failing(mut self, kind: FixtureKind) -> Self {
        self.failing.insert(kind);
        self
    }
}

#[async_trait]
impl FixtureSource for MockFixtureSource {
    async fn fetch_fixture(&self, kind: FixtureKind, cache_bust: u64) -> Result<Value> {
        self.tokens.lock().unwrap().push(cache_bust);
        if self.failing.contains(&kind) {
            return Err(anyhow!("HTTP 500"));
        }
        self.fixtures
            .get(&kind)
            .cloned()
            .ok_or_else(|| anyhow!("HTTP 404"))
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

/// Answers the first batch slowly and every later batch immediately, with a
/// different service count per batch.
struct RacingFixtureSource {
    calls: AtomicUsize,
}

#[async_trait]
impl FixtureSource for RacingFixtureSource {
    async fn fetch_fixture(&self, kind: FixtureKind, _cache_bust: u64) -> Result<Value> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let first_batch = call < FixtureKind::ALL.len();
        if first_batch {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        let services: Vec<Value> = if first_batch {
            vec![json!({"name": "stale"})]
        } else {
            vec![json!({"name": "fresh-a"}), json!({"name": "fresh-b"})]
        };
        match kind {
            FixtureKind::MicroservicesInventory => Ok(json!({"services": {"services": services}})),
            _ => Ok(json!({})),
        }
    }

    fn describe(&self) -> String {
        "racing mock".to_string()
    }
}

#[derive(Default)]
struct MockProgressReporter {
    errors: Mutex<Vec<String>>,
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
    fn report_completion(&self, _message: &str) {}
}

#[tokio::test]
async fn test_all_fixtures_loaded() {
    let use_case = LoadDashboardUseCase::new(MockFixtureSource::new(), MockProgressReporter::default());

    let snapshot = use_case.execute().await;

    assert_eq!(snapshot.generation, 1);
    assert!(snapshot.load_error.is_none());
    assert!(!snapshot.is_degraded());
    assert_eq!(snapshot.metrics.microservices, 2);
    assert_eq!(snapshot.metrics.languages, 2);
    assert_eq!(snapshot.metrics.packages, 2);
    assert_eq!(snapshot.metrics.nodes, 3);
    assert!(snapshot.loaded_at.is_some());
    assert!(!use_case.is_loading());
    assert_eq!(use_case.current(), snapshot);
}

#[tokio::test]
async fn test_optional_failures_are_absent() {
    let use_case = LoadDashboardUseCase::new(MockFixtureSource::new(), MockProgressReporter::default());

    let snapshot = use_case.execute().await;

    // Five optional fixtures are not served by the mock at all
    assert_eq!(snapshot.missing_optional.len(), 5);
    assert!(snapshot.missing_optional.contains(&FixtureKind::BaseImages));
    assert!(snapshot.fixture(FixtureKind::BaseImages).is_none());
    assert!(snapshot.fixture(FixtureKind::ServiceOwner).is_some());
    assert!(!snapshot.is_degraded());
}

#[tokio::test]
async fn test_required_failure_empties_required_fixtures() {
    let source = MockFixtureSource::new().failing(FixtureKind::RepoActivity);
    let reporter = MockProgressReporter::default();
    let use_case = LoadDashboardUseCase::new(source, reporter);

    let snapshot = use_case.execute().await;

    assert!(snapshot.is_degraded());
    assert_eq!(snapshot.failed_required, vec![FixtureKind::RepoActivity]);
    let error = snapshot.load_error.as_deref().unwrap();
    assert!(error.contains("/data/repo_activity_summary.json"));
    assert_eq!(snapshot.metrics, DashboardMetrics::placeholder());

    // The inventory loaded fine but is replaced by its empty form
    assert_eq!(
        snapshot.fixture(FixtureKind::MicroservicesInventory),
        FixtureKind::MicroservicesInventory.empty_fixture().as_ref()
    );
    // Optional fixtures are dropped even when they loaded
    for kind in FixtureKind::optional() {
        assert!(snapshot.fixture(kind).is_none(), "{}", kind);
    }
    assert!(!snapshot.missing_optional.contains(&FixtureKind::ServiceOwner));
    assert!(!use_case.is_loading());
    assert_eq!(use_case.progress_reporter.errors.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cache_bust_tokens_are_unique_per_fetch() {
    let use_case = LoadDashboardUseCase::new(MockFixtureSource::new(), MockProgressReporter::default());

    use_case.execute().await;
    use_case.execute().await;

    let tokens = use_case.fixture_source.tokens.lock().unwrap().clone();
    assert_eq!(tokens.len(), 2 * FixtureKind::ALL.len());
    let unique: HashSet<u64> = tokens.iter().copied().collect();
    assert_eq!(unique.len(), tokens.len());
}

#[tokio::test]
async fn test_superseded_batch_is_discarded() {
    let source = RacingFixtureSource {
        calls: AtomicUsize::new(0),
    };
    let use_case = LoadDashboardUseCase::new(source, MockProgressReporter::default());

    let (first, second) = tokio::join!(use_case.execute(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        use_case.execute().await
    });

    assert_eq!(second.generation, 2);
    assert_eq!(second.metrics.microservices, 2);
    // The slow first batch settles last and returns the newer snapshot
    assert_eq!(first.generation, 2);

    let current = use_case.current();
    assert_eq!(current.generation, 2);
    assert_eq!(current.metrics.microservices, 2);
    assert!(!use_case.is_loading());
}

#[tokio::test]
async fn test_snapshot_before_first_load() {
    let use_case = LoadDashboardUseCase::new(MockFixtureSource::new(), MockProgressReporter::default());

    let snapshot = use_case.snapshot();

    assert!(!snapshot.is_loaded());
    assert_eq!(snapshot.metrics, DashboardMetrics::placeholder());
    assert!(!use_case.is_loading());
}

#[tokio::test]
async fn test_dashboard_port_renders_current_snapshot() {
    let use_case = LoadDashboardUseCase::new(MockFixtureSource::new(), MockProgressReporter::default());

    let snapshot = use_case.refresh().await.unwrap();
    let view = use_case.render(&ViewRequest::new(ViewKind::Metrics)).unwrap();

    assert_eq!(view.generation, snapshot.generation);
    assert_eq!(view.content, ViewContent::Metrics(snapshot.metrics));
}

#[test]
fn test_cache_buster_is_strictly_increasing() {
    let buster = CacheBuster::new();
    let tokens: Vec<u64> = (0..100).map(|_| buster.next_token()).collect();
    assert!(tokens.windows(2).all(|pair| pair[1] > pair[0]));
    assert!(tokens[0] > 1_600_000_000_000);
}
