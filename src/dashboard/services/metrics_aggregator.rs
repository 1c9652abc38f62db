use crate::dashboard::domain::{DashboardMetrics, FixtureKind, FixtureSet};
use crate::shared::safe_get::{node, safe_count, safe_len};
use serde_json::Value;

/// MetricsAggregator - derives the overview counters from raw fixtures
///
/// Pure and idempotent: the same fixtures always produce the same metrics,
/// and any missing path contributes zero.
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Computes the eleven overview counts
    ///
    /// # Arguments
    /// * `inventory` - Microservices inventory fixture
    /// * `activity` - Repository activity summary fixture
    /// * `image` - Image inventory fixture
    /// * `_security` - Security findings fixture; accepted for symmetry with
    ///   the load batch but no counter is derived from it
    pub fn aggregate(
        inventory: Option<&Value>,
        activity: Option<&Value>,
        image: Option<&Value>,
        _security: Option<&Value>,
    ) -> DashboardMetrics {
        DashboardMetrics {
            microservices: safe_len(inventory, "services.services") as u64,
            languages: safe_len(inventory, "technologies.languages") as u64,
            dependencies: safe_count(inventory, "dependencies.total_count"),
            apis: safe_len(inventory, "apis.endpoints") as u64,
            pull_requests: safe_count(activity, "summary.total_pull_requests"),
            commits: safe_count(activity, "summary.total_commits"),
            images: safe_len(image, "images") as u64,
            packages: Self::count_packages(image),
            clusters: safe_count(image, "infrastructure.clusters"),
            nodes: safe_count(image, "infrastructure.nodes"),
            namespaces: safe_count(image, "infrastructure.namespaces"),
        }
    }

    /// Convenience wrapper reading the relevant slots of a fixture set.
    pub fn from_fixtures(fixtures: &FixtureSet) -> DashboardMetrics {
        Self::aggregate(
            fixtures.get(FixtureKind::MicroservicesInventory),
            fixtures.get(FixtureKind::RepoActivity),
            fixtures.get(FixtureKind::ImageInventory),
            fixtures.get(FixtureKind::SecurityFindings),
        )
    }

    /// Sum of package list lengths over every image. Only arrays count.
    fn count_packages(image: Option<&Value>) -> u64 {
        match node(image, "images") {
            Some(Value::Array(images)) => images
                .iter()
                .map(|img| match node(Some(img), "packages") {
                    Some(Value::Array(packages)) => packages.len() as u64,
                    _ => 0,
                })
                .sum(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn inventory() -> Value {
        json!({
            "services": {"services": [{"name": "a"}, {"name": "b"}, {"name": "c"}]},
            "technologies": {"languages": {"Python": 10, "Go": 4}},
            "dependencies": {"total_count": 42},
            "apis": {"endpoints": [{"path": "/a"}, {"path": "/b"}]}
        })
    }

    #[test]
    fn test_aggregate_full_fixtures() {
        let activity = json!({"summary": {"total_pull_requests": 7, "total_commits": 250}});
        let image = json!({
            "images": [
                {"name": "api", "packages": ["a", "b", "c"]},
                {"name": "web", "packages": [{"name": "x"}]},
                {"name": "job"}
            ],
            "infrastructure": {"clusters": 2, "nodes": 6, "namespaces": 3}
        });

        let metrics =
            MetricsAggregator::aggregate(Some(&inventory()), Some(&activity), Some(&image), None);

        assert_eq!(metrics.microservices, 3);
        assert_eq!(metrics.languages, 2);
        assert_eq!(metrics.dependencies, 42);
        assert_eq!(metrics.apis, 2);
        assert_eq!(metrics.pull_requests, 7);
        assert_eq!(metrics.commits, 250);
        assert_eq!(metrics.images, 3);
        assert_eq!(metrics.packages, 4);
        assert_eq!(metrics.clusters, 2);
        assert_eq!(metrics.nodes, 6);
        assert_eq!(metrics.namespaces, 3);
    }

    #[test]
    fn test_aggregate_missing_fixtures_is_all_zero() {
        let metrics = MetricsAggregator::aggregate(None, None, None, None);
        assert_eq!(metrics, DashboardMetrics::default());
    }

    #[test]
    fn test_empty_images_means_zero_packages() {
        let image = json!({"images": []});
        let metrics = MetricsAggregator::aggregate(None, None, Some(&image), None);
        assert_eq!(metrics.packages, 0);
        assert_eq!(metrics.images, 0);
    }

    #[test]
    fn test_aggregate_malformed_fixtures_is_all_zero() {
        let cases = [
            json!(42),
            json!("services"),
            json!([null, 1]),
            json!({
                "services": "a,b",
                "technologies": {"languages": "Go"},
                "dependencies": {"total_count": "42"},
                "apis": 3,
                "summary": {"total_pull_requests": -7, "total_commits": "250"},
                "images": "api",
                "infrastructure": {"clusters": "2", "nodes": null, "namespaces": [3]}
            }),
        ];

        for fixture in &cases {
            let metrics = MetricsAggregator::aggregate(
                Some(fixture),
                Some(fixture),
                Some(fixture),
                Some(fixture),
            );
            assert_eq!(metrics, DashboardMetrics::default(), "{}", fixture);
        }
    }

    #[test]
    fn test_packages_count_only_lists() {
        let image = json!({
            "images": [
                null,
                "api",
                {"name": "web", "packages": "openssl"},
                {"name": "job", "packages": {"name": "zlib"}},
                {"name": "db", "packages": [null, "musl"]}
            ]
        });
        let metrics = MetricsAggregator::aggregate(None, None, Some(&image), None);
        assert_eq!(metrics.images, 5);
        assert_eq!(metrics.packages, 2);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let inv = inventory();
        let first = MetricsAggregator::aggregate(Some(&inv), None, None, None);
        let second = MetricsAggregator::aggregate(Some(&inv), None, None, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_empty_required_fixtures() {
        let metrics = MetricsAggregator::from_fixtures(&FixtureSet::with_empty_required());
        assert_eq!(metrics, DashboardMetrics::default());
    }
}
