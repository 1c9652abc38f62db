/// Integration tests for the application layer
mod test_utilities;

use inventory_lens::application::read_models::empty_state_message;
use inventory_lens::prelude::*;
use serde_json::json;
use std::collections::HashSet;
use std::path::Path;
use test_utilities::mocks::*;

const SAMPLE_DATA: &str = "tests/fixtures/sample-data";

fn sample_source() -> MockFixtureSource {
    MockFixtureSource::from_dir(Path::new(SAMPLE_DATA))
}

/// Required fixtures only; every optional one fails.
fn required_only_source() -> MockFixtureSource {
    FixtureKind::optional().fold(
        MockFixtureSource::from_dir(Path::new(SAMPLE_DATA)),
        |source, kind| source.failing(kind),
    )
}

#[tokio::test]
async fn test_load_sample_data_happy_path() {
    let reporter = MockProgressReporter::new();
    let use_case = LoadDashboardUseCase::new(sample_source(), reporter.clone());

    let snapshot = use_case.refresh().await.unwrap();

    assert!(!snapshot.is_degraded());
    assert!(snapshot.load_error.is_none());
    assert_eq!(
        snapshot.metrics,
        DashboardMetrics {
            microservices: 3,
            languages: 3,
            dependencies: 4,
            apis: 2,
            pull_requests: 2,
            commits: 57,
            images: 2,
            packages: 3,
            clusters: 1,
            nodes: 3,
            namespaces: 2,
        }
    );
    assert!(reporter.errors().is_empty());
    assert!(reporter
        .get_messages()
        .iter()
        .any(|m| m.starts_with("Progress: 10/10")));
}

#[tokio::test]
async fn test_every_optional_fixture_fails() {
    let use_case = LoadDashboardUseCase::new(required_only_source(), MockProgressReporter::new());

    let snapshot = use_case.refresh().await.unwrap();

    assert!(!snapshot.is_degraded());
    assert_eq!(snapshot.missing_optional.len(), 7);
    assert_eq!(snapshot.metrics.microservices, 3);
    assert_eq!(snapshot.metrics.commits, 57);
    assert_eq!(snapshot.metrics.packages, 3);

    for kind in [ViewKind::Security, ViewKind::BaseImages, ViewKind::ServiceOwner] {
        let view = use_case.render(&ViewRequest::new(kind)).unwrap();
        assert_eq!(
            view.content,
            ViewContent::Empty {
                message: empty_state_message(kind).to_string()
            },
            "{} should render its empty state",
            kind.name()
        );
    }

    // Technologies, dependencies and open source security fall back to the
    // inventory sections
    for kind in [ViewKind::Technologies, ViewKind::OpensourceSecurity] {
        let view = use_case.render(&ViewRequest::new(kind)).unwrap();
        assert!(!view.is_empty_state(), "{} should use the inventory", kind.name());
    }
}

#[tokio::test]
async fn test_required_failure_renders_from_empty_fixtures() {
    let reporter = MockProgressReporter::new();
    let source = sample_source().failing(FixtureKind::ImageInventory);
    let use_case = LoadDashboardUseCase::new(source, reporter.clone());

    let snapshot = use_case.refresh().await.unwrap();

    assert!(snapshot.is_degraded());
    assert_eq!(snapshot.metrics, DashboardMetrics::placeholder());
    assert!(snapshot
        .load_error
        .as_deref()
        .unwrap()
        .contains("/data/image_inventory.json"));
    assert_eq!(reporter.errors().len(), 1);

    // Required fixtures are empty and every optional slot is cleared
    for kind in [
        ViewKind::Microservices,
        ViewKind::Security,
        ViewKind::BaseImages,
        ViewKind::OpensourceSecurity,
        ViewKind::ServiceOwner,
    ] {
        let view = use_case.render(&ViewRequest::new(kind)).unwrap();
        assert!(view.is_empty_state(), "{} should render its empty state", kind.name());
        assert!(view.load_error.is_some());
    }
    assert!(snapshot.fixture(FixtureKind::SecurityFindings).is_none());
}

#[tokio::test]
async fn test_refresh_uses_fresh_cache_bust_tokens() {
    let source = sample_source();
    let use_case = LoadDashboardUseCase::new(source.clone(), MockProgressReporter::new());

    let first = use_case.refresh().await.unwrap();
    let second = use_case.refresh().await.unwrap();

    assert_eq!(first.generation, 1);
    assert_eq!(second.generation, 2);
    assert_eq!(source.request_count(), 20);
    let tokens: HashSet<u64> = source
        .requests
        .lock()
        .unwrap()
        .iter()
        .map(|(_, token)| *token)
        .collect();
    assert_eq!(tokens.len(), 20);
}

#[tokio::test]
async fn test_security_view_from_flat_findings() {
    let use_case = LoadDashboardUseCase::new(sample_source(), MockProgressReporter::new());
    use_case.refresh().await.unwrap();

    let view = use_case.render(&ViewRequest::new(ViewKind::Security)).unwrap();
    let ViewContent::Security(security) = view.content else {
        panic!("expected security view");
    };
    assert_eq!(security.summary.total_findings, 5);
    assert_eq!(security.summary.critical, 1);
    assert_eq!(security.summary.high, 2);
    assert_eq!(security.summary.medium, 1);
    assert_eq!(security.summary.low, 1);
    assert_eq!(security.summary.by_service.get("frontend"), Some(&3));
    assert_eq!(security.summary.by_service.get("cartservice"), Some(&2));
}

#[tokio::test]
async fn test_service_owner_workspace_flow() {
    let use_case = LoadDashboardUseCase::new(sample_source(), MockProgressReporter::new());
    let snapshot = use_case.refresh().await.unwrap();

    let mut workspace = ServiceOwnerWorkspace::from_fixture(
        snapshot.fixture(FixtureKind::ServiceOwner),
        SeverityMatch::Exact,
    );
    assert_eq!(workspace.state(), &WorkspaceState::ServiceList);

    workspace
        .dispatch(WorkspaceEvent::SelectService("paymentservice".to_string()))
        .unwrap();
    let reply = workspace.ask("What is the risk score?").unwrap();
    assert!(reply.text.contains("risk score of 86"));
    assert!(reply.text.contains("Critical"));

    workspace
        .dispatch(WorkspaceEvent::ViewDetailedVulnerabilities)
        .unwrap();
    workspace.set_severity_filter(Some(Severity::High));
    let detail = workspace.granular_detail().unwrap();
    assert_eq!(detail.vulnerabilities.len(), 2);

    workspace.dispatch(WorkspaceEvent::Back).unwrap();
    workspace.dispatch(WorkspaceEvent::Back).unwrap();
    assert_eq!(workspace.state(), &WorkspaceState::ServiceList);
    assert!(workspace
        .dispatch(WorkspaceEvent::ViewDetailedVulnerabilities)
        .is_err());
}

#[tokio::test]
async fn test_rendered_views_format_in_both_formats() {
    let use_case = LoadDashboardUseCase::new(sample_source(), MockProgressReporter::new());
    use_case.refresh().await.unwrap();

    for kind in ViewKind::ALL {
        let view = use_case.render(&ViewRequest::new(kind)).unwrap();

        let markdown = MarkdownFormatter::new().format(&view).unwrap();
        assert!(markdown.starts_with(&format!("# {}", kind.title())));

        let json = JsonFormatter::new().format(&view).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["view"], json!(kind.name()));
    }
}

#[test]
fn test_safe_get_defaults() {
    let fixture = json!({"a": {"b": [1, 2, 3]}});
    assert_eq!(safe_get(Some(&fixture), "a.b.length", 0u64), 3);
    assert_eq!(safe_get(Some(&fixture), "a.missing.deep", 7u64), 7);
    assert_eq!(safe_get(None, "a", "x".to_string()), "x");
}
