use crate::application::dto::{DashboardSnapshot, ViewKind, ViewRequest};
use crate::application::read_models::{
    ApisViewBuilder, BaseImagesViewBuilder, DashboardView, DependenciesViewBuilder,
    ImagesViewBuilder, InfrastructureViewBuilder, OpensourceSecurityViewBuilder,
    RepositoryActivityViewBuilder, SecurityFindingsViewBuilder, ServiceOwnerView,
    ServiceOwnerViewBuilder, TechnologiesViewBuilder, ViewContent,
};
use crate::application::use_cases::ServiceOwnerWorkspace;
use crate::dashboard::domain::{FixtureKind, Session};
use crate::dashboard::services::{DependencyFilter, VulnerabilityFilter};
use crate::shared::error::DashboardError;
use crate::shared::Result;

/// RenderViewUseCase - turns a snapshot into the view a request asks for
///
/// Stateless: the same snapshot and request always render the same view.
/// Views whose data source is absent or empty render their empty state.
pub struct RenderViewUseCase;

impl RenderViewUseCase {
    /// Renders `request.view` from `snapshot`
    ///
    /// # Errors
    /// Returns an error if:
    /// - `request.session` is present but not authenticated
    /// - The dependency search term is invalid
    /// - `request.service` names a service that exists in neither the
    ///   inventory nor the service-owner data
    pub fn execute(snapshot: &DashboardSnapshot, request: &ViewRequest) -> Result<DashboardView> {
        let user = match &request.session {
            Some(session) if !session.is_authenticated() => {
                return Err(DashboardError::NotAuthenticated.into())
            }
            Some(session) => session.display_identity().to_string(),
            None => Session::anonymous().display_identity().to_string(),
        };
        let content = Self::content(snapshot, request)?;

        Ok(DashboardView {
            view: request.view.name(),
            title: request.view.title(),
            generation: snapshot.generation,
            user,
            load_error: snapshot.load_error.clone(),
            metrics: snapshot.metrics,
            content,
        })
    }

    fn content(snapshot: &DashboardSnapshot, request: &ViewRequest) -> Result<ViewContent> {
        let inventory = snapshot.fixture(FixtureKind::MicroservicesInventory);
        let image = snapshot.fixture(FixtureKind::ImageInventory);
        let policy = request.severity_match;
        let view = request.view;

        let content = match view {
            ViewKind::Metrics => ViewContent::Metrics(snapshot.metrics),
            ViewKind::Microservices => {
                let list = ServiceOwnerViewBuilder::service_list(
                    inventory,
                    snapshot.fixture(FixtureKind::ServiceOwner),
                );
                non_empty(view, !list.is_empty(), || ViewContent::Microservices(list))
            }
            ViewKind::Technologies => {
                let technologies = TechnologiesViewBuilder::build(
                    snapshot.fixture(FixtureKind::Technologies),
                    inventory,
                );
                non_empty(view, !technologies.is_empty(), || {
                    ViewContent::Technologies(technologies)
                })
            }
            ViewKind::Dependencies => {
                let filter = DependencyFilter::new(
                    request.search.as_str(),
                    request.dependency_type.as_str(),
                    request.dependency_source.as_str(),
                )?;
                let dependencies = DependenciesViewBuilder::build(
                    snapshot.fixture(FixtureKind::Dependencies),
                    inventory,
                    &filter,
                );
                non_empty(view, !dependencies.is_empty(), || {
                    ViewContent::Dependencies(dependencies)
                })
            }
            ViewKind::Apis => {
                let apis = ApisViewBuilder::build(inventory);
                non_empty(view, !apis.is_empty(), || ViewContent::Apis(apis))
            }
            ViewKind::Infrastructure => {
                let infrastructure = InfrastructureViewBuilder::build(inventory);
                non_empty(view, !infrastructure.is_empty(), || {
                    ViewContent::Infrastructure(infrastructure)
                })
            }
            ViewKind::Activity => {
                let activity =
                    RepositoryActivityViewBuilder::build(snapshot.fixture(FixtureKind::RepoActivity));
                non_empty(view, !activity.is_empty(), || ViewContent::Activity(activity))
            }
            ViewKind::Images => {
                let images = ImagesViewBuilder::build(image);
                non_empty(view, !images.is_empty(), || ViewContent::Images(images))
            }
            ViewKind::BaseImages => {
                let base_images = BaseImagesViewBuilder::build(
                    snapshot.fixture(FixtureKind::BaseImages),
                    image,
                    policy,
                    request.today,
                );
                non_empty(view, !base_images.is_empty(), || {
                    ViewContent::BaseImages(base_images)
                })
            }
            ViewKind::Security => SecurityFindingsViewBuilder::build(
                snapshot.fixture(FixtureKind::SecurityFindings),
                policy,
                request.service.as_deref(),
            )
            .map_or_else(|| ViewContent::empty(view), ViewContent::Security),
            ViewKind::OpensourceSecurity => {
                let filter = VulnerabilityFilter::new(policy)
                    .with_severity(request.severity)
                    .with_kind(request.vulnerability_kind.as_deref())
                    .with_fix(request.fix);
                OpensourceSecurityViewBuilder::build(
                    snapshot.fixture(FixtureKind::OpensourceSecurity),
                    snapshot.fixture(FixtureKind::Dependencies),
                    inventory,
                    &filter,
                    &request.search,
                )
                .map_or_else(|| ViewContent::empty(view), ViewContent::OpensourceSecurity)
            }
            ViewKind::ServiceOwner => Self::service_owner(snapshot, request)?
                .map_or_else(|| ViewContent::empty(view), ViewContent::ServiceOwner),
        };

        Ok(content)
    }

    /// Drives a fresh workspace through the request's selection, detail
    /// level and copilot questions.
    fn service_owner(
        snapshot: &DashboardSnapshot,
        request: &ViewRequest,
    ) -> Result<Option<ServiceOwnerView>> {
        let service_owner = snapshot.fixture(FixtureKind::ServiceOwner);
        let mut workspace = ServiceOwnerWorkspace::from_fixture(service_owner, request.severity_match);
        if workspace.records().is_empty() {
            return Ok(None);
        }

        let service_list = ServiceOwnerViewBuilder::service_list(
            snapshot.fixture(FixtureKind::MicroservicesInventory),
            service_owner,
        );

        let selection = match request.service.as_deref() {
            Some(name) => {
                let known = workspace.records().iter().any(|r| r.name == name)
                    || service_list.services.iter().any(|card| card.name == name);
                if !known {
                    return Err(DashboardError::UnknownService {
                        name: name.to_string(),
                    }
                    .into());
                }
                Some(name.to_string())
            }
            None => ServiceOwnerViewBuilder::default_selection(workspace.records())
                .map(|record| record.name.clone()),
        };

        if let Some(name) = selection.as_deref() {
            workspace.select_service(name)?;
        }
        workspace.set_severity_filter(request.severity);
        if request.granular {
            workspace.view_detailed_vulnerabilities()?;
        }
        for question in &request.questions {
            workspace.ask(question);
        }

        let high_level =
            workspace.high_level_detail(snapshot.fixture(FixtureKind::ServiceInventory));
        let granular = workspace.granular_detail();

        Ok(Some(ServiceOwnerView {
            service_list,
            selected_service: selection,
            high_level,
            granular,
            chat: workspace.into_chat(),
        }))
    }
}

fn non_empty(view: ViewKind, has_data: bool, content: impl FnOnce() -> ViewContent) -> ViewContent {
    if has_data {
        content()
    } else {
        ViewContent::empty(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::empty_state_message;
    use crate::dashboard::domain::{FixtureSet, Severity};
    use crate::dashboard::services::MetricsAggregator;
    use serde_json::json;

    fn snapshot(fixtures: FixtureSet) -> DashboardSnapshot {
        DashboardSnapshot {
            metrics: MetricsAggregator::from_fixtures(&fixtures),
            fixtures,
            generation: 1,
            ..DashboardSnapshot::initial()
        }
    }

    fn loaded() -> DashboardSnapshot {
        snapshot(
            FixtureSet::with_empty_required()
                .with(
                    FixtureKind::MicroservicesInventory,
                    json!({
                        "services": {"services": [{"name": "cartservice"}, {"name": "frontend"}]},
                        "dependencies": {"total_count": 2, "dependencies": [
                            {"name": "redis", "type": "runtime", "source": "npm"},
                            {"name": "express", "type": "runtime", "source": "npm"}
                        ]}
                    }),
                )
                .with(
                    FixtureKind::ServiceOwner,
                    json!({"services": [
                        {"name": "frontend", "risk": {"score": 20, "level": "Low"}},
                        {"name": "cartservice", "risk": {"score": 82, "level": "Critical"},
                         "vulnerabilities": {"total": 1, "details": [{"id": "CVE-1", "severity": "High"}]}}
                    ]}),
                ),
        )
    }

    fn render(snapshot: &DashboardSnapshot, request: ViewRequest) -> DashboardView {
        RenderViewUseCase::execute(snapshot, &request).unwrap()
    }

    #[test]
    fn test_header_fields() {
        let snapshot = DashboardSnapshot {
            load_error: Some("boom".to_string()),
            ..loaded()
        };
        let view = render(&snapshot, ViewRequest::new(ViewKind::Metrics));
        assert_eq!(view.view, "metrics");
        assert_eq!(view.generation, 1);
        assert_eq!(view.load_error.as_deref(), Some("boom"));
        assert_eq!(view.content, ViewContent::Metrics(snapshot.metrics));
    }

    #[test]
    fn test_optional_views_render_empty_state() {
        let snapshot = loaded();
        for kind in [ViewKind::Security, ViewKind::BaseImages, ViewKind::Images] {
            let view = render(&snapshot, ViewRequest::new(kind));
            assert_eq!(
                view.content,
                ViewContent::Empty {
                    message: empty_state_message(kind).to_string()
                }
            );
        }
    }

    #[test]
    fn test_dependencies_filtered_by_search() {
        let view = render(
            &loaded(),
            ViewRequest::new(ViewKind::Dependencies).with_search("REDIS"),
        );
        let ViewContent::Dependencies(dependencies) = view.content else {
            panic!("expected dependencies view");
        };
        assert_eq!(dependencies.dependencies.len(), 1);
        assert_eq!(dependencies.dependencies[0].name, "redis");
    }

    #[test]
    fn test_service_owner_default_selection_and_copilot() {
        let request = ViewRequest::new(ViewKind::ServiceOwner)
            .with_questions(vec!["What is the risk score?".to_string(), " ".to_string()]);
        let view = render(&loaded(), request);
        let ViewContent::ServiceOwner(workspace) = view.content else {
            panic!("expected service owner view");
        };
        assert_eq!(workspace.selected_service.as_deref(), Some("cartservice"));
        assert!(workspace.high_level.is_some());
        assert!(workspace.granular.is_none());
        assert_eq!(workspace.chat.len(), 3);
        assert!(workspace.chat[2].text.contains("risk score of 82"));
    }

    #[test]
    fn test_service_owner_granular_with_filter() {
        let request = ViewRequest::new(ViewKind::ServiceOwner)
            .with_service(Some("cartservice".to_string()))
            .with_severity(Some(Severity::Critical))
            .with_granular(true);
        let view = render(&loaded(), request);
        let ViewContent::ServiceOwner(workspace) = view.content else {
            panic!("expected service owner view");
        };
        let granular = workspace.granular.unwrap();
        assert!(granular.vulnerabilities.is_empty());
        assert_eq!(granular.severity_counts.high, 1);
    }

    #[test]
    fn test_unknown_service_is_an_error() {
        let request = ViewRequest::new(ViewKind::ServiceOwner)
            .with_service(Some("nope".to_string()));
        let err = RenderViewUseCase::execute(&loaded(), &request).unwrap_err();
        assert!(err.to_string().contains("Unknown service: nope"));
    }

    #[test]
    fn test_session_gates_rendering() {
        let anonymous = ViewRequest::new(ViewKind::Metrics).with_session(Some(Session::anonymous()));
        let err = RenderViewUseCase::execute(&loaded(), &anonymous).unwrap_err();
        assert!(err.to_string().contains("Not signed in"));

        let signed_in = ViewRequest::new(ViewKind::Metrics)
            .with_session(Some(Session::signed_in("token", "owner@example.com")));
        assert_eq!(render(&loaded(), signed_in).user, "owner@example.com");
        assert_eq!(render(&loaded(), ViewRequest::new(ViewKind::Metrics)).user, "Guest");
    }

    #[test]
    fn test_service_owner_empty_state() {
        let snapshot = snapshot(FixtureSet::with_empty_required());
        let view = render(&snapshot, ViewRequest::new(ViewKind::ServiceOwner));
        assert!(view.is_empty_state());
        let view = render(&snapshot, ViewRequest::new(ViewKind::Microservices));
        assert!(view.is_empty_state());
    }
}
