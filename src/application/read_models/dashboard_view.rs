use super::{
    ApisView, BaseImagesView, DependenciesView, ImagesView, InfrastructureView,
    OpensourceSecurityView, RepositoryActivityView, SecurityFindingsView, ServiceListView,
    ServiceOwnerView, TechnologiesView,
};
use crate::application::dto::ViewKind;
use crate::dashboard::domain::DashboardMetrics;
use serde::Serialize;

/// Body of one rendered tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ViewContent {
    Metrics(DashboardMetrics),
    Microservices(ServiceListView),
    Technologies(TechnologiesView),
    Dependencies(DependenciesView),
    Apis(ApisView),
    Infrastructure(InfrastructureView),
    Activity(RepositoryActivityView),
    Images(ImagesView),
    BaseImages(BaseImagesView),
    Security(SecurityFindingsView),
    OpensourceSecurity(OpensourceSecurityView),
    ServiceOwner(ServiceOwnerView),
    /// The view's data source is absent or empty
    Empty { message: String },
}

impl ViewContent {
    pub fn empty(view: ViewKind) -> Self {
        ViewContent::Empty {
            message: empty_state_message(view).to_string(),
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, ViewContent::Empty { .. })
    }
}

/// Message a view shows when it has nothing to display.
pub fn empty_state_message(view: ViewKind) -> &'static str {
    match view {
        ViewKind::Metrics => "No metrics available.",
        ViewKind::Microservices => "No microservices data available.",
        ViewKind::Technologies => "No technology data available.",
        ViewKind::Dependencies => "No dependencies found",
        ViewKind::Apis => "No API information available",
        ViewKind::Infrastructure => "No deployment information available",
        ViewKind::Activity => "No repository activity available.",
        ViewKind::Images => "No image data available.",
        ViewKind::BaseImages => "No base image data available.",
        ViewKind::Security => "No security findings data available.",
        ViewKind::OpensourceSecurity => super::opensource_security_view::EMPTY_STATE_MESSAGE,
        ViewKind::ServiceOwner => super::service_owner_view::EMPTY_STATE_MESSAGE,
    }
}

/// DashboardView - one rendered tab plus the header every tab shares
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub view: &'static str,
    pub title: &'static str,
    pub generation: u64,
    /// Signed-in email, or `"Guest"`
    pub user: String,
    pub load_error: Option<String>,
    pub metrics: DashboardMetrics,
    pub content: ViewContent,
}

impl DashboardView {
    pub fn is_empty_state(&self) -> bool {
        self.content.is_empty_state()
    }
}
