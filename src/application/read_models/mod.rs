//! Read models for the dashboard tabs
//!
//! Each builder is a pure function from raw fixtures to a serializable,
//! view-optimized struct. Builders never fail: absent or malformed input
//! yields an empty view, or `None` where the tab has an explicit empty state.

pub mod apis_view;
pub mod base_images_view;
pub mod dashboard_view;
pub mod dependencies_view;
pub mod images_view;
pub mod infrastructure_view;
pub mod opensource_security_view;
pub mod repository_activity_view;
pub mod security_findings_view;
pub mod service_owner_view;
pub mod technologies_view;

pub use apis_view::{ApisView, ApisViewBuilder};
pub use base_images_view::{BaseImagesView, BaseImagesViewBuilder};
pub use dashboard_view::{empty_state_message, DashboardView, ViewContent};
pub use dependencies_view::{DependenciesView, DependenciesViewBuilder};
pub use images_view::{ImagesView, ImagesViewBuilder};
pub use infrastructure_view::{InfrastructureView, InfrastructureViewBuilder};
pub use opensource_security_view::{OpensourceSecurityView, OpensourceSecurityViewBuilder};
pub use repository_activity_view::{RepositoryActivityView, RepositoryActivityViewBuilder};
pub use security_findings_view::{SecurityFindingsView, SecurityFindingsViewBuilder};
pub use service_owner_view::{
    ChatMessage, ChatRole, GranularDetail, HighLevelDetail, ServiceListView, ServiceOwnerView,
    ServiceOwnerViewBuilder,
};
pub use technologies_view::{TechnologiesView, TechnologiesViewBuilder};
