/// Use cases module containing application business logic orchestration
mod load_dashboard;
mod render_view;
mod service_owner_workspace;

pub use load_dashboard::{CacheBuster, LoadDashboardUseCase};
pub use render_view::RenderViewUseCase;
pub use service_owner_workspace::{ServiceOwnerWorkspace, WorkspaceEvent, WorkspaceState};
