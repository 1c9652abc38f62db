/// Data Transfer Objects for application layer
///
/// DTOs carry requests and loaded state between the CLI, the use cases and
/// the view builders, keeping the dashboard domain isolated.
mod dashboard_snapshot;
mod output_format;
mod view_kind;
mod view_request;

pub use dashboard_snapshot::DashboardSnapshot;
pub use output_format::OutputFormat;
pub use view_kind::ViewKind;
pub use view_request::ViewRequest;
