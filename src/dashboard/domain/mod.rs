pub mod dependency;
pub mod fixture;
pub mod metrics;
pub mod risk;
pub mod service_owner;
pub mod session;
pub mod severity;
pub mod vulnerability;

pub use dependency::DependencyRecord;
pub use fixture::{FixtureKind, FixtureSet};
pub use metrics::DashboardMetrics;
pub use risk::{gauge_rotation, RiskLevel, RiskTrend};
pub use service_owner::{InsightPriority, Recommendation, ServiceOwnerRecord, VulnerabilityDetail};
pub use session::Session;
pub use severity::{Severity, SeverityCounts};
pub use vulnerability::VulnerabilityRecord;
