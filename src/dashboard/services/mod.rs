pub mod dependency_filter;
pub mod grouping;
pub mod metrics_aggregator;
pub mod vulnerability_filter;

pub use dependency_filter::DependencyFilter;
pub use metrics_aggregator::MetricsAggregator;
pub use vulnerability_filter::{FixAvailability, VulnerabilityFilter};
