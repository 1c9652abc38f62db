use serde::Serialize;

/// Top-level counters shown on the dashboard overview.
///
/// Each field is zero when its source path is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub microservices: u64,
    pub languages: u64,
    pub dependencies: u64,
    pub apis: u64,
    pub pull_requests: u64,
    pub commits: u64,
    pub images: u64,
    pub packages: u64,
    pub clusters: u64,
    pub nodes: u64,
    pub namespaces: u64,
}

impl DashboardMetrics {
    /// Fixed numbers shown before the first load and after a failed one.
    pub fn placeholder() -> Self {
        Self {
            microservices: 12,
            languages: 5,
            dependencies: 42,
            apis: 18,
            pull_requests: 7,
            commits: 250,
            images: 12,
            packages: 36,
            clusters: 2,
            nodes: 6,
            namespaces: 3,
        }
    }

    /// Label/value pairs in display order.
    pub fn entries(&self) -> [(&'static str, u64); 11] {
        [
            ("Microservices", self.microservices),
            ("Languages", self.languages),
            ("Dependencies", self.dependencies),
            ("APIs", self.apis),
            ("Pull Requests", self.pull_requests),
            ("Commits", self.commits),
            ("Images", self.images),
            ("Packages", self.packages),
            ("Clusters", self.clusters),
            ("Nodes", self.nodes),
            ("Namespaces", self.namespaces),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_values() {
        let metrics = DashboardMetrics::placeholder();
        assert_eq!(metrics.microservices, 12);
        assert_eq!(metrics.commits, 250);
        assert_eq!(metrics.namespaces, 3);
    }

    #[test]
    fn test_default_is_all_zero() {
        assert!(DashboardMetrics::default()
            .entries()
            .iter()
            .all(|(_, value)| *value == 0));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(DashboardMetrics::placeholder()).unwrap();
        assert_eq!(json["pullRequests"], 7);
    }
}
