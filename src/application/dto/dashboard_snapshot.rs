use crate::dashboard::domain::{DashboardMetrics, FixtureKind, FixtureSet};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// DashboardSnapshot - the state committed by one accepted load
///
/// Before the first load it holds no fixtures and the placeholder metrics.
/// When a required fixture failed, `load_error` names the failed resources,
/// every required slot holds an empty fixture, and the metrics fall back to
/// the placeholder record.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub fixtures: FixtureSet,
    pub metrics: DashboardMetrics,
    pub load_error: Option<String>,
    pub failed_required: Vec<FixtureKind>,
    pub missing_optional: Vec<FixtureKind>,
    /// Generation of the batch that produced this snapshot; 0 before any load
    pub generation: u64,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    pub fn initial() -> Self {
        Self {
            fixtures: FixtureSet::new(),
            metrics: DashboardMetrics::placeholder(),
            load_error: None,
            failed_required: Vec::new(),
            missing_optional: Vec::new(),
            generation: 0,
            loaded_at: None,
        }
    }

    /// True when a required fixture failed and the views run on empty data.
    pub fn is_degraded(&self) -> bool {
        !self.failed_required.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.generation > 0
    }

    pub fn fixture(&self, kind: FixtureKind) -> Option<&Value> {
        self.fixtures.get(kind)
    }
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_snapshot() {
        let snapshot = DashboardSnapshot::initial();
        assert!(!snapshot.is_loaded());
        assert!(!snapshot.is_degraded());
        assert!(snapshot.fixtures.is_empty());
        assert_eq!(snapshot.metrics, DashboardMetrics::placeholder());
        assert!(snapshot.fixture(FixtureKind::ImageInventory).is_none());
    }

    #[test]
    fn test_degraded_when_required_failed() {
        let snapshot = DashboardSnapshot {
            failed_required: vec![FixtureKind::RepoActivity],
            generation: 1,
            ..DashboardSnapshot::initial()
        };
        assert!(snapshot.is_degraded());
        assert!(snapshot.is_loaded());
    }
}
