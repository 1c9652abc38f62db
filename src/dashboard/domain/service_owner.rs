//! Per-service security posture records from `service_owner_data.json`.

use crate::dashboard::domain::{RiskLevel, Severity};
use crate::shared::safe_get::{
    lenient_bool, lenient_count, lenient_f64, lenient_list, lenient_opt_string, lenient_string,
    safe_list, safe_map,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskProfile {
    #[serde(deserialize_with = "lenient_f64")]
    pub score: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub level: String,
    #[serde(deserialize_with = "lenient_string")]
    pub business_impact: String,
    #[serde(deserialize_with = "lenient_numbers")]
    pub trend_30d: Vec<f64>,
}

/// One vulnerability row of the granular view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnerabilityDetail {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub vulnerability_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub severity: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub cvss_score: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub package: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub assigned_team: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnerabilityExposure {
    #[serde(deserialize_with = "lenient_count")]
    pub total: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub open: u64,
    /// Keyed by canonical label (`"Critical"`, `"High"`...)
    #[serde(deserialize_with = "lenient_counts_map")]
    pub by_severity: BTreeMap<String, u64>,
    #[serde(deserialize_with = "lenient_list")]
    pub details: Vec<VulnerabilityDetail>,
}

impl VulnerabilityExposure {
    pub fn count(&self, severity: Severity) -> u64 {
        self.by_severity
            .get(severity.label())
            .copied()
            .unwrap_or(0)
    }

    /// Share of `total` at `severity`, in percent. Zero when `total` is zero.
    pub fn percentage(&self, severity: Severity) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(severity) as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceExposure {
    #[serde(deserialize_with = "lenient_count")]
    pub total_endpoints: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub public_endpoints: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub internal_endpoints: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub exposed_secrets: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub open_ports: u64,
    #[serde(deserialize_with = "lenient_string")]
    pub network_exposure: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemediationStatus {
    #[serde(deserialize_with = "lenient_count")]
    pub breaches: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub mttr_hours: f64,
    #[serde(deserialize_with = "lenient_count")]
    pub assigned_teams: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub in_progress: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub overdue_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceStatus {
    #[serde(deserialize_with = "lenient_f64")]
    pub adherence_score: f64,
    #[serde(deserialize_with = "lenient_count")]
    pub failed_controls: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub policy_violations: u64,
    #[serde(deserialize_with = "lenient_list")]
    pub applicable_frameworks: Vec<String>,
}

impl ComplianceStatus {
    /// Filled arc of the compliance ring, in degrees.
    pub fn ring_degrees(&self) -> f64 {
        self.adherence_score * 3.6
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Composition {
    #[serde(deserialize_with = "lenient_string")]
    pub language: String,
    #[serde(deserialize_with = "lenient_count")]
    pub containers: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub pods: u64,
    #[serde(deserialize_with = "lenient_list")]
    pub dependencies: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub frameworks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    #[serde(deserialize_with = "lenient_string")]
    pub text: String,
    #[serde(deserialize_with = "lenient_string")]
    pub priority: String,
    #[serde(deserialize_with = "lenient_string")]
    pub impact: String,
    #[serde(deserialize_with = "lenient_string")]
    pub effort: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiInsights {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub risk_trend: Option<String>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub predicted_risk_30d: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub confidence_score: Option<f64>,
    #[serde(deserialize_with = "lenient_list")]
    pub insights: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub recommendations: Vec<Recommendation>,
}

/// ServiceOwnerRecord - everything the workspace knows about one service
///
/// Every section defaults when absent, so a sparse record still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceOwnerRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub language: String,
    #[serde(deserialize_with = "lenient_string")]
    pub business_criticality: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub user_facing: bool,
    #[serde(deserialize_with = "section")]
    pub risk: RiskProfile,
    #[serde(deserialize_with = "section")]
    pub vulnerabilities: VulnerabilityExposure,
    #[serde(deserialize_with = "section")]
    pub exposure: ServiceExposure,
    #[serde(deserialize_with = "section")]
    pub remediation: RemediationStatus,
    #[serde(deserialize_with = "section")]
    pub compliance: ComplianceStatus,
    #[serde(deserialize_with = "section")]
    pub composition: Composition,
    #[serde(deserialize_with = "section")]
    pub ai_insights: AiInsights,
}

impl ServiceOwnerRecord {
    /// Level as labeled in the fixture, if it parses.
    pub fn labeled_level(&self) -> Option<RiskLevel> {
        RiskLevel::from_str(&self.risk.level).ok()
    }

    /// Level derived from the score thresholds.
    pub fn derived_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk.score)
    }

    /// Labeled Critical or High.
    pub fn is_high_risk(&self) -> bool {
        self.labeled_level().is_some_and(RiskLevel::is_elevated)
    }

    /// Records under `services` of the service-owner fixture.
    pub fn list_from(service_owner: Option<&Value>) -> Vec<ServiceOwnerRecord> {
        safe_list(service_owner, "services")
    }
}

/// How urgently an AI insight reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    Critical,
    High,
    Medium,
}

impl InsightPriority {
    /// Keyword classification of free-text insights.
    pub fn classify(insight: &str) -> Self {
        let text = insight.to_lowercase();
        if text.contains("critical") || text.contains("breach") {
            InsightPriority::Critical
        } else if text.contains("high") || text.contains("exploit") {
            InsightPriority::High
        } else {
            InsightPriority::Medium
        }
    }
}

/// A missing, `null` or mistyped section becomes its default.
fn section<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(&value).unwrap_or_default())
}

fn lenient_numbers<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(Value::as_f64).collect(),
        _ => Vec::new(),
    })
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn lenient_counts_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(safe_map(Some(&value), ""))
}
