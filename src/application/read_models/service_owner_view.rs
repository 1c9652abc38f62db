//! Service-owner workspace read models: service cards with risk badges, the
//! high-level and granular detail panels, and the copilot's field map.

use crate::application::read_models::security_findings_view::SeverityShare;
use crate::dashboard::domain::service_owner::{
    Composition, RemediationStatus, ServiceExposure,
};
use crate::dashboard::domain::{
    gauge_rotation, InsightPriority, Recommendation, RiskLevel, RiskTrend, ServiceOwnerRecord,
    Severity, SeverityCounts, VulnerabilityDetail,
};
use crate::dashboard::policies::SeverityMatch;
use crate::shared::safe_get::{coalesce, lenient_string, node, safe_list};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Shown in place of the workspace when no service-owner records exist.
pub const EMPTY_STATE_MESSAGE: &str = "No service owner data available";

const NO_RECOMMENDATIONS: &str = "No recommendations are available";
const TOP_RECOMMENDATION_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceRiskBadge {
    pub score: f64,
    pub level: String,
    pub badge_class: &'static str,
    pub vulnerability_total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCard {
    pub name: String,
    pub language: String,
    pub description: String,
    pub path: String,
    pub risk: Option<ServiceRiskBadge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceListView {
    pub services: Vec<ServiceCard>,
    pub high_risk_count: usize,
}

impl ServiceListView {
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskPanel {
    pub score: f64,
    /// Level as labeled in the fixture
    pub level: String,
    /// Level recomputed from the score
    pub derived_level: RiskLevel,
    pub color: &'static str,
    pub gauge_rotation: f64,
    pub business_impact: String,
    pub trend_30d: Vec<f64>,
    pub trend: RiskTrend,
    pub predicted_risk_30d: Option<f64>,
    pub confidence_percent: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposurePanel {
    pub vulnerability_total: u64,
    pub open: u64,
    pub severity_shares: Vec<SeverityShare>,
    pub endpoints: ServiceExposure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompliancePanel {
    pub adherence_score: f64,
    pub ring_degrees: f64,
    pub failed_controls: u64,
    pub policy_violations: u64,
    pub applicable_frameworks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub text: String,
    pub priority: InsightPriority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighLevelDetail {
    pub name: String,
    pub description: String,
    pub business_criticality: String,
    pub user_facing: bool,
    pub risk: RiskPanel,
    pub exposure: ExposurePanel,
    pub remediation: RemediationStatus,
    pub compliance: CompliancePanel,
    pub composition: Composition,
    pub insights: Vec<Insight>,
    pub top_recommendations: Vec<Recommendation>,
    /// Matching record of the service-inventory fixture, passed through
    pub inventory: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GranularDetail {
    pub name: String,
    pub severity_filter: Option<Severity>,
    /// Counts over all details, for the filter buttons
    pub severity_counts: SeverityCounts,
    pub vulnerabilities: Vec<VulnerabilityDetail>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Ai,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Ai,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }
}

/// The workspace as rendered: list, current selection and open panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceOwnerView {
    pub service_list: ServiceListView,
    pub selected_service: Option<String>,
    pub high_level: Option<HighLevelDetail>,
    pub granular: Option<GranularDetail>,
    pub chat: Vec<ChatMessage>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawInventoryService {
    #[serde(deserialize_with = "lenient_string")]
    name: String,
    #[serde(deserialize_with = "lenient_string")]
    language: String,
    #[serde(deserialize_with = "lenient_string")]
    description: String,
    #[serde(deserialize_with = "lenient_string")]
    path: String,
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}

/// Badge class for a fixture risk label; unknown labels are `secondary`.
pub fn badge_class_for(level: &str) -> &'static str {
    RiskLevel::from_str(level)
        .map(RiskLevel::badge_class)
        .unwrap_or("secondary")
}

/// Renders whole numbers without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub struct ServiceOwnerViewBuilder;

impl ServiceOwnerViewBuilder {
    /// Inventory services joined by name with their service-owner record.
    pub fn service_list(inventory: Option<&Value>, service_owner: Option<&Value>) -> ServiceListView {
        let records = ServiceOwnerRecord::list_from(service_owner);
        let services: Vec<ServiceCard> = safe_list::<RawInventoryService>(inventory, "services.services")
            .into_iter()
            .map(|raw| {
                let risk = records
                    .iter()
                    .find(|record| record.name == raw.name)
                    .map(|record| ServiceRiskBadge {
                        score: record.risk.score,
                        level: record.risk.level.clone(),
                        badge_class: badge_class_for(&record.risk.level),
                        vulnerability_total: record.vulnerabilities.total,
                    });
                ServiceCard {
                    name: or_placeholder(raw.name, "Unknown Service"),
                    language: or_placeholder(raw.language, "Unknown"),
                    description: or_placeholder(raw.description, "No description available."),
                    path: raw.path,
                    risk,
                }
            })
            .collect();

        let high_risk_count = services
            .iter()
            .filter(|card| {
                card.risk
                    .as_ref()
                    .and_then(|badge| RiskLevel::from_str(&badge.level).ok())
                    .is_some_and(RiskLevel::is_elevated)
            })
            .count();

        ServiceListView {
            services,
            high_risk_count,
        }
    }

    /// First record labeled Critical or High, else the first record.
    pub fn default_selection(records: &[ServiceOwnerRecord]) -> Option<&ServiceOwnerRecord> {
        records
            .iter()
            .find(|record| record.is_high_risk())
            .or_else(|| records.first())
    }

    pub fn high_level(record: &ServiceOwnerRecord, service_inventory: Option<&Value>) -> HighLevelDetail {
        let risk = &record.risk;
        let derived_level = record.derived_level();
        let trend = record
            .ai_insights
            .risk_trend
            .as_deref()
            .and_then(|trend| RiskTrend::from_str(trend).ok())
            .unwrap_or_else(|| RiskTrend::from_score(risk.score));

        let vulnerabilities = &record.vulnerabilities;
        let severity_shares = Severity::ALL
            .iter()
            .map(|&severity| SeverityShare {
                severity,
                count: vulnerabilities.count(severity),
                percentage: vulnerabilities.percentage(severity),
            })
            .collect();

        HighLevelDetail {
            name: record.name.clone(),
            description: record.description.clone(),
            business_criticality: record.business_criticality.clone(),
            user_facing: record.user_facing,
            risk: RiskPanel {
                score: risk.score,
                level: risk.level.clone(),
                derived_level,
                color: derived_level.color(),
                gauge_rotation: gauge_rotation(risk.score),
                business_impact: risk.business_impact.clone(),
                trend_30d: risk.trend_30d.clone(),
                trend,
                predicted_risk_30d: record.ai_insights.predicted_risk_30d,
                confidence_percent: record
                    .ai_insights
                    .confidence_score
                    .filter(|score| *score >= 0.0)
                    .map(|score| (score * 100.0).round() as u32),
            },
            exposure: ExposurePanel {
                vulnerability_total: vulnerabilities.total,
                open: vulnerabilities.open,
                severity_shares,
                endpoints: record.exposure.clone(),
            },
            remediation: record.remediation.clone(),
            compliance: CompliancePanel {
                adherence_score: record.compliance.adherence_score,
                ring_degrees: record.compliance.ring_degrees(),
                failed_controls: record.compliance.failed_controls,
                policy_violations: record.compliance.policy_violations,
                applicable_frameworks: record.compliance.applicable_frameworks.clone(),
            },
            composition: record.composition.clone(),
            insights: record
                .ai_insights
                .insights
                .iter()
                .map(|text| Insight {
                    text: text.clone(),
                    priority: InsightPriority::classify(text),
                })
                .collect(),
            top_recommendations: record
                .ai_insights
                .recommendations
                .iter()
                .take(TOP_RECOMMENDATION_COUNT)
                .cloned()
                .collect(),
            inventory: find_inventory_entry(service_inventory, &record.name),
        }
    }

    pub fn granular(
        record: &ServiceOwnerRecord,
        severity: Option<Severity>,
        policy: SeverityMatch,
    ) -> GranularDetail {
        let details = &record.vulnerabilities.details;
        let mut severity_counts = SeverityCounts::new();
        for detail in details {
            severity_counts.record(policy.classify(&detail.severity));
        }

        GranularDetail {
            name: record.name.clone(),
            severity_filter: severity,
            severity_counts,
            vulnerabilities: details
                .iter()
                .filter(|detail| severity.is_none_or(|s| policy.matches(&detail.severity, s)))
                .cloned()
                .collect(),
            recommendations: record.ai_insights.recommendations.clone(),
        }
    }

    /// Values the copilot's answer templates interpolate.
    pub fn copilot_fields(record: &ServiceOwnerRecord) -> BTreeMap<&'static str, String> {
        let vulnerabilities = &record.vulnerabilities;
        let top = record.ai_insights.recommendations.first();
        let top_field = |pick: fn(&Recommendation) -> &String| {
            top.map(pick)
                .filter(|text| !text.is_empty())
                .cloned()
                .unwrap_or_else(|| "unknown".to_string())
        };

        BTreeMap::from([
            ("name", record.name.clone()),
            ("risk_score", format_number(record.risk.score)),
            ("risk_level", record.risk.level.clone()),
            ("business_impact", record.risk.business_impact.clone()),
            ("business_criticality", record.business_criticality.clone()),
            (
                "user_facing_clause",
                if record.user_facing {
                    " and is user-facing".to_string()
                } else {
                    String::new()
                },
            ),
            ("vulnerability_total", vulnerabilities.total.to_string()),
            ("critical", vulnerabilities.count(Severity::Critical).to_string()),
            ("high", vulnerabilities.count(Severity::High).to_string()),
            ("medium", vulnerabilities.count(Severity::Medium).to_string()),
            ("low", vulnerabilities.count(Severity::Low).to_string()),
            (
                "top_recommendation",
                top.map(|rec| rec.text.clone())
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| NO_RECOMMENDATIONS.to_string()),
            ),
            ("top_recommendation_priority", top_field(|rec| &rec.priority)),
            ("top_recommendation_impact", top_field(|rec| &rec.impact)),
            (
                "adherence_score",
                format_number(record.compliance.adherence_score),
            ),
            (
                "failed_controls",
                record.compliance.failed_controls.to_string(),
            ),
            (
                "policy_violations",
                record.compliance.policy_violations.to_string(),
            ),
            (
                "frameworks",
                record.compliance.applicable_frameworks.join(", "),
            ),
            ("mttr_hours", format_number(record.remediation.mttr_hours)),
            ("in_progress", record.remediation.in_progress.to_string()),
            ("overdue_count", record.remediation.overdue_count.to_string()),
            ("assigned_teams", record.remediation.assigned_teams.to_string()),
        ])
    }
}

/// Looks `name` up in `services.services`, then in a top-level `services`
/// array, then in the fixture itself when it is an array.
fn find_inventory_entry(service_inventory: Option<&Value>, name: &str) -> Option<Value> {
    let candidates = [
        node(service_inventory, "services.services"),
        node(service_inventory, "services"),
        service_inventory,
    ];
    let services = coalesce(candidates.into_iter().map(|c| c.filter(|v| v.is_array())))?;
    services
        .as_array()?
        .iter()
        .find(|entry| entry.get("name").and_then(Value::as_str) == Some(name))
        .cloned()
}
