//! Security findings tab.
//!
//! Accepts either the pre-aggregated `{summary, services}` document or the
//! flat scanner output (an array of `{microservice, findings,
//! connected_findings}`), which is folded into the same summary in one pass.

use crate::dashboard::domain::Severity;
use crate::dashboard::policies::SeverityMatch;
use crate::dashboard::services::grouping::sorted_by_count_desc;
use crate::shared::safe_get::{
    lenient_list, lenient_opt, lenient_opt_string, lenient_string, node, safe_count,
    safe_list, safe_map,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const UNKNOWN_KEY: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnerablePackage {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub version: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub fixed_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityFinding {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub stage: String,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub finding_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub severity: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub source: String,
    #[serde(deserialize_with = "lenient_string")]
    pub owner: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub file: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub line: Option<String>,
    #[serde(deserialize_with = "lenient_opt")]
    pub vulnerable_package: Option<VulnerablePackage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
struct RawChain {
    #[serde(deserialize_with = "lenient_string")]
    chain_id: String,
    #[serde(deserialize_with = "lenient_string")]
    name: String,
    #[serde(deserialize_with = "lenient_string")]
    status: String,
    #[serde(deserialize_with = "lenient_list")]
    findings: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    stages: Vec<String>,
}

/// A connected chain of findings across pipeline stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindingChain {
    pub chain_id: String,
    pub name: String,
    pub status: String,
    pub stages: Vec<String>,
    pub finding_ids: Vec<String>,
    /// Findings whose id appears in `finding_ids`; unknown ids are dropped
    pub findings: Vec<SecurityFinding>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceFindings {
    pub name: String,
    /// Length of the raw `findings` array, unreadable entries included
    pub finding_count: u64,
    pub findings: Vec<SecurityFinding>,
    pub connected_findings: Vec<FindingChain>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SecuritySummary {
    pub total_findings: u64,
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub by_type: BTreeMap<String, u64>,
    pub by_service: BTreeMap<String, u64>,
    pub by_stage: BTreeMap<String, u64>,
}

impl SecuritySummary {
    pub fn count(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    /// Share of all findings at `severity`, in percent. Zero when empty.
    pub fn percentage(&self, severity: Severity) -> f64 {
        if self.total_findings == 0 {
            0.0
        } else {
            self.count(severity) as f64 / self.total_findings as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountEntry {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityShare {
    pub severity: Severity,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedFinding {
    pub service_name: String,
    #[serde(flatten)]
    pub finding: SecurityFinding,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityFindingsView {
    pub summary: SecuritySummary,
    pub severity_shares: Vec<SeverityShare>,
    pub findings_by_type: Vec<CountEntry>,
    pub findings_by_service: Vec<CountEntry>,
    pub services: Vec<ServiceFindings>,
    pub service_filter: Option<String>,
    /// Every finding tagged with its service, narrowed by `service_filter`
    pub findings: Vec<TaggedFinding>,
}

pub struct SecurityFindingsViewBuilder;

impl SecurityFindingsViewBuilder {
    /// Builds the tab, or `None` when there is nothing to show.
    ///
    /// # Arguments
    /// * `security` - Security findings fixture in either shape
    /// * `policy` - Severity comparison for the flat shape
    /// * `service_filter` - Only list findings of this service
    pub fn build(
        security: Option<&Value>,
        policy: SeverityMatch,
        service_filter: Option<&str>,
    ) -> Option<SecurityFindingsView> {
        let (summary, services) = match security? {
            Value::Array(entries) if !entries.is_empty() => Self::fold_flat(entries, policy),
            Value::Object(_) if node(security, "summary").is_some() => {
                (Self::read_summary(security), Self::read_services(security, "services", "name"))
            }
            _ => return None,
        };

        let service_filter = service_filter
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "all")
            .map(str::to_string);

        let findings = services
            .iter()
            .filter(|service| {
                service_filter
                    .as_deref()
                    .map_or(true, |wanted| service.name == wanted)
            })
            .flat_map(|service| {
                service.findings.iter().map(|finding| TaggedFinding {
                    service_name: service.name.clone(),
                    finding: finding.clone(),
                })
            })
            .collect();

        Some(SecurityFindingsView {
            severity_shares: Severity::ALL
                .iter()
                .map(|&severity| SeverityShare {
                    severity,
                    count: summary.count(severity),
                    percentage: summary.percentage(severity),
                })
                .collect(),
            findings_by_type: count_entries(&summary.by_type),
            findings_by_service: count_entries(&summary.by_service),
            summary,
            services,
            service_filter,
            findings,
        })
    }

    fn fold_flat(
        entries: &[Value],
        policy: SeverityMatch,
    ) -> (SecuritySummary, Vec<ServiceFindings>) {
        let mut summary = SecuritySummary::default();
        let mut services = Vec::with_capacity(entries.len());

        for entry in entries {
            let service = Self::service_findings(entry, "microservice");

            *summary.by_service.entry(service.name.clone()).or_insert(0) += service.finding_count;
            summary.total_findings += service.finding_count;

            // Entries that are not records still count, under the unknown type and stage.
            let unreadable = service
                .finding_count
                .saturating_sub(service.findings.len() as u64);
            if unreadable > 0 {
                *summary.by_type.entry(UNKNOWN_KEY.to_string()).or_insert(0) += unreadable;
                *summary.by_stage.entry(UNKNOWN_KEY.to_string()).or_insert(0) += unreadable;
            }

            for finding in &service.findings {
                match policy.classify(&finding.severity) {
                    Some(Severity::Critical) => summary.critical += 1,
                    Some(Severity::High) => summary.high += 1,
                    Some(Severity::Medium) => summary.medium += 1,
                    Some(Severity::Low) => summary.low += 1,
                    None => {}
                }
                *summary
                    .by_type
                    .entry(key_or_unknown(&finding.finding_type))
                    .or_insert(0) += 1;
                *summary
                    .by_stage
                    .entry(key_or_unknown(&finding.stage))
                    .or_insert(0) += 1;
            }

            services.push(service);
        }

        (summary, services)
    }

    fn read_summary(security: Option<&Value>) -> SecuritySummary {
        SecuritySummary {
            total_findings: safe_count(security, "summary.total_findings"),
            critical: safe_count(security, "summary.critical"),
            high: safe_count(security, "summary.high"),
            medium: safe_count(security, "summary.medium"),
            low: safe_count(security, "summary.low"),
            by_type: safe_map(security, "summary.by_type"),
            by_service: safe_map(security, "summary.by_service"),
            by_stage: safe_map(security, "summary.by_stage"),
        }
    }

    fn read_services(security: Option<&Value>, path: &str, name_key: &str) -> Vec<ServiceFindings> {
        match node(security, path) {
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| Self::service_findings(entry, name_key))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn service_findings(entry: &Value, name_key: &str) -> ServiceFindings {
        let entry = Some(entry);
        let findings: Vec<SecurityFinding> = safe_list(entry, "findings");
        let connected_findings = safe_list::<RawChain>(entry, "connected_findings")
            .into_iter()
            .map(|chain| resolve_chain(chain, &findings))
            .collect();

        ServiceFindings {
            name: key_or_unknown(node(entry, name_key).and_then(Value::as_str).unwrap_or("")),
            finding_count: match node(entry, "findings") {
                Some(Value::Array(items)) => items.len() as u64,
                _ => 0,
            },
            findings,
            connected_findings,
        }
    }
}

fn resolve_chain(chain: RawChain, findings: &[SecurityFinding]) -> FindingChain {
    let resolved = chain
        .findings
        .iter()
        .filter_map(|id| findings.iter().find(|finding| &finding.id == id))
        .cloned()
        .collect();

    FindingChain {
        chain_id: chain.chain_id,
        name: chain.name,
        status: chain.status,
        stages: chain.stages,
        finding_ids: chain.findings,
        findings: resolved,
    }
}

fn key_or_unknown(key: &str) -> String {
    if key.is_empty() {
        UNKNOWN_KEY.to_string()
    } else {
        key.to_string()
    }
}

fn count_entries(counts: &BTreeMap<String, u64>) -> Vec<CountEntry> {
    sorted_by_count_desc(counts)
        .into_iter()
        .map(|(name, count)| CountEntry { name, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat_fixture() -> Value {
        json!([
            {
                "microservice": "service1",
                "findings": [
                    {"id": "F1", "stage": "build", "type": "SAST", "severity": "Critical"},
                    {"id": "F2", "stage": "build", "type": "SCA", "severity": "High"},
                    {"id": "F3", "stage": "deploy", "type": "SCA", "severity": "Medium"}
                ],
                "connected_findings": [
                    {"chain_id": "C1", "name": "Injection path", "findings": ["F1", "F3", "F404"]}
                ]
            },
            {
                "microservice": "service2",
                "findings": [
                    {"id": "F4", "stage": "runtime", "type": "DAST", "severity": "High"},
                    {"id": "F5", "stage": "runtime", "type": "SCA", "severity": "Low"}
                ]
            }
        ])
    }

    #[test]
    fn test_flat_shape_summary() {
        let view =
            SecurityFindingsViewBuilder::build(Some(&flat_fixture()), SeverityMatch::Exact, None)
                .unwrap();

        assert_eq!(view.summary.total_findings, 5);
        assert_eq!(view.summary.critical, 1);
        assert_eq!(view.summary.high, 2);
        assert_eq!(view.summary.medium, 1);
        assert_eq!(view.summary.low, 1);
        assert_eq!(view.summary.by_service.get("service1"), Some(&3));
        assert_eq!(view.summary.by_service.get("service2"), Some(&2));
        assert_eq!(view.summary.by_stage.get("runtime"), Some(&2));
    }

    #[test]
    fn test_flat_shape_counts_findings_with_odd_fields() {
        let security = json!([
            {
                "microservice": "svc",
                "findings": [
                    {"id": "A", "type": "SCA", "severity": "High",
                     "vulnerable_package": {"name": "lodash", "version": "4.17.15"}},
                    {"id": "B", "type": "SCA", "severity": "High", "vulnerable_package": "lodash"},
                    "not-a-finding"
                ]
            }
        ]);

        let view =
            SecurityFindingsViewBuilder::build(Some(&security), SeverityMatch::Exact, None).unwrap();

        assert_eq!(view.summary.total_findings, 3);
        assert_eq!(view.summary.high, 2);
        assert_eq!(view.summary.by_service.get("svc"), Some(&3));
        assert_eq!(view.summary.by_type.get("SCA"), Some(&2));
        assert_eq!(view.summary.by_type.get("Unknown"), Some(&1));
        assert_eq!(view.services[0].findings.len(), 2);
        assert!(view.services[0].findings[1].vulnerable_package.is_none());
        assert_eq!(
            view.services[0].findings[0]
                .vulnerable_package
                .as_ref()
                .map(|p| p.name.as_str()),
            Some("lodash")
        );
    }

    #[test]
    fn test_sorted_type_counts_and_percentages() {
        let view =
            SecurityFindingsViewBuilder::build(Some(&flat_fixture()), SeverityMatch::Exact, None)
                .unwrap();

        assert_eq!(view.findings_by_type[0].name, "SCA");
        assert_eq!(view.findings_by_type[0].count, 3);
        assert_eq!(view.findings_by_service[0].name, "service1");
        assert_eq!(view.severity_shares[0].severity, Severity::Critical);
        assert!((view.severity_shares[1].percentage - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_connected_chains_resolve_known_ids() {
        let view =
            SecurityFindingsViewBuilder::build(Some(&flat_fixture()), SeverityMatch::Exact, None)
                .unwrap();

        let chain = &view.services[0].connected_findings[0];
        assert_eq!(chain.finding_ids.len(), 3);
        let ids: Vec<_> = chain.findings.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["F1", "F3"]);
    }

    #[test]
    fn test_service_filter() {
        let view = SecurityFindingsViewBuilder::build(
            Some(&flat_fixture()),
            SeverityMatch::Exact,
            Some("service2"),
        )
        .unwrap();

        assert_eq!(view.findings.len(), 2);
        assert!(view.findings.iter().all(|f| f.service_name == "service2"));
        assert_eq!(view.summary.total_findings, 5);
    }

    #[test]
    fn test_preaggregated_shape() {
        let security = json!({
            "summary": {"total_findings": 2, "critical": 2, "by_type": {"SAST": 2}},
            "services": [{"name": "frontend", "findings": [{"id": "A"}, {"id": "B"}]}]
        });

        let view =
            SecurityFindingsViewBuilder::build(Some(&security), SeverityMatch::Exact, None).unwrap();

        assert_eq!(view.summary.critical, 2);
        assert_eq!(view.services[0].name, "frontend");
        assert_eq!(view.findings.len(), 2);
        assert!((view.summary.percentage(Severity::Critical) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_states() {
        assert!(SecurityFindingsViewBuilder::build(None, SeverityMatch::Exact, None).is_none());
        assert!(
            SecurityFindingsViewBuilder::build(Some(&json!([])), SeverityMatch::Exact, None)
                .is_none()
        );
        assert!(
            SecurityFindingsViewBuilder::build(Some(&json!({"services": []})), SeverityMatch::Exact, None)
                .is_none()
        );
    }

    #[test]
    fn test_malformed_fixtures() {
        for security in [json!(42), json!("findings"), json!(true), json!({"services": "x"}), json!({"summary": null})] {
            assert!(
                SecurityFindingsViewBuilder::build(Some(&security), SeverityMatch::Exact, None).is_none(),
                "{}",
                security
            );
        }

        let flat = json!([
            null,
            5,
            "service1",
            {"microservice": 7, "findings": {"F1": {"severity": "High"}}, "connected_findings": "C1"}
        ]);
        let view = SecurityFindingsViewBuilder::build(Some(&flat), SeverityMatch::Exact, None).unwrap();
        assert_eq!(view.summary.total_findings, 0);
        assert_eq!(view.summary.high, 0);
        assert!(view.summary.by_type.is_empty());
        assert_eq!(view.services.len(), 4);
        assert!(view.services.iter().all(|s| s.name == "Unknown" && s.findings.is_empty()));
        assert!(view.services[3].connected_findings.is_empty());
        assert!(view.findings.is_empty());

        let aggregated = json!({"summary": "x", "services": {"name": "service1"}});
        let view =
            SecurityFindingsViewBuilder::build(Some(&aggregated), SeverityMatch::Exact, None).unwrap();
        assert_eq!(view.summary, SecuritySummary::default());
        assert!(view.services.is_empty());
        assert!(view.findings_by_type.is_empty());
    }

    #[test]
    fn test_zero_total_percentages() {
        let summary = SecuritySummary::default();
        assert_eq!(summary.percentage(Severity::High), 0.0);
    }
}
