use crate::dashboard::domain::SeverityCounts;
use crate::dashboard::policies::SeverityMatch;
use crate::shared::safe_get::{lenient_bool, lenient_f64, lenient_opt_string, lenient_string};
use serde::{Deserialize, Serialize};

/// A single vulnerability as carried by package, image and base-image fixtures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnerabilityRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub severity: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub cvss_score: f64,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub fixed_version: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub remediation: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub published_date: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub exploit_available: bool,
}

impl VulnerabilityRecord {
    /// Vulnerability class taken from the title prefix, e.g.
    /// `"SQL Injection"` for `"SQL Injection in lodash"`.
    pub fn kind(&self) -> &str {
        self.title
            .split_once(" in ")
            .map(|(kind, _)| kind)
            .unwrap_or(&self.title)
    }

    pub fn has_fix(&self) -> bool {
        self.fixed_version.is_some()
    }

    /// Identifier to show in tables: the id, falling back to the title.
    pub fn display_id(&self) -> &str {
        if self.id.is_empty() {
            &self.title
        } else {
            &self.id
        }
    }
}

/// Tallies `records` by severity under `policy`. The total is the record count.
pub fn count_by_severity(records: &[VulnerabilityRecord], policy: SeverityMatch) -> SeverityCounts {
    let mut counts = SeverityCounts::new();
    for record in records {
        counts.record(policy.classify(&record.severity));
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(severity: &str) -> VulnerabilityRecord {
        VulnerabilityRecord {
            severity: severity.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_kind_strips_package_suffix() {
        let vuln = VulnerabilityRecord {
            title: "Remote Code Execution in log4j in prod".to_string(),
            ..Default::default()
        };
        assert_eq!(vuln.kind(), "Remote Code Execution");
    }

    #[test]
    fn test_kind_without_separator_is_whole_title() {
        let vuln = VulnerabilityRecord {
            title: "Weak Cipher".to_string(),
            ..Default::default()
        };
        assert_eq!(vuln.kind(), "Weak Cipher");
    }

    #[test]
    fn test_deserialize_tolerates_nulls_and_numbers() {
        let vuln: VulnerabilityRecord = serde_json::from_value(json!({
            "id": "CVE-2024-0001",
            "severity": "High",
            "cvss_score": "8.1",
            "fixed_version": null,
            "title": null
        }))
        .unwrap();
        assert_eq!(vuln.id, "CVE-2024-0001");
        assert_eq!(vuln.cvss_score, 8.1);
        assert!(!vuln.has_fix());
        assert_eq!(vuln.display_id(), "CVE-2024-0001");
        assert_eq!(vuln.title, "");
    }

    #[test]
    fn test_count_by_severity_exact() {
        let records = vec![
            record("Critical"),
            record("High"),
            record("HIGH"),
            record("Low"),
        ];
        let counts = count_by_severity(&records, SeverityMatch::Exact);
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.high, 1);
        assert_eq!(counts.low, 1);
        assert_eq!(counts.total, 4);
    }

    #[test]
    fn test_count_by_severity_case_insensitive() {
        let records = vec![record("HIGH"), record("high"), record("High")];
        let counts = count_by_severity(&records, SeverityMatch::CaseInsensitive);
        assert_eq!(counts.high, 3);
        assert_eq!(count_by_severity(&records, SeverityMatch::Exact).high, 1);
    }
}
