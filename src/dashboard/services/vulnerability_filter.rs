use crate::dashboard::domain::{Severity, VulnerabilityRecord};
use crate::dashboard::policies::SeverityMatch;
use serde::Serialize;
use std::str::FromStr;

/// Whether a vulnerability must (or must not) have a fixed version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixAvailability {
    #[default]
    All,
    Fixed,
    NotFixed,
}

impl FromStr for FixAvailability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FixAvailability::All),
            "fixed" => Ok(FixAvailability::Fixed),
            "not-fixed" | "not_fixed" | "unfixed" => Ok(FixAvailability::NotFixed),
            _ => Err(format!(
                "Invalid fix filter: {}. Please specify 'all', 'fixed' or 'not-fixed'",
                s
            )),
        }
    }
}

/// Filters vulnerability lists by severity, vulnerability type and fix status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VulnerabilityFilter {
    severity: Option<Severity>,
    kind: Option<String>,
    fix: FixAvailability,
    policy: SeverityMatch,
}

impl VulnerabilityFilter {
    pub fn new(policy: SeverityMatch) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn with_severity(mut self, severity: Option<Severity>) -> Self {
        self.severity = severity;
        self
    }

    /// Case-insensitive substring of the vulnerability class. Blank or `"all"`
    /// disables the test.
    pub fn with_kind(mut self, kind: Option<&str>) -> Self {
        self.kind = kind
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty() && k != "all");
        self
    }

    pub fn with_fix(mut self, fix: FixAvailability) -> Self {
        self.fix = fix;
        self
    }

    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    pub fn matches(&self, vulnerability: &VulnerabilityRecord) -> bool {
        if let Some(severity) = self.severity {
            if !self.policy.matches(&vulnerability.severity, severity) {
                return false;
            }
        }

        if let Some(kind) = &self.kind {
            if !vulnerability.kind().to_lowercase().contains(kind.as_str()) {
                return false;
            }
        }

        match self.fix {
            FixAvailability::All => true,
            FixAvailability::Fixed => vulnerability.has_fix(),
            FixAvailability::NotFixed => !vulnerability.has_fix(),
        }
    }

    pub fn apply(&self, vulnerabilities: &[VulnerabilityRecord]) -> Vec<VulnerabilityRecord> {
        vulnerabilities
            .iter()
            .filter(|vuln| self.matches(vuln))
            .cloned()
            .collect()
    }
}
