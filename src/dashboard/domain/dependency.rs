use crate::dashboard::domain::vulnerability::VulnerabilityRecord;
use crate::shared::safe_get::{lenient_bool, lenient_list, lenient_opt_string, lenient_string};
use serde::{Deserialize, Serialize};

/// A third-party package from the dependency or open-source fixtures.
///
/// Both fixtures describe packages with overlapping fields; fields one of
/// them lacks are left empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub version: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub latest_version: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub dependency_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub source: String,
    #[serde(deserialize_with = "lenient_string")]
    pub license: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub language: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub license_compliance: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_vulnerable: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_outdated: bool,
    #[serde(deserialize_with = "lenient_list")]
    pub vulnerabilities: Vec<VulnerabilityRecord>,
}

impl DependencyRecord {
    /// Flagged vulnerable or carrying at least one vulnerability.
    pub fn has_vulnerabilities(&self) -> bool {
        self.is_vulnerable || !self.vulnerabilities.is_empty()
    }

    /// A newer version is known and differs from the one in use.
    pub fn is_behind_latest(&self) -> bool {
        self.latest_version
            .as_deref()
            .is_some_and(|latest| latest != self.version)
    }

    pub fn is_non_compliant(&self) -> bool {
        self.license_compliance.as_deref() == Some("Non-Compliant")
    }
}
