//! Open-source security tab: package and image vulnerabilities, licenses,
//! remediation progress and search.

use crate::dashboard::domain::{DependencyRecord, SeverityCounts, VulnerabilityRecord};
use crate::dashboard::services::VulnerabilityFilter;
use crate::shared::safe_get::{
    coalesce, lenient_list, lenient_string, node, safe_count, safe_list, safe_map,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Maximum hits per category in search results.
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// Message shown when neither open-source nor dependency data exists.
pub const EMPTY_STATE_MESSAGE: &str = "No open source security data available.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemediationProgress {
    pub fixed: u64,
    pub in_progress: u64,
    pub not_started: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OpensourceSummary {
    pub total_packages: u64,
    pub vulnerable_packages: u64,
    pub outdated_packages: u64,
    pub total_images: u64,
    pub vulnerable_images: u64,
    pub vulnerabilities: SeverityCounts,
    pub vulnerability_types: BTreeMap<String, u64>,
    pub license_distribution: BTreeMap<String, u64>,
    pub remediation_progress: RemediationProgress,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub tag: String,
    #[serde(deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub size: String,
    #[serde(deserialize_with = "lenient_list")]
    pub vulnerabilities: Vec<VulnerabilityRecord>,
    #[serde(skip_serializing)]
    pub vulnerability_counts: Value,
}

impl ImageRecord {
    pub fn counts(&self) -> SeverityCounts {
        SeverityCounts::from_json(Some(&self.vulnerability_counts))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VulnerablePackageRow {
    pub name: String,
    pub version: String,
    pub latest_version: Option<String>,
    pub language: Option<String>,
    pub license: String,
    pub outdated: bool,
    pub non_compliant: bool,
    /// Vulnerabilities passing the active filter
    pub vulnerabilities: Vec<VulnerabilityRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VulnerableImageRow {
    pub full_name: String,
    pub size: String,
    pub vulnerability_counts: SeverityCounts,
    pub vulnerabilities: Vec<VulnerabilityRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub packages: Vec<DependencyRecord>,
    pub images: Vec<ImageRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpensourceSecurityView {
    /// Whether the dedicated open-source fixture was used
    pub from_opensource_fixture: bool,
    pub summary: OpensourceSummary,
    pub vulnerability_type_options: Vec<String>,
    pub vulnerable_packages: Vec<VulnerablePackageRow>,
    pub vulnerable_images: Vec<VulnerableImageRow>,
    pub search: SearchResults,
}

pub struct OpensourceSecurityViewBuilder;

impl OpensourceSecurityViewBuilder {
    /// Builds the tab, or `None` when there is no open-source fixture and the
    /// dependency fallback carries no `dependencies` list.
    ///
    /// # Arguments
    /// * `opensource` - Open-source security fixture, used when it has a `summary`
    /// * `dependencies` - Dependencies fixture, the first fallback
    /// * `inventory` - Microservices inventory; its `dependencies` is the last fallback
    /// * `filter` - Vulnerability filter for the package and image tables
    /// * `query` - Search text; blank yields no results
    pub fn build(
        opensource: Option<&Value>,
        dependencies: Option<&Value>,
        inventory: Option<&Value>,
        filter: &VulnerabilityFilter,
        query: &str,
    ) -> Option<OpensourceSecurityView> {
        let opensource = opensource.filter(|os| node(Some(os), "summary").is_some());

        let (summary, packages, images) = match opensource {
            Some(os) => (
                Self::read_summary(node(Some(os), "summary")),
                safe_list::<DependencyRecord>(Some(os), "packages"),
                safe_list::<ImageRecord>(Some(os), "images"),
            ),
            None => {
                let deps = coalesce([dependencies, node(inventory, "dependencies")])?;
                if !matches!(node(Some(deps), "dependencies"), Some(Value::Array(_))) {
                    return None;
                }
                (
                    Self::fallback_summary(Some(deps)),
                    safe_list::<DependencyRecord>(Some(deps), "dependencies"),
                    Vec::new(),
                )
            }
        };

        Some(OpensourceSecurityView {
            from_opensource_fixture: opensource.is_some(),
            vulnerability_type_options: summary.vulnerability_types.keys().cloned().collect(),
            vulnerable_packages: Self::vulnerable_packages(&packages, filter),
            vulnerable_images: Self::vulnerable_images(&images, filter),
            search: search(&packages, &images, query),
            summary,
        })
    }

    fn read_summary(summary: Option<&Value>) -> OpensourceSummary {
        OpensourceSummary {
            total_packages: safe_count(summary, "total_packages"),
            vulnerable_packages: safe_count(summary, "vulnerable_packages"),
            outdated_packages: safe_count(summary, "outdated_packages"),
            total_images: safe_count(summary, "total_images"),
            vulnerable_images: safe_count(summary, "vulnerable_images"),
            vulnerabilities: SeverityCounts::from_json(node(summary, "vulnerabilities")),
            vulnerability_types: safe_map(summary, "vulnerability_types"),
            license_distribution: safe_map(summary, "license_distribution"),
            remediation_progress: RemediationProgress {
                fixed: safe_count(summary, "remediation_progress.fixed"),
                in_progress: safe_count(summary, "remediation_progress.in_progress"),
                not_started: safe_count(summary, "remediation_progress.not_started"),
            },
        }
    }

    /// Dependency totals and licenses carried over; image, vulnerability and
    /// remediation figures zeroed.
    fn fallback_summary(dependencies: Option<&Value>) -> OpensourceSummary {
        OpensourceSummary {
            total_packages: safe_count(dependencies, "total_count"),
            vulnerable_packages: safe_count(dependencies, "vulnerable_count"),
            outdated_packages: safe_count(dependencies, "outdated_count"),
            license_distribution: safe_map(dependencies, "license_distribution"),
            ..Default::default()
        }
    }

    fn vulnerable_packages(
        packages: &[DependencyRecord],
        filter: &VulnerabilityFilter,
    ) -> Vec<VulnerablePackageRow> {
        packages
            .iter()
            .filter(|pkg| pkg.has_vulnerabilities())
            .filter_map(|pkg| {
                let vulnerabilities = filter.apply(&pkg.vulnerabilities);
                if vulnerabilities.is_empty() && filter.severity().is_some() {
                    return None;
                }
                Some(VulnerablePackageRow {
                    name: pkg.name.clone(),
                    version: pkg.version.clone(),
                    latest_version: pkg.latest_version.clone(),
                    language: pkg.language.clone(),
                    license: pkg.license.clone(),
                    outdated: pkg.is_behind_latest(),
                    non_compliant: pkg.is_non_compliant(),
                    vulnerabilities,
                })
            })
            .collect()
    }

    fn vulnerable_images(
        images: &[ImageRecord],
        filter: &VulnerabilityFilter,
    ) -> Vec<VulnerableImageRow> {
        images
            .iter()
            .filter(|img| !img.vulnerabilities.is_empty())
            .filter_map(|img| {
                let vulnerabilities = filter.apply(&img.vulnerabilities);
                if vulnerabilities.is_empty() && filter.severity().is_some() {
                    return None;
                }
                Some(VulnerableImageRow {
                    full_name: img.full_name.clone(),
                    size: img.size.clone(),
                    vulnerability_counts: img.counts(),
                    vulnerabilities,
                })
            })
            .collect()
    }
}

/// Case-insensitive search over package name, language and license, and
/// image name, tag and full name. At most [`SEARCH_RESULT_LIMIT`] per category.
pub fn search(packages: &[DependencyRecord], images: &[ImageRecord], query: &str) -> SearchResults {
    if query.trim().is_empty() {
        return SearchResults::default();
    }
    // Only the blank check trims; surrounding spaces take part in the match.
    let needle = query.to_lowercase();
    let hit = |text: &str| text.to_lowercase().contains(&needle);

    SearchResults {
        query: query.to_string(),
        packages: packages
            .iter()
            .filter(|pkg| {
                hit(&pkg.name)
                    || pkg.language.as_deref().is_some_and(hit)
                    || (!pkg.license.is_empty() && hit(&pkg.license))
            })
            .take(SEARCH_RESULT_LIMIT)
            .cloned()
            .collect(),
        images: images
            .iter()
            .filter(|img| hit(&img.name) || hit(&img.tag) || hit(&img.full_name))
            .take(SEARCH_RESULT_LIMIT)
            .cloned()
            .collect(),
    }
}
