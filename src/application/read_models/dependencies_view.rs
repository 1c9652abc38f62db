//! Dependencies tab: counts, distributions and the filtered dependency table.

use crate::dashboard::domain::DependencyRecord;
use crate::dashboard::services::grouping::{facet_options, group_count};
use crate::dashboard::services::DependencyFilter;
use crate::shared::safe_get::{coalesce, node, safe_count, safe_list, safe_map};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependenciesView {
    pub total_count: u64,
    pub vulnerable_count: u64,
    pub outdated_count: u64,
    /// `total - (outdated + vulnerable)`, never below zero
    pub up_to_date_count: u64,
    pub license_distribution: BTreeMap<String, u64>,
    pub source_distribution: BTreeMap<String, u64>,
    pub type_distribution: BTreeMap<String, u64>,
    pub type_options: Vec<String>,
    pub source_options: Vec<String>,
    /// Rows before filtering
    pub listed_count: usize,
    /// Rows passing the filter
    pub dependencies: Vec<DependencyRecord>,
    pub filter_active: bool,
}

impl DependenciesView {
    pub fn is_empty(&self) -> bool {
        self.total_count == 0 && self.listed_count == 0
    }
}

pub struct DependenciesViewBuilder;

impl DependenciesViewBuilder {
    /// Builds the tab from the dependencies fixture, falling back to the
    /// inventory's `dependencies` section.
    pub fn build(
        dependencies: Option<&Value>,
        inventory: Option<&Value>,
        filter: &DependencyFilter,
    ) -> DependenciesView {
        let source = coalesce([dependencies, node(inventory, "dependencies")]);
        let records: Vec<DependencyRecord> = safe_list(source, "dependencies");

        let total_count = safe_count(source, "total_count");
        let vulnerable_count = safe_count(source, "vulnerable_count");
        let outdated_count = safe_count(source, "outdated_count");

        let license_distribution = Self::distribution(source, "license_distribution", &records, |d| {
            Some(d.license.as_str()).filter(|l| !l.is_empty())
        });
        let source_distribution = Self::distribution(source, "source_distribution", &records, |d| {
            Some(d.source.as_str()).filter(|s| !s.is_empty())
        });
        let type_distribution = group_count(&records, |d| {
            Some(d.dependency_type.as_str()).filter(|t| !t.is_empty())
        });

        DependenciesView {
            total_count,
            vulnerable_count,
            outdated_count,
            up_to_date_count: total_count.saturating_sub(outdated_count + vulnerable_count),
            license_distribution,
            source_distribution,
            type_distribution,
            type_options: facet_options(&records, |d| d.dependency_type.as_str()),
            source_options: facet_options(&records, |d| d.source.as_str()),
            listed_count: records.len(),
            dependencies: filter.apply(&records),
            filter_active: filter.is_active(),
        }
    }

    /// Fixture-provided distribution when the object exists, else a count
    /// over the dependency list.
    fn distribution<F>(
        source: Option<&Value>,
        path: &str,
        records: &[DependencyRecord],
        key_of: F,
    ) -> BTreeMap<String, u64>
    where
        F: for<'a> Fn(&'a DependencyRecord) -> Option<&'a str>,
    {
        match node(source, path) {
            Some(Value::Object(_)) => safe_map(source, path),
            _ => group_count(records, key_of),
        }
    }
}
