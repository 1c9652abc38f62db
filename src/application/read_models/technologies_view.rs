//! Technologies tab: languages, frameworks, databases, cloud platforms and tools.

use crate::shared::safe_get::{coalesce, lenient_f64, lenient_string, node, safe_list, safe_map, safe_str};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// A detected technology with the detector's confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnologyEntry {
    pub name: String,
    pub category: String,
    /// Detector confidence in `0.0..=1.0`
    pub confidence: f64,
    /// `confidence` as a rounded percentage
    pub confidence_percent: u32,
    /// `success`, `info`, `warning` or `danger`
    pub badge: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnologiesView {
    pub primary_language: String,
    pub languages: BTreeMap<String, Number>,
    pub language_distribution: BTreeMap<String, Number>,
    pub frameworks: Vec<TechnologyEntry>,
    pub databases: Vec<TechnologyEntry>,
    pub cloud_platforms: Vec<TechnologyEntry>,
    pub tools: Vec<TechnologyEntry>,
}

impl TechnologiesView {
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
            && self.language_distribution.is_empty()
            && self.frameworks.is_empty()
            && self.databases.is_empty()
            && self.cloud_platforms.is_empty()
            && self.tools.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTechnology {
    Named(String),
    Detailed(TechnologyRecord),
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TechnologyRecord {
    #[serde(deserialize_with = "lenient_string")]
    name: String,
    #[serde(deserialize_with = "lenient_string")]
    category: String,
    #[serde(deserialize_with = "lenient_f64")]
    confidence: f64,
}

pub struct TechnologiesViewBuilder;

impl TechnologiesViewBuilder {
    /// Builds the tab from the technologies fixture, falling back to the
    /// inventory's `technologies` section.
    pub fn build(technologies: Option<&Value>, inventory: Option<&Value>) -> TechnologiesView {
        let source = coalesce([technologies, node(inventory, "technologies")]);

        TechnologiesView {
            primary_language: safe_str(source, "primary_language", "Unknown"),
            languages: safe_map(source, "languages"),
            language_distribution: safe_map(source, "language_distribution"),
            frameworks: Self::entries(source, "frameworks"),
            databases: Self::entries(source, "databases"),
            cloud_platforms: Self::entries(source, "cloud_platforms"),
            tools: Self::entries(source, "tools"),
        }
    }

    fn entries(source: Option<&Value>, path: &str) -> Vec<TechnologyEntry> {
        safe_list::<RawTechnology>(source, path)
            .into_iter()
            .map(|raw| {
                let record = match raw {
                    RawTechnology::Named(name) => TechnologyRecord {
                        name,
                        confidence: 1.0,
                        ..Default::default()
                    },
                    RawTechnology::Detailed(record) => record,
                };
                TechnologyEntry {
                    confidence_percent: (record.confidence * 100.0).round().max(0.0) as u32,
                    badge: confidence_badge(record.confidence),
                    name: record.name,
                    category: record.category,
                    confidence: record.confidence,
                }
            })
            .collect()
    }
}

/// Badge color for a detector confidence.
pub fn confidence_badge(confidence: f64) -> &'static str {
    if confidence >= 0.9 {
        "success"
    } else if confidence >= 0.7 {
        "info"
    } else if confidence >= 0.5 {
        "warning"
    } else {
        "danger"
    }
}
