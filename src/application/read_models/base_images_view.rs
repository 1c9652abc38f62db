//! Base image management tab.
//!
//! The curated `base_images_data.json` fixture carries a `base_images` array
//! and its own `summary`. Older image inventories only carry a flat
//! `baseImageInsights` map keyed by `"name:tag"`; for those the rows are
//! synthesized with placeholder registry, size, layer count and date.

use crate::dashboard::domain::{SeverityCounts, VulnerabilityRecord};
use crate::dashboard::domain::vulnerability::count_by_severity;
use crate::dashboard::policies::SeverityMatch;
use crate::shared::safe_get::{
    coalesce, lenient_count, lenient_list, lenient_opt_string, lenient_string, node, safe_count,
    safe_list,
};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const PLACEHOLDER_REGISTRY: &str = "docker.io";
const PLACEHOLDER_SIZE: &str = "100MB";
const PLACEHOLDER_LAYERS: u64 = 5;
const DEFAULT_TAG: &str = "latest";

/// Age badge of a base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// Updated within the last 30 days
    Success,
    /// Older than 30 days
    Warning,
    /// Older than 90 days
    Danger,
}

impl Freshness {
    pub fn from_days(days: i64) -> Self {
        if days > 90 {
            Freshness::Danger
        } else if days > 30 {
            Freshness::Warning
        } else {
            Freshness::Success
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Freshness::Success => "success",
            Freshness::Warning => "warning",
            Freshness::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseImageRow {
    pub name: String,
    pub tag: String,
    pub full_name: String,
    pub registry: String,
    pub os: String,
    pub size: String,
    pub layers: u64,
    pub last_updated: Option<String>,
    pub days_since_update: Option<i64>,
    pub freshness: Option<Freshness>,
    pub used_by: Vec<String>,
    pub vulnerabilities: Vec<VulnerabilityRecord>,
    pub vulnerability_counts: SeverityCounts,
    /// Vulnerabilities with a known fixed version
    pub fixable_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaseImageSummary {
    pub total_images: u64,
    pub vulnerable_images: u64,
    pub deprecated_images: u64,
    pub vulnerabilities: SeverityCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaseImagesView {
    pub summary: BaseImageSummary,
    pub base_images: Vec<BaseImageRow>,
}

impl BaseImagesView {
    pub fn is_empty(&self) -> bool {
        self.base_images.is_empty()
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawBaseImage {
    #[serde(deserialize_with = "lenient_string")]
    name: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    tag: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    full_name: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    registry: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    os: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    size: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    layers: u64,
    #[serde(deserialize_with = "lenient_opt_string")]
    last_updated: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    used_by: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    vulnerabilities: Vec<VulnerabilityRecord>,
    vulnerability_counts: Value,
}

pub struct BaseImagesViewBuilder;

impl BaseImagesViewBuilder {
    /// Builds the tab from the base-images fixture, falling back to the image
    /// inventory's `baseImageInsights`.
    ///
    /// # Arguments
    /// * `base_images` - Base images fixture
    /// * `image` - Image inventory fixture, also used for `used_by`
    /// * `policy` - Severity comparison for synthesized counts
    /// * `today` - Reference date for freshness and placeholder dates
    pub fn build(
        base_images: Option<&Value>,
        image: Option<&Value>,
        policy: SeverityMatch,
        today: NaiveDate,
    ) -> BaseImagesView {
        let source = coalesce([base_images, node(image, "baseImageInsights")]);

        // A `base_images` key of any shape marks the curated fixture.
        if node(source, "base_images").is_some() {
            return Self::from_curated(source, policy, today);
        }

        let flat = node(source, "baseImageInsights").or(source);
        match flat {
            Some(Value::Object(_)) => Self::from_insights(flat, image, policy, today),
            _ => BaseImagesView::default(),
        }
    }

    fn from_curated(source: Option<&Value>, policy: SeverityMatch, today: NaiveDate) -> BaseImagesView {
        let base_images = safe_list::<RawBaseImage>(source, "base_images")
            .into_iter()
            .map(|raw| {
                let counts = match &raw.vulnerability_counts {
                    Value::Object(_) => SeverityCounts::from_json(Some(&raw.vulnerability_counts)),
                    _ => count_by_severity(&raw.vulnerabilities, policy),
                };
                let tag = raw.tag.unwrap_or_else(|| DEFAULT_TAG.to_string());
                let registry = raw
                    .registry
                    .unwrap_or_else(|| PLACEHOLDER_REGISTRY.to_string());
                let full_name = raw
                    .full_name
                    .unwrap_or_else(|| format!("{}/{}:{}", registry, raw.name, tag));
                let days = raw
                    .last_updated
                    .as_deref()
                    .and_then(|date| days_since(date, today));

                BaseImageRow {
                    full_name,
                    registry,
                    os: raw.os.unwrap_or_else(|| "Linux".to_string()),
                    size: raw.size.unwrap_or_else(|| "0MB".to_string()),
                    layers: raw.layers,
                    last_updated: raw.last_updated,
                    days_since_update: days,
                    freshness: days.map(Freshness::from_days),
                    used_by: raw.used_by,
                    fixable_count: raw.vulnerabilities.iter().filter(|v| v.has_fix()).count(),
                    vulnerabilities: raw.vulnerabilities,
                    vulnerability_counts: counts,
                    name: raw.name,
                    tag,
                }
            })
            .collect();

        let summary = BaseImageSummary {
            total_images: safe_count(source, "summary.total_images"),
            vulnerable_images: safe_count(source, "summary.vulnerable_images"),
            deprecated_images: safe_count(source, "summary.deprecated_images"),
            vulnerabilities: SeverityCounts::from_json(node(source, "summary.vulnerabilities")),
        };

        BaseImagesView {
            summary,
            base_images,
        }
    }

    fn from_insights(
        insights: Option<&Value>,
        image: Option<&Value>,
        policy: SeverityMatch,
        today: NaiveDate,
    ) -> BaseImagesView {
        let Some(Value::Object(entries)) = insights else {
            return BaseImagesView::default();
        };

        let last_updated = today.format("%Y-%m-%d").to_string();
        let base_images: Vec<BaseImageRow> = entries
            .iter()
            .map(|(key, details)| {
                let (name, tag) = match key.split_once(':') {
                    Some((name, tag)) if !tag.is_empty() => (name, tag),
                    Some((name, _)) => (name, DEFAULT_TAG),
                    None => (key.as_str(), DEFAULT_TAG),
                };
                let vulnerabilities: Vec<VulnerabilityRecord> =
                    safe_list(Some(details), "vulnerabilities");
                let mut counts = count_by_severity(&vulnerabilities, policy);
                counts.total = match node(Some(details), "vulnerabilities") {
                    Some(Value::Array(entries)) => entries.len() as u64,
                    _ => 0,
                };

                BaseImageRow {
                    name: name.to_string(),
                    tag: tag.to_string(),
                    full_name: key.clone(),
                    registry: PLACEHOLDER_REGISTRY.to_string(),
                    os: "Linux".to_string(),
                    size: PLACEHOLDER_SIZE.to_string(),
                    layers: PLACEHOLDER_LAYERS,
                    last_updated: Some(last_updated.clone()),
                    days_since_update: Some(0),
                    freshness: Some(Freshness::Success),
                    used_by: images_using(image, key),
                    fixable_count: vulnerabilities.iter().filter(|v| v.has_fix()).count(),
                    vulnerabilities,
                    vulnerability_counts: counts,
                }
            })
            .collect();

        let mut totals = SeverityCounts::new();
        for row in &base_images {
            totals.merge(&row.vulnerability_counts);
        }

        BaseImagesView {
            summary: BaseImageSummary {
                total_images: base_images.len() as u64,
                vulnerable_images: base_images
                    .iter()
                    .filter(|row| row.vulnerability_counts.total > 0)
                    .count() as u64,
                deprecated_images: 0,
                vulnerabilities: totals,
            },
            base_images,
        }
    }
}

/// Names of the images whose `baseImage` equals `key` exactly.
fn images_using(image: Option<&Value>, key: &str) -> Vec<String> {
    match node(image, "images") {
        Some(Value::Array(images)) => images
            .iter()
            .filter(|img| node(Some(img), "baseImage").and_then(Value::as_str) == Some(key))
            .filter_map(|img| node(Some(img), "name").and_then(Value::as_str))
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}


/// Whole days between `date` and `today`, in either direction.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps; anything else is `None`.
pub fn days_since(date: &str, today: NaiveDate) -> Option<i64> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(date.trim())
                .ok()
                .map(|dt| dt.date_naive())
        })?;
    Some((today - parsed).num_days().abs())
}
