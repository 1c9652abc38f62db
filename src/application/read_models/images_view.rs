//! Images tab: per-image layers and packages, grouped by base image.

use crate::dashboard::domain::VulnerabilityRecord;
use crate::shared::safe_get::{
    lenient_list, lenient_opt_string, lenient_string, node, safe_list, safe_str,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerRow {
    pub layer_type: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageRow {
    pub name: String,
    pub version: String,
    pub license: String,
    pub status: String,
    pub vulnerability_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRow {
    pub name: String,
    pub base_image: Option<String>,
    pub layers: Vec<LayerRow>,
    pub packages: Vec<PackageRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImagesView {
    pub images: Vec<ImageRow>,
    /// Base image identifier to the names of the images built on it
    pub base_image_groups: BTreeMap<String, Vec<String>>,
    /// Known vulnerabilities of each grouped base image
    pub base_image_vulnerabilities: BTreeMap<String, Vec<VulnerabilityRecord>>,
}

impl ImagesView {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// First image built on `base_image`; its layers and packages stand in
    /// for the base image's own.
    pub fn representative(&self, base_image: &str) -> Option<&ImageRow> {
        self.images
            .iter()
            .find(|image| image.base_image.as_deref() == Some(base_image))
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawImage {
    #[serde(deserialize_with = "lenient_string")]
    name: String,
    #[serde(rename = "baseImage", deserialize_with = "lenient_opt_string")]
    base_image: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    layers: Vec<Value>,
    #[serde(deserialize_with = "lenient_list")]
    packages: Vec<RawPackage>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPackage {
    Named(String),
    Detailed(PackageRecord),
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PackageRecord {
    #[serde(deserialize_with = "lenient_opt_string")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    version: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    license: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    status: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    vulnerabilities: Vec<VulnerabilityRecord>,
}

pub struct ImagesViewBuilder;

impl ImagesViewBuilder {
    pub fn build(image: Option<&Value>) -> ImagesView {
        let images: Vec<ImageRow> = safe_list::<RawImage>(image, "images")
            .into_iter()
            .map(Self::image_row)
            .collect();

        let base_image_groups = group_by_base_image(&images);
        let base_image_vulnerabilities = base_image_groups
            .keys()
            .map(|base| {
                let insight = node(image, "baseImageInsights")
                    .and_then(|insights| insights.get(base.as_str()));
                (base.clone(), safe_list(insight, "vulnerabilities"))
            })
            .collect();

        ImagesView {
            images,
            base_image_groups,
            base_image_vulnerabilities,
        }
    }

    fn image_row(raw: RawImage) -> ImageRow {
        ImageRow {
            name: raw.name,
            base_image: raw.base_image,
            layers: raw
                .layers
                .iter()
                .map(|layer| LayerRow {
                    layer_type: safe_str(Some(layer), "type", "LAYER"),
                    command: safe_str(Some(layer), "command", ""),
                })
                .collect(),
            packages: raw.packages.into_iter().map(Self::package_row).collect(),
        }
    }

    fn package_row(raw: RawPackage) -> PackageRow {
        match raw {
            RawPackage::Named(name) => PackageRow {
                name,
                version: "N/A".to_string(),
                license: "Unknown".to_string(),
                status: "N/A".to_string(),
                vulnerability_ids: Vec::new(),
            },
            RawPackage::Detailed(record) => PackageRow {
                name: record.name.unwrap_or_else(|| "Unknown".to_string()),
                version: record.version.unwrap_or_else(|| "N/A".to_string()),
                license: record.license.unwrap_or_else(|| "Unknown".to_string()),
                status: record.status.unwrap_or_else(|| "N/A".to_string()),
                vulnerability_ids: record
                    .vulnerabilities
                    .iter()
                    .map(|vuln| vuln.display_id().to_string())
                    .collect(),
            },
        }
    }
}

/// Groups image names by base image. Images lacking either are skipped.
pub fn group_by_base_image(images: &[ImageRow]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for image in images {
        let Some(base) = image.base_image.as_deref().filter(|b| !b.is_empty()) else {
            continue;
        };
        let services = groups.entry(base.to_string()).or_default();
        if !image.name.is_empty() {
            services.push(image.name.clone());
        }
    }
    groups
}
