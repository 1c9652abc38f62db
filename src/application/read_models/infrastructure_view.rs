use crate::shared::safe_get::{lenient_list, lenient_opt_string, lenient_string, safe_list};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const STATUS_UNKNOWN: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineRow {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub pipeline_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub path: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub status: Option<String>,
}

impl PipelineRow {
    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or(STATUS_UNKNOWN)
    }

    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("active")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactRow {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub artifact_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub path: String,
}

/// An infrastructure-as-code footprint (Terraform, Helm, Kubernetes...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfrastructureResource {
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub resource_type: String,
    #[serde(deserialize_with = "lenient_list")]
    pub resources: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub providers: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub environments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InfrastructureView {
    pub pipelines: Vec<PipelineRow>,
    pub artifacts: Vec<ArtifactRow>,
    pub infrastructure: Vec<InfrastructureResource>,
}

impl InfrastructureView {
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty() && self.artifacts.is_empty() && self.infrastructure.is_empty()
    }
}

pub struct InfrastructureViewBuilder;

impl InfrastructureViewBuilder {
    pub fn build(inventory: Option<&Value>) -> InfrastructureView {
        InfrastructureView {
            pipelines: safe_list(inventory, "infrastructure.pipelines"),
            artifacts: safe_list(inventory, "infrastructure.artifacts"),
            infrastructure: safe_list(inventory, "infrastructure.infrastructure"),
        }
    }
}
