use crate::shared::safe_get::{lenient_opt_string, lenient_string, safe_list};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One API entry from the inventory's `apis` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpoint {
    #[serde(deserialize_with = "lenient_string")]
    pub path: String,
    #[serde(deserialize_with = "lenient_string")]
    pub method: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub service: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApisView {
    pub endpoints: Vec<ApiEndpoint>,
    pub rest_apis: Vec<ApiEndpoint>,
    pub grpc_services: Vec<ApiEndpoint>,
}

impl ApisView {
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty() && self.rest_apis.is_empty() && self.grpc_services.is_empty()
    }
}

pub struct ApisViewBuilder;

impl ApisViewBuilder {
    pub fn build(inventory: Option<&Value>) -> ApisView {
        ApisView {
            endpoints: safe_list(inventory, "apis.endpoints"),
            rest_apis: safe_list(inventory, "apis.rest_apis"),
            grpc_services: safe_list(inventory, "apis.grpc_services"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_subsets() {
        let inventory = json!({
            "apis": {
                "endpoints": [{"path": "/cart", "method": "GET", "description": "Get cart"}],
                "grpc_services": [{"path": "hipstershop.CartService", "method": "AddItem", "service": "cartservice"}]
            }
        });

        let view = ApisViewBuilder::build(Some(&inventory));

        assert_eq!(view.endpoints[0].method, "GET");
        assert!(view.rest_apis.is_empty());
        assert_eq!(view.grpc_services[0].service.as_deref(), Some("cartservice"));
    }

    #[test]
    fn test_missing_apis_is_empty() {
        assert!(ApisViewBuilder::build(None).is_empty());
        assert!(ApisViewBuilder::build(Some(&json!({"apis": null}))).is_empty());
    }

    #[test]
    fn test_malformed_inventory_yields_empty_view() {
        let cases = [
            json!(42),
            json!("apis"),
            json!([null, 1]),
            json!({"apis": "x"}),
            json!({"apis": [1, 2]}),
            json!({"apis": {"endpoints": {"path": "/cart"}, "rest_apis": 7, "grpc_services": [null, 3, "x"]}}),
        ];

        for inventory in cases {
            assert_eq!(
                ApisViewBuilder::build(Some(&inventory)),
                ApisView::default(),
                "{}",
                inventory
            );
        }
    }
}
