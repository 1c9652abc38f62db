use crate::application::read_models::DashboardView;
use crate::ports::outbound::ViewFormatter;
use crate::shared::Result;

/// JsonFormatter adapter for machine-readable view output
///
/// Serializes the whole view, header included. Content is tagged as
/// `{"kind": ..., "data": ...}` so consumers can dispatch on the tab.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewFormatter for JsonFormatter {
    fn format(&self, view: &DashboardView) -> Result<String> {
        let mut output = serde_json::to_string_pretty(view)?;
        output.push('\n');
        Ok(output)
    }
}
