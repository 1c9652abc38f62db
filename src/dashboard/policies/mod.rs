pub mod copilot_rules;
pub mod severity_match;

pub use copilot_rules::{CopilotRule, CopilotRules};
pub use severity_match::SeverityMatch;
