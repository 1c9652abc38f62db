use std::collections::BTreeMap;

/// Reply when no service is selected.
pub const NO_SERVICE_SELECTED: &str = "Please select a service first.";

/// Reply when the selected service has no service-owner record.
pub const NO_SERVICE_DETAILS: &str = "I don't have detailed information about this service yet.";

/// First message of every copilot conversation.
pub const GREETING: &str = "Hello! I'm your Security Copilot. I can help you understand security risks, recommend remediation actions, and answer questions about your services. How can I assist you today?";

/// One keyword-triggered answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopilotRule {
    /// Lowercase substrings; any one of them triggers the rule.
    pub keywords: &'static [&'static str],
    /// Reply text with `{field}` placeholders.
    pub template: &'static str,
}

impl CopilotRule {
    fn triggers_on(&self, question: &str) -> bool {
        self.keywords.iter().any(|keyword| question.contains(keyword))
    }
}

/// CopilotRules policy: ordered keyword table for the security copilot
///
/// Rules are tried top to bottom against the lowercased question and the first
/// one with a matching keyword answers. If none match, the fallback template
/// answers. Templates are filled from a flat map of field values; placeholders
/// without a value are left in place.
#[derive(Debug, Clone)]
pub struct CopilotRules {
    rules: Vec<CopilotRule>,
    fallback: &'static str,
}

impl CopilotRules {
    pub fn new(rules: Vec<CopilotRule>, fallback: &'static str) -> Self {
        Self { rules, fallback }
    }

    /// The service-owner copilot's rule table.
    pub fn standard() -> Self {
        Self::new(
            vec![
                CopilotRule {
                    keywords: &["risk", "score"],
                    template: "The {name} service currently has a risk score of {risk_score}, which is classified as {risk_level}. This is primarily due to {vulnerability_total} vulnerabilities, including {critical} critical and {high} high severity issues.",
                },
                CopilotRule {
                    keywords: &["vulnerabilit"],
                    template: "There are {vulnerability_total} total vulnerabilities in the {name} service. The breakdown is: {critical} Critical, {high} High, {medium} Medium, and {low} Low. I recommend prioritizing the Critical vulnerabilities first.",
                },
                CopilotRule {
                    keywords: &["recommend", "what should"],
                    template: "Based on my analysis, here's my top recommendation: {top_recommendation}. This has a {top_recommendation_priority} priority and {top_recommendation_impact} business impact.",
                },
                CopilotRule {
                    keywords: &["compliance"],
                    template: "The {name} service has a compliance adherence score of {adherence_score}%, with {failed_controls} failed controls and {policy_violations} policy violations. The applicable frameworks are: {frameworks}.",
                },
                CopilotRule {
                    keywords: &["remediation", "mttr"],
                    template: "The Mean Time To Remediate (MTTR) for {name} is {mttr_hours} hours. There are currently {in_progress} vulnerabilities in progress and {overdue_count} overdue items assigned to {assigned_teams} teams.",
                },
                CopilotRule {
                    keywords: &["business", "impact"],
                    template: "The {name} service has {business_criticality} business criticality{user_facing_clause}. Any security incidents could have {business_impact} business impact. It's essential to maintain the security posture of this service.",
                },
            ],
            "I can help you with information about the {name} service, including risk scores, vulnerabilities, compliance status, remediation progress, and recommendations. What would you like to know?",
        )
    }

    /// Template that answers `question`.
    pub fn select(&self, question: &str) -> &'static str {
        let question = question.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.triggers_on(&question))
            .map(|rule| rule.template)
            .unwrap_or(self.fallback)
    }

    /// Answers `question` using `fields` for interpolation.
    pub fn answer(&self, question: &str, fields: &BTreeMap<&str, String>) -> String {
        interpolate(self.select(question), fields)
    }
}

impl Default for CopilotRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Replaces each `{key}` in `template` with `fields[key]`.
pub fn interpolate(template: &str, fields: &BTreeMap<&str, String>) -> String {
    let mut output = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after_brace = &rest[start + 1..];
        match after_brace.find('}') {
            Some(end) => {
                let key = &after_brace[..end];
                match fields.get(key) {
                    Some(value) => output.push_str(value),
                    None => {
                        output.push('{');
                        output.push_str(key);
                        output.push('}');
                    }
                }
                rest = &after_brace[end + 1..];
            }
            None => {
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    output.push_str(rest);
    output
}
