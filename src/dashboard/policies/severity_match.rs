use crate::dashboard::domain::Severity;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// SeverityMatch policy for comparing fixture severity strings
///
/// Fixtures disagree on casing: some carry `"Critical"`, others `"CRITICAL"`
/// or `"critical"`. Every normalizer classifies severity strings through this
/// one policy so the whole dashboard agrees on what counts as, say, High.
///
/// Modes:
/// 1. `Exact` (default): the string must equal the canonical label (`"High"`)
/// 2. `CaseInsensitive`: surrounding whitespace and case are ignored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeverityMatch {
    #[default]
    Exact,
    CaseInsensitive,
}

impl SeverityMatch {
    /// Checks whether a raw severity string denotes `expected`
    ///
    /// # Arguments
    /// * `actual` - Severity string as found in a fixture
    /// * `expected` - Severity to test for
    pub fn matches(self, actual: &str, expected: Severity) -> bool {
        match self {
            SeverityMatch::Exact => actual == expected.label(),
            SeverityMatch::CaseInsensitive => actual.trim().eq_ignore_ascii_case(expected.label()),
        }
    }

    /// Maps a raw severity string to a [`Severity`], or `None` if it matches
    /// none of the four labels under this policy.
    pub fn classify(self, actual: &str) -> Option<Severity> {
        Severity::ALL
            .into_iter()
            .find(|severity| self.matches(actual, *severity))
    }
}

impl FromStr for SeverityMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(SeverityMatch::Exact),
            "case-insensitive" | "case_insensitive" | "insensitive" => {
                Ok(SeverityMatch::CaseInsensitive)
            }
            _ => Err(format!(
                "Invalid severity match mode: {}. Please specify 'exact' or 'case-insensitive'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_exact() {
        assert_eq!(SeverityMatch::default(), SeverityMatch::Exact);
    }

    #[test]
    fn test_exact_matching() {
        let policy = SeverityMatch::Exact;
        assert!(policy.matches("Critical", Severity::Critical));
        assert!(!policy.matches("CRITICAL", Severity::Critical));
        assert!(!policy.matches("critical", Severity::Critical));
        assert!(!policy.matches(" Critical", Severity::Critical));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let policy = SeverityMatch::CaseInsensitive;
        assert!(policy.matches("CRITICAL", Severity::Critical));
        assert!(policy.matches(" high ", Severity::High));
        assert!(!policy.matches("moderate", Severity::Medium));
    }

    #[test]
    fn test_classify() {
        assert_eq!(SeverityMatch::Exact.classify("Low"), Some(Severity::Low));
        assert_eq!(SeverityMatch::Exact.classify("LOW"), None);
        assert_eq!(
            SeverityMatch::CaseInsensitive.classify("LOW"),
            Some(Severity::Low)
        );
        assert_eq!(SeverityMatch::CaseInsensitive.classify(""), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            SeverityMatch::from_str("Case-Insensitive").unwrap(),
            SeverityMatch::CaseInsensitive
        );
        assert_eq!(SeverityMatch::from_str("exact").unwrap(), SeverityMatch::Exact);
        assert!(SeverityMatch::from_str("fuzzy").is_err());
    }

    #[test]
    fn test_deserialize_from_config_value() {
        let policy: SeverityMatch = serde_json::from_str("\"case-insensitive\"").unwrap();
        assert_eq!(policy, SeverityMatch::CaseInsensitive);
    }
}
