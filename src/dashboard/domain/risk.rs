use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Service risk band derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// ≥80 Critical, ≥60 High, ≥40 Medium, otherwise Low.
    ///
    /// Scores outside 0-100 are not clamped; they fall into the nearest band.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            RiskLevel::Critical
        } else if score >= 60.0 {
            RiskLevel::High
        } else if score >= 40.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Critical => "Critical",
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }

    /// Display color as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            RiskLevel::Critical => "#dc3545",
            RiskLevel::High => "#fd7e14",
            RiskLevel::Medium => "#ffc107",
            RiskLevel::Low => "#28a745",
        }
    }

    /// Sort rank, 4 for Critical down to 1 for Low.
    pub fn rank(self) -> u8 {
        match self {
            RiskLevel::Critical => 4,
            RiskLevel::High => 3,
            RiskLevel::Medium => 2,
            RiskLevel::Low => 1,
        }
    }

    /// Bootstrap badge class of a service card.
    pub fn badge_class(self) -> &'static str {
        match self {
            RiskLevel::Critical => "danger",
            RiskLevel::High => "warning",
            RiskLevel::Medium => "primary",
            RiskLevel::Low => "success",
        }
    }

    /// Whether a service at this level should be picked as the default selection.
    pub fn is_elevated(self) -> bool {
        self >= RiskLevel::High
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(RiskLevel::Critical),
            "high" => Ok(RiskLevel::High),
            "medium" => Ok(RiskLevel::Medium),
            "low" => Ok(RiskLevel::Low),
            _ => Err(format!("Invalid risk level: {}", s)),
        }
    }
}

/// Half-circle gauge needle angle in degrees for a 0-100 score.
pub fn gauge_rotation(score: f64) -> f64 {
    score / 100.0 * 180.0
}

/// Direction of a service's risk over the last 30 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTrend {
    Increasing,
    Stable,
    Decreasing,
}

impl RiskTrend {
    /// Heuristic used when the fixture carries no explicit trend:
    /// above 70 is increasing, above 40 is stable.
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            RiskTrend::Increasing
        } else if score > 40.0 {
            RiskTrend::Stable
        } else {
            RiskTrend::Decreasing
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTrend::Increasing => "increasing",
            RiskTrend::Stable => "stable",
            RiskTrend::Decreasing => "decreasing",
        }
    }
}

impl FromStr for RiskTrend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "increasing" => Ok(RiskTrend::Increasing),
            "stable" => Ok(RiskTrend::Stable),
            "decreasing" => Ok(RiskTrend::Decreasing),
            _ => Err(format!("Invalid risk trend: {}", s)),
        }
    }
}
