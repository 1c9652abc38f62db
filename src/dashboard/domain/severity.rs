use crate::shared::safe_get::safe_count;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Ordinal vulnerability rating.
///
/// Ordering runs from `Low` (smallest) to `Critical` (largest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Highest first, the order dashboards list them in.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Canonical fixture label, e.g. `"Critical"`.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(format!(
                "Invalid severity: {}. Please specify 'critical', 'high', 'medium' or 'low'",
                s
            )),
        }
    }
}

/// Per-severity tally. `total` counts every record seen, including ones whose
/// severity matched none of the four labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub total: u64,
}

impl SeverityCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one record; `None` only bumps the total.
    pub fn record(&mut self, severity: Option<Severity>) {
        self.total += 1;
        if let Some(severity) = severity {
            *self.slot(severity) += 1;
        }
    }

    pub fn get(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    /// Share of `total` at `severity`, in percent. Zero when there is nothing
    /// to divide by.
    pub fn percentage(&self, severity: Severity) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.get(severity) as f64 / self.total as f64 * 100.0
        }
    }

    /// Reads a pre-computed `{critical, high, medium, low, total}` object.
    /// Missing or malformed members are zero.
    pub fn from_json(value: Option<&Value>) -> Self {
        Self {
            critical: safe_count(value, "critical"),
            high: safe_count(value, "high"),
            medium: safe_count(value, "medium"),
            low: safe_count(value, "low"),
            total: safe_count(value, "total"),
        }
    }

    pub fn merge(&mut self, other: &SeverityCounts) {
        self.critical += other.critical;
        self.high += other.high;
        self.medium += other.medium;
        self.low += other.low;
        self.total += other.total;
    }

    fn slot(&mut self, severity: Severity) -> &mut u64 {
        match severity {
            Severity::Critical => &mut self.critical,
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
        }
    }
}
