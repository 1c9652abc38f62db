use std::fmt;
use std::str::FromStr;

/// The dashboard tab a request renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Overview counters
    #[default]
    Metrics,
    Microservices,
    Technologies,
    Dependencies,
    Apis,
    Infrastructure,
    Activity,
    Images,
    BaseImages,
    Security,
    OpensourceSecurity,
    ServiceOwner,
}

impl ViewKind {
    pub const ALL: [ViewKind; 12] = [
        ViewKind::Metrics,
        ViewKind::Microservices,
        ViewKind::Technologies,
        ViewKind::Dependencies,
        ViewKind::Apis,
        ViewKind::Infrastructure,
        ViewKind::Activity,
        ViewKind::Images,
        ViewKind::BaseImages,
        ViewKind::Security,
        ViewKind::OpensourceSecurity,
        ViewKind::ServiceOwner,
    ];

    /// Command-line name, e.g. `base-images`.
    pub fn name(self) -> &'static str {
        match self {
            ViewKind::Metrics => "metrics",
            ViewKind::Microservices => "microservices",
            ViewKind::Technologies => "technologies",
            ViewKind::Dependencies => "dependencies",
            ViewKind::Apis => "apis",
            ViewKind::Infrastructure => "infrastructure",
            ViewKind::Activity => "activity",
            ViewKind::Images => "images",
            ViewKind::BaseImages => "base-images",
            ViewKind::Security => "security",
            ViewKind::OpensourceSecurity => "opensource-security",
            ViewKind::ServiceOwner => "service-owner",
        }
    }

    /// Human-readable tab title.
    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Metrics => "Dashboard Metrics",
            ViewKind::Microservices => "Microservices",
            ViewKind::Technologies => "Technologies",
            ViewKind::Dependencies => "Dependencies",
            ViewKind::Apis => "APIs",
            ViewKind::Infrastructure => "Infrastructure",
            ViewKind::Activity => "Repository Activity",
            ViewKind::Images => "Images",
            ViewKind::BaseImages => "Base Images",
            ViewKind::Security => "Security Findings",
            ViewKind::OpensourceSecurity => "Open Source Security",
            ViewKind::ServiceOwner => "Service Owner Workspace",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        ViewKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .or(match normalized.as_str() {
                "overview" => Some(ViewKind::Metrics),
                "repo-activity" | "repository-activity" => Some(ViewKind::Activity),
                "oss" | "oss-security" => Some(ViewKind::OpensourceSecurity),
                _ => None,
            })
            .ok_or_else(|| {
                let names: Vec<&str> = ViewKind::ALL.iter().map(|kind| kind.name()).collect();
                format!(
                    "Invalid view: {}. Please specify one of: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_round_trips() {
        for kind in ViewKind::ALL {
            assert_eq!(ViewKind::from_str(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn test_from_str_accepts_underscores_and_aliases() {
        assert_eq!(
            ViewKind::from_str("Base_Images").unwrap(),
            ViewKind::BaseImages
        );
        assert_eq!(
            ViewKind::from_str("oss").unwrap(),
            ViewKind::OpensourceSecurity
        );
        assert_eq!(ViewKind::from_str("overview").unwrap(), ViewKind::Metrics);
    }

    #[test]
    fn test_from_str_invalid_lists_views() {
        let error = ViewKind::from_str("charts").unwrap_err();
        assert!(error.contains("Invalid view: charts"));
        assert!(error.contains("service-owner"));
    }
}
