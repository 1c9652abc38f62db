use crate::application::dto::ViewKind;
use crate::dashboard::domain::{Session, Severity};
use crate::dashboard::policies::SeverityMatch;
use crate::dashboard::services::grouping::FACET_ALL;
use crate::dashboard::services::FixAvailability;
use chrono::{NaiveDate, Utc};

/// ViewRequest - what to render from a loaded snapshot
///
/// Carries the selected tab plus every filter and interaction a tab may use.
/// Tabs ignore the options that do not apply to them.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRequest {
    pub view: ViewKind,
    /// Free-text search (dependency name, open-source packages and images)
    pub search: String,
    /// Dependency type facet, `"all"` to disable
    pub dependency_type: String,
    /// Dependency source facet, `"all"` to disable
    pub dependency_source: String,
    pub severity: Option<Severity>,
    /// Vulnerability class substring for the open-source tab
    pub vulnerability_kind: Option<String>,
    pub fix: FixAvailability,
    /// Security findings service filter, or the service-owner selection
    pub service: Option<String>,
    /// Questions put to the security copilot, in order
    pub questions: Vec<String>,
    /// Open the granular vulnerability view of the selected service
    pub granular: bool,
    pub severity_match: SeverityMatch,
    /// Reference date for base-image freshness and placeholder dates
    pub today: NaiveDate,
    /// Viewer of the dashboard; `None` for trusted local runs
    pub session: Option<Session>,
}

impl ViewRequest {
    pub fn new(view: ViewKind) -> Self {
        Self {
            view,
            search: String::new(),
            dependency_type: FACET_ALL.to_string(),
            dependency_source: FACET_ALL.to_string(),
            severity: None,
            vulnerability_kind: None,
            fix: FixAvailability::All,
            service: None,
            questions: Vec::new(),
            granular: false,
            severity_match: SeverityMatch::default(),
            today: Utc::now().date_naive(),
            session: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_dependency_facets(
        mut self,
        dependency_type: impl Into<String>,
        dependency_source: impl Into<String>,
    ) -> Self {
        self.dependency_type = dependency_type.into();
        self.dependency_source = dependency_source.into();
        self
    }

    pub fn with_severity(mut self, severity: Option<Severity>) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_vulnerability_kind(mut self, kind: Option<String>) -> Self {
        self.vulnerability_kind = kind;
        self
    }

    pub fn with_fix(mut self, fix: FixAvailability) -> Self {
        self.fix = fix;
        self
    }

    pub fn with_service(mut self, service: Option<String>) -> Self {
        self.service = service;
        self
    }

    pub fn with_questions(mut self, questions: Vec<String>) -> Self {
        self.questions = questions;
        self
    }

    pub fn with_granular(mut self, granular: bool) -> Self {
        self.granular = granular;
        self
    }

    pub fn with_severity_match(mut self, severity_match: SeverityMatch) -> Self {
        self.severity_match = severity_match;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }
}

impl Default for ViewRequest {
    fn default() -> Self {
        Self::new(ViewKind::default())
    }
}
