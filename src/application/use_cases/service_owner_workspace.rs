use crate::application::read_models::{
    ChatMessage, GranularDetail, HighLevelDetail, ServiceOwnerViewBuilder,
};
use crate::dashboard::domain::{ServiceOwnerRecord, Severity};
use crate::dashboard::policies::copilot_rules::{GREETING, NO_SERVICE_DETAILS, NO_SERVICE_SELECTED};
use crate::dashboard::policies::{CopilotRules, SeverityMatch};
use crate::shared::error::DashboardError;
use crate::shared::Result;
use serde_json::Value;
use std::fmt;

/// Which panel of the service-owner workspace is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkspaceState {
    #[default]
    ServiceList,
    HighLevelDetail(String),
    GranularDetail(String),
}

impl WorkspaceState {
    pub fn selected_service(&self) -> Option<&str> {
        match self {
            WorkspaceState::ServiceList => None,
            WorkspaceState::HighLevelDetail(name) | WorkspaceState::GranularDetail(name) => {
                Some(name)
            }
        }
    }
}

impl fmt::Display for WorkspaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceState::ServiceList => write!(f, "service list"),
            WorkspaceState::HighLevelDetail(name) => write!(f, "high-level detail of {}", name),
            WorkspaceState::GranularDetail(name) => write!(f, "granular detail of {}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceEvent {
    SelectService(String),
    ViewDetailedVulnerabilities,
    Back,
}

impl fmt::Display for WorkspaceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceEvent::SelectService(name) => write!(f, "select {}", name),
            WorkspaceEvent::ViewDetailedVulnerabilities => {
                write!(f, "view detailed vulnerabilities")
            }
            WorkspaceEvent::Back => write!(f, "go back"),
        }
    }
}

/// ServiceOwnerWorkspace - navigation state, copilot chat and severity filter
///
/// Starts on the service list with the copilot's greeting as the only chat
/// message. Transitions:
/// - select a service: any state → high-level detail
/// - view detailed vulnerabilities: high-level → granular
/// - back: granular → high-level → service list (stays on the list)
///
/// Every other event is rejected and leaves the state unchanged.
pub struct ServiceOwnerWorkspace {
    records: Vec<ServiceOwnerRecord>,
    state: WorkspaceState,
    chat: Vec<ChatMessage>,
    severity_filter: Option<Severity>,
    policy: SeverityMatch,
    copilot: CopilotRules,
}

impl ServiceOwnerWorkspace {
    pub fn new(records: Vec<ServiceOwnerRecord>, policy: SeverityMatch) -> Self {
        Self {
            records,
            state: WorkspaceState::ServiceList,
            chat: vec![ChatMessage::ai(GREETING)],
            severity_filter: None,
            policy,
            copilot: CopilotRules::standard(),
        }
    }

    pub fn from_fixture(service_owner: Option<&Value>, policy: SeverityMatch) -> Self {
        Self::new(ServiceOwnerRecord::list_from(service_owner), policy)
    }

    pub fn records(&self) -> &[ServiceOwnerRecord] {
        &self.records
    }

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    pub fn severity_filter(&self) -> Option<Severity> {
        self.severity_filter
    }

    pub fn set_severity_filter(&mut self, severity: Option<Severity>) {
        self.severity_filter = severity;
    }

    /// Applies `event`, or returns `InvalidTransition` and keeps the state.
    pub fn dispatch(&mut self, event: WorkspaceEvent) -> Result<&WorkspaceState> {
        let next = match (&self.state, &event) {
            (_, WorkspaceEvent::SelectService(name)) => {
                WorkspaceState::HighLevelDetail(name.clone())
            }
            (WorkspaceState::HighLevelDetail(name), WorkspaceEvent::ViewDetailedVulnerabilities) => {
                WorkspaceState::GranularDetail(name.clone())
            }
            (WorkspaceState::GranularDetail(name), WorkspaceEvent::Back) => {
                WorkspaceState::HighLevelDetail(name.clone())
            }
            (WorkspaceState::HighLevelDetail(_), WorkspaceEvent::Back)
            | (WorkspaceState::ServiceList, WorkspaceEvent::Back) => WorkspaceState::ServiceList,
            (state, event) => {
                return Err(DashboardError::InvalidTransition {
                    state: state.to_string(),
                    event: event.to_string(),
                }
                .into())
            }
        };

        tracing::debug!(from = %self.state, to = %next, "workspace transition");
        self.state = next;
        Ok(&self.state)
    }

    pub fn select_service(&mut self, name: &str) -> Result<&WorkspaceState> {
        self.dispatch(WorkspaceEvent::SelectService(name.to_string()))
    }

    pub fn view_detailed_vulnerabilities(&mut self) -> Result<&WorkspaceState> {
        self.dispatch(WorkspaceEvent::ViewDetailedVulnerabilities)
    }

    pub fn back(&mut self) -> Result<&WorkspaceState> {
        self.dispatch(WorkspaceEvent::Back)
    }

    /// Record of the selected service, if it has one.
    pub fn selected_record(&self) -> Option<&ServiceOwnerRecord> {
        let name = self.state.selected_service()?;
        self.records.iter().find(|record| record.name == name)
    }

    /// Copilot reply to `question` for the current selection.
    pub fn answer(&self, question: &str) -> String {
        if self.state.selected_service().is_none() {
            return NO_SERVICE_SELECTED.to_string();
        }
        match self.selected_record() {
            Some(record) => self
                .copilot
                .answer(question, &ServiceOwnerViewBuilder::copilot_fields(record)),
            None => NO_SERVICE_DETAILS.to_string(),
        }
    }

    /// Appends `question` and its answer to the chat. Blank input is ignored.
    pub fn ask(&mut self, question: &str) -> Option<&ChatMessage> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        let reply = self.answer(question);
        self.chat.push(ChatMessage::user(question));
        self.chat.push(ChatMessage::ai(reply));
        self.chat.last()
    }

    pub fn high_level_detail(&self, service_inventory: Option<&Value>) -> Option<HighLevelDetail> {
        self.selected_record()
            .map(|record| ServiceOwnerViewBuilder::high_level(record, service_inventory))
    }

    /// Granular panel, only while it is the open one.
    pub fn granular_detail(&self) -> Option<GranularDetail> {
        if !matches!(self.state, WorkspaceState::GranularDetail(_)) {
            return None;
        }
        self.selected_record().map(|record| {
            ServiceOwnerViewBuilder::granular(record, self.severity_filter, self.policy)
        })
    }

    /// Consumes the workspace, keeping its chat transcript.
    pub fn into_chat(self) -> Vec<ChatMessage> {
        self.chat
    }
}
