//! Repository activity tab: pull-request statistics and the latest PRs.

use crate::shared::safe_get::{
    lenient_count, lenient_list, lenient_opt_string, lenient_string, node, safe_count, safe_list,
    safe_str,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle of a pull request as the dashboard colors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestStatus {
    Open,
    Merged,
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    pub total_pull_requests: u64,
    pub total_commits: u64,
    pub latest_pr_count: u64,
    /// Commits across the latest pull requests
    pub latest_pr_commits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRow {
    pub message: String,
    pub author_name: String,
    pub author_email: String,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChangeRow {
    pub filename: String,
    pub additions: u64,
    pub deletions: u64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRow {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub status: PullRequestStatus,
    pub author: String,
    pub created_at: Option<String>,
    pub merged_at: Option<String>,
    pub closed_at: Option<String>,
    pub commit_count: u64,
    pub file_count: u64,
    pub html_url: String,
    pub commits: Vec<CommitRow>,
    pub files: Vec<FileChangeRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryActivityView {
    pub summary: ActivitySummary,
    pub pull_requests: Vec<PullRequestRow>,
}

impl RepositoryActivityView {
    pub fn is_empty(&self) -> bool {
        self.summary == ActivitySummary::default() && self.pull_requests.is_empty()
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawPullRequest {
    #[serde(deserialize_with = "lenient_count")]
    number: u64,
    #[serde(deserialize_with = "lenient_opt_string")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    state: Option<String>,
    user: Value,
    #[serde(deserialize_with = "lenient_opt_string")]
    created_at: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    merged_at: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    closed_at: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    commit_count: u64,
    #[serde(deserialize_with = "lenient_count")]
    file_count: u64,
    #[serde(deserialize_with = "lenient_opt_string")]
    html_url: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    commits: Vec<RawCommit>,
    #[serde(deserialize_with = "lenient_list")]
    files: Vec<RawFile>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawCommit {
    #[serde(deserialize_with = "lenient_opt_string")]
    message: Option<String>,
    author: Value,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawFile {
    #[serde(deserialize_with = "lenient_opt_string")]
    filename: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    additions: u64,
    #[serde(deserialize_with = "lenient_count")]
    deletions: u64,
    #[serde(deserialize_with = "lenient_string")]
    status: String,
}

pub struct RepositoryActivityViewBuilder;

impl RepositoryActivityViewBuilder {
    pub fn build(activity: Option<&Value>) -> RepositoryActivityView {
        let details = node(activity, "pull_requests.details");
        let latest_pr_commits = match details {
            Some(Value::Array(prs)) => prs
                .iter()
                .map(|pr| safe_count(Some(pr), "commits.length"))
                .sum(),
            _ => 0,
        };

        let summary = ActivitySummary {
            total_pull_requests: safe_count(activity, "statistics.pull_requests.total"),
            total_commits: safe_count(activity, "statistics.commits.total"),
            latest_pr_count: safe_count(activity, "pull_requests.details.length"),
            latest_pr_commits,
        };

        let pull_requests = safe_list::<RawPullRequest>(activity, "pull_requests.details")
            .into_iter()
            .map(Self::pull_request_row)
            .collect();

        RepositoryActivityView {
            summary,
            pull_requests,
        }
    }

    fn pull_request_row(raw: RawPullRequest) -> PullRequestRow {
        let state = raw.state.unwrap_or_else(|| "unknown".to_string());
        let status = if state == "open" {
            PullRequestStatus::Open
        } else if raw.merged_at.is_some() {
            PullRequestStatus::Merged
        } else {
            PullRequestStatus::Closed
        };

        PullRequestRow {
            number: raw.number,
            title: raw.title.unwrap_or_else(|| "Untitled PR".to_string()),
            state,
            status,
            author: safe_str(Some(&raw.user), "login", "unknown"),
            created_at: raw.created_at,
            merged_at: raw.merged_at,
            closed_at: raw.closed_at,
            commit_count: raw.commit_count,
            file_count: raw.file_count,
            html_url: raw.html_url.unwrap_or_else(|| "#".to_string()),
            commits: raw.commits.into_iter().map(Self::commit_row).collect(),
            files: raw
                .files
                .into_iter()
                .map(|file| FileChangeRow {
                    filename: file.filename.unwrap_or_else(|| "Unknown file".to_string()),
                    additions: file.additions,
                    deletions: file.deletions,
                    status: if file.status.is_empty() {
                        "modified".to_string()
                    } else {
                        file.status
                    },
                })
                .collect(),
        }
    }

    fn commit_row(raw: RawCommit) -> CommitRow {
        let author = Some(&raw.author);
        CommitRow {
            message: raw.message.unwrap_or_else(|| "No message".to_string()),
            author_name: safe_str(author, "name", "Unknown"),
            author_email: safe_str(author, "email", "unknown"),
            date: node(author, "date")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}
