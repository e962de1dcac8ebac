use serde::Deserialize;

/// One open issue as returned by the search endpoint.
///
/// Search items carry the owning repository only as an API URL; the
/// repository record is resolved separately per issue.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueRecord {
    pub number: u64,
    pub html_url: String,
    pub repository_url: String,
}

/// The owning repository of an issue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepositoryRecord {
    pub full_name: String,
    pub html_url: String,
    pub stargazers_count: u64,
}
