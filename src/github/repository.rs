use crate::github::issues::RepositoryRecord;
use anyhow::{Context, Result};

/// Parse a repository payload returned by the GitHub API.
pub fn parse_repository(json: &str) -> Result<RepositoryRecord> {
    serde_json::from_str::<RepositoryRecord>(json).context("Failed to parse repository response")
}

/// Fetch the repository record behind a search item's `repository_url`.
///
/// Each call is an independent lookup; star counts are not cached across
/// issues of the same repository.
pub async fn fetch_repository(
    client: &reqwest::Client,
    token: &str,
    repository_url: &str,
) -> Result<RepositoryRecord> {
    let response = client
        .get(repository_url)
        .bearer_auth(token)
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", crate::github::USER_AGENT)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow::anyhow!("API request error: {}", response.status()));
    }

    let body = response.text().await?;
    parse_repository(&body)
}
