use crate::github::issues::IssueRecord;
use anyhow::Result;
use serde_json::Value;
use std::future::Future;

mod endpoints {
    pub const SEARCH_ISSUES: &str = "https://api.github.com/search/issues";
}

/// Page size used for search pagination. Owned by this client, not exposed
/// to callers.
const PER_PAGE: u32 = 100;

/// Build the issue search expression for a label and language.
///
/// The label is quoted verbatim; embedded quote characters are passed
/// through unescaped (known upstream limitation). The language is unquoted.
pub fn build_query(label: &str, language: &str) -> String {
    format!("label:\"{label}\" language:{language} is:open")
}

/// Extract an issue record from one raw search item.
///
/// Returns `None` when a required field is missing or has the wrong type.
pub fn parse_search_item(item: &Value) -> Option<IssueRecord> {
    match (
        item["number"].as_u64(),
        item["html_url"].as_str(),
        item["repository_url"].as_str(),
    ) {
        (Some(number), Some(html_url), Some(repository_url)) => Some(IssueRecord {
            number,
            html_url: html_url.to_string(),
            repository_url: repository_url.to_string(),
        }),
        _ => None,
    }
}

/// Pull issues from the paginated search, stopping once `limit` raw items
/// have been considered or the upstream runs out of pages.
///
/// `limit` bounds issues considered, not issues parsed: items that fail to
/// parse still count against it. A failing page fetch is logged and ends
/// consumption, returning whatever had been accumulated so far.
pub async fn fetch_search_results<F, Fut>(limit: usize, fetcher: F) -> Vec<IssueRecord>
where
    F: Fn(u32, u32) -> Fut,
    Fut: Future<Output = Result<Vec<Value>>>,
{
    let mut collected = Vec::new();
    let mut considered = 0usize;
    let mut page = 1u32;

    while considered < limit {
        let items = match fetcher(page, PER_PAGE).await {
            Ok(items) => items,
            Err(err) => {
                eprintln!("Search request failed on page {page}: {err:#}");
                break;
            }
        };

        if items.is_empty() {
            break;
        }

        for item in &items {
            if considered == limit {
                break;
            }
            considered += 1;
            if let Some(issue) = parse_search_item(item) {
                collected.push(issue);
            }
        }

        page += 1;
    }

    collected
}

/// Fetch one page of search results from the GitHub API.
pub async fn fetch_search_page(
    client: &reqwest::Client,
    token: &str,
    query: &str,
    page: u32,
    per_page: u32,
) -> Result<Vec<Value>> {
    let response = client
        .get(endpoints::SEARCH_ISSUES)
        .bearer_auth(token)
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", crate::github::USER_AGENT)
        .query(&[("q", query)])
        .query(&[("page", page), ("per_page", per_page)])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow::anyhow!("API request error: {}", response.status()));
    }

    let body = response.json::<Value>().await?;
    match body["items"].as_array() {
        Some(items) => Ok(items.clone()),
        None => Err(anyhow::anyhow!(
            "Malformed search response: missing items array"
        )),
    }
}
