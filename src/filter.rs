use crate::github::issues::{IssueRecord, RepositoryRecord};
use anyhow::Result;
use futures::{StreamExt, stream};
use std::future::Future;

/// Number of repository lookups allowed in flight at once.
pub const WORKER_POOL_SIZE: usize = 5;

/// An issue that passed the star threshold, paired with the repository
/// record resolved for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RetainedIssue {
    pub issue: IssueRecord,
    pub repository: RepositoryRecord,
}

/// Apply the star threshold to every issue, resolving repositories through
/// `resolver` with up to [`WORKER_POOL_SIZE`] lookups in flight.
///
/// Results are collected as they complete; the returned order carries no
/// relation to submission order. A failed resolution is logged and drops
/// only that issue.
pub async fn filter_by_stars<F, Fut>(
    issues: Vec<IssueRecord>,
    min_stars: u64,
    resolver: F,
) -> Vec<RetainedIssue>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<RepositoryRecord>>,
{
    stream::iter(issues)
        .map(|issue| {
            let resolution = resolver(issue.repository_url.clone());
            async move {
                match resolution.await {
                    Ok(repository) if repository.stargazers_count >= min_stars => {
                        Some(RetainedIssue { issue, repository })
                    }
                    Ok(_) => None,
                    Err(err) => {
                        eprintln!(
                            "Failed to resolve repository for issue #{}: {err:#}",
                            issue.number
                        );
                        None
                    }
                }
            }
        })
        .buffer_unordered(WORKER_POOL_SIZE)
        .filter_map(|outcome| async move { outcome })
        .collect()
        .await
}
