pub mod issues;
pub mod repository;
pub mod search;

/// User-Agent header value sent with every GitHub API request.
pub const USER_AGENT: &str = "gh-issue-finder";
