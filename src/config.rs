/// Name of the environment variable holding the GitHub API credential.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

pub const DEFAULT_LIMIT: u32 = 500;
pub const DEFAULT_STARS: u64 = 10;

/// Search parameters assembled from command line flags.
///
/// Empty `label`/`language` values are legal and produce a query with empty
/// filter terms rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub label: String,
    pub language: String,
    pub limit: u32,
    pub stars: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            label: String::new(),
            language: String::new(),
            limit: DEFAULT_LIMIT,
            stars: DEFAULT_STARS,
        }
    }
}

/// Read the API credential through an injected environment lookup.
///
/// Returns `None` when the variable is unset or blank.
pub fn github_token<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(TOKEN_ENV_VAR)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
