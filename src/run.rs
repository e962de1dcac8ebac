use crate::cli;
use crate::config;
use crate::filter;
use crate::github;
use crate::output;
use crate::report;

use std::path::Path;

/// Execute the full pipeline: parse flags, search, filter, render.
///
/// Search and per-issue failures degrade to a smaller (possibly empty)
/// report. Configuration and rendering failures return an error, which the
/// binary turns into a nonzero exit.
pub async fn run(
    args: Vec<String>,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<()> {
    match cli::parser::parse_args(&args) {
        cli::parser::Command::Help => {
            output::println(cli::parser::USAGE, &mut stdout_additional)?;
            Ok(())
        }
        cli::parser::Command::Invalid(message) => {
            eprintln!("{message}");
            eprintln!("{}", cli::parser::USAGE);
            Err(anyhow::anyhow!(message))
        }
        cli::parser::Command::Find(config) => {
            let token = match config::github_token(|name| std::env::var(name).ok()) {
                Some(token) => token,
                None => {
                    eprintln!(
                        "{} is not set. Export a GitHub API token first.",
                        config::TOKEN_ENV_VAR
                    );
                    return Err(anyhow::anyhow!(
                        "missing {} environment variable",
                        config::TOKEN_ENV_VAR
                    ));
                }
            };

            let client = anyhow::Context::context(
                reqwest::Client::builder()
                    .timeout(std::time::Duration::from_secs(30))
                    .build(),
                "Failed to create HTTP client",
            )?;

            let query = github::search::build_query(&config.label, &config.language);
            let fetcher = |page: u32, per_page: u32| {
                let client = client.clone();
                let token = token.clone();
                let query = query.clone();
                async move {
                    github::search::fetch_search_page(&client, &token, &query, page, per_page)
                        .await
                }
            };
            let issues =
                github::search::fetch_search_results(config.limit as usize, fetcher).await;

            let resolver = |repository_url: String| {
                let client = client.clone();
                let token = token.clone();
                async move {
                    github::repository::fetch_repository(&client, &token, &repository_url).await
                }
            };
            let retained = filter::filter_by_stars(issues, config.stars, resolver).await;

            let rows = report::group_by_repository(retained);
            report::write_report(
                Path::new(report::TEMPLATE_PATH),
                Path::new(report::OUTPUT_PATH),
                &rows,
            )?;

            let issue_count: usize = rows.iter().map(|row| row.issues.len()).sum();
            output::println(
                &format!(
                    "Wrote {} with {} issue(s) across {} repositories",
                    report::OUTPUT_PATH,
                    issue_count,
                    rows.len()
                ),
                &mut stdout_additional,
            )?;
            Ok(())
        }
    }
}
