use crate::{FinderWorld, RepositoryFixture};
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use gh_issue_finder::filter;
use gh_issue_finder::github::issues::{IssueRecord, RepositoryRecord};
use gh_issue_finder::github::search;
use gh_issue_finder::report;
use regex::Regex;
use serde_json::json;
use std::path::Path;

fn repository_api_url(full_name: &str) -> String {
    format!("https://api.github.com/repos/{full_name}")
}

fn rendered_report(world: &FinderWorld) -> &str {
    world
        .report_html
        .as_deref()
        .expect("The report has not been generated yet")
}

/// Extract the `<tr>` block whose first cell links to `full_name`.
fn row_block<'a>(report: &'a str, full_name: &str) -> &'a str {
    let pattern = format!(
        r"(?s)<tr>\s*<td><a[^>]*>{}</a></td>.*?</tr>",
        regex::escape(full_name)
    );
    let re = Regex::new(&pattern).expect("Valid row pattern");
    re.find(report)
        .unwrap_or_else(|| panic!("No row for {full_name} in report:\n{report}"))
        .as_str()
}

#[given("the search returns the following issues:")]
async fn search_returns_issues(world: &mut FinderWorld, step: &Step) {
    let table = step.table.as_ref().expect("This step requires a table");
    for row in table.rows.iter().skip(1) {
        let number: u64 = row[0].parse().expect("Issue number must be an integer");
        let full_name = row[1].clone();
        let stars: u64 = row[2].parse().expect("Star count must be an integer");

        world.issues.push(IssueRecord {
            number,
            html_url: format!("https://github.com/{full_name}/issues/{number}"),
            repository_url: repository_api_url(&full_name),
        });
        world.repositories.insert(
            repository_api_url(&full_name),
            RepositoryFixture::Available(RepositoryRecord {
                full_name: full_name.clone(),
                html_url: format!("https://github.com/{full_name}"),
                stargazers_count: stars,
            }),
        );
    }
}

#[given("the search returns no issues")]
async fn search_returns_nothing(world: &mut FinderWorld) {
    world.issues.clear();
    world.repositories.clear();
}

#[given(regex = r#"^repository "([^"]+)" fails to resolve$"#)]
async fn repository_fails_to_resolve(world: &mut FinderWorld, full_name: String) {
    world
        .repositories
        .insert(repository_api_url(&full_name), RepositoryFixture::Unavailable);
}

#[when(regex = r"^the report is generated with a star threshold of (\d+) and a limit of (\d+)$")]
async fn generate_report(world: &mut FinderWorld, stars: u64, limit: usize) {
    let raw_items: Vec<serde_json::Value> = world
        .issues
        .iter()
        .map(|issue| {
            json!({
                "number": issue.number,
                "html_url": issue.html_url,
                "repository_url": issue.repository_url,
            })
        })
        .collect();
    let fetcher = move |page: u32, _per_page: u32| {
        let items = if page == 1 { raw_items.clone() } else { Vec::new() };
        async move { Ok::<_, anyhow::Error>(items) }
    };
    let considered = search::fetch_search_results(limit, fetcher).await;

    let repositories = world.repositories.clone();
    let resolver = move |repository_url: String| {
        let fixture = repositories.get(&repository_url).cloned();
        async move {
            match fixture {
                Some(RepositoryFixture::Available(record)) => Ok(record),
                Some(RepositoryFixture::Unavailable) => {
                    Err(anyhow::anyhow!("503 Service Unavailable"))
                }
                None => Err(anyhow::anyhow!("unknown repository {repository_url}")),
            }
        }
    };
    let retained = filter::filter_by_stars(considered, stars, resolver).await;
    let rows = report::group_by_repository(retained);

    let workspace = tempfile::tempdir().expect("Failed to create a temporary workspace");
    let template_path = workspace.path().join("template.html");
    std::fs::copy(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("template.html"),
        &template_path,
    )
    .expect("Failed to copy the template into the workspace");
    let output_path = workspace.path().join("report.html");

    report::write_report(&template_path, &output_path, &rows)
        .expect("Report generation should succeed");

    world.report_html =
        Some(std::fs::read_to_string(&output_path).expect("The report file should exist"));
    world.workspace = Some(workspace);
}

#[then(regex = r#"^the report contains a row for "([^"]+)" with stars (\d+)$"#)]
async fn report_contains_row(world: &mut FinderWorld, full_name: String, stars: u64) {
    let report = rendered_report(world);
    let row = row_block(report, &full_name);
    assert!(
        row.contains(&format!("<td>{stars}</td>")),
        "Row for {full_name} does not show {stars} stars:\n{row}"
    );
}

#[then(regex = r#"^the row for "([^"]+)" lists issue (\d+)$"#)]
async fn row_lists_issue(world: &mut FinderWorld, full_name: String, number: u64) {
    let report = rendered_report(world);
    let row = row_block(report, &full_name);
    assert!(
        row.contains(&format!("Issues#{number}</a>")),
        "Row for {full_name} does not list issue {number}:\n{row}"
    );
}

#[then(regex = r"^the report does not mention issue (\d+)$")]
async fn report_does_not_mention_issue(world: &mut FinderWorld, number: u64) {
    let report = rendered_report(world);
    assert!(
        !report.contains(&format!("Issues#{number}</a>")),
        "Issue {number} unexpectedly present in report:\n{report}"
    );
}

#[then(regex = r#"^the row for "([^"]+)" appears before the row for "([^"]+)"$"#)]
async fn row_order(world: &mut FinderWorld, first: String, second: String) {
    let report = rendered_report(world);
    let first_position = report
        .find(&format!(">{first}</a>"))
        .unwrap_or_else(|| panic!("No row for {first}"));
    let second_position = report
        .find(&format!(">{second}</a>"))
        .unwrap_or_else(|| panic!("No row for {second}"));
    assert!(
        first_position < second_position,
        "Expected the row for {first} before the row for {second}"
    );
}

#[then("a report file is written")]
async fn report_file_is_written(world: &mut FinderWorld) {
    assert!(world.report_html.is_some());
}

#[then("the report table body is empty")]
async fn report_table_body_is_empty(world: &mut FinderWorld) {
    let report = rendered_report(world);
    let re = Regex::new(r"(?s)<tbody>\s*</tbody>").expect("Valid pattern");
    assert!(
        re.is_match(report),
        "Table body is not empty:\n{report}"
    );
}
