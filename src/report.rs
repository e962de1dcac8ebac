use crate::filter::RetainedIssue;
use anyhow::{Context, Result};
use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use std::fs;
use std::path::Path;

/// Template read at render time. Must contain a `table` with id
/// `issues-table` and a `tbody` for the generated rows.
pub const TEMPLATE_PATH: &str = "template.html";
/// Output document, fully overwritten on every run.
pub const OUTPUT_PATH: &str = "report.html";

/// One rendered table row: a repository and the retained issues under it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub full_name: String,
    pub html_url: String,
    pub stargazers_count: u64,
    pub issues: Vec<IssueLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueLink {
    pub number: u64,
    pub html_url: String,
}

/// Group retained issues by repository full name.
///
/// Rows are ordered by full name ascending (case-sensitive lexicographic);
/// issues within a row by issue number ascending. Repository lookups happen
/// per issue, so sibling records of one repository can disagree on the star
/// count; the row shows the record of its lowest-numbered issue.
pub fn group_by_repository(mut retained: Vec<RetainedIssue>) -> Vec<ReportRow> {
    retained.sort_by(|a, b| {
        a.repository
            .full_name
            .cmp(&b.repository.full_name)
            .then(a.issue.number.cmp(&b.issue.number))
    });

    let mut rows: Vec<ReportRow> = Vec::new();
    for entry in retained {
        let link = IssueLink {
            number: entry.issue.number,
            html_url: entry.issue.html_url,
        };
        match rows.last_mut() {
            Some(row) if row.full_name == entry.repository.full_name => row.issues.push(link),
            _ => rows.push(ReportRow {
                full_name: entry.repository.full_name,
                html_url: entry.repository.html_url,
                stargazers_count: entry.repository.stargazers_count,
                issues: vec![link],
            }),
        }
    }
    rows
}

/// Render the table rows as indented HTML destined for the template's tbody.
pub fn render_rows(rows: &[ReportRow]) -> String {
    let mut html = String::from("\n");
    for row in rows {
        html.push_str("        <tr>\n");
        html.push_str(&format!(
            "          <td><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></td>\n",
            html_escape::encode_double_quoted_attribute(&row.html_url),
            html_escape::encode_text(&row.full_name),
        ));
        html.push_str("          <td>\n");
        html.push_str("            <ul>\n");
        for issue in &row.issues {
            html.push_str(&format!(
                "              <li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Issues#{}</a></li>\n",
                html_escape::encode_double_quoted_attribute(&issue.html_url),
                issue.number,
            ));
        }
        html.push_str("            </ul>\n");
        html.push_str("          </td>\n");
        html.push_str(&format!("          <td>{}</td>\n", row.stargazers_count));
        html.push_str("        </tr>\n");
    }
    html.push_str("      ");
    html
}

/// Substitute the rendered rows into the template's issues table body.
///
/// Replacing the body content clears whatever rows the template carried.
/// A template without the table body is a deployment defect and fails hard.
pub fn render_document(template: &str, rows_html: &str) -> Result<String> {
    let mut table_body_found = false;
    let output = rewrite_str(
        template,
        RewriteStrSettings {
            element_content_handlers: vec![element!("table#issues-table tbody", |el| {
                table_body_found = true;
                el.set_inner_content(rows_html, ContentType::Html);
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    )
    .context("Failed to rewrite template")?;

    if !table_body_found {
        return Err(anyhow::anyhow!(
            "Template has no tbody inside table#issues-table"
        ));
    }

    Ok(output)
}

/// Read the template, render the full document and overwrite the output
/// file. Template and I/O failures propagate.
pub fn write_report(template_path: &Path, output_path: &Path, rows: &[ReportRow]) -> Result<()> {
    let template = fs::read_to_string(template_path)
        .with_context(|| format!("Failed to read template {}", template_path.display()))?;
    let document = render_document(&template, &render_rows(rows))?;
    fs::write(output_path, document)
        .with_context(|| format!("Failed to write report {}", output_path.display()))?;
    Ok(())
}
