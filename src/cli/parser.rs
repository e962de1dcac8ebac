use crate::config::SearchConfig;

/// Enum representing the parsed command line
#[derive(Debug, PartialEq)]
pub enum Command {
    Find(SearchConfig),
    Help,
    Invalid(String),
}

pub const USAGE: &str = "\
Usage: gh-issue-finder [OPTIONS]

Finds open GitHub issues and writes an HTML report grouped by repository.

Options:
  --label <LABEL>        issue label to match
  --language <LANGUAGE>  repository language to match
  --limit <N>            maximum number of issues considered (default: 500)
  -s, --stars <N>        minimum repository star count to retain (default: 10)
  -h, --help             print this message

The GITHUB_TOKEN environment variable must hold a GitHub API token.";

/// Parse command line arguments into a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    let mut config = SearchConfig::default();
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => return Command::Help,
            "--label" => match rest.next() {
                Some(value) => config.label = value.clone(),
                None => return Command::Invalid("Missing value for --label".to_string()),
            },
            "--language" => match rest.next() {
                Some(value) => config.language = value.clone(),
                None => return Command::Invalid("Missing value for --language".to_string()),
            },
            "--limit" => match rest.next() {
                Some(value) => match value.parse::<u32>() {
                    Ok(limit) if limit > 0 => config.limit = limit,
                    _ => {
                        return Command::Invalid(format!(
                            "Invalid value for --limit: {value} (expected a positive integer)"
                        ));
                    }
                },
                None => return Command::Invalid("Missing value for --limit".to_string()),
            },
            "-s" | "--stars" => match rest.next() {
                Some(value) => match value.parse::<u64>() {
                    Ok(stars) => config.stars = stars,
                    Err(_) => {
                        return Command::Invalid(format!(
                            "Invalid value for --stars: {value} (expected a non-negative integer)"
                        ));
                    }
                },
                None => return Command::Invalid("Missing value for --stars".to_string()),
            },
            unknown => return Command::Invalid(format!("Unknown option: {unknown}")),
        }
    }

    Command::Find(config)
}
