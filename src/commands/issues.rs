use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::color::color_of;
use crate::commands::open_input;
use crate::decode::read_issues;
use crate::hierarchy::Hierarchy;
use crate::models::Issue;
use crate::time::TimeNormalizer;

#[derive(Serialize)]
pub struct DecodedIssue<'a> {
    pub path: String,
    pub color: &'static str,
    #[serde(flatten)]
    pub issue: &'a Issue,
}

#[derive(Serialize)]
pub struct IssueDump<'a> {
    pub version: i32,
    pub source: String,
    pub issues: Vec<DecodedIssue<'a>>,
}

fn dump<'a>(source: &Path, issues: &'a [Issue], root: &str) -> IssueDump<'a> {
    let hierarchy = Hierarchy::new(issues, root);
    IssueDump {
        version: 1,
        source: source.display().to_string(),
        issues: issues
            .iter()
            .map(|issue| DecodedIssue {
                path: hierarchy.path_of(issue),
                color: color_of(&issue.issue_type),
                issue,
            })
            .collect(),
    }
}

pub fn run(input: &Path, root: &str, times: &TimeNormalizer, output_path: Option<&Path>) -> Result<()> {
    let issues = read_issues(open_input(input)?, times)
        .with_context(|| format!("Failed to decode {}", input.display()))?;
    let data = dump(input, &issues, root);
    let json = serde_json::to_string_pretty(&data)?;

    match output_path {
        Some(path) => {
            fs::write(path, json).context("Failed to write issue dump")?;
            eprintln!("Dumped {} issues to {}", data.issues.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}
