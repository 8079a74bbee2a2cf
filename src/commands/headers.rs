use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use crate::commands::open_input;
use crate::decode::read_schema;
use crate::schema::Schema;

#[derive(Serialize)]
struct HeaderInfo<'a> {
    position: usize,
    header: &'a str,
    kind: &'static str,
}

fn render(schema: &Schema, json: bool) -> Result<String> {
    if json {
        let rows: Vec<HeaderInfo> = schema
            .describe()
            .enumerate()
            .map(|(position, (header, column))| HeaderInfo {
                position,
                header,
                kind: column.kind(),
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let width = schema.describe().map(|(h, _)| h.chars().count()).max().unwrap_or(0);
    let mut text = String::new();
    for (position, (header, column)) in schema.describe().enumerate() {
        text.push_str(&format!(
            "{:>3}  {:<width$}  {}\n",
            position,
            header,
            column.kind(),
            width = width
        ));
    }
    Ok(text)
}

pub fn run(input: &Path, json: bool) -> Result<()> {
    let schema = read_schema(open_input(input)?)
        .with_context(|| format!("Failed to read headers of {}", input.display()))?;
    let text = render(&schema, json)?;

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", text)?;
    if json {
        writeln!(stdout)?;
    }
    Ok(())
}
