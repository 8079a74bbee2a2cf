use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::borrow::Cow;
use std::io::Read;
use tracing::{debug, debug_span, warn};

use crate::models::{Issue, Watcher};
use crate::schema::{Column, Repeated, Schema};
use crate::time::TimeNormalizer;

/// Collects the repeated `Watchers` / `Watchers Id` columns of one row and
/// pairs them up by position once the row is done.
#[derive(Debug, Default)]
pub struct WatcherAccumulator {
    names: Vec<String>,
    ids: Vec<String>,
}

impl WatcherAccumulator {
    pub fn push_name(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    pub fn push_id(&mut self, id: &str) {
        self.ids.push(id.to_string());
    }

    /// Pairs with an empty side are dropped. When the two lists differ in
    /// length the unmatched tail is dropped as well.
    pub fn finish(self) -> Vec<Watcher> {
        if self.names.len() != self.ids.len() {
            warn!(
                names = self.names.len(),
                ids = self.ids.len(),
                "Watcher name/id count mismatch, dropping unpaired entries"
            );
        }

        self.names
            .into_iter()
            .zip(self.ids)
            .filter(|(name, id)| !name.is_empty() && !id.is_empty())
            .map(|(name, id)| Watcher { name, id })
            .collect()
    }
}

/// Decode one row against a resolved header schema.
///
/// Cells past the last header are ignored and missing trailing cells leave
/// their fields empty. Only a malformed timestamp fails.
pub fn decode_row<'r, I>(schema: &Schema, row: I, times: &TimeNormalizer) -> Result<Issue>
where
    I: IntoIterator<Item = &'r str>,
{
    let mut issue = Issue::default();
    let mut watchers = WatcherAccumulator::default();

    for (column, value) in schema.columns().iter().zip(row) {
        match column {
            Column::Field(rule) => rule.apply(&mut issue, value, times)?,
            Column::Repeated(Repeated::WatcherName) => watchers.push_name(value),
            Column::Repeated(Repeated::WatcherId) => watchers.push_id(value),
            Column::Repeated(Repeated::Comment) => issue.comments.push(value.to_string()),
            Column::Ignored => {}
        }
    }

    issue.watchers = watchers.finish();
    Ok(issue)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

fn header_schema<R: Read>(rdr: &mut csv::Reader<R>) -> Result<Schema> {
    let headers = rdr.byte_headers().context("Failed to read CSV header row")?;
    if headers.is_empty() {
        bail!("Input has no header row");
    }
    debug!(columns = headers.len(), headers = ?headers, "Read header row");
    Ok(Schema::new(headers.iter().map(String::from_utf8_lossy)))
}

/// Resolve the header row of an export without decoding any records.
pub fn read_schema<R: Read>(reader: R) -> Result<Schema> {
    header_schema(&mut csv_reader(reader))
}

/// Read a whole export: one header row, then one issue per record.
pub fn read_issues<R: Read>(reader: R, times: &TimeNormalizer) -> Result<Vec<Issue>> {
    let mut rdr = csv_reader(reader);
    let schema = header_schema(&mut rdr)?;

    let mut issues = Vec::new();
    for result in rdr.byte_records() {
        let record = result.context("Failed to read CSV record")?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let _row = debug_span!("row", line).entered();

        // Free text from older exports is not always UTF-8.
        let cells: Vec<Cow<'_, str>> = record.iter().map(String::from_utf8_lossy).collect();
        let replaced = cells.iter().filter(|c| matches!(c, Cow::Owned(_))).count();
        if replaced > 0 {
            warn!(cells = replaced, "Replaced invalid UTF-8 in record");
        }

        let issue = decode_row(&schema, cells.iter().map(|cell| &**cell), times)
            .with_context(|| format!("Invalid record at line {}", line))?;
        issues.push(issue);
    }

    debug!(count = issues.len(), "Decoded issues");
    Ok(issues)
}
