//! Header-to-field mapping for Jira CSV exports.
//!
//! Jira writes multi-valued fields by repeating a column header once per
//! value (`Watchers,Watchers,Comment,Comment,...`), so the mapping is resolved
//! per column position rather than per header name.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fmt;

use crate::models::Issue;
use crate::time::TimeNormalizer;

/// How a single known header writes into an [`Issue`].
#[derive(Clone, Copy)]
pub enum FieldRule {
    /// Copied verbatim.
    Text(fn(&mut Issue) -> &mut String),
    /// A dotted account name (`john.doe`), stored as `john doe`.
    Name(fn(&mut Issue) -> &mut String),
    /// A timestamp cell; empty means absent.
    Time(fn(&mut Issue) -> &mut Option<DateTime<Utc>>),
}

impl FieldRule {
    pub fn apply(self, issue: &mut Issue, value: &str, times: &TimeNormalizer) -> Result<()> {
        match self {
            FieldRule::Text(field) => *field(issue) = value.to_string(),
            FieldRule::Name(field) => *field(issue) = display_name(value),
            FieldRule::Time(field) => *field(issue) = times.normalize(value)?,
        }
        Ok(())
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            FieldRule::Text(_) => "Text",
            FieldRule::Name(_) => "Name",
            FieldRule::Time(_) => "Time",
        };
        f.write_str(kind)
    }
}

/// Headers that may appear more than once per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeated {
    WatcherName,
    WatcherId,
    Comment,
}

#[derive(Debug, Clone, Copy)]
pub enum Column {
    Field(FieldRule),
    Repeated(Repeated),
    Ignored,
}

impl Column {
    pub fn kind(&self) -> &'static str {
        match self {
            Column::Field(_) => "field",
            Column::Repeated(_) => "repeated",
            Column::Ignored => "ignored",
        }
    }
}

static FIELDS: &[(&str, FieldRule)] = &[
    ("Summary", FieldRule::Text(|i| &mut i.summary)),
    ("Issue key", FieldRule::Text(|i| &mut i.issue_key)),
    ("Issue id", FieldRule::Text(|i| &mut i.issue_id)),
    ("Parent id", FieldRule::Text(|i| &mut i.parent_id)),
    ("Parent", FieldRule::Text(|i| &mut i.parent)),
    ("Issue Type", FieldRule::Text(|i| &mut i.issue_type)),
    ("Status", FieldRule::Text(|i| &mut i.status)),
    ("Project lead", FieldRule::Name(|i| &mut i.project_lead.name)),
    ("Project lead id", FieldRule::Text(|i| &mut i.project_lead.id)),
    ("Priority", FieldRule::Text(|i| &mut i.priority)),
    ("Resolution", FieldRule::Text(|i| &mut i.resolution)),
    ("Assignee", FieldRule::Name(|i| &mut i.assignee.name)),
    ("Assignee Id", FieldRule::Text(|i| &mut i.assignee.id)),
    ("Reporter", FieldRule::Name(|i| &mut i.reporter.name)),
    ("Reporter Id", FieldRule::Text(|i| &mut i.reporter.id)),
    ("Creator", FieldRule::Name(|i| &mut i.creator.name)),
    ("Creator Id", FieldRule::Text(|i| &mut i.creator.id)),
    ("Created", FieldRule::Time(|i| &mut i.created)),
    ("Updated", FieldRule::Time(|i| &mut i.updated)),
    ("Last Viewed", FieldRule::Time(|i| &mut i.last_viewed)),
    ("Resolved", FieldRule::Time(|i| &mut i.resolved)),
    ("Description", FieldRule::Text(|i| &mut i.description)),
    ("Epic Link Summary", FieldRule::Text(|i| &mut i.epic_link_summary)),
];

static REPEATED: &[(&str, Repeated)] = &[
    ("Watchers", Repeated::WatcherName),
    ("Watchers Id", Repeated::WatcherId),
    ("Comment", Repeated::Comment),
];

/// Look up a header. Matching is exact: case and spaces matter.
pub fn column_for(header: &str) -> Column {
    if let Some((_, rule)) = FIELDS.iter().find(|(name, _)| *name == header) {
        return Column::Field(*rule);
    }
    if let Some((_, repeated)) = REPEATED.iter().find(|(name, _)| *name == header) {
        return Column::Repeated(*repeated);
    }
    Column::Ignored
}

pub fn display_name(raw: &str) -> String {
    raw.replace('.', " ")
}

/// The header row of one export, resolved to a rule per column position.
#[derive(Debug, Clone)]
pub struct Schema {
    headers: Vec<String>,
    columns: Vec<Column>,
}

impl Schema {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers: Vec<String> = headers.into_iter().map(|h| h.as_ref().to_string()).collect();
        let columns = headers.iter().map(|h| column_for(h)).collect();
        Schema { headers, columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Header names paired with their resolved column, in input order.
    pub fn describe(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.headers.iter().map(String::as_str).zip(self.columns.iter())
    }
}
