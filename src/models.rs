use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watcher {
    pub name: String,
    pub id: String,
}

/// One row of the export. Timestamps are `None` when the cell was empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub issue_id: String,
    pub issue_key: String,
    pub parent: String,
    pub parent_id: String,
    pub issue_type: String,
    pub status: String,
    pub priority: String,
    pub resolution: String,
    pub summary: String,
    pub description: String,
    pub epic_link_summary: String,
    pub creator: Person,
    pub assignee: Person,
    pub reporter: Person,
    pub project_lead: Person,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub last_viewed: Option<DateTime<Utc>>,
    pub resolved: Option<DateTime<Utc>>,
    pub watchers: Vec<Watcher>,
    pub comments: Vec<String>,
}

impl Issue {
    pub fn has_parent_reference(&self) -> bool {
        !self.parent.is_empty() || !self.parent_id.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Create,
    Modify,
    Delete,
}

impl Action {
    pub fn code(self) -> &'static str {
        match self {
            Action::Create => "C",
            Action::Modify => "M",
            Action::Delete => "D",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    pub timestamp: DateTime<Utc>,
    pub person: String,
    pub action: Action,
    pub path: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionEvent {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}
