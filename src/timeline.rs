use anyhow::{Context, Result};
use std::fmt;
use std::io::Write;
use tracing::debug;

use crate::color::color_of;
use crate::hierarchy::Hierarchy;
use crate::models::{Action, CaptionEvent, Issue, TimelineEvent};

const CAPTIONED_TYPE: &str = "Epic";

/// Both logs derived from one export, in emission order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
    pub captions: Vec<CaptionEvent>,
}

impl Timeline {
    pub fn build(issues: &[Issue], hierarchy: &Hierarchy<'_>) -> Self {
        let mut timeline = Timeline::default();
        for issue in issues {
            timeline.push_issue(issue, hierarchy);
        }
        debug!(
            events = timeline.events.len(),
            captions = timeline.captions.len(),
            "Built timeline"
        );
        timeline
    }

    fn push_issue(&mut self, issue: &Issue, hierarchy: &Hierarchy<'_>) {
        let Some(created) = issue.created else {
            return;
        };
        let path = hierarchy.path_of(issue);
        let color = color_of(&issue.issue_type);
        let event = |timestamp, person: &str, action| TimelineEvent {
            timestamp,
            person: person.to_string(),
            action,
            path: path.clone(),
            color,
        };

        self.events.push(event(created, &issue.creator.name, Action::Create));
        if issue.issue_type == CAPTIONED_TYPE {
            self.captions.push(CaptionEvent {
                timestamp: created,
                message: issue.summary.clone(),
            });
        }

        // A missing modification also suppresses the resolution.
        let Some(updated) = issue.updated.filter(|_| !issue.assignee.name.is_empty()) else {
            return;
        };
        self.events.push(event(updated, &issue.assignee.name, Action::Modify));

        if let Some(resolved) = issue.resolved.filter(|_| !issue.reporter.name.is_empty()) {
            self.events.push(event(resolved, &issue.reporter.name, Action::Delete));
        }
    }

    pub fn write_edit_log<W: Write>(&self, out: &mut W) -> Result<()> {
        for event in &self.events {
            write!(out, "{}", event).context("Failed to write edit log")?;
        }
        Ok(())
    }

    pub fn write_caption_log<W: Write>(&self, out: &mut W) -> Result<()> {
        for caption in &self.captions {
            write!(out, "{}", caption).context("Failed to write caption log")?;
        }
        Ok(())
    }
}

/// Fields are free text; keep each record on one line.
fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for TimelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}|{}|{}|{}|{}",
            self.timestamp.timestamp(),
            single_line(&self.person),
            self.action.code(),
            single_line(&self.path),
            self.color
        )
    }
}

impl fmt::Display for CaptionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}|{}", self.timestamp.timestamp(), single_line(&self.message))
    }
}
