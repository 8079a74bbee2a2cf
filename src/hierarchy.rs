use std::collections::HashMap;

use crate::models::Issue;

pub const DEFAULT_ROOT: &str = "JIRA";

/// Resolves issue paths of the form `<root>/[<parent key>/]<issue key>`.
///
/// Only the immediate parent is resolved; grandparents never appear in a
/// path. Duplicate issue ids resolve to the earliest issue in input order.
/// Empty references and empty issue ids never match each other, so an issue
/// with no id cannot become anyone's parent.
pub struct Hierarchy<'a> {
    root: &'a str,
    issues: &'a [Issue],
    by_id: HashMap<&'a str, usize>,
}

impl<'a> Hierarchy<'a> {
    pub fn new(issues: &'a [Issue], root: &'a str) -> Self {
        let mut by_id = HashMap::with_capacity(issues.len());
        for (position, issue) in issues.iter().enumerate() {
            if !issue.issue_id.is_empty() {
                by_id.entry(issue.issue_id.as_str()).or_insert(position);
            }
        }
        Hierarchy { root, issues, by_id }
    }

    fn position_of(&self, reference: &str) -> Option<usize> {
        if reference.is_empty() {
            return None;
        }
        self.by_id.get(reference).copied()
    }

    /// The issue referenced by `parent` or `parent_id`, whichever comes
    /// first in input order.
    pub fn parent_of(&self, issue: &Issue) -> Option<&'a Issue> {
        if !issue.has_parent_reference() {
            return None;
        }
        let by_parent = self.position_of(&issue.parent);
        let by_parent_id = self.position_of(&issue.parent_id);
        let position = match (by_parent, by_parent_id) {
            (Some(a), Some(b)) => a.min(b),
            (a, b) => a.or(b)?,
        };
        self.issues.get(position)
    }

    pub fn path_of(&self, issue: &Issue) -> String {
        match self.parent_of(issue) {
            Some(parent) => format!("{}/{}/{}", self.root, parent.issue_key, issue.issue_key),
            None => format!("{}/{}", self.root, issue.issue_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn issue(id: &str, key: &str) -> Issue {
        Issue {
            issue_id: id.to_string(),
            issue_key: key.to_string(),
            ..Issue::default()
        }
    }

    fn child(id: &str, key: &str, parent: &str, parent_id: &str) -> Issue {
        Issue {
            parent: parent.to_string(),
            parent_id: parent_id.to_string(),
            ..issue(id, key)
        }
    }

    #[test]
    fn test_no_parent() {
        let issues = vec![issue("1", "PROJ-1")];
        let hierarchy = Hierarchy::new(&issues, "<root>");
        assert_eq!(hierarchy.path_of(&issues[0]), "<root>/PROJ-1");
    }

    #[test]
    fn test_parent_id_match() {
        let issues = vec![issue("100", "PAR-1"), child("101", "PROJ-2", "", "100")];
        let hierarchy = Hierarchy::new(&issues, "<root>");
        assert_eq!(hierarchy.path_of(&issues[1]), "<root>/PAR-1/PROJ-2");
    }

    #[test]
    fn test_parent_field_matches_issue_id() {
        let issues = vec![child("101", "PROJ-2", "100", ""), issue("100", "PAR-1")];
        let hierarchy = Hierarchy::new(&issues, DEFAULT_ROOT);
        assert_eq!(hierarchy.path_of(&issues[0]), "JIRA/PAR-1/PROJ-2");
    }

    #[test]
    fn test_unmatched_parent_dropped() {
        let issues = vec![issue("1", "PROJ-1"), child("2", "PROJ-2", "999", "998")];
        let hierarchy = Hierarchy::new(&issues, "<root>");
        assert_eq!(hierarchy.path_of(&issues[1]), "<root>/PROJ-2");
    }

    #[test]
    fn test_first_match_wins_across_both_fields() {
        // parent_id points at the earlier issue, parent at the later one.
        let issues = vec![
            issue("A", "FIRST-1"),
            issue("B", "SECOND-1"),
            child("C", "PROJ-3", "B", "A"),
        ];
        let hierarchy = Hierarchy::new(&issues, "JIRA");
        assert_eq!(hierarchy.path_of(&issues[2]), "JIRA/FIRST-1/PROJ-3");
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let issues = vec![
            issue("100", "OLD-1"),
            issue("100", "NEW-1"),
            child("5", "PROJ-5", "", "100"),
        ];
        let hierarchy = Hierarchy::new(&issues, "JIRA");
        assert_eq!(hierarchy.path_of(&issues[2]), "JIRA/OLD-1/PROJ-5");
    }

    #[test]
    fn test_single_level_only() {
        let issues = vec![
            issue("1", "EPIC-1"),
            child("2", "STORY-2", "", "1"),
            child("3", "SUB-3", "", "2"),
        ];
        let hierarchy = Hierarchy::new(&issues, "JIRA");
        assert_eq!(hierarchy.path_of(&issues[2]), "JIRA/STORY-2/SUB-3");
    }

    #[test]
    fn test_empty_reference_never_matches_empty_id() {
        let issues = vec![issue("", "NOID-1"), child("2", "PROJ-2", "", "404")];
        let hierarchy = Hierarchy::new(&issues, "JIRA");
        assert_eq!(hierarchy.path_of(&issues[1]), "JIRA/PROJ-2");
    }

    #[test]
    fn test_self_reference() {
        let issues = vec![child("1", "PROJ-1", "", "1")];
        let hierarchy = Hierarchy::new(&issues, "JIRA");
        assert_eq!(hierarchy.path_of(&issues[0]), "JIRA/PROJ-1/PROJ-1");
    }

    /// Straight scan over the issues, as a reference for the index.
    fn scan_path(issues: &[Issue], target: &Issue, root: &str) -> String {
        let parent = if target.has_parent_reference() {
            issues.iter().find(|p| {
                (!target.parent.is_empty() && p.issue_id == target.parent)
                    || (!target.parent_id.is_empty() && p.issue_id == target.parent_id)
            })
        } else {
            None
        };
        match parent {
            Some(p) => format!("{}/{}/{}", root, p.issue_key, target.issue_key),
            None => format!("{}/{}", root, target.issue_key),
        }
    }

    proptest! {
        #[test]
        fn prop_index_matches_scan(
            rows in proptest::collection::vec(("[0-4]", "[0-4]?", "[0-4]?"), 1..12)
        ) {
            let issues: Vec<Issue> = rows
                .iter()
                .enumerate()
                .map(|(n, (id, parent, parent_id))| {
                    child(id, &format!("K-{}", n), parent, parent_id)
                })
                .collect();
            let hierarchy = Hierarchy::new(&issues, "JIRA");
            for target in &issues {
                prop_assert_eq!(hierarchy.path_of(target), scan_path(&issues, target, "JIRA"));
            }
        }
    }
}
