#![no_main]

//! Fuzz target for the export pipeline.
//!
//! Builds a CSV from a fixed header row and arbitrary cells, then runs it
//! through decoding, path resolution and emission. Malformed timestamps may
//! fail the decode but nothing may panic, and every emitted event must
//! serialize to exactly one line.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use jira_timeline::commands::convert::build_timeline;
use jira_timeline::time::TimeNormalizer;

const HEADERS: &[&str] = &[
    "Issue key",
    "Issue id",
    "Parent",
    "Parent id",
    "Issue Type",
    "Summary",
    "Creator",
    "Assignee",
    "Reporter",
    "Created",
    "Updated",
    "Resolved",
    "Watchers",
    "Watchers Id",
    "Comment",
];

#[derive(Arbitrary, Debug)]
struct ExportInput {
    /// Each row is truncated or padded against the header row by the decoder
    rows: Vec<Vec<String>>,
    /// Raw bytes appended verbatim, to exercise the CSV reader itself
    tail: Vec<u8>,
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fuzz_target!(|input: ExportInput| {
    let mut csv = HEADERS.join(",");
    csv.push('\n');
    for row in input.rows.iter().take(50) {
        let cells: Vec<String> = row.iter().take(HEADERS.len() + 2).map(|c| quote(c)).collect();
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }
    let mut bytes = csv.into_bytes();
    bytes.extend_from_slice(&input.tail);

    let Ok(timeline) = build_timeline(bytes.as_slice(), "JIRA", &TimeNormalizer::default()) else {
        return;
    };

    for event in &timeline.events {
        assert_eq!(event.to_string().matches('\n').count(), 1);
    }
    for caption in &timeline.captions {
        assert_eq!(caption.to_string().matches('\n').count(), 1);
    }
});
