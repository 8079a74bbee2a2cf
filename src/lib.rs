//! Convert a Jira CSV export into two Gource-style logs: an edit log of
//! issue lifecycle events and a caption log of epic creations.
//!
//! The pipeline is `decode` (rows to [`models::Issue`]) → `hierarchy`
//! (paths) → `timeline` (events). `commands` wraps it with file I/O.

pub mod color;
pub mod commands;
pub mod decode;
pub mod hierarchy;
pub mod logging;
pub mod models;
pub mod schema;
pub mod time;
pub mod timeline;
