use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::commands::open_input;
use crate::decode::read_issues;
use crate::hierarchy::Hierarchy;
use crate::time::{TimeNormalizer, TimeZoneMode};
use crate::timeline::Timeline;

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub edit_log: PathBuf,
    pub caption_log: PathBuf,
    pub root: String,
    pub zone: TimeZoneMode,
}

/// Decode an export and derive its timeline. Pure apart from reading `input`.
pub fn build_timeline<R: Read>(input: R, root: &str, times: &TimeNormalizer) -> Result<Timeline> {
    let issues = read_issues(input, times)?;
    let hierarchy = Hierarchy::new(&issues, root);
    Ok(Timeline::build(&issues, &hierarchy))
}

fn write_log<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out)?;
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn run(options: &ConvertOptions) -> Result<()> {
    info!(input = %options.input.display(), root = %options.root, "Converting export");

    let input = open_input(&options.input)?;
    let times = TimeNormalizer::new(options.zone);
    let timeline = build_timeline(input, &options.root, &times)
        .with_context(|| format!("Failed to convert {}", options.input.display()))?;

    write_log(&options.edit_log, |out| timeline.write_edit_log(out))?;
    write_log(&options.caption_log, |out| timeline.write_caption_log(out))?;

    eprintln!(
        "Wrote {} events to {} and {} captions to {}",
        timeline.events.len(),
        options.edit_log.display(),
        timeline.captions.len(),
        options.caption_log.display()
    );
    Ok(())
}
