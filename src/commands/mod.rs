pub mod convert;
pub mod headers;
pub mod issues;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}
