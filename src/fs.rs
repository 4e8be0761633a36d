use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Opens a file for buffered reading.
pub(crate) fn open(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let path = path.as_ref();
    let f = File::open(path).context(format!("Unable to open file {}", path.display()))?;
    Ok(BufReader::new(f))
}
