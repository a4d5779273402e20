use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Write pre-rendered result lines to `path`, one per line, verbatim.
pub fn export_results(path: &Path, lines: &[String]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for line in lines {
        writeln!(out, "{line}").context("writing result line")?;
    }
    out.flush().context("flushing export file")?;

    log::info!("exported {} results to {}", lines.len(), path.display());
    Ok(())
}
