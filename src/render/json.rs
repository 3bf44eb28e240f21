use std::io::Write;

use anyhow::{Context, Result};

use crate::graph::GraphReport;

/// Writes the full report (edges and diagnostics) as pretty-printed JSON
pub fn write_json<W: Write>(out: &mut W, report: &GraphReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).context("Failed to serialize graph report")?;
    writeln!(out).context("Failed to write graph report")?;
    Ok(())
}
