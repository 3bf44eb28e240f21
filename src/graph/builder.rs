//! Pipeline from a directory of chat logs to an introduction graph.
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach suitable for CLI tools:
//!
//! - **File-level errors**: Logs that cannot be read or parsed are reported as warnings and
//!   skipped, allowing a partial graph to be built
//! - **Failure thresholds**: The build fails if >50% of log files fail to parse
//! - **Precondition errors**: A log that references a session its own header never announced
//!   aborts the build, since the archive contradicts itself
//! - **User feedback**: Summary statistics are logged at the end

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::graph::edges::{GraphReport, synthesize};
use crate::ingest::{backfill_missing_first_sessions, ingest_contact};
use crate::parsers::{discover_logs, parse_log_file};
use crate::timeline::TimelineStore;

/// Read every chat log in `dir` into a timeline store
///
/// Logs are ingested in file-name order. After ingestion, contacts whose first
/// session is missing get a placeholder conversation.
///
/// # Errors
///
/// Returns an error if:
/// - `dir` is not a readable directory
/// - More than 50% of log files fail to parse (systematic corruption)
/// - A log references a session id outside its announced range
pub fn build_store(dir: &Path) -> Result<TimelineStore> {
    let logs = discover_logs(dir)?;
    let mut store = TimelineStore::new();
    let mut files_success = 0;
    let mut files_failed = 0;

    for log in &logs {
        info!("reading {}", log.path.display());
        let events = match parse_log_file(&log.path) {
            Ok(events) => events,
            Err(e) => {
                files_failed += 1;
                warn!("Failed to parse chat log {}: {:#}", log.path.display(), e);
                continue;
            }
        };
        files_success += 1;

        ingest_contact(&mut store, &log.email, &events)
            .with_context(|| format!("Inconsistent chat log {}", log.path.display()))?;
    }

    let total_files = files_success + files_failed;
    if total_files > 0 {
        let failure_rate = files_failed as f64 / total_files as f64;
        if failure_rate > 0.5 {
            bail!(
                "Graph building failed: {}/{} chat logs failed to parse ({}% failure rate)",
                files_failed,
                total_files,
                (failure_rate * 100.0) as u32
            );
        }
    }

    let repaired = backfill_missing_first_sessions(&mut store)?;

    info!(
        "Loaded {} contacts, {} markers ({} logs parsed, {} failed, {} first sessions missing)",
        store.contact_count(),
        store.marker_count(),
        files_success,
        files_failed,
        repaired
    );

    Ok(store)
}

/// Build the introduction graph for `main_email` from the chat logs in `dir`
pub fn build_graph(dir: &Path, main_email: &str) -> Result<GraphReport> {
    let store = build_store(dir)?;
    let report = synthesize(&store, main_email)?;
    info!("Drew {} edges for {} contacts", report.edges.len(), report.contacts);
    Ok(report)
}
