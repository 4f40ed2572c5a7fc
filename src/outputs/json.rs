//! JSON dedup report.
//!
//! Written when `generate --report FILE` is given, so a scheduler can see why
//! a generated brief was replaced without parsing logs.

use crate::error::BriefError;
use crate::models::DedupIssue;
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Outcome of one dedup pass.
#[derive(Debug, Serialize)]
pub struct DedupReport<'a> {
    pub date: String,
    /// Dates of the archived briefs compared against, most recent first.
    pub history: Vec<&'a str>,
    pub issues: &'a [DedupIssue],
    /// Whether the candidate was swapped for fallback content.
    pub replaced: bool,
}

/// Serialize a report as pretty JSON to `path`, creating parent directories.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(report: &DedupReport<'_>, path: &Path) -> Result<(), BriefError> {
    let json = serde_json::to_string_pretty(report)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, json).await?;
    info!(issues = report.issues.len(), replaced = report.replaced, "Wrote dedup report");
    Ok(())
}
