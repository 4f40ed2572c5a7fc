//! Archive, preview and site file layout.
//!
//! ```text
//! preview/2025-01-01.md         # candidate awaiting a publish decision
//! output/archive/2025-01-01.md  # published brief, one per date
//! site/2025-01-01.html          # rendered day page
//! site/index.html               # site index
//! ```

use super::page::{PageMeta, render_markdown};
use crate::dedup::history::list_markdown_files;
use crate::error::BriefError;
use crate::models::RunContext;
use crate::utils::date_from_path;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};

fn dated_path(dir: &Path, ctx: &RunContext, ext: &str) -> PathBuf {
    dir.join(format!("{}.{}", ctx.iso_date(), ext))
}

/// Write the candidate brief to `<preview_dir>/<date>.md`.
#[instrument(level = "info", skip_all, fields(preview_dir = %preview_dir.display()))]
pub async fn write_preview(preview_dir: &Path, ctx: &RunContext, content: &str) -> Result<PathBuf, BriefError> {
    fs::create_dir_all(preview_dir).await?;
    let path = dated_path(preview_dir, ctx, "md");
    fs::write(&path, content).await?;
    info!(path = %path.display(), bytes = content.len(), "Wrote preview");
    Ok(path)
}

/// Publish a brief to `<archive_dir>/<date>.md`, replacing any earlier
/// brief for the same date.
#[instrument(level = "info", skip_all, fields(archive_dir = %archive_dir.display()))]
pub async fn publish(archive_dir: &Path, ctx: &RunContext, content: &str) -> Result<PathBuf, BriefError> {
    fs::create_dir_all(archive_dir).await?;
    let path = dated_path(archive_dir, ctx, "md");
    if fs::try_exists(&path).await.unwrap_or(false) {
        warn!(path = %path.display(), "Replacing existing brief for this date");
    }
    fs::write(&path, content).await?;
    info!(path = %path.display(), "Published brief");
    Ok(path)
}

/// Page metadata for a Markdown file: the date in its name, else `ctx.today`.
pub fn page_meta_for(md_path: &Path, ctx: &RunContext) -> PageMeta {
    PageMeta::for_date(date_from_path(md_path).unwrap_or(ctx.today))
}

/// Render one Markdown brief to HTML.
pub async fn render_file(md_path: &Path, ctx: &RunContext) -> Result<String, BriefError> {
    let raw = fs::read_to_string(md_path).await?;
    Ok(render_markdown(&raw, &page_meta_for(md_path, ctx)))
}

/// Render every archived brief to `<site_dir>/<stem>.html`.
///
/// A brief that cannot be read is skipped with a warning. Returns the number
/// of pages written.
#[instrument(level = "info", skip_all, fields(archive_dir = %archive_dir.display(), site_dir = %site_dir.display()))]
pub async fn build_site(archive_dir: &Path, site_dir: &Path, ctx: &RunContext) -> Result<usize, BriefError> {
    fs::create_dir_all(site_dir).await?;
    let mut written = 0;
    for md_path in list_markdown_files(archive_dir).await? {
        let Some(stem) = md_path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let html = match render_file(&md_path, ctx).await {
            Ok(html) => html,
            Err(e) => {
                warn!(path = %md_path.display(), error = %e, "Skipping unreadable brief");
                continue;
            }
        };
        let out = site_dir.join(format!("{}.html", stem));
        fs::write(&out, html).await?;
        written += 1;
    }
    info!(pages = written, "Rendered archive pages");
    Ok(written)
}
