//! Command-line interface definitions for the daily legal brief.
//!
//! Directory and config options are global and can also come from
//! environment variables, so a scheduler can set them once.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the daily legal brief pipeline.
///
/// # Examples
///
/// ```sh
/// # Generate today's brief, dedup it, preview and ask before publishing
/// daily_legal_brief generate
///
/// # Unattended run with the LLM enabled
/// GLM_API_KEY=... daily_legal_brief generate --yes --report reports/today.json
///
/// # Rebuild every day page and the index
/// daily_legal_brief --site-dir site site
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding published briefs (`YYYY-MM-DD.md`)
    #[arg(long, global = true, env = "BRIEF_ARCHIVE_DIR", default_value = "output/archive")]
    pub archive_dir: PathBuf,

    /// Directory for the candidate awaiting a publish decision
    #[arg(long, global = true, env = "BRIEF_PREVIEW_DIR", default_value = "preview")]
    pub preview_dir: PathBuf,

    /// Directory for rendered HTML pages and index.html
    #[arg(long, global = true, env = "BRIEF_SITE_DIR", default_value = ".")]
    pub site_dir: PathBuf,

    /// Optional path to a YAML config file
    #[arg(short, long, global = true, env = "BRIEF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate, dedup, preview and publish today's brief
    Generate(GenerateArgs),
    /// Scrape official sites into today's archive brief
    Fetch,
    /// Render one Markdown brief to HTML
    Render(RenderArgs),
    /// Render every archived brief and rebuild the index
    Site,
    /// Rebuild index.html only
    Index,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// API key for the chat-completions endpoint; template content is used without it
    #[arg(long, env = "GLM_API_KEY", hide_env_values = true)]
    pub glm_api_key: Option<String>,

    /// Publish without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Write a JSON dedup report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Markdown brief to render
    pub input: PathBuf,

    /// Output file (stdout when absent)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}
