//! # Daily Legal Brief
//!
//! A daily pipeline for a Chinese legal-news brief: generate or scrape the
//! day's Markdown brief, deduplicate it against recent history, and render
//! the archive into static HTML pages.
//!
//! ## Features
//!
//! - Generates a candidate brief through an OpenAI-compatible chat endpoint
//!   (GLM by default), or from a built-in template when no key is set
//! - Rejects candidates that repeat a recent title or are too similar to a
//!   recent brief, substituting fallback content
//! - Previews the candidate and asks before publishing (`y`/`n`/`e`)
//! - Scrapes the Supreme People's Court and Procuratorate listing pages
//! - Renders every archived brief to a styled HTML page plus a site index
//!
//! ## Usage
//!
//! ```sh
//! daily_legal_brief generate
//! daily_legal_brief fetch
//! daily_legal_brief --site-dir site site
//! ```
//!
//! ## Architecture
//!
//! 1. **History**: load the last N archived briefs
//! 2. **Generation**: LLM or template candidate
//! 3. **Dedup**: title and whole-text similarity checks, fallback on failure
//! 4. **Decision**: preview, then publish, cancel or edit
//! 5. **Output**: archive Markdown, day pages and the index

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod dedup;
mod error;
mod fallback;
mod generator;
mod markdown;
mod models;
mod outputs;
mod scrapers;
mod utils;
mod workflow;

use cli::{Cli, Command, GenerateArgs, RenderArgs};
use config::Config;
use models::RunContext;
use outputs::{archive, index, json};
use utils::{ensure_writable_dir, truncate_for_log};
use workflow::{Choice, PublishDecision};

/// Characters of the brief shown in the terminal preview.
const PREVIEW_CHARS: usize = 500;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("daily_legal_brief starting up");

    let args = Cli::parse();
    debug!(archive_dir = %args.archive_dir.display(), site_dir = %args.site_dir.display(), "Parsed CLI arguments");

    let ctx = RunContext::now(args.date);
    info!(date = %ctx.iso_date(), "Run context ready");

    let result = match &args.command {
        Command::Generate(generate) => run_generate(&args, generate, &ctx).await,
        Command::Fetch => run_fetch(&args, &ctx).await,
        Command::Render(render) => run_render(render, &ctx).await,
        Command::Site => run_site(&args, &ctx).await,
        Command::Index => run_index(&args, &ctx).await,
    };

    match &result {
        Ok(()) => info!(elapsed_ms = start_time.elapsed().as_millis() as u64, "daily_legal_brief finished"),
        Err(e) => error!(error = %e, "daily_legal_brief failed"),
    }
    result
}

#[instrument(level = "info", skip_all)]
async fn run_generate(args: &Cli, generate: &GenerateArgs, ctx: &RunContext) -> Result<(), Box<dyn Error>> {
    let config = Config::load(args.config.as_deref()).await?;

    if let Err(e) = ensure_writable_dir(&args.archive_dir).await {
        error!(
            path = %args.archive_dir.display(),
            error = %e,
            "Archive directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let history = dedup::load_history(&args.archive_dir, config.dedup.lookback, ctx).await;
    if history.is_empty() {
        warn!(archive_dir = %args.archive_dir.display(), "No archived briefs to compare against");
    }
    let mut rng = rand::rng();

    let (candidate, origin) =
        generator::generate_candidate(generate.glm_api_key.as_deref(), &config, ctx, &history, &mut rng).await;
    info!(?origin, "Candidate ready");

    let outcome = workflow::resolve_candidate(candidate, &history, &config, ctx, &mut rng);

    if let Some(report_path) = &generate.report {
        let report = json::DedupReport {
            date: ctx.iso_date(),
            history: history.entries.iter().map(|e| e.date.as_str()).collect(),
            issues: &outcome.issues,
            replaced: outcome.replaced,
        };
        if let Err(e) = json::write_report(&report, report_path).await {
            error!(path = %report_path.display(), error = %e, "Failed to write dedup report");
        }
    }

    let preview_path = archive::write_preview(&args.preview_dir, ctx, &outcome.content).await?;
    println!("{}", truncate_for_log(&outcome.content, PREVIEW_CHARS));

    let decision = if generate.yes {
        PublishDecision::Publish
    } else {
        ask_decision(&preview_path).await?
    };

    match decision.into_content(outcome.content) {
        Some(content) => {
            let path = archive::publish(&args.archive_dir, ctx, &content).await?;
            println!("已发布: {}", path.display());
        }
        None => {
            info!(preview = %preview_path.display(), "Publishing cancelled; preview kept");
            println!("已取消，预览保留在: {}", preview_path.display());
        }
    }
    Ok(())
}

/// Prompt on the terminal and turn the answer into a decision.
async fn ask_decision(preview_path: &Path) -> Result<PublishDecision, Box<dyn Error>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all("发布到归档？[y/n/e]: ".as_bytes()).await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut answer).await?;

    Ok(match Choice::parse(&answer) {
        Choice::Publish => PublishDecision::Publish,
        Choice::Cancel => PublishDecision::Cancel,
        Choice::Edit => {
            if !edit_file(preview_path).await? {
                warn!(path = %preview_path.display(), "Editor exited with an error; cancelling");
                return Ok(PublishDecision::Cancel);
            }
            PublishDecision::EditThenPublish(tokio::fs::read_to_string(preview_path).await?)
        }
    })
}

/// Open `path` in `$EDITOR` (default `vim`) and wait for it to exit.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
async fn edit_file(path: &Path) -> Result<bool, Box<dyn Error>> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vim");
    let status = tokio::process::Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .await?;
    Ok(status.success())
}

#[instrument(level = "info", skip_all)]
async fn run_fetch(args: &Cli, ctx: &RunContext) -> Result<(), Box<dyn Error>> {
    let items = scrapers::fetch_all(ctx).await?;
    if items.is_empty() {
        warn!("No news fetched from official sources; nothing written");
        return Ok(());
    }

    let content = scrapers::fetched_brief(items, ctx).to_markdown();
    let path = archive::publish(&args.archive_dir, ctx, &content).await?;
    println!("{}", truncate_for_log(&content, PREVIEW_CHARS));
    println!("已保存到: {}", path.display());
    Ok(())
}

#[instrument(level = "info", skip_all, fields(input = %render.input.display()))]
async fn run_render(render: &RenderArgs, ctx: &RunContext) -> Result<(), Box<dyn Error>> {
    let html = archive::render_file(&render.input, ctx).await?;
    match &render.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(out, html).await?;
            info!(path = %out.display(), "Wrote HTML page");
        }
        None => println!("{}", html),
    }
    Ok(())
}

async fn run_site(args: &Cli, ctx: &RunContext) -> Result<(), Box<dyn Error>> {
    let pages = archive::build_site(&args.archive_dir, &args.site_dir, ctx).await?;
    let listed = index::write_index(&args.site_dir, ctx).await?;
    info!(pages, listed, "Site rebuilt");
    Ok(())
}

async fn run_index(args: &Cli, ctx: &RunContext) -> Result<(), Box<dyn Error>> {
    let listed = index::write_index(&args.site_dir, ctx).await?;
    info!(listed, "Index rebuilt");
    Ok(())
}
