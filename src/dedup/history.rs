//! Loading recent archived briefs for deduplication.

use crate::markdown::extract_headlines;
use crate::models::{HistoryEntry, HistoryWindow, RunContext};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Default number of archived briefs compared against.
pub const DEFAULT_LOOKBACK: usize = 7;

/// Load up to `lookback` most recent briefs from `archive_dir`.
///
/// Files are `*.md`, ordered by file name descending (file names are ISO
/// dates). The brief for `ctx.today` is never part of the window. The window
/// is the `lookback` newest files; one that cannot be read is skipped with a
/// warning and leaves the window short rather than pulling in an older brief.
/// A missing directory yields an empty window: history is best-effort and
/// never blocks a run.
#[instrument(level = "info", skip_all, fields(archive_dir = %archive_dir.display(), lookback = lookback))]
pub async fn load_history(archive_dir: &Path, lookback: usize, ctx: &RunContext) -> HistoryWindow {
    let today = ctx.iso_date();

    let mut paths = match list_markdown_files(archive_dir).await {
        Ok(paths) => paths,
        Err(e) => {
            warn!(error = %e, "Archive directory not readable; continuing without history");
            return HistoryWindow::default();
        }
    };
    paths.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

    let candidates: Vec<(String, PathBuf)> = paths
        .into_iter()
        .filter_map(|path| {
            let date = path.file_stem()?.to_str()?.to_string();
            if date == today {
                debug!(path = %path.display(), "Skipping the brief being checked");
                return None;
            }
            Some((date, path))
        })
        .take(lookback)
        .collect();

    let mut entries = Vec::with_capacity(candidates.len());
    for (date, path) in candidates {
        match fs::read_to_string(&path).await {
            Ok(raw_text) => {
                let headlines = extract_headlines(&raw_text);
                debug!(path = %path.display(), headlines = headlines.len(), "Loaded history entry");
                entries.push(HistoryEntry {
                    date,
                    path,
                    raw_text,
                    headlines,
                });
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable history file");
            }
        }
    }

    info!(count = entries.len(), "Loaded history window");
    HistoryWindow { entries }
}

/// List `*.md` files directly under `dir`.
///
/// Only failing to open `dir` is an error. An entry whose type cannot be read
/// is skipped, and a failed directory read ends the scan with what was found.
pub(crate) async fn list_markdown_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut paths = Vec::new();
    loop {
        let entry = match reader.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Directory scan interrupted; keeping entries found so far");
                break;
            }
        };
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "md") {
            continue;
        }
        match entry.file_type().await {
            Ok(file_type) if file_type.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping entry with unreadable file type"),
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn ctx(y: i32, m: u32, d: u32) -> RunContext {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        RunContext::new(date, date.and_hms_opt(8, 0, 0).unwrap())
    }

    fn brief(title: &str) -> String {
        format!("# 简报\n\n## 1. 今日要闻\n\n### 【最高法】{}\n- **来源**: 最高人民法院\n", title)
    }

    #[tokio::test]
    async fn test_loads_most_recent_first_with_cap() {
        let tmp = TempDir::new().unwrap();
        for day in 1..=9 {
            let name = format!("2025-01-0{}.md", day);
            std::fs::write(tmp.path().join(name), brief(&format!("标题{}", day))).unwrap();
        }

        let window = load_history(tmp.path(), 7, &ctx(2025, 1, 20)).await;
        let dates: Vec<_> = window.entries.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "2025-01-09",
                "2025-01-08",
                "2025-01-07",
                "2025-01-06",
                "2025-01-05",
                "2025-01-04",
                "2025-01-03"
            ]
        );
        assert_eq!(window.entries[0].headlines[0].title, "标题9");
        assert_eq!(window.entries[0].headlines[0].source, "最高法");
    }

    #[tokio::test]
    async fn test_excludes_today_and_non_markdown() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("2025-01-02.md"), brief("今天")).unwrap();
        std::fs::write(tmp.path().join("2025-01-01.md"), brief("昨天")).unwrap();
        std::fs::write(tmp.path().join("2025-01-01.html"), "<html></html>").unwrap();
        std::fs::create_dir(tmp.path().join("nested.md")).unwrap();

        let window = load_history(tmp.path(), 7, &ctx(2025, 1, 2)).await;
        assert_eq!(window.len(), 1);
        assert_eq!(window.entries[0].date, "2025-01-01");
    }

    #[tokio::test]
    async fn test_skips_unreadable_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("2025-01-03.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        std::fs::write(tmp.path().join("2025-01-02.md"), brief("可读")).unwrap();

        let window = load_history(tmp.path(), 7, &ctx(2025, 1, 10)).await;
        assert_eq!(window.len(), 1);
        assert_eq!(window.entries[0].date, "2025-01-02");
    }

    #[tokio::test]
    async fn test_unreadable_file_shortens_window() {
        let tmp = TempDir::new().unwrap();
        for day in 1..=7 {
            let name = format!("2025-01-0{}.md", day);
            std::fs::write(tmp.path().join(name), brief(&format!("标题{}", day))).unwrap();
        }
        std::fs::write(tmp.path().join("2025-01-08.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let window = load_history(tmp.path(), 7, &ctx(2025, 1, 20)).await;
        let dates: Vec<_> = window.entries.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2025-01-07", "2025-01-06", "2025-01-05", "2025-01-04", "2025-01-03", "2025-01-02"]
        );
    }

    #[tokio::test]
    async fn test_today_does_not_count_toward_lookback() {
        let tmp = TempDir::new().unwrap();
        for day in 1..=3 {
            let name = format!("2025-01-0{}.md", day);
            std::fs::write(tmp.path().join(name), brief(&format!("标题{}", day))).unwrap();
        }

        let window = load_history(tmp.path(), 2, &ctx(2025, 1, 3)).await;
        let dates: Vec<_> = window.entries.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-02", "2025-01-01"]);
    }

    #[tokio::test]
    async fn test_list_markdown_files_skips_directories() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("2025-01-01.md"), "x").unwrap();
        std::fs::create_dir(tmp.path().join("2025-01-02.md")).unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "x").unwrap();

        let paths = list_markdown_files(tmp.path()).await.unwrap();
        assert_eq!(paths, vec![tmp.path().join("2025-01-01.md")]);
        assert!(list_markdown_files(&tmp.path().join("absent")).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let window = load_history(&tmp.path().join("absent"), 7, &ctx(2025, 1, 1)).await;
        assert!(window.is_empty());
    }

    #[tokio::test]
    async fn test_file_without_headlines_still_loaded() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("2024-12-31.md"), "随便写点什么").unwrap();
        let window = load_history(tmp.path(), 7, &ctx(2025, 1, 1)).await;
        assert_eq!(window.len(), 1);
        assert!(window.entries[0].headlines.is_empty());
    }
}
