//! Data models shared across the brief pipeline.
//!
//! - [`RunContext`]: the explicit "today" bundle handed to every component
//! - [`Brief`]: one calendar day's legal-news document
//! - [`NewsItem`]: a single headline card inside a brief
//! - [`Headline`]: the `(source, title)` pair used for deduplication
//! - [`HistoryEntry`] / [`HistoryWindow`]: recent archived briefs
//! - [`DedupIssue`]: a finding reported by the dedup checker

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write;
use std::path::PathBuf;

/// The per-run date context.
///
/// Computed once in `main` (or pinned with `--date`) and passed explicitly so
/// that generation, history loading and rendering agree on what "today" is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// The calendar day being produced.
    pub today: NaiveDate,
    /// `today` formatted as `YYYY年MM月DD日`.
    pub display_date: String,
    /// Wall-clock time of the run, shown in the site index footer.
    pub generated_at: NaiveDateTime,
}

impl RunContext {
    /// Build a context for a fixed date and timestamp.
    pub fn new(today: NaiveDate, generated_at: NaiveDateTime) -> Self {
        Self {
            today,
            display_date: display_date(today),
            generated_at,
        }
    }

    /// Build a context from the local clock, optionally pinning the date.
    pub fn now(date_override: Option<NaiveDate>) -> Self {
        let now = Local::now().naive_local();
        Self::new(date_override.unwrap_or(now.date()), now)
    }

    /// ISO form of `today`, used for archive file names.
    pub fn iso_date(&self) -> String {
        self.today.format("%Y-%m-%d").to_string()
    }
}

/// Format a date the way brief titles show it: `2025年01月01日`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%Y年%m月%d日").to_string()
}

/// A single news card.
///
/// `time` is optional because parsed Markdown may omit it; every builder in
/// this crate fills it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Publisher name, e.g. `最高人民法院`.
    pub source: String,
    pub title: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Practical impact (`实务影响`).
    #[serde(default)]
    pub impact: Option<String>,
    /// Effective date of a new rule (`生效时间`).
    #[serde(default)]
    pub effective: Option<String>,
}

/// The `(source, title)` pair taken from a `### 【source】title` heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub source: String,
    pub title: String,
}

/// One day's brief, before it is serialized to the archive Markdown dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brief {
    pub date: NaiveDate,
    pub intro: String,
    pub items: Vec<NewsItem>,
    /// Italic closing line under the last separator.
    pub footer: String,
}

impl Brief {
    /// Serialize into the archive Markdown dialect.
    ///
    /// The output round-trips through the section parser: every item becomes
    /// a `### 【source】title` block under `## 1. 今日要闻`.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        writeln!(md, "# {} 法律简报\n", display_date(self.date)).unwrap();
        writeln!(md, "**导语：** {}\n", self.intro).unwrap();
        md.push_str("---\n\n## 1. 今日要闻\n\n");

        for item in &self.items {
            writeln!(md, "### 【{}】{}\n", item.source, item.title).unwrap();
            writeln!(md, "- **来源**: {}", item.source).unwrap();
            if let Some(time) = &item.time {
                writeln!(md, "- **时间**: {}", time).unwrap();
            }
            if let Some(effective) = &item.effective {
                writeln!(md, "- **生效时间**: {}", effective).unwrap();
            }
            if let Some(url) = &item.url {
                writeln!(md, "- **链接**: {}", url).unwrap();
            }
            if let Some(summary) = &item.summary {
                writeln!(md, "- **摘要**: {}", summary).unwrap();
            }
            if let Some(impact) = &item.impact {
                writeln!(md, "- **实务影响**: {}", impact).unwrap();
            }
            md.push('\n');
        }

        writeln!(md, "---\n\n*{}*", self.footer).unwrap();
        md
    }
}

/// A previously archived brief, as seen by the dedup checker.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// File stem, normally `YYYY-MM-DD`.
    pub date: String,
    pub path: PathBuf,
    pub raw_text: String,
    pub headlines: Vec<Headline>,
}

/// Most-recent-first snapshot of archived briefs used for one dedup pass.
#[derive(Debug, Clone, Default)]
pub struct HistoryWindow {
    pub entries: Vec<HistoryEntry>,
}

impl HistoryWindow {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A reason to reject a candidate brief.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DedupIssue {
    /// A candidate headline title exactly matches an archived one.
    TitleDuplicate {
        title: String,
        source: String,
        conflicting_date: String,
    },
    /// The whole candidate text is too close to an archived brief.
    HighSimilarity { ratio: f64, conflicting_date: String },
}

impl DedupIssue {
    pub fn conflicting_date(&self) -> &str {
        match self {
            DedupIssue::TitleDuplicate {
                conflicting_date, ..
            }
            | DedupIssue::HighSimilarity {
                conflicting_date, ..
            } => conflicting_date,
        }
    }
}

impl fmt::Display for DedupIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DedupIssue::TitleDuplicate {
                title,
                conflicting_date,
                ..
            } => write!(f, "标题重复: {} (与 {} 重复)", title, conflicting_date),
            DedupIssue::HighSimilarity {
                ratio,
                conflicting_date,
            } => write!(
                f,
                "内容相似度过高: {:.1}% (与 {} 相似)",
                ratio * 100.0,
                conflicting_date
            ),
        }
    }
}
