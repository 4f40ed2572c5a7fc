//! Dedup resolution and the publish decision.
//!
//! Nothing here touches the terminal or the file system. The binary asks the
//! operator, parses the answer with [`Choice::parse`], and turns it into a
//! [`PublishDecision`].

use crate::config::Config;
use crate::dedup::check;
use crate::generator::template_candidate;
use crate::models::{DedupIssue, HistoryWindow, RunContext};
use rand::Rng;
use tracing::{info, warn};

/// A candidate after deduplication.
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    /// Text to preview and publish.
    pub content: String,
    /// Findings against the original candidate.
    pub issues: Vec<DedupIssue>,
    /// Whether `content` is fallback text rather than the candidate.
    pub replaced: bool,
}

/// Check `candidate` against history and substitute fallback content on any finding.
///
/// The fallback text is not itself re-checked.
pub fn resolve_candidate<R: Rng + ?Sized>(
    candidate: String,
    history: &HistoryWindow,
    config: &Config,
    ctx: &RunContext,
    rng: &mut R,
) -> DedupOutcome {
    let issues = check(&candidate, history, config.dedup.threshold);
    if issues.is_empty() {
        info!(history = history.len(), "Candidate passed dedup");
        return DedupOutcome {
            content: candidate,
            issues,
            replaced: false,
        };
    }

    for issue in &issues {
        warn!(conflicting_date = issue.conflicting_date(), "{}", issue);
    }
    info!(issues = issues.len(), "Replacing candidate with fallback content");
    DedupOutcome {
        content: template_candidate(config, ctx, rng),
        issues,
        replaced: true,
    }
}

/// Operator answer to the `[y/n/e]` prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Publish,
    Cancel,
    Edit,
}

impl Choice {
    /// `y` publishes, `e` edits, anything else cancels. Case and surrounding
    /// whitespace are ignored.
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "y" => Choice::Publish,
            "e" => Choice::Edit,
            _ => Choice::Cancel,
        }
    }
}

/// What to do with the previewed brief.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishDecision {
    Publish,
    Cancel,
    /// Publish this edited text instead of the preview.
    EditThenPublish(String),
}

impl PublishDecision {
    /// Text to archive, or `None` when cancelled.
    pub fn into_content(self, preview: String) -> Option<String> {
        match self {
            PublishDecision::Publish => Some(preview),
            PublishDecision::Cancel => None,
            PublishDecision::EditThenPublish(edited) => Some(edited),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::extract_headlines;
    use crate::models::HistoryEntry;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::PathBuf;

    fn ctx() -> RunContext {
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        RunContext::new(date, date.and_hms_opt(9, 30, 0).unwrap())
    }

    fn window(raw: &str) -> HistoryWindow {
        HistoryWindow {
            entries: vec![HistoryEntry {
                date: "2025-03-01".to_string(),
                path: PathBuf::from("2025-03-01.md"),
                raw_text: raw.to_string(),
                headlines: extract_headlines(raw),
            }],
        }
    }

    #[test]
    fn test_clean_candidate_kept() {
        let candidate = "# 简报\n\n### 【最高法】全新的标题\n- **摘要**: 完全不同的内容".to_string();
        let history = window("### 【司法部】旧标题\n- **摘要**: 旧内容旧内容旧内容");
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = resolve_candidate(candidate.clone(), &history, &Config::default(), &ctx(), &mut rng);
        assert!(!outcome.replaced);
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.content, candidate);
    }

    #[test]
    fn test_duplicate_candidate_replaced() {
        let raw = "# 简报\n\n### 【最高法】发布新规\n- **摘要**: 内容";
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = resolve_candidate(raw.to_string(), &window(raw), &Config::default(), &ctx(), &mut rng);
        assert!(outcome.replaced);
        assert!(outcome.issues.len() >= 2);
        assert!(outcome.content.starts_with("# 2025年03月02日 法律简报"));
        assert_eq!(extract_headlines(&outcome.content).len(), 3);
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse("y"), Choice::Publish);
        assert_eq!(Choice::parse(" Y \n"), Choice::Publish);
        assert_eq!(Choice::parse("e"), Choice::Edit);
        assert_eq!(Choice::parse("E"), Choice::Edit);
        assert_eq!(Choice::parse("n"), Choice::Cancel);
        assert_eq!(Choice::parse(""), Choice::Cancel);
        assert_eq!(Choice::parse("yes"), Choice::Cancel);
    }

    #[test]
    fn test_decision_into_content() {
        let preview = "preview".to_string();
        assert_eq!(PublishDecision::Publish.into_content(preview.clone()), Some("preview".to_string()));
        assert_eq!(PublishDecision::Cancel.into_content(preview.clone()), None);
        assert_eq!(
            PublishDecision::EditThenPublish("edited".to_string()).into_content(preview),
            Some("edited".to_string())
        );
    }
}
