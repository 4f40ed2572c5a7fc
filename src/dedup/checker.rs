//! Candidate-versus-history comparison.

use super::similarity::similarity;
use crate::markdown::extract_headlines;
use crate::models::{DedupIssue, HistoryWindow};
use tracing::debug;

/// Ratio above which two briefs count as the same content.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.70;

/// Compare a candidate brief against every entry of the history window.
///
/// Emits a [`DedupIssue::TitleDuplicate`] for every candidate headline whose
/// trimmed title equals an archived one (case-sensitive), and a
/// [`DedupIssue::HighSimilarity`] for every entry whose whole-text ratio is
/// strictly above `threshold`. All issues are collected; an empty result
/// means the candidate is accepted as is.
pub fn check(candidate: &str, history: &HistoryWindow, threshold: f64) -> Vec<DedupIssue> {
    let headlines = extract_headlines(candidate);
    let mut issues = Vec::new();

    for entry in &history.entries {
        for new in &headlines {
            let title = new.title.trim();
            for old in &entry.headlines {
                if title == old.title.trim() {
                    issues.push(DedupIssue::TitleDuplicate {
                        title: new.title.clone(),
                        source: new.source.clone(),
                        conflicting_date: entry.date.clone(),
                    });
                }
            }
        }

        let ratio = similarity(candidate, &entry.raw_text);
        debug!(path = %entry.path.display(), ratio, "Compared against history entry");
        if ratio > threshold {
            issues.push(DedupIssue::HighSimilarity {
                ratio,
                conflicting_date: entry.date.clone(),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HistoryEntry;
    use std::path::PathBuf;

    fn entry(date: &str, raw: &str) -> HistoryEntry {
        HistoryEntry {
            date: date.to_string(),
            path: PathBuf::from(format!("{}.md", date)),
            raw_text: raw.to_string(),
            headlines: extract_headlines(raw),
        }
    }

    fn window(entries: Vec<HistoryEntry>) -> HistoryWindow {
        HistoryWindow { entries }
    }

    const BRIEF: &str = "# 2025年01月01日 法律简报

## 1. 今日要闻

### 【最高法】发布服务保障自由贸易试验区建设典型案例
- **来源**: 最高人民法院
- **摘要**: 涵盖外商投资、国际贸易、金融创新等领域。
";

    #[test]
    fn test_identical_text_is_high_similarity() {
        let history = window(vec![entry("2025-01-01", BRIEF)]);
        let issues = check(BRIEF, &history, DEFAULT_SIMILARITY_THRESHOLD);

        let ratios: Vec<f64> = issues
            .iter()
            .filter_map(|i| match i {
                DedupIssue::HighSimilarity { ratio, .. } => Some(*ratio),
                _ => None,
            })
            .collect();
        assert_eq!(ratios, vec![1.0]);
    }

    #[test]
    fn test_same_title_different_source_is_duplicate() {
        let old = "### 【最高人民法院】发布新规\n完全不同的正文内容，用来拉低整体相似度。";
        let new = "### 【最高法】 发布新规 \n另一篇文章的正文，差异很大很大很大。";
        let history = window(vec![entry("2025-01-05", old)]);

        let issues = check(new, &history, DEFAULT_SIMILARITY_THRESHOLD);
        assert!(issues.contains(&DedupIssue::TitleDuplicate {
            title: "发布新规".to_string(),
            source: "最高法".to_string(),
            conflicting_date: "2025-01-05".to_string(),
        }));
    }

    #[test]
    fn test_title_match_is_case_sensitive() {
        let history = window(vec![entry("2025-01-05", "### 【SPC】New Rules\nx")]);
        let issues = check("### 【SPC】new rules\ny", &history, 0.99);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_distinct_content_passes() {
        let history = window(vec![entry(
            "2025-01-05",
            "### 【司法部】法律援助工作实施意见发布\n扩大法律援助覆盖面。",
        )]);
        let issues = check(
            "### 【最高检】部署食品安全专项检察监督\n重点打击危害食品安全犯罪。",
            &history,
            DEFAULT_SIMILARITY_THRESHOLD,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_collects_issues_across_all_entries() {
        let history = window(vec![
            entry("2025-01-03", BRIEF),
            entry("2025-01-02", "### 【最高法】发布服务保障自由贸易试验区建设典型案例\n短"),
            entry("2025-01-01", "无关内容"),
        ]);
        let issues = check(BRIEF, &history, DEFAULT_SIMILARITY_THRESHOLD);

        let title_dates: Vec<&str> = issues
            .iter()
            .filter(|i| matches!(i, DedupIssue::TitleDuplicate { .. }))
            .map(|i| i.conflicting_date())
            .collect();
        assert_eq!(title_dates, vec!["2025-01-03", "2025-01-02"]);
        assert!(issues.iter().any(|i| matches!(i, DedupIssue::HighSimilarity { conflicting_date, .. } if conflicting_date == "2025-01-03")));
    }

    #[test]
    fn test_empty_history_has_no_issues() {
        assert!(check(BRIEF, &HistoryWindow::default(), DEFAULT_SIMILARITY_THRESHOLD).is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        let history = window(vec![entry("2025-01-01", "abcd")]);
        // ratio("abcd", "abce") == 0.75
        assert!(check("abce", &history, 0.75).is_empty());
        assert_eq!(check("abce", &history, 0.74).len(), 1);
    }
}
