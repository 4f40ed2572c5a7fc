//! Line classification for the brief Markdown dialect.
//!
//! Every physical line maps to exactly one [`Line`] variant. The section and
//! item scanners only ever look at these variants, never at raw strings.

/// A classified Markdown line. Text payloads are trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `#`..`######` followed by a space.
    Heading { level: u8, text: &'a str },
    /// `- text` or `* text`.
    Bullet(&'a str),
    /// A line starting with `**`.
    Bold(&'a str),
    Text(&'a str),
    /// `---` (three or more dashes and nothing else).
    Rule,
    Blank,
}

/// Classify a single line.
pub fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-') {
        return Line::Rule;
    }

    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&hashes) {
        let rest = &trimmed[hashes..];
        if let Some(text) = rest.strip_prefix(' ') {
            return Line::Heading {
                level: hashes as u8,
                text: text.trim(),
            };
        }
    }

    if let Some(text) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        return Line::Bullet(text.trim());
    }
    if trimmed.starts_with("**") {
        return Line::Bold(trimmed);
    }
    Line::Text(trimmed)
}

/// Classify every line of a document.
pub fn tokenize(raw: &str) -> Vec<Line<'_>> {
    raw.lines().map(classify).collect()
}

/// Split `**标签**: 值` (or `**标签：** 值`) into label and value.
///
/// Returns `None` when the text does not open with a bold label.
pub fn split_label(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_prefix("**")?;
    let close = inner.find("**")?;
    let label = inner[..close].trim().trim_end_matches([':', '：']).trim();
    if label.is_empty() {
        return None;
    }
    let value = inner[close + 2..]
        .trim_start()
        .trim_start_matches([':', '：'])
        .trim();
    Some((label, value))
}

/// Split `【source】title` into its parts.
pub fn split_bracketed(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix('【')?;
    let close = rest.find('】')?;
    let source = rest[..close].trim();
    let title = rest[close + '】'.len_utf8()..].trim();
    if source.is_empty() || title.is_empty() {
        return None;
    }
    Some((source, title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_headings() {
        assert_eq!(
            classify("## 1. 今日要闻"),
            Line::Heading {
                level: 2,
                text: "1. 今日要闻"
            }
        );
        assert_eq!(
            classify("### 【最高法】发布新规  "),
            Line::Heading {
                level: 3,
                text: "【最高法】发布新规"
            }
        );
        // No space after the hashes: not a heading.
        assert_eq!(classify("#hashtag"), Line::Text("#hashtag"));
        assert_eq!(classify("####### seven"), Line::Text("####### seven"));
    }

    #[test]
    fn test_classify_bullets_bold_rule_blank() {
        assert_eq!(
            classify("- **来源**: 最高人民法院"),
            Line::Bullet("**来源**: 最高人民法院")
        );
        assert_eq!(classify("* item"), Line::Bullet("item"));
        assert_eq!(classify("**摘要**:"), Line::Bold("**摘要**:"));
        assert_eq!(classify("---"), Line::Rule);
        assert_eq!(classify("  -----  "), Line::Rule);
        assert_eq!(classify("--"), Line::Text("--"));
        assert_eq!(classify("   "), Line::Blank);
        assert_eq!(classify("简要说明。"), Line::Text("简要说明。"));
    }

    #[test]
    fn test_tokenize_preserves_line_count() {
        let raw = "# t\n\n## 1. 今日要闻\n- a\n---";
        let lines = tokenize(raw);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], Line::Blank);
        assert_eq!(lines[4], Line::Rule);
    }

    #[test]
    fn test_split_label_variants() {
        assert_eq!(split_label("**来源**: 最高人民法院"), Some(("来源", "最高人民法院")));
        assert_eq!(split_label("**来源**：司法部"), Some(("来源", "司法部")));
        assert_eq!(split_label("**导语：**今日无重大新闻。"), Some(("导语", "今日无重大新闻。")));
        assert_eq!(split_label("**摘要**:"), Some(("摘要", "")));
        assert_eq!(split_label("plain text"), None);
        assert_eq!(split_label("**unclosed"), None);
    }

    #[test]
    fn test_split_bracketed() {
        assert_eq!(split_bracketed("【最高法】发布新规"), Some(("最高法", "发布新规")));
        assert_eq!(split_bracketed("【 司法部 】 标题 "), Some(("司法部", "标题")));
        assert_eq!(split_bracketed("没有来源的标题"), None);
        assert_eq!(split_bracketed("【】标题"), None);
        assert_eq!(split_bracketed("【来源】"), None);
    }
}
