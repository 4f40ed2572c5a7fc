//! Per-section content extraction: news cards, subsections and link lists.

use super::lines::{Line, classify, split_bracketed, split_label};
use crate::models::NewsItem;
use once_cell::sync::Lazy;
use regex::Regex;

// One level of nested parentheses is allowed inside the URL.
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(((?:[^()\s]|\([^()\s]*\))+)\)").unwrap());

/// Which free-text block the item scanner is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    None,
    Summary,
    Impact,
}

/// An item under construction plus its free-text buffers.
struct Draft {
    item: NewsItem,
    summary: Vec<String>,
    impact: Vec<String>,
}

impl Draft {
    fn new(source: &str, title: &str) -> Self {
        Self {
            item: NewsItem {
                source: source.to_string(),
                title: title.to_string(),
                ..Default::default()
            },
            summary: Vec::new(),
            impact: Vec::new(),
        }
    }

    fn finish(mut self) -> NewsItem {
        if !self.summary.is_empty() {
            self.item.summary = Some(self.summary.join(" "));
        }
        if !self.impact.is_empty() {
            self.item.impact = Some(self.impact.join(" "));
        }
        self.item
    }

    /// Apply a labeled field. Returns the block to continue in, or `None`
    /// when the label is not one the card format knows.
    fn apply_label(&mut self, label: &str, value: &str) -> Option<Block> {
        let value = value.trim();
        let set = |slot: &mut Option<String>| {
            if !value.is_empty() {
                *slot = Some(value.to_string());
            }
        };
        match label {
            "来源" => {
                if !value.is_empty() {
                    self.item.source = value.to_string();
                }
                Some(Block::None)
            }
            "时间" | "发布时间" | "会议时间" => {
                set(&mut self.item.time);
                Some(Block::None)
            }
            "链接" => {
                set(&mut self.item.url);
                Some(Block::None)
            }
            "生效时间" => {
                set(&mut self.item.effective);
                Some(Block::None)
            }
            "摘要" => {
                if !value.is_empty() {
                    self.summary.push(value.to_string());
                }
                Some(Block::Summary)
            }
            "实务影响" => {
                if !value.is_empty() {
                    self.impact.push(value.to_string());
                }
                Some(Block::Impact)
            }
            _ => None,
        }
    }

    fn push_text(&mut self, block: Block, text: &str) {
        match block {
            Block::Summary => self.summary.push(text.to_string()),
            Block::Impact => self.impact.push(text.to_string()),
            Block::None => {}
        }
    }
}

/// Extract news cards from the lines of a card-list section.
///
/// Items open at a level-3 or level-4 heading `【source】title`. A `来源`
/// field overrides the bracketed source. `摘要`/`实务影响` blocks run until
/// the next labeled field or a rule line; their lines are joined with a
/// single space. Lines outside any item are ignored.
pub fn parse_items<S: AsRef<str>>(lines: &[S]) -> Vec<NewsItem> {
    let mut items = Vec::new();
    let mut draft: Option<Draft> = None;
    let mut block = Block::None;

    for raw in lines {
        let line = classify(raw.as_ref());
        match line {
            Line::Heading { level, text } if level >= 3 => {
                if let Some(done) = draft.take() {
                    items.push(done.finish());
                }
                block = Block::None;
                draft = split_bracketed(text).map(|(source, title)| Draft::new(source, title));
            }
            Line::Heading { .. } => {
                block = Block::None;
            }
            Line::Rule => block = Block::None,
            Line::Blank => {}
            Line::Bullet(text) | Line::Bold(text) => {
                let Some(current) = draft.as_mut() else {
                    continue;
                };
                match split_label(text).and_then(|(label, value)| current.apply_label(label, value)) {
                    Some(next) => block = next,
                    // Unlabeled bullets extend an open block; stray bold is skipped.
                    None if matches!(line, Line::Bullet(_)) => current.push_text(block, text),
                    None => {}
                }
            }
            Line::Text(text) => {
                if let Some(current) = draft.as_mut() {
                    current.push_text(block, text);
                }
            }
        }
    }

    if let Some(done) = draft.take() {
        items.push(done.finish());
    }
    items
}

/// One entry of a subsection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// `- **label**: value`
    Field { label: String, value: String },
    Text(String),
}

/// A titled group of entries (`### title` followed by bullets/text).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subsection {
    pub title: Option<String>,
    pub entries: Vec<Entry>,
}

/// Group lines into subsections for the list-shaped sections.
///
/// Level-3+ headings open a new subsection; entries before the first heading
/// land in an untitled one. Empty subsections are dropped.
pub fn parse_subsections<S: AsRef<str>>(lines: &[S]) -> Vec<Subsection> {
    let mut groups = Vec::new();
    let mut current = Subsection::default();

    for raw in lines {
        match classify(raw.as_ref()) {
            Line::Heading { level, text } if level >= 3 => {
                let done = std::mem::replace(
                    &mut current,
                    Subsection {
                        title: Some(text.to_string()),
                        entries: Vec::new(),
                    },
                );
                if done.title.is_some() || !done.entries.is_empty() {
                    groups.push(done);
                }
            }
            Line::Bullet(text) => current.entries.push(match split_label(text) {
                Some((label, value)) if !value.is_empty() => Entry::Field {
                    label: label.to_string(),
                    value: value.to_string(),
                },
                _ => Entry::Text(text.to_string()),
            }),
            Line::Bold(text) | Line::Text(text) => current.entries.push(Entry::Text(text.to_string())),
            Line::Heading { .. } | Line::Rule | Line::Blank => {}
        }
    }

    if current.title.is_some() || !current.entries.is_empty() {
        groups.push(current);
    }
    groups
}

/// A reading-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub text: String,
    pub url: Option<String>,
}

/// Extract reading-list entries: each bullet or text line is one entry and
/// its first `[text](url)` becomes the link.
pub fn parse_links<S: AsRef<str>>(lines: &[S]) -> Vec<LinkEntry> {
    lines
        .iter()
        .filter_map(|raw| match classify(raw.as_ref()) {
            Line::Bullet(text) | Line::Text(text) | Line::Bold(text) => Some(text),
            _ => None,
        })
        .map(|text| match LINK_RE.captures(text) {
            Some(caps) => LinkEntry {
                text: caps[1].trim().to_string(),
                url: Some(caps[2].to_string()),
            },
            None => LinkEntry {
                text: text.to_string(),
                url: None,
            },
        })
        .collect()
}
