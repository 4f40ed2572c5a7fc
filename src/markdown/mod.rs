//! Parsing of the brief Markdown dialect.
//!
//! - [`lines`]: tokenizer classifying each line (heading, bullet, bold, text, rule)
//! - [`sections`]: splits a brief into its five named `##` sections plus intro
//! - [`items`]: extracts news cards, subsections and link lists from a section
//!
//! Parsing never fails: unknown headers, stray lines and missing fields are
//! dropped rather than reported.

pub mod items;
pub mod lines;
pub mod sections;

pub use items::{Entry, LinkEntry, Subsection, parse_items, parse_links, parse_subsections};
pub use sections::{ParsedBrief, Section, SectionName, parse_sections};

use crate::models::Headline;
use lines::{Line, split_bracketed, tokenize};

/// Extract every `### 【source】title` headline from a document.
///
/// Used on both sides of deduplication so candidate and history headlines are
/// read by the same rule.
pub fn extract_headlines(raw: &str) -> Vec<Headline> {
    tokenize(raw)
        .into_iter()
        .filter_map(|line| match line {
            Line::Heading { level: 3, text } => split_bracketed(text),
            _ => None,
        })
        .map(|(source, title)| Headline {
            source: source.to_string(),
            title: title.to_string(),
        })
        .collect()
}
