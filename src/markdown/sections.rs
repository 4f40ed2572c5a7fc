//! Section scanning: split a brief into its five named `##` blocks.

use super::lines::{Line, classify, split_label};

/// The five recognised sections, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    Today,
    NewRules,
    Cases,
    Trends,
    Reading,
}

impl SectionName {
    pub const ALL: [SectionName; 5] = [
        SectionName::Today,
        SectionName::NewRules,
        SectionName::Cases,
        SectionName::Trends,
        SectionName::Reading,
    ];

    /// Match the exact `##` header text.
    pub fn from_heading(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.heading() == text)
    }

    /// The `##` header text as written in briefs.
    pub fn heading(self) -> &'static str {
        match self {
            SectionName::Today => "1. 今日要闻",
            SectionName::NewRules => "2. 新规速递",
            SectionName::Cases => "3. 典型案例",
            SectionName::Trends => "4. 趋势洞察",
            SectionName::Reading => "5. 深度阅读",
        }
    }

    /// In-page anchor id.
    pub fn anchor(self) -> &'static str {
        match self {
            SectionName::Today => "today",
            SectionName::NewRules => "newrules",
            SectionName::Cases => "cases",
            SectionName::Trends => "trends",
            SectionName::Reading => "reading",
        }
    }

    /// Short label used in the navigation menu.
    pub fn nav_label(self) -> &'static str {
        match self {
            SectionName::Today => "今日要闻",
            SectionName::NewRules => "新规速递",
            SectionName::Cases => "典型案例",
            SectionName::Trends => "趋势洞察",
            SectionName::Reading => "深度阅读",
        }
    }
}

/// The raw lines that belong to one section, header excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: SectionName,
    pub lines: Vec<String>,
}

/// A brief split into intro and sections (in document order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBrief {
    pub intro: Option<String>,
    pub sections: Vec<Section>,
}

impl ParsedBrief {
    #[cfg(test)]
    pub fn section(&self, name: SectionName) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }
}

/// Split a Markdown brief into intro and named sections.
///
/// A repeated header appends to the section it names. Lines under an
/// unrecognised `##` header, and lines before the first recognised one
/// (other than the intro), are dropped.
pub fn parse_sections(raw: &str) -> ParsedBrief {
    let mut parsed = ParsedBrief::default();
    let mut current: Option<usize> = None;
    let mut seen_section_header = false;
    let mut intro: Option<Vec<String>> = None;
    let mut in_intro = false;

    for raw_line in raw.lines() {
        let line = classify(raw_line);

        if let Line::Heading { level: 2, text } = line {
            seen_section_header = true;
            in_intro = false;
            current = SectionName::from_heading(text).map(|name| {
                match parsed.sections.iter().position(|s| s.name == name) {
                    Some(idx) => idx,
                    None => {
                        parsed.sections.push(Section {
                            name,
                            lines: Vec::new(),
                        });
                        parsed.sections.len() - 1
                    }
                }
            });
            continue;
        }

        if let Some(idx) = current {
            parsed.sections[idx].lines.push(raw_line.to_string());
            continue;
        }

        if seen_section_header {
            continue;
        }

        match line {
            Line::Bold(text) if intro.is_none() => {
                if let Some(("导语", value)) = split_label(text) {
                    let mut parts = Vec::new();
                    if !value.is_empty() {
                        parts.push(value.to_string());
                    }
                    intro = Some(parts);
                    in_intro = true;
                }
            }
            Line::Text(text) | Line::Bold(text) if in_intro => {
                if let Some(parts) = intro.as_mut() {
                    parts.push(text.to_string());
                }
            }
            _ => in_intro = false,
        }
    }

    parsed.intro = intro
        .map(|parts| parts.join(" "))
        .filter(|text| !text.is_empty());
    parsed
}
