//! Per-day brief page rendering.
//!
//! Each section maps to one fixed shape:
//!
//! | Section | Shape |
//! |---------|-------|
//! | `today` | card list (`div.news-item`) |
//! | `newrules`, `cases` | subsection + list |
//! | `trends` | labeled trend box |
//! | `reading` | link list |
//!
//! Missing fields are left out of the page; nothing here can fail.

use super::html::{Element, Markup, escape, labeled, link};
use crate::markdown::{
    Entry, LinkEntry, ParsedBrief, Section, SectionName, Subsection, parse_items, parse_links,
    parse_sections, parse_subsections,
};
use crate::models::{NewsItem, display_date};
use chrono::NaiveDate;

/// Header metadata for a brief page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    /// ISO date shown as the publication date.
    pub date_str: String,
    /// `YYYY年MM月DD日`, used in the title.
    pub display_date: String,
}

impl PageMeta {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date_str: date.format("%Y-%m-%d").to_string(),
            display_date: display_date(date),
        }
    }
}

/// Parse and render a Markdown brief in one step.
pub fn render_markdown(raw: &str, meta: &PageMeta) -> String {
    render_brief_page(&parse_sections(raw), meta)
}

/// Render a parsed brief as a complete HTML document.
pub fn render_brief_page(parsed: &ParsedBrief, meta: &PageMeta) -> String {
    let mut body: Vec<Markup> = Vec::new();

    body.push(
        Element::new("header")
            .class("article-header")
            .child(Element::new("div").class("article-badge").text("AI生成 · 每日更新"))
            .child(
                Element::new("h1")
                    .class("article-title")
                    .text(&format!("{} 法律简报", meta.display_date)),
            )
            .child(
                Element::new("div")
                    .class("article-meta")
                    .child(Element::new("span").text(&format!("发布时间：{}", meta.date_str)))
                    .child(Element::new("span").text("资讯来源：最高人民法院、最高人民检察院等")),
            )
            .render(),
    );

    if let Some(intro) = &parsed.intro {
        body.push(
            Element::new("div")
                .class("intro")
                .child(labeled("p", "导语", intro))
                .render(),
        );
    }

    for section in &parsed.sections {
        body.push(render_section(section));
    }

    let article = Element::new("article").children(body).render();

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} 法律简报 | 每日法律简报</title>
<style>
{css}
</style>
</head>
<body>
<div class="top-bar"></div>
{nav}
<div class="content">
{article}
</div>
<footer class="footer">
<p>本简报由AI自动生成，仅供学习参考，不构成法律建议</p>
<p>© 每日法律简报 | 生成时间: {date}</p>
</footer>
</body>
</html>
"#,
        title = escape(&meta.display_date),
        css = PAGE_CSS,
        nav = render_nav().as_str(),
        article = article.as_str(),
        date = escape(&meta.date_str),
    )
}

fn render_nav() -> Markup {
    let links = SectionName::ALL.into_iter().map(|name| {
        Element::new("li").child(
            Element::new("a")
                .attr("href", &format!("#{}", name.anchor()))
                .text(name.nav_label()),
        )
    });

    Element::new("nav")
        .class("nav")
        .child(
            Element::new("div")
                .class("nav-container")
                .child(
                    Element::new("a")
                        .attr("href", "index.html")
                        .class("back-link")
                        .text("← 返回首页"),
                )
                .child(
                    Element::new("a")
                        .attr("href", "index.html")
                        .class("nav-logo")
                        .text("每日法律简报"),
                ),
        )
        .child(Element::new("ul").class("section-nav").children(links))
        .render()
}

fn render_section(section: &Section) -> Markup {
    let name = section.name;
    let content: Vec<Markup> = match name {
        SectionName::Today => parse_items(&section.lines).iter().map(render_card).collect(),
        SectionName::NewRules | SectionName::Cases => parse_subsections(&section.lines)
            .iter()
            .map(render_subsection)
            .collect(),
        SectionName::Trends => parse_subsections(&section.lines)
            .iter()
            .map(render_trend)
            .collect(),
        SectionName::Reading => {
            let links = parse_links(&section.lines);
            if links.is_empty() {
                Vec::new()
            } else {
                vec![render_links(&links)]
            }
        }
    };

    Element::new("section")
        .class("article-section")
        .id(name.anchor())
        .child(Element::new("h2").class("section-title").text(name.heading()))
        .children(content)
        .render()
}

fn render_card(item: &NewsItem) -> Markup {
    let mut card = Element::new("div")
        .class("news-item")
        .child(Element::new("h4").text(&format!("【{}】{}", item.source, item.title)));

    if let Some(time) = &item.time {
        card = card.child(labeled("p", "时间", time));
    }
    if let Some(effective) = &item.effective {
        card = card.child(labeled("p", "生效时间", effective));
    }
    if let Some(summary) = &item.summary {
        card = card.child(labeled("p", "摘要", summary));
    }
    if let Some(url) = &item.url {
        let meta = Element::new("p")
            .class("news-meta")
            .child(Element::new("strong").text("链接："));
        card = card.child(match link(url, "查看原文") {
            Some(anchor) => meta.child(anchor),
            None => meta.text(url),
        });
    }
    if let Some(impact) = &item.impact {
        card = card.child(
            Element::new("div")
                .class("impact-box")
                .child(Element::new("strong").text("实务影响："))
                .inline(impact),
        );
    }
    card.render()
}

fn render_entry(entry: &Entry) -> Markup {
    match entry {
        Entry::Field { label, value } => labeled("li", label, value).render(),
        Entry::Text(text) => Element::new("li").inline(text).render(),
    }
}

fn entry_list(entries: &[Entry]) -> Option<Element> {
    if entries.is_empty() {
        return None;
    }
    Some(Element::new("ul").children(entries.iter().map(render_entry)))
}

fn render_subsection(group: &Subsection) -> Markup {
    let mut block = Element::new("div").class("subsection");
    if let Some(title) = &group.title {
        block = block.child(Element::new("h3").class("subsection-title").inline(title));
    }
    if let Some(list) = entry_list(&group.entries) {
        block = block.child(list);
    }
    block.render()
}

fn render_trend(group: &Subsection) -> Markup {
    let mut block = Element::new("div").class("trend-section");
    if let Some(title) = &group.title {
        block = block.child(Element::new("h3").class("trend-title").inline(title));
    }
    if let Some(list) = entry_list(&group.entries) {
        block = block.child(Element::new("div").class("trend-content").child(list));
    }
    block.render()
}

fn render_links(links: &[LinkEntry]) -> Markup {
    let items = links.iter().map(|entry| {
        let li = Element::new("li");
        match entry.url.as_deref().and_then(|url| link(url, &entry.text)) {
            Some(anchor) => li.child(anchor),
            None if entry.url.is_some() => li.text(&entry.text),
            None => li.inline(&entry.text),
        }
    });
    Element::new("div")
        .class("links-section")
        .child(Element::new("ul").children(items))
        .render()
}

const PAGE_CSS: &str = r#":root {
  --color-primary: #0a2463;
  --color-primary-light: #1e3a8a;
  --color-accent: #c9a227;
  --color-accent-dark: #b8860b;
  --color-bg: #fafbfc;
  --color-card: #ffffff;
  --color-text: #0a2463;
  --color-text-secondary: #475569;
  --color-border: #e2e8f0;
}
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: 'Noto Serif SC', Georgia, serif; background: var(--color-bg); color: var(--color-text); line-height: 1.8; }
.top-bar { background: linear-gradient(90deg, var(--color-accent) 0%, var(--color-accent-dark) 100%); height: 4px; position: fixed; top: 0; left: 0; right: 0; z-index: 1000; }
.nav { background: var(--color-card); border-bottom: 1px solid var(--color-border); padding: 1rem 0 0.5rem; position: sticky; top: 4px; z-index: 999; }
.nav-container { max-width: 1000px; margin: 0 auto; padding: 0 2rem; display: flex; align-items: center; justify-content: space-between; }
.nav-logo { font-size: 1.25rem; font-weight: 700; color: var(--color-primary); text-decoration: none; }
.back-link { color: var(--color-text-secondary); text-decoration: none; font-size: 0.9rem; }
.back-link:hover { color: var(--color-accent); }
.section-nav { max-width: 1000px; margin: 0.5rem auto 0; padding: 0 2rem; list-style: none; display: flex; flex-wrap: wrap; gap: 1.25rem; font-size: 0.9rem; }
.section-nav a { color: var(--color-primary-light); text-decoration: none; }
.section-nav a:hover { color: var(--color-accent); }
.content { max-width: 1000px; margin: 0 auto; padding: 3rem 2rem 4rem; }
.article-header { text-align: center; margin-bottom: 2.5rem; }
.article-badge { display: inline-block; background: var(--color-primary); color: #fff; padding: 0.25rem 1rem; border-radius: 999px; font-size: 0.8rem; letter-spacing: 0.1em; }
.article-title { font-size: 2.25rem; font-weight: 900; margin: 1rem 0; }
.article-meta { display: flex; justify-content: center; gap: 2rem; color: var(--color-text-secondary); font-size: 0.9rem; }
.intro { background: var(--color-card); border-left: 4px solid var(--color-accent); padding: 1.25rem 1.5rem; margin-bottom: 2.5rem; border-radius: 6px; }
.article-section { margin-bottom: 3rem; scroll-margin-top: 6rem; }
.section-title { font-size: 1.6rem; padding-bottom: 0.75rem; margin-bottom: 1.5rem; border-bottom: 2px solid var(--color-accent); }
.news-item { background: var(--color-card); border: 1px solid var(--color-border); border-radius: 8px; padding: 1.5rem; margin-bottom: 1.25rem; }
.news-item h4 { font-size: 1.15rem; margin-bottom: 0.75rem; }
.news-item p { color: var(--color-text-secondary); margin-bottom: 0.5rem; }
.news-item strong { color: var(--color-primary); }
.news-meta a { color: var(--color-accent-dark); }
.impact-box { background: #fdf8e7; border-left: 4px solid var(--color-accent); padding: 0.75rem 1rem; margin-top: 0.75rem; border-radius: 4px; }
.subsection { margin-bottom: 1.5rem; }
.subsection-title, .trend-title { font-size: 1.2rem; margin-bottom: 0.5rem; }
.subsection ul, .trend-content ul { padding-left: 1.5rem; color: var(--color-text-secondary); }
.trend-section { background: var(--color-card); border: 1px solid var(--color-border); border-top: 3px solid var(--color-primary); border-radius: 8px; padding: 1.25rem 1.5rem; margin-bottom: 1.25rem; }
.links-section ul { list-style: none; }
.links-section li { padding: 0.5rem 0; border-bottom: 1px dashed var(--color-border); }
.links-section a { color: var(--color-primary-light); text-decoration: none; }
.links-section a:hover { color: var(--color-accent); }
.footer { text-align: center; color: var(--color-text-secondary); font-size: 0.85rem; padding: 2rem; border-top: 1px solid var(--color-border); }
@media (max-width: 768px) {
  .content { padding: 2rem 1rem; }
  .article-title { font-size: 1.6rem; }
  .article-meta { flex-direction: column; gap: 0.25rem; }
}"#;
