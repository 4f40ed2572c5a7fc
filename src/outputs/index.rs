//! Site index (`index.html`) listing every published day page.

use super::html::{Element, Markup, escape};
use crate::error::BriefError;
use crate::models::{RunContext, display_date};
use chrono::NaiveDate;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Label for a page file name: `2025-01-01.html` → `2025年01月01日`.
///
/// Stems that are not ISO dates are shown as is.
pub fn page_label(file_name: &str) -> String {
    let stem = file_name.trim_end_matches(".html");
    match NaiveDate::parse_from_str(stem, "%Y-%m-%d") {
        Ok(date) => display_date(date),
        Err(_) => stem.to_string(),
    }
}

/// Collect day pages (`20*.html`) in `site_dir`, newest first.
pub async fn list_pages(site_dir: &Path) -> Result<Vec<String>, BriefError> {
    let mut reader = fs::read_dir(site_dir).await?;
    let mut pages = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        if let Some(name) = entry.file_name().to_str() {
            if name.starts_with("20") && name.ends_with(".html") {
                pages.push(name.to_string());
            }
        }
    }
    pages.sort_unstable_by(|a, b| b.cmp(a));
    Ok(pages)
}

/// Render the index page for `pages` (already sorted newest first).
pub fn render_index(pages: &[String], ctx: &RunContext) -> String {
    let latest_label = pages
        .first()
        .map(|p| page_label(p))
        .unwrap_or_else(|| "暂无".to_string());

    let latest = match pages.first() {
        Some(page) => Element::new("p").child(
            Element::new("a")
                .attr("href", page)
                .class("latest-link")
                .text(&format!("点击查看 {} 的简报 →", page.trim_end_matches(".html"))),
        ),
        None => Element::new("p").text("暂无简报"),
    };

    let archive: Markup = if pages.is_empty() {
        Element::new("p").text("暂无历史简报").render()
    } else {
        Element::new("ul")
            .class("archive-list")
            .children(pages.iter().map(|page| {
                Element::new("li").child(
                    Element::new("a")
                        .attr("href", page)
                        .child(Element::new("strong").text(&page_label(page)))
                        .text(" - 法律简报"),
                )
            }))
            .render()
    };

    let stats = Element::new("div")
        .class("stats-grid")
        .child(
            Element::new("div")
                .class("stat-item")
                .child(Element::new("div").class("stat-number").text(&pages.len().to_string()))
                .child(Element::new("div").class("stat-label").text("简报总数")),
        )
        .child(
            Element::new("div")
                .class("stat-item")
                .child(Element::new("div").class("stat-number").text("每天"))
                .child(Element::new("div").class("stat-label").text("更新频率")),
        );

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>每日法律简报</title>
<style>
{css}
</style>
</head>
<body>
<div class="container">
<header>
<h1>每日法律简报</h1>
<p class="subtitle">AI驱动的法律资讯聚合平台</p>
<div class="latest">最新简报：<strong>{latest_label}</strong></div>
</header>
<div class="content">
<div class="stats"><h3>数据统计</h3>{stats}</div>
<section class="section"><h2>最新简报</h2>{latest}</section>
<section class="section"><h2>历史归档</h2>{archive}</section>
</div>
<footer>
<p>© 每日法律简报</p>
<p>最后更新: {updated}</p>
</footer>
</div>
</body>
</html>
"#,
        css = INDEX_CSS,
        latest_label = escape(&latest_label),
        stats = stats.render().as_str(),
        latest = latest.render().as_str(),
        archive = archive.as_str(),
        updated = ctx.generated_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// Rebuild `<site_dir>/index.html` from the pages currently on disk.
#[instrument(level = "info", skip_all, fields(site_dir = %site_dir.display()))]
pub async fn write_index(site_dir: &Path, ctx: &RunContext) -> Result<usize, BriefError> {
    let pages = list_pages(site_dir).await?;
    let html = render_index(&pages, ctx);
    let index_path = site_dir.join("index.html");
    fs::write(&index_path, html).await?;
    info!(path = %index_path.display(), pages = pages.len(), "Updated site index");
    Ok(pages.len())
}

const INDEX_CSS: &str = r#"* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", "Noto Sans SC", sans-serif; line-height: 1.8; color: #333; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); min-height: 100vh; padding: 20px; }
.container { max-width: 900px; margin: 0 auto; background: white; border-radius: 12px; box-shadow: 0 10px 40px rgba(0,0,0,0.1); overflow: hidden; }
header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 40px 30px; text-align: center; }
header h1 { font-size: 2.4em; margin-bottom: 10px; }
.subtitle { opacity: 0.9; }
.latest { margin-top: 20px; background: rgba(255,255,255,0.15); display: inline-block; padding: 8px 20px; border-radius: 20px; }
.content { padding: 30px; }
.stats { background: #f8f9fa; padding: 20px; border-radius: 10px; margin-bottom: 30px; }
.stats-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin-top: 15px; }
.stat-item { padding: 15px; background: white; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.05); }
.stat-number { font-size: 2em; font-weight: 700; color: #667eea; }
.stat-label { font-size: 0.9em; color: #666; margin-top: 5px; }
.section { margin-bottom: 30px; }
.section h2 { color: #667eea; font-size: 1.6em; margin-bottom: 15px; padding-bottom: 8px; border-bottom: 2px solid #667eea; }
.latest-link { font-size: 1.2em; color: #667eea; font-weight: 600; text-decoration: none; }
.archive-list { list-style: none; }
.archive-list li { padding: 12px 15px; border-bottom: 1px solid #eee; }
.archive-list a { color: #333; text-decoration: none; }
.archive-list a:hover { color: #764ba2; }
footer { background: #f8f9fa; padding: 20px 30px; text-align: center; color: #666; font-size: 0.9em; }
@media (max-width: 768px) {
  header h1 { font-size: 1.8em; }
  .content { padding: 20px 15px; }
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ctx() -> RunContext {
        let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        RunContext::new(date, date.and_hms_opt(8, 30, 0).unwrap())
    }

    #[test]
    fn test_page_label() {
        assert_eq!(page_label("2025-01-01.html"), "2025年01月01日");
        assert_eq!(page_label("2025-special.html"), "2025-special");
    }

    #[test]
    fn test_render_index_lists_pages() {
        let pages = vec!["2025-01-02.html".to_string(), "2025-01-01.html".to_string()];
        let html = render_index(&pages, &ctx());
        assert!(html.contains("最新简报：<strong>2025年01月02日</strong>"));
        assert!(html.contains(r#"<a href="2025-01-02.html" class="latest-link">点击查看 2025-01-02 的简报 →</a>"#));
        assert!(html.contains(r#"<li><a href="2025-01-01.html"><strong>2025年01月01日</strong> - 法律简报</a></li>"#));
        assert!(html.contains(r#"<div class="stat-number">2</div>"#));
        assert!(html.contains("最后更新: 2025-01-03 08:30:00"));
        let newer = html.find(r#"<li><a href="2025-01-02.html">"#).unwrap();
        let older = html.find(r#"<li><a href="2025-01-01.html">"#).unwrap();
        assert!(newer < older);
    }

    #[test]
    fn test_render_index_empty() {
        let html = render_index(&[], &ctx());
        assert!(html.contains("暂无简报"));
        assert!(html.contains("暂无历史简报"));
        assert!(!html.contains("archive-list\">"));
    }

    #[tokio::test]
    async fn test_write_index_scans_site_dir() {
        let tmp = TempDir::new().unwrap();
        for name in ["2025-01-01.html", "2025-01-02.html", "about.html", "2025-01-03.md"] {
            std::fs::write(tmp.path().join(name), "x").unwrap();
        }

        let count = write_index(tmp.path(), &ctx()).await.unwrap();
        assert_eq!(count, 2);
        let html = std::fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(html.contains("2025年01月02日"));
        assert!(!html.contains("about.html"));

        let pages = list_pages(tmp.path()).await.unwrap();
        assert_eq!(pages, vec!["2025-01-02.html", "2025-01-01.html"]);
    }
}
