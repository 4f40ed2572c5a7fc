//! Official-site listing scrapers.
//!
//! Each source publishes a news listing page whose markup changes now and
//! then, so a source is described by a [`Listing`]: the page URL plus an
//! ordered list of CSS selectors tried until one matches. When none match,
//! every `a[href]` on the page is used instead.
//!
//! # Supported Sources
//!
//! | Source | Module | Listing page |
//! |--------|--------|--------------|
//! | 最高人民法院 | [`court`] | `https://www.court.gov.cn/fabu-xiangqing.html` |
//! | 最高人民检察院 | [`spp`] | `https://www.spp.gov.cn/spp/zdgz/` |
//!
//! Network failures never abort a run: a failed source is logged and
//! contributes no items.

pub mod court;
pub mod spp;

use crate::error::BriefError;
use crate::models::{Brief, NewsItem, RunContext};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Browser-like User-Agent; both sites reject the reqwest default.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Listing entries inspected per source.
const MAX_CANDIDATES: usize = 5;
/// Items kept per source.
const MAX_ITEMS_PER_SOURCE: usize = 3;
/// Shorter link texts are navigation, not headlines.
const MIN_TITLE_CHARS: usize = 10;
const MAX_TITLE_CHARS: usize = 100;

/// Items written into a fetched brief.
pub const MAX_BRIEF_ITEMS: usize = 5;

pub const FETCH_INTRO: &str = "汇总今日法律界重要动态，包括司法解释、典型案例、政策文件等。";
pub const FETCH_FOOTER: &str = "本简报从官方渠道爬取，内容真实可靠";

/// A scrapeable news listing page.
#[derive(Debug, Clone, Copy)]
pub struct Listing {
    /// Publisher name stamped on every item.
    pub source: &'static str,
    pub page_url: &'static str,
    /// Base for resolving relative links.
    pub base_url: &'static str,
    /// Tried in order; the first selector with any match wins.
    pub selectors: &'static [&'static str],
}

/// HTTP client shared by all sources.
pub fn http_client() -> Result<reqwest::Client, BriefError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

fn parse_selector(css: &str) -> Result<Selector, BriefError> {
    Selector::parse(css).map_err(|e| BriefError::Selector(format!("{}: {}", css, e)))
}

/// Concatenated trimmed text nodes, like a browser's stripped `innerText`.
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Extract news items from a listing page.
///
/// Looks at the first five matches of the winning selector, skips entries
/// whose title is shorter than ten characters, truncates titles to 100
/// characters and keeps at most three items. Relative links are resolved
/// against `listing.base_url`; links that do not resolve to http(s) are
/// dropped. A `span.date` inside the entry becomes the
/// item time, else `ctx.display_date`.
pub fn extract_listing(html: &str, listing: &Listing, ctx: &RunContext) -> Result<Vec<NewsItem>, BriefError> {
    let document = Html::parse_document(html);
    let base = Url::parse(listing.base_url)?;
    let anchor_sel = parse_selector("a")?;
    let date_sel = parse_selector("span.date")?;

    let mut entries: Vec<ElementRef<'_>> = Vec::new();
    for css in listing.selectors {
        let selector = parse_selector(css)?;
        entries = document.select(&selector).take(MAX_CANDIDATES).collect();
        if !entries.is_empty() {
            debug!(source = listing.source, selector = *css, "Listing selector matched");
            break;
        }
    }
    if entries.is_empty() {
        warn!(source = listing.source, "No listing selector matched; using all links");
        let links = parse_selector("a[href]")?;
        entries = document.select(&links).take(MAX_CANDIDATES).collect();
    }

    let mut items = Vec::new();
    for entry in entries {
        let anchor = if entry.value().name() == "a" {
            Some(entry)
        } else {
            entry.select(&anchor_sel).next()
        };

        let title = stripped_text(anchor.unwrap_or(entry));
        if title.chars().count() < MIN_TITLE_CHARS {
            continue;
        }
        let title: String = title.chars().take(MAX_TITLE_CHARS).collect();

        let url = anchor
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .and_then(|href| base.join(href).ok())
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .map(String::from);

        let time = entry
            .select(&date_sel)
            .next()
            .map(stripped_text)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| ctx.display_date.clone());

        items.push(NewsItem {
            source: listing.source.to_string(),
            title,
            time: Some(time),
            url,
            ..Default::default()
        });
        if items.len() >= MAX_ITEMS_PER_SOURCE {
            break;
        }
    }
    Ok(items)
}

/// Fetch and extract one listing. Failures are logged and yield no items.
#[instrument(level = "info", skip_all, fields(source = listing.source))]
pub async fn fetch_listing(client: &reqwest::Client, listing: &Listing, ctx: &RunContext) -> Vec<NewsItem> {
    let response = match client.get(listing.page_url).send().await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, url = listing.page_url, "Listing fetch failed");
            return Vec::new();
        }
    };
    if !response.status().is_success() {
        warn!(status = response.status().as_u16(), url = listing.page_url, "Listing page returned an error status");
        return Vec::new();
    }
    let html = match response.text().await {
        Ok(html) => html,
        Err(e) => {
            error!(error = %e, url = listing.page_url, "Listing body could not be read");
            return Vec::new();
        }
    };

    match extract_listing(&html, listing, ctx) {
        Ok(items) => {
            info!(count = items.len(), "Extracted listing items");
            items
        }
        Err(e) => {
            error!(error = %e, "Listing extraction failed");
            Vec::new()
        }
    }
}

/// Fetch every source, court first.
#[instrument(level = "info", skip_all)]
pub async fn fetch_all(ctx: &RunContext) -> Result<Vec<NewsItem>, BriefError> {
    let client = http_client()?;
    let (court_items, spp_items) = futures::join!(
        court::index_articles(&client, ctx),
        spp::index_articles(&client, ctx)
    );
    let items: Vec<NewsItem> = court_items.into_iter().chain(spp_items).collect();
    info!(count = items.len(), "Fetched official news");
    Ok(items)
}

/// Wrap fetched items into a brief, keeping the first five.
pub fn fetched_brief(mut items: Vec<NewsItem>, ctx: &RunContext) -> Brief {
    items.truncate(MAX_BRIEF_ITEMS);
    Brief {
        date: ctx.today,
        intro: FETCH_INTRO.to_string(),
        items,
        footer: FETCH_FOOTER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{SectionName, extract_headlines, parse_items, parse_sections};
    use chrono::NaiveDate;

    fn ctx() -> RunContext {
        let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        RunContext::new(date, date.and_hms_opt(7, 0, 0).unwrap())
    }

    const TEST_LISTING: Listing = Listing {
        source: "测试法院",
        page_url: "https://example.gov.cn/list.html",
        base_url: "https://example.gov.cn/",
        selectors: &["div.missing li", "ul.news_list li"],
    };

    #[test]
    fn test_extract_with_second_selector() {
        let html = r#"
            <ul class="news_list">
              <li><a href="/fabu/1.html">最高人民法院发布民法典合同编典型案例</a><span class="date">2025-04-09</span></li>
              <li><a href="/fabu/2.html">短标题</a></li>
              <li><a href="https://other.gov.cn/x.html">最高人民法院召开新闻发布会通报审判工作情况</a></li>
            </ul>"#;
        let items = extract_listing(html, &TEST_LISTING, &ctx()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "最高人民法院发布民法典合同编典型案例");
        assert_eq!(items[0].url.as_deref(), Some("https://example.gov.cn/fabu/1.html"));
        assert_eq!(items[0].time.as_deref(), Some("2025-04-09"));
        assert_eq!(items[0].source, "测试法院");
        assert_eq!(items[1].url.as_deref(), Some("https://other.gov.cn/x.html"));
        assert_eq!(items[1].time.as_deref(), Some("2025年04月10日"));
    }

    #[test]
    fn test_extract_caps_items_and_title_length() {
        let long = "长".repeat(150);
        let entries: String = (0..6)
            .map(|i| format!(r#"<li><a href="/{i}.html">{long}{i}</a></li>"#))
            .collect();
        let html = format!(r#"<ul class="news_list">{entries}</ul>"#);
        let items = extract_listing(&html, &TEST_LISTING, &ctx()).unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.title.chars().count() == 100));
    }

    #[test]
    fn test_extract_falls_back_to_links() {
        let html = r#"
            <p><a href="about.html">关于</a></p>
            <p><a href="news/7.html">最高人民检察院发布检察公益诉讼典型案例</a></p>"#;
        let items = extract_listing(html, &TEST_LISTING, &ctx()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url.as_deref(), Some("https://example.gov.cn/news/7.html"));
    }

    #[test]
    fn test_extract_entry_without_link() {
        let html = r#"<ul class="news_list"><li>没有链接但标题足够长的一条新闻</li></ul>"#;
        let items = extract_listing(html, &TEST_LISTING, &ctx()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, None);
    }

    #[test]
    fn test_non_web_hrefs_are_dropped() {
        let html = r#"
            <ul class="news_list">
              <li><a href="javascript:alert(document.cookie)">最高人民法院发布司法解释征求意见稿全文</a></li>
              <li><a href="mailto:press@court.gov.cn">最高人民法院新闻局联系方式与采访须知</a></li>
            </ul>"#;
        let items = extract_listing(html, &TEST_LISTING, &ctx()).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.url.is_none()));
    }

    #[test]
    fn test_bad_selector_is_an_error() {
        let listing = Listing {
            selectors: &["li[["],
            ..TEST_LISTING
        };
        assert!(matches!(extract_listing("<p></p>", &listing, &ctx()), Err(BriefError::Selector(_))));
    }

    #[test]
    fn test_fetched_brief_parses_back() {
        let items: Vec<NewsItem> = (0..7)
            .map(|i| NewsItem {
                source: "最高人民法院".to_string(),
                title: format!("第{}条官方发布的法律新闻标题", i),
                time: Some("2025年04月10日".to_string()),
                url: Some(format!("https://www.court.gov.cn/{}.html", i)),
                ..Default::default()
            })
            .collect();
        let md = fetched_brief(items, &ctx()).to_markdown();
        assert!(md.contains(FETCH_INTRO));
        assert!(md.contains(FETCH_FOOTER));
        assert_eq!(extract_headlines(&md).len(), 5);

        let parsed = parse_sections(&md);
        let today = parsed.section(SectionName::Today).unwrap();
        let cards = parse_items(&today.lines);
        assert_eq!(cards[4].url.as_deref(), Some("https://www.court.gov.cn/4.html"));
    }
}
