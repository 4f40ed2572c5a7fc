//! Supreme People's Court (最高人民法院) press releases.

use super::{Listing, fetch_listing};
use crate::models::{NewsItem, RunContext};
use tracing::instrument;

pub const LISTING: Listing = Listing {
    source: "最高人民法院",
    page_url: "https://www.court.gov.cn/fabu-xiangqing.html",
    base_url: "https://www.court.gov.cn/",
    selectors: &[
        "div.news_list li",
        "ul.news_list li",
        "div.court-news-item",
        "li.news-item",
        "div[class*=\"news\"] li",
        "div.fabu-list li",
    ],
};

/// Fetch up to three recent releases from the court's listing page.
#[instrument(level = "info", skip_all)]
pub async fn index_articles(client: &reqwest::Client, ctx: &RunContext) -> Vec<NewsItem> {
    fetch_listing(client, &LISTING, ctx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::extract_listing;
    use chrono::NaiveDate;

    #[test]
    fn test_court_listing_markup() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let ctx = RunContext::new(date, date.and_hms_opt(7, 0, 0).unwrap());
        let html = r#"
            <div class="fabu-list"><ul>
              <li><a href="fabu-xiangqing-101.html">最高人民法院发布人民法院案例库建设运行情况</a><span class="date">2025-04-10</span></li>
            </ul></div>"#;
        let items = extract_listing(html, &LISTING, &ctx).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source, "最高人民法院");
        assert_eq!(items[0].url.as_deref(), Some("https://www.court.gov.cn/fabu-xiangqing-101.html"));
    }
}
