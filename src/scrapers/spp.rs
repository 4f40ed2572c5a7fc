//! Supreme People's Procuratorate (最高人民检察院) key work listing.

use super::{Listing, fetch_listing};
use crate::models::{NewsItem, RunContext};
use tracing::instrument;

pub const LISTING: Listing = Listing {
    source: "最高人民检察院",
    page_url: "https://www.spp.gov.cn/spp/zdgz/",
    base_url: "https://www.spp.gov.cn/spp/zdgz/",
    selectors: &["div.news-list li", "ul.news-list li", "li.news-item", "div[class*=\"news\"]"],
};

#[instrument(level = "info", skip_all)]
pub async fn index_articles(client: &reqwest::Client, ctx: &RunContext) -> Vec<NewsItem> {
    fetch_listing(client, &LISTING, ctx).await
}
