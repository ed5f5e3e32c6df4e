//! Times of India top-stories RSS adapter.

use std::error::Error;

use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

use crate::feeds::{RSS_ITEM_LIMIT, RssItem, fetch_og_image, normalize_pub_date, parse_rss_items};
use crate::models::RawArticle;

const TOP_STORIES_URL: &str = "https://timesofindia.indiatimes.com/rssfeedstopstories.cms";

const SECTION_ID: &str = "toi-top-stories";
const SECTION_NAME: &str = "Times of India Top Stories";

const IMAGE_PROBE_CONCURRENCY: usize = 8;

/// Index the Times of India top-stories feed.
#[instrument(level = "info", skip_all)]
pub async fn index_articles(http: &reqwest::Client) -> Result<Vec<RssItem>, Box<dyn Error>> {
    let xml = http
        .get(TOP_STORIES_URL)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let items = parse_rss_items(&xml)?;

    info!(count = items.len(), "Indexed Times of India items");
    Ok(items)
}

/// Resolve indexed items into raw article records, skipping any that end up
/// without an image.
#[instrument(level = "info", skip_all)]
pub async fn fetch_articles(http: &reqwest::Client, items: Vec<RssItem>) -> Vec<RawArticle> {
    let articles: Vec<RawArticle> = stream::iter(items.into_iter().take(RSS_ITEM_LIMIT))
        .map(|item| async move {
            let img_url = match item.image_url {
                Some(url) => url,
                None => match fetch_og_image(http, &item.link).await {
                    Some(url) => url,
                    None => {
                        warn!(url = %item.link, "No image for Times of India item; skipping");
                        return None;
                    }
                },
            };

            Some(RawArticle {
                title: item.title,
                web_url: item.link,
                img_url,
                category: "India".to_string(),
                section_id: SECTION_ID.to_string(),
                section_name: SECTION_NAME.to_string(),
                article_type: "article".to_string(),
                publication_date: normalize_pub_date(item.pub_date.as_deref()),
            })
        })
        .buffer_unordered(IMAGE_PROBE_CONCURRENCY)
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(count = articles.len(), "Fetched Times of India articles");
    articles
}
