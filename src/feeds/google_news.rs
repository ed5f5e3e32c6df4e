//! Google News RSS adapter.
//!
//! Indexes either the regional top-stories feed or, when a topic is given,
//! the search feed for that topic. Items here are aggregated from many
//! outlets, so the stored URL (and therefore the credibility signals) points
//! at Google's redirect host rather than the originating outlet; the
//! originating name still rides along in the feed's `<source>` element.

use std::error::Error;

use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

use crate::feeds::{RSS_ITEM_LIMIT, RssItem, fetch_og_image, normalize_pub_date, parse_rss_items};
use crate::models::RawArticle;

const TOP_STORIES_URL: &str = "https://news.google.com/rss?hl=en-IN&gl=IN&ceid=IN:en";
const SEARCH_URL: &str = "https://news.google.com/rss/search";

const SECTION_ID: &str = "google-news";
const SECTION_NAME: &str = "Google News";

/// Concurrent page probes during the fetch phase.
const IMAGE_PROBE_CONCURRENCY: usize = 8;

/// Index the Google News feed.
///
/// With a topic, queries the search feed for it; otherwise takes the
/// regional top stories.
#[instrument(level = "info", skip_all)]
pub async fn index_articles(
    http: &reqwest::Client,
    topic: Option<&str>,
) -> Result<Vec<RssItem>, Box<dyn Error>> {
    let feed_url = match topic {
        Some(topic) => format!(
            "{SEARCH_URL}?q={}&hl=en-IN&gl=IN&ceid=IN:en",
            urlencoding::encode(topic)
        ),
        None => TOP_STORIES_URL.to_string(),
    };

    let xml = http.get(&feed_url).send().await?.error_for_status()?.text().await?;
    let items = parse_rss_items(&xml)?;

    info!(count = items.len(), feed = %feed_url, "Indexed Google News items");
    Ok(items)
}

/// Resolve indexed items into raw article records.
///
/// Google News rarely attaches images to its items, so most go through the
/// og:image probe; items that still have no image are skipped.
#[instrument(level = "info", skip_all)]
pub async fn fetch_articles(http: &reqwest::Client, items: Vec<RssItem>) -> Vec<RawArticle> {
    let articles: Vec<RawArticle> = stream::iter(items.into_iter().take(RSS_ITEM_LIMIT))
        .map(|item| async move {
            let img_url = match item.image_url {
                Some(url) => url,
                None => match fetch_og_image(http, &item.link).await {
                    Some(url) => url,
                    None => {
                        warn!(
                            url = %item.link,
                            source = item.source.as_deref().unwrap_or("unknown"),
                            "No image for Google News item; skipping"
                        );
                        return None;
                    }
                },
            };

            Some(RawArticle {
                title: item.title,
                web_url: item.link,
                img_url,
                category: "News".to_string(),
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

    info!(count = articles.len(), "Fetched Google News articles");
    articles
}
