//! Guardian Content API adapter.
//!
//! Indexing hits the [Content API](https://content.guardianapis.com) search
//! endpoint with `show-fields=thumbnail`, so most items arrive with an image
//! attached. Items without one get a second chance through the og:image
//! probe before being skipped.

use futures::stream::{self, StreamExt};
use serde::Deserialize;
use std::error::Error;
use tracing::{debug, info, instrument, warn};

use crate::feeds::fetch_og_image;
use crate::models::RawArticle;

const SEARCH_ENDPOINT: &str = "https://content.guardianapis.com/search";

/// Concurrent page probes during the fetch phase.
const IMAGE_PROBE_CONCURRENCY: usize = 8;

/// Category assigned when the API reports no pillar.
const DEFAULT_PILLAR: &str = "Undefined";

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ContentItem>,
}

/// One item from the Content API search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    web_title: String,
    web_url: String,
    web_publication_date: String,
    section_id: String,
    section_name: String,
    #[serde(rename = "type")]
    item_type: String,
    pillar_name: Option<String>,
    fields: Option<ContentFields>,
}

#[derive(Debug, Deserialize)]
struct ContentFields {
    thumbnail: Option<String>,
}

/// Index the Guardian search API for the latest articles.
#[instrument(level = "info", skip_all)]
pub async fn index_articles(
    http: &reqwest::Client,
    api_key: &str,
) -> Result<Vec<ContentItem>, Box<dyn Error>> {
    let response = http
        .get(SEARCH_ENDPOINT)
        .query(&[("api-key", api_key), ("show-fields", "thumbnail")])
        .send()
        .await?
        .error_for_status()?;

    let envelope: SearchEnvelope = response.json().await?;
    let results = envelope.response.results;

    info!(count = results.len(), "Indexed Guardian articles");
    Ok(results)
}

/// Resolve indexed items into raw article records.
///
/// Items keep their API thumbnail when present; the rest go through the
/// og:image probe concurrently. Items that still have no image are skipped,
/// since the reader-facing surface requires one.
#[instrument(level = "info", skip_all)]
pub async fn fetch_articles(http: &reqwest::Client, items: Vec<ContentItem>) -> Vec<RawArticle> {
    let articles: Vec<RawArticle> = stream::iter(items)
        .map(|item| async move {
            let thumbnail = item.fields.as_ref().and_then(|f| f.thumbnail.clone());
            let img_url = match thumbnail {
                Some(url) if !url.is_empty() => url,
                _ => match fetch_og_image(http, &item.web_url).await {
                    Some(url) => {
                        debug!(url = %item.web_url, "Recovered image via og:image");
                        url
                    }
                    None => {
                        warn!(url = %item.web_url, "No image for Guardian article; skipping");
                        return None;
                    }
                },
            };

            Some(RawArticle {
                title: item.web_title,
                web_url: item.web_url,
                img_url,
                category: item.pillar_name.unwrap_or_else(|| DEFAULT_PILLAR.to_string()),
                section_id: item.section_id,
                section_name: item.section_name,
                article_type: item.item_type,
                publication_date: item.web_publication_date,
            })
        })
        .buffer_unordered(IMAGE_PROBE_CONCURRENCY)
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(count = articles.len(), "Fetched Guardian articles");
    articles
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "response": {
            "status": "ok",
            "total": 2,
            "results": [
                {
                    "id": "world/2026/aug/20/example",
                    "type": "article",
                    "sectionId": "world",
                    "sectionName": "World news",
                    "webPublicationDate": "2026-08-20T09:15:00Z",
                    "webTitle": "Example headline",
                    "webUrl": "https://www.theguardian.com/world/2026/aug/20/example",
                    "pillarName": "News",
                    "fields": { "thumbnail": "https://media.guim.co.uk/example/500.jpg" }
                },
                {
                    "id": "football/2026/aug/20/match",
                    "type": "liveblog",
                    "sectionId": "football",
                    "sectionName": "Football",
                    "webPublicationDate": "2026-08-20T10:00:00Z",
                    "webTitle": "Match report",
                    "webUrl": "https://www.theguardian.com/football/2026/aug/20/match"
                }
            ]
        }
    }"#;

    #[test]
    fn test_deserializes_search_response() {
        let envelope: SearchEnvelope = serde_json::from_str(RESPONSE).unwrap();
        let results = envelope.response.results;
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].web_title, "Example headline");
        assert_eq!(results[0].section_id, "world");
        assert_eq!(results[0].item_type, "article");
        assert_eq!(results[0].pillar_name.as_deref(), Some("News"));
        assert_eq!(
            results[0].fields.as_ref().and_then(|f| f.thumbnail.as_deref()),
            Some("https://media.guim.co.uk/example/500.jpg")
        );

        // second item has no pillar and no fields block
        assert_eq!(results[1].pillar_name, None);
        assert!(results[1].fields.is_none());
    }

    #[test]
    fn test_empty_results_deserialize() {
        let envelope: SearchEnvelope =
            serde_json::from_str(r#"{"response": {"status": "ok"}}"#).unwrap();
        assert!(envelope.response.results.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_keeps_api_thumbnail_without_probing() {
        let envelope: SearchEnvelope = serde_json::from_str(RESPONSE).unwrap();
        let with_thumbnail: Vec<ContentItem> = envelope
            .response
            .results
            .into_iter()
            .filter(|item| item.fields.is_some())
            .collect();

        // the probe client points nowhere; the thumbnail item must survive
        // without any network round trip
        let http = reqwest::Client::builder().build().unwrap();
        let articles = fetch_articles(&http, with_thumbnail).await;

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Example headline");
        assert_eq!(articles[0].img_url, "https://media.guim.co.uk/example/500.jpg");
        assert_eq!(articles[0].category, "News");
        assert_eq!(articles[0].article_type, "article");
    }
}
