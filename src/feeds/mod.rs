//! News-feed adapters.
//!
//! One submodule per source, each exposing the same two-phase shape:
//!
//! 1. **Indexing**: call the source's API or RSS feed and collect candidate
//!    items.
//! 2. **Fetching**: resolve each candidate into a complete
//!    [`RawArticle`](crate::models::RawArticle), image included, skipping
//!    items that cannot be completed.
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | The Guardian | [`guardian`] | Content API (JSON) with og:image fallback |
//! | Google News | [`google_news`] | Top-stories or topic-search RSS |
//! | Times of India | [`times_of_india`] | Top-stories RSS |
//!
//! A failing source contributes zero articles and a warning in the log; it
//! never fails the whole refresh pass. This module holds the plumbing the
//! RSS adapters share: the item parser, publication-date normalization, and
//! the og:image probe.

pub mod google_news;
pub mod guardian;
pub mod times_of_india;

use std::error::Error;

use chrono::{DateTime, Local};
use quick_xml::Reader;
use quick_xml::events::Event;
use scraper::{Html, Selector};
use tracing::debug;

/// Candidate items taken from the top of each RSS feed.
const RSS_ITEM_LIMIT: usize = 10;

/// An `<item>` pulled from an RSS 2.0 document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssItem {
    pub title: String,
    pub link: String,
    /// RFC 2822 publication date, when the feed provides one.
    pub pub_date: Option<String>,
    /// Originating outlet name, used by aggregator feeds like Google News.
    pub source: Option<String>,
    /// Image URL from an `enclosure` or `media:content` element.
    pub image_url: Option<String>,
}

/// Which item child element text is currently being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemField {
    Title,
    Link,
    PubDate,
    Source,
}

/// Parse the `<item>` elements out of an RSS 2.0 document.
///
/// Only the fields the adapters consume are collected. Text and CDATA
/// content are both handled; elements outside `<item>` are ignored.
pub(crate) fn parse_rss_items(xml: &str) -> Result<Vec<RssItem>, Box<dyn Error>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<RssItem> = None;
    let mut field: Option<ItemField> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"item" => {
                    current = Some(RssItem::default());
                    field = None;
                }
                b"title" if current.is_some() => field = Some(ItemField::Title),
                b"link" if current.is_some() => field = Some(ItemField::Link),
                b"pubDate" if current.is_some() => field = Some(ItemField::PubDate),
                b"source" if current.is_some() => field = Some(ItemField::Source),
                b"media:content" | b"media:thumbnail" => {
                    capture_image_attr(current.as_mut(), &e)?;
                    field = None;
                }
                _ => field = None,
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"enclosure" | b"media:content" | b"media:thumbnail" => {
                    capture_image_attr(current.as_mut(), &e)?;
                }
                _ => {}
            },
            Event::Text(t) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    append_field(item, field, &t.decode()?);
                }
            }
            Event::CData(t) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    let text = String::from_utf8_lossy(t.as_ref()).into_owned();
                    append_field(item, field, &text);
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(items)
}

fn append_field(item: &mut RssItem, field: ItemField, text: &str) {
    match field {
        ItemField::Title => item.title.push_str(text),
        ItemField::Link => item.link.push_str(text),
        ItemField::PubDate => item
            .pub_date
            .get_or_insert_with(String::new)
            .push_str(text),
        ItemField::Source => item
            .source
            .get_or_insert_with(String::new)
            .push_str(text),
    }
}

fn capture_image_attr(
    item: Option<&mut RssItem>,
    element: &quick_xml::events::BytesStart<'_>,
) -> Result<(), Box<dyn Error>> {
    let Some(item) = item else {
        return Ok(());
    };
    if item.image_url.is_some() {
        return Ok(());
    }
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"url" {
            let url = attr.unescape_value()?.into_owned();
            if !url.is_empty() {
                item.image_url = Some(url);
            }
        }
    }
    Ok(())
}

/// Normalize an RSS `pubDate` into RFC 3339, falling back to the current
/// local time when the feed's value is absent or unparseable.
pub(crate) fn normalize_pub_date(pub_date: Option<&str>) -> String {
    pub_date
        .and_then(|raw| DateTime::parse_from_rfc2822(raw.trim()).ok())
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| Local::now().to_rfc3339())
}

/// Probe an article page for its `og:image` meta tag.
///
/// The shared image fallback for feeds that carry none of their own. Any
/// failure reads as `None`; the caller skips the article.
pub(crate) async fn fetch_og_image(http: &reqwest::Client, url: &str) -> Option<String> {
    let response = http.get(url).send().await.ok()?;
    if !response.status().is_success() {
        debug!(%url, status = %response.status(), "og:image probe refused");
        return None;
    }
    let body = response.text().await.ok()?;
    let document = Html::parse_document(&body);
    let selector = Selector::parse(r#"meta[property="og:image"]"#).ok()?;
    document
        .select(&selector)
        .find_map(|element| element.value().attr("content"))
        .map(str::to_string)
        .filter(|content| !content.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Top stories</title>
    <link>https://example.org</link>
    <item>
      <title>First headline</title>
      <link>https://example.org/first</link>
      <pubDate>Thu, 20 Aug 2026 09:15:00 GMT</pubDate>
      <enclosure url="https://img.example.org/first.jpg" type="image/jpeg" length="1000"/>
    </item>
    <item>
      <title><![CDATA[Second headline with <angle brackets>]]></title>
      <link>https://example.org/second</link>
      <source url="https://www.bbc.com">BBC</source>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parses_items_with_fields() {
        let items = parse_rss_items(FEED).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "First headline");
        assert_eq!(items[0].link, "https://example.org/first");
        assert_eq!(items[0].pub_date.as_deref(), Some("Thu, 20 Aug 2026 09:15:00 GMT"));
        assert_eq!(items[0].image_url.as_deref(), Some("https://img.example.org/first.jpg"));

        assert_eq!(items[1].title, "Second headline with <angle brackets>");
        assert_eq!(items[1].source.as_deref(), Some("BBC"));
        assert_eq!(items[1].image_url, None);
    }

    #[test]
    fn test_channel_title_not_mistaken_for_item() {
        let items = parse_rss_items(FEED).unwrap();
        assert!(items.iter().all(|item| item.title != "Top stories"));
    }

    #[test]
    fn test_media_content_image() {
        let feed = r#"<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <item>
      <title>With media image</title>
      <link>https://example.org/media</link>
      <media:content url="https://img.example.org/media.jpg" medium="image"/>
    </item>
  </channel>
</rss>"#;
        let items = parse_rss_items(feed).unwrap();
        assert_eq!(items[0].image_url.as_deref(), Some("https://img.example.org/media.jpg"));
    }

    #[test]
    fn test_empty_document_yields_no_items() {
        let items = parse_rss_items("<rss><channel></channel></rss>").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(parse_rss_items("<rss><channel><item></rss>").is_err());
    }

    #[test]
    fn test_normalize_pub_date_parses_rfc2822() {
        let normalized = normalize_pub_date(Some("Thu, 20 Aug 2026 09:15:00 GMT"));
        assert_eq!(normalized, "2026-08-20T09:15:00+00:00");
    }

    #[test]
    fn test_normalize_pub_date_falls_back_on_garbage() {
        let normalized = normalize_pub_date(Some("yesterday-ish"));
        // fallback is "now", which at minimum parses back as RFC 3339
        assert!(DateTime::parse_from_rfc3339(&normalized).is_ok());
        assert!(DateTime::parse_from_rfc3339(&normalize_pub_date(None)).is_ok());
    }
}
