//! URL-keyed persistence for annotated articles.
//!
//! A deliberately small store: one JSON document holding every record plus
//! the id counter, loaded before a refresh pass and rewritten after it.
//! `web_url` is the identity key. Records are never mutated in place; a
//! known URL arriving with a changed title is re-annotated wholesale so the
//! derived credibility fields can never go stale.

use std::error::Error;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, instrument};

use crate::credibility::SourceTables;
use crate::models::{LiveNewsArticle, RawArticle};

/// What [`ArticleStore::upsert`] did with an offered record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// New URL, record appended.
    Inserted,
    /// Known URL with a changed title, record re-annotated and replaced.
    Updated,
    /// Known URL, same title, nothing to do.
    Unchanged,
}

/// The set of annotated articles, keyed by `web_url`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleStore {
    next_id: u64,
    articles: Vec<LiveNewsArticle>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            articles: Vec::new(),
        }
    }

    /// Load the store from `path`, starting empty when no file exists yet.
    pub async fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        match fs::read(path).await {
            Ok(bytes) => {
                let store: Self = serde_json::from_slice(&bytes)?;
                info!(
                    path = %path.display(),
                    articles = store.articles.len(),
                    "Loaded article store"
                );
                Ok(store)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "No existing article store; starting empty");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write the store to `path`, creating parent directories as needed.
    #[instrument(level = "info", skip_all)]
    pub async fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string(self)?;
        fs::write(path, json).await?;
        info!(path = %path.display(), articles = self.articles.len(), "Saved article store");
        Ok(())
    }

    /// Whether the store already holds this URL with this exact title.
    ///
    /// Callers use this to skip classification for records that would come
    /// back [`UpsertOutcome::Unchanged`] anyway.
    pub fn is_current(&self, raw: &RawArticle) -> bool {
        self.find(&raw.web_url)
            .map(|existing| existing.title == raw.title)
            .unwrap_or(false)
    }

    /// Offer a raw article to the store.
    ///
    /// New URLs are annotated and appended under a fresh id. A known URL
    /// whose title changed is re-annotated under its existing id, replacing
    /// the old record. A known URL with an unchanged title is left alone.
    pub fn upsert(
        &mut self,
        raw: &RawArticle,
        raw_prediction: bool,
        tables: &SourceTables,
    ) -> UpsertOutcome {
        match self.articles.iter().position(|a| a.web_url == raw.web_url) {
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.articles
                    .push(LiveNewsArticle::annotate(id, raw.clone(), raw_prediction, tables));
                UpsertOutcome::Inserted
            }
            Some(index) if self.articles[index].title != raw.title => {
                let id = self.articles[index].id;
                self.articles[index] =
                    LiveNewsArticle::annotate(id, raw.clone(), raw_prediction, tables);
                UpsertOutcome::Updated
            }
            Some(_) => UpsertOutcome::Unchanged,
        }
    }

    /// The most recent records carrying an image, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&LiveNewsArticle> {
        self.articles
            .iter()
            .rev()
            .filter(|a| a.has_image())
            .take(limit)
            .collect()
    }

    /// The most recent records in `category` carrying an image, newest first.
    pub fn by_category(&self, category: &str, limit: usize) -> Vec<&LiveNewsArticle> {
        self.articles
            .iter()
            .rev()
            .filter(|a| a.has_image() && a.news_category == category)
            .take(limit)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    fn find(&self, web_url: &str) -> Option<&LiveNewsArticle> {
        self.articles.iter().find(|a| a.web_url == web_url)
    }
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, web_url: &str) -> RawArticle {
        RawArticle {
            title: title.to_string(),
            web_url: web_url.to_string(),
            img_url: "https://media.example.com/thumb.jpg".to_string(),
            category: "News".to_string(),
            section_id: "world".to_string(),
            section_name: "World news".to_string(),
            article_type: "article".to_string(),
            publication_date: "2026-08-20T09:15:00Z".to_string(),
        }
    }

    #[test]
    fn test_insert_then_unchanged() {
        let tables = SourceTables::builtin();
        let mut store = ArticleStore::new();
        let article = raw("Headline", "https://example.org/a");

        assert!(!store.is_current(&article));
        assert_eq!(store.upsert(&article, true, &tables), UpsertOutcome::Inserted);
        assert!(store.is_current(&article));
        assert_eq!(store.upsert(&article, true, &tables), UpsertOutcome::Unchanged);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let tables = SourceTables::builtin();
        let mut store = ArticleStore::new();
        store.upsert(&raw("First", "https://example.org/a"), true, &tables);
        store.upsert(&raw("Second", "https://example.org/b"), true, &tables);

        assert_eq!(store.articles[0].id, 1);
        assert_eq!(store.articles[1].id, 2);
    }

    #[test]
    fn test_title_change_reannotates_under_same_id() {
        let tables = SourceTables::builtin();
        let mut store = ArticleStore::new();
        let url = "https://example.org/evolving";

        store.upsert(&raw("Plain headline", url), true, &tables);
        assert!(!store.articles[0].is_fact_check_article);

        // retitled into fact-check territory; derived fields must follow
        let outcome = store.upsert(&raw("Claim debunked as hoax", url), true, &tables);
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(store.len(), 1);
        assert_eq!(store.articles[0].id, 1);
        assert_eq!(store.articles[0].title, "Claim debunked as hoax");
        assert!(store.articles[0].is_fact_check_article);
    }

    #[test]
    fn test_recent_is_newest_first_and_skips_imageless() {
        let tables = SourceTables::builtin();
        let mut store = ArticleStore::new();
        store.upsert(&raw("Oldest", "https://example.org/1"), true, &tables);
        store.upsert(&raw("Middle", "https://example.org/2"), true, &tables);
        store.upsert(&raw("Newest", "https://example.org/3"), true, &tables);
        store.articles[1].img_url = String::new();

        let recent = store.recent(10);
        let titles: Vec<&str> = recent.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Oldest"]);

        assert_eq!(store.recent(1).len(), 1);
        assert_eq!(store.recent(1)[0].title, "Newest");
    }

    #[test]
    fn test_by_category_filters() {
        let tables = SourceTables::builtin();
        let mut store = ArticleStore::new();
        let mut sport = raw("Match report", "https://example.org/sport");
        sport.category = "Sport".to_string();
        store.upsert(&sport, true, &tables);
        store.upsert(&raw("World story", "https://example.org/world"), true, &tables);

        let sport_only = store.by_category("Sport", 10);
        assert_eq!(sport_only.len(), 1);
        assert_eq!(sport_only[0].title, "Match report");
        assert!(store.by_category("Culture", 10).is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let tables = SourceTables::builtin();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");

        let mut store = ArticleStore::new();
        store.upsert(&raw("Persisted", "https://www.bbc.com/news/x"), false, &tables);
        store.save(&path).await.unwrap();

        let loaded = ArticleStore::load(&path).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.articles[0].title, "Persisted");
        assert_eq!(loaded.articles[0].prediction_reasoning, "High credibility source overrides ML prediction");
        assert_eq!(loaded.next_id, 2);
    }

    #[tokio::test]
    async fn test_load_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let store = ArticleStore::load(&path).await.unwrap();
        assert_eq!(store.len(), 0);
        assert_eq!(store.next_id, 1);
    }

    #[tokio::test]
    async fn test_load_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        assert!(ArticleStore::load(&path).await.is_err());
    }
}
