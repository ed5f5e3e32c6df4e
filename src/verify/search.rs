//! Live news search.
//!
//! [`NewsSearch`] is the seam the claim verifier pulls evidence through;
//! [`SerpApiClient`] is the production implementation, backed by SerpAPI's
//! Google News engine. Tests substitute in-memory fakes at the trait.

use std::error::Error;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// One piece of search evidence for a claim.
///
/// Ephemeral: produced per verification request, returned inside the report,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub source: String,
    pub snippet: String,
    pub link: String,
}

/// A collaborator that can search live news for a query.
pub trait NewsSearch {
    /// Run a news search for `query` and return the top matching results.
    async fn search_news(&self, query: &str) -> Result<Vec<SearchResult>, Box<dyn Error>>;
}

/// Results retained per search.
const RESULT_LIMIT: usize = 5;

/// SerpAPI client using the Google engine in news mode.
#[derive(Debug, Clone)]
pub struct SerpApiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl SerpApiClient {
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    news_results: Vec<SerpApiNewsResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SerpApiNewsResult {
    title: String,
    source: String,
    snippet: String,
    link: String,
}

impl NewsSearch for SerpApiClient {
    #[instrument(level = "info", skip_all, fields(query_len = query.len()))]
    async fn search_news(&self, query: &str) -> Result<Vec<SearchResult>, Box<dyn Error>> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("tbm", "nws"),
                ("num", "5"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let parsed: SerpApiResponse = response.json().await?;
        let results: Vec<SearchResult> = parsed
            .news_results
            .into_iter()
            .take(RESULT_LIMIT)
            .map(|raw| SearchResult {
                title: raw.title,
                source: raw.source,
                snippet: raw.snippet,
                link: raw.link,
            })
            .collect();

        info!(count = results.len(), "News search completed");
        Ok(results)
    }
}
