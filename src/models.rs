//! Data models for news articles and their annotated representations.
//!
//! This module defines the core records flowing through the pipeline:
//! - [`RawArticle`]: A complete ingestion record produced by a feed adapter
//! - [`LiveNewsArticle`]: The stored record, annotated with credibility
//!   signals and the reconciled trust verdict
//!
//! The derived fields on [`LiveNewsArticle`] are a pure function of
//! `(web_url, title)` plus the raw prediction. [`LiveNewsArticle::annotate`]
//! is the only place they are computed, so a record can never carry signals
//! that disagree with its URL and title.

use serde::{Deserialize, Serialize};

use crate::credibility::{SourceTables, Tier, TitleVerdict, extract_domain};

/// A raw article record as produced by a feed adapter.
///
/// Feed adapters only emit complete records: every field is populated, and
/// articles without a usable image never make it this far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    /// The article headline.
    pub title: String,
    /// Canonical article URL; the identity key in the store.
    pub web_url: String,
    /// Thumbnail or lead-image URL.
    pub img_url: String,
    /// Reader-facing category, e.g. "News" or "Sport".
    pub category: String,
    /// Source-specific section identifier.
    pub section_id: String,
    /// Human-readable section name.
    pub section_name: String,
    /// Content type as reported by the source, usually "article".
    pub article_type: String,
    /// Publication timestamp in RFC 3339 form.
    pub publication_date: String,
}

/// A stored, fully annotated article record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveNewsArticle {
    /// Monotonic store identifier; higher means newer.
    pub id: u64,
    pub title: String,
    pub publication_date: String,
    pub news_category: String,
    /// Final trust verdict served to readers, after reconciliation.
    pub prediction: bool,
    /// The classifier's output before any credibility override.
    pub raw_prediction: bool,
    /// Justification for the final verdict.
    pub prediction_reasoning: String,
    pub section_id: String,
    pub section_name: String,
    #[serde(rename = "type")]
    pub article_type: String,
    pub web_url: String,
    pub img_url: String,
    /// Credibility tier of the publishing source.
    pub source_credibility: Tier,
    /// Whether the article is itself a fact-check piece.
    pub is_fact_check_article: bool,
    /// Verdict extracted from the title, for fact-check pieces only.
    pub fact_check_verdict: Option<TitleVerdict>,
    /// Normalized domain of `web_url`, when one could be extracted.
    pub source_domain: Option<String>,
}

impl LiveNewsArticle {
    /// Annotate a raw article with credibility signals and the reconciled
    /// verdict.
    ///
    /// # Arguments
    ///
    /// * `id` - Store identifier for the new record
    /// * `raw` - The ingestion record from a feed adapter
    /// * `raw_prediction` - The classifier's call on the headline
    /// * `tables` - Credibility tables to derive signals from
    pub fn annotate(id: u64, raw: RawArticle, raw_prediction: bool, tables: &SourceTables) -> Self {
        let source_credibility = tables.classify(&raw.web_url);
        let fact_check = tables.detect_fact_check(&raw.web_url, &raw.title);
        let reconciled = tables.reconcile(&raw.web_url, &raw.title, raw_prediction);
        let source_domain = extract_domain(&raw.web_url);

        Self {
            id,
            title: raw.title,
            publication_date: raw.publication_date,
            news_category: raw.category,
            prediction: reconciled.final_prediction,
            raw_prediction,
            prediction_reasoning: reconciled.reasoning,
            section_id: raw.section_id,
            section_name: raw.section_name,
            article_type: raw.article_type,
            web_url: raw.web_url,
            img_url: raw.img_url,
            source_credibility,
            is_fact_check_article: fact_check.is_some(),
            fact_check_verdict: fact_check.map(|hit| hit.verdict),
            source_domain,
        }
    }

    /// Whether the record carries a usable image URL.
    pub fn has_image(&self) -> bool {
        !self.img_url.is_empty() && self.img_url != "None"
    }
}
