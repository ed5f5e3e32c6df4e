//! Fact-check article detection.
//!
//! A fact-check article is one whose purpose is to debunk or verify a
//! separate claim, as opposed to being the claim itself. Detection runs in
//! two steps: membership of the URL's domain in the fact-checker table, then
//! a keyword scan of the title as fallback. Detected articles also get a
//! verdict token extracted from the title so the stored record can say what
//! the fact-checker concluded.

use serde::{Deserialize, Serialize};

use super::domain::extract_domain;
use super::tables::SourceTables;

/// Source name attributed to keyword-only detections.
pub const UNKNOWN_FACT_CHECKER: &str = "Unknown Fact Checker";

/// Title keywords that mark fact-check content from outlets outside the
/// fact-checker table.
const FACT_CHECK_KEYWORDS: &[&str] = &[
    "fact check",
    "fact-check",
    "factcheck",
    "debunk",
    "debunked",
    "debunking",
    "fake news",
    "misleading",
    "false claim",
    "misinformation",
    "disinformation",
    "fact checked",
    "claim check",
    "truth check",
    "viral claim",
    "fake",
    "hoax",
];

const FALSE_VERDICT_WORDS: &[&str] = &["false", "fake", "hoax", "misleading", "fabricated"];
const TRUE_VERDICT_WORDS: &[&str] = &["true", "verified", "confirmed", "correct"];
const PARTIAL_VERDICT_WORDS: &[&str] = &["partially", "partly", "mixed", "incomplete"];

/// Verdict token extracted from a fact-check article's title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TitleVerdict {
    /// The checked claim is reported false.
    False,
    /// The checked claim is reported true.
    True,
    /// The checked claim is reported partially or partly true.
    PartiallyTrue,
    /// Fact-check content whose title carries no verdict signal.
    FactCheck,
}

/// A positive fact-check detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactCheckHit {
    /// The fact-checking outlet, or [`UNKNOWN_FACT_CHECKER`] when detection
    /// came from title keywords alone.
    pub source_name: String,
    /// Verdict token extracted from the title.
    pub verdict: TitleVerdict,
}

/// Extract a verdict token from a fact-check title.
///
/// Scans the lower-cased title against the verdict word groups in a fixed
/// order. FALSE words are checked first and win outright, so a title naming
/// both outcomes ("misleading but partly correct") reads as FALSE. Titles
/// matching no group fall back to [`TitleVerdict::FactCheck`].
pub fn extract_verdict_from_title(title: &str) -> TitleVerdict {
    let title = title.to_lowercase();
    if FALSE_VERDICT_WORDS.iter().any(|word| title.contains(word)) {
        TitleVerdict::False
    } else if TRUE_VERDICT_WORDS.iter().any(|word| title.contains(word)) {
        TitleVerdict::True
    } else if PARTIAL_VERDICT_WORDS.iter().any(|word| title.contains(word)) {
        TitleVerdict::PartiallyTrue
    } else {
        TitleVerdict::FactCheck
    }
}

impl SourceTables {
    /// Decide whether an article is itself a fact-check piece.
    ///
    /// Step 1 checks the URL's domain against the fact-checker table, using
    /// the same bidirectional containment rule as classification; a hit
    /// names the outlet. Step 2 falls back to scanning the lower-cased title
    /// for fact-check keywords, attributing hits to
    /// [`UNKNOWN_FACT_CHECKER`]. A domain hit alone is sufficient, whatever
    /// the title says.
    ///
    /// # Returns
    ///
    /// The detection with its title verdict, or `None` when the article is
    /// ordinary reporting rather than fact-check content.
    pub fn detect_fact_check(&self, url: &str, title: &str) -> Option<FactCheckHit> {
        if let Some(domain) = extract_domain(url) {
            if let Some(name) = self.fact_checker_name(&domain) {
                return Some(FactCheckHit {
                    source_name: name.to_string(),
                    verdict: extract_verdict_from_title(title),
                });
            }
        }

        let title_lower = title.to_lowercase();
        if FACT_CHECK_KEYWORDS.iter().any(|keyword| title_lower.contains(keyword)) {
            return Some(FactCheckHit {
                source_name: UNKNOWN_FACT_CHECKER.to_string(),
                verdict: extract_verdict_from_title(title),
            });
        }

        None
    }
}
