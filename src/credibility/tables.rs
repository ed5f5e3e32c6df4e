//! Source-credibility tiers and the lookup tables behind them.
//!
//! Three ordered tables partition known outlets into fact-checking,
//! high-credibility, and medium-credibility tiers. Matching is bidirectional
//! substring containment: a table entry matches a domain when either string
//! contains the other. That single rule covers both subdomains
//! (`edition.bbc.com` hits the `bbc.com` entry) and path-qualified entries
//! (`reuters.com` hits the `reuters.com/fact-check` entry), at the cost of
//! occasional false positives on lookalike domains. The rule and the tier
//! precedence order are relied on by the reconciler and must stay stable.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::extract_domain;

/// Fact-checking organizations, as `(domain fragment, display name)` pairs.
///
/// Some fragments carry a path segment so that only an outlet's fact-check
/// desk qualifies, not the whole newsroom.
const FACT_CHECKING_SOURCES: &[(&str, &str)] = &[
    ("altnews.in", "AltNews"),
    ("factcheck.afp.com", "AFP Fact Check"),
    ("thequint.com/news/webqoof", "The Quint WebQoof"),
    ("boomlive.in", "BOOM Live"),
    ("newschecker.in", "Newschecker"),
    ("vishvasnews.com", "Vishvas News"),
    ("indiatoday.in/fact-check", "India Today Fact Check"),
    ("factly.in", "Factly"),
    ("reuters.com/fact-check", "Reuters Fact Check"),
    ("apnews.com/ap-fact-check", "AP Fact Check"),
    ("snopes.com", "Snopes"),
    ("fullfact.org", "Full Fact"),
    ("politifact.com", "PolitiFact"),
];

/// Established outlets whose reporting outweighs the headline classifier.
const HIGH_CREDIBILITY_SOURCES: &[(&str, &str)] = &[
    ("theguardian.com", "The Guardian"),
    ("bbc.com", "BBC"),
    ("bbc.co.uk", "BBC"),
    ("reuters.com", "Reuters"),
    ("apnews.com", "Associated Press"),
    ("thehindubusinessline.com", "The Hindu Business Line"),
    ("thehindu.com", "The Hindu"),
    ("ndtv.com", "NDTV"),
    ("indianexpress.com", "Indian Express"),
    ("timesofindia.indiatimes.com", "Times of India"),
    ("scroll.in", "Scroll"),
    ("thewire.in", "The Wire"),
    ("news.google.com", "Google News"),
];

/// Mainstream outlets with a weaker corroboration record.
const MEDIUM_CREDIBILITY_SOURCES: &[(&str, &str)] = &[
    ("hindustantimes.com", "Hindustan Times"),
    ("zeenews.india.com", "Zee News"),
    ("dnaindia.com", "DNA India"),
    ("news18.com", "News18"),
    ("republicworld.com", "Republic World"),
    ("aninews.in", "ANI"),
    ("onmanorama.com", "Onmanorama"),
];

/// Credibility tier assigned to a news source.
///
/// `Low` is part of the vocabulary for completeness but no built-in table
/// entry maps to it; unlisted sources land on `Unknown` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    /// A dedicated fact-checking organization.
    FactChecker,
    /// An established outlet trusted over classifier output.
    High,
    /// A mainstream outlet without override weight.
    Medium,
    /// A source known to be unreliable.
    Low,
    /// Anything not in the tables, including unparseable URLs.
    Unknown,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::FactChecker => "FACT_CHECKER",
            Tier::High => "HIGH",
            Tier::Medium => "MEDIUM",
            Tier::Low => "LOW",
            Tier::Unknown => "UNKNOWN",
        };
        write!(f, "{label}")
    }
}

/// The credibility tables consulted by classification, fact-check detection,
/// and verdict reconciliation.
///
/// Immutable after construction, so one instance can be shared freely across
/// tasks. Constructed in `main` and passed into every collaborator that
/// needs it rather than living in a global.
#[derive(Debug, Clone)]
pub struct SourceTables {
    fact_checkers: Vec<(String, String)>,
    high_credibility: Vec<(String, String)>,
    medium_credibility: Vec<(String, String)>,
}

impl SourceTables {
    /// Build the tables from the built-in source lists.
    pub fn builtin() -> Self {
        let owned = |entries: &[(&str, &str)]| {
            entries
                .iter()
                .map(|(fragment, name)| (fragment.to_string(), name.to_string()))
                .collect()
        };
        Self {
            fact_checkers: owned(FACT_CHECKING_SOURCES),
            high_credibility: owned(HIGH_CREDIBILITY_SOURCES),
            medium_credibility: owned(MEDIUM_CREDIBILITY_SOURCES),
        }
    }

    /// Classify a URL into a credibility tier.
    ///
    /// Tables are consulted in precedence order: fact-checkers first, then
    /// high, then medium. The first table containing a matching entry wins,
    /// so a URL matching both a fact-checker entry and a high-credibility
    /// entry (`reuters.com/fact-check` vs `reuters.com`) classifies as
    /// [`Tier::FactChecker`]. URLs with no usable domain and domains in no
    /// table classify as [`Tier::Unknown`].
    pub fn classify(&self, url: &str) -> Tier {
        let Some(domain) = extract_domain(url) else {
            return Tier::Unknown;
        };
        if Self::match_in(&self.fact_checkers, &domain).is_some() {
            return Tier::FactChecker;
        }
        if Self::match_in(&self.high_credibility, &domain).is_some() {
            return Tier::High;
        }
        if Self::match_in(&self.medium_credibility, &domain).is_some() {
            return Tier::Medium;
        }
        Tier::Unknown
    }

    /// Look up the display name of the fact-checker matching `domain`, if any.
    pub(crate) fn fact_checker_name(&self, domain: &str) -> Option<&str> {
        Self::match_in(&self.fact_checkers, domain)
    }

    fn match_in<'a>(entries: &'a [(String, String)], domain: &str) -> Option<&'a str> {
        entries
            .iter()
            .find(|(fragment, _)| Self::fragment_matches(fragment, domain))
            .map(|(_, name)| name.as_str())
    }

    /// The bidirectional containment rule shared by every table lookup.
    fn fragment_matches(fragment: &str, domain: &str) -> bool {
        domain.contains(fragment) || fragment.contains(domain)
    }
}

impl Default for SourceTables {
    fn default() -> Self {
        Self::builtin()
    }
}
