//! Final-verdict reconciliation.
//!
//! The raw headline classifier knows nothing about who published an article.
//! Reconciliation layers the credibility signals on top: fact-check pieces
//! and trusted outlets can override a raw FALSE, while everything else passes
//! the classifier's call through untouched. Rule order is load-bearing; when
//! an article satisfies several rules, the earliest one decides.

use tracing::debug;

use super::factcheck::FactCheckHit;
use super::tables::{SourceTables, Tier};

/// Outcome of reconciling the raw classifier output with credibility signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The final trust verdict served to readers.
    pub final_prediction: bool,
    /// Human-readable justification for the verdict.
    pub reasoning: String,
}

/// Apply the reconciliation rules to precomputed credibility signals.
///
/// Rules in order, first applicable wins:
///
/// 1. The article is itself a fact-check piece. Its existence is truthful
///    reporting about some claim, so the article itself is TRUE.
/// 2. A HIGH-credibility source with a raw FALSE: the source outweighs the
///    classifier. There is deliberately no mirror rule for a raw TRUE.
/// 3. A FACT_CHECKER-tier source not detected as a fact-check piece: the
///    outlet is trusted, TRUE.
/// 4. Anything else: the classifier's prediction stands.
pub fn reconcile_signals(
    credibility: Tier,
    fact_check: Option<&FactCheckHit>,
    ml_prediction: bool,
) -> Reconciliation {
    if let Some(hit) = fact_check {
        return Reconciliation {
            final_prediction: true,
            reasoning: format!("Fact-check article from {}", hit.source_name),
        };
    }

    if credibility == Tier::High && !ml_prediction {
        return Reconciliation {
            final_prediction: true,
            reasoning: "High credibility source overrides ML prediction".to_string(),
        };
    }

    if credibility == Tier::FactChecker {
        return Reconciliation {
            final_prediction: true,
            reasoning: "Trusted fact-checking organization".to_string(),
        };
    }

    Reconciliation {
        final_prediction: ml_prediction,
        reasoning: "Based on ML prediction".to_string(),
    }
}

impl SourceTables {
    /// Derive the credibility signals for `(url, title)` and reconcile them
    /// with the raw classifier prediction.
    pub fn reconcile(&self, url: &str, title: &str, ml_prediction: bool) -> Reconciliation {
        let credibility = self.classify(url);
        let fact_check = self.detect_fact_check(url, title);
        let outcome = reconcile_signals(credibility, fact_check.as_ref(), ml_prediction);
        debug!(
            %credibility,
            is_fact_check = fact_check.is_some(),
            ml_prediction,
            final_prediction = outcome.final_prediction,
            "Reconciled verdict"
        );
        outcome
    }
}
