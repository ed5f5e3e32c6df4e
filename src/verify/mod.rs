//! Search-backed claim verification.
//!
//! [`ClaimVerifier`] verifies an ad-hoc claim in two steps: pull live news
//! evidence through a [`NewsSearch`] collaborator, then ask a generation
//! collaborator for a verdict over the annotated evidence. Every failure
//! mode degrades into a [`VerificationReport`]; the verifier never
//! propagates an error past its own boundary.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`search`] | the evidence seam and SerpAPI client |
//! | [`generate`] | the generation seam, chat client, retry decorator |
//! | [`parser`] | typed extraction of the verdict markers |

pub mod generate;
pub mod parser;
pub mod search;

pub use generate::{AskAsync, ChatCompletionsClient, RetryAsk};
pub use parser::{ResponseVerdict, Verdict, parse_verdict_response};
pub use search::{NewsSearch, SearchResult, SerpApiClient};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::credibility::{SourceTables, Tier};

/// High-credibility outlets required in the evidence before the
/// corroboration bonus applies.
const CORROBORATION_THRESHOLD: usize = 3;
/// Confidence bonus for well-corroborated evidence, applied after parsing
/// and capped so confidence never exceeds 100.
const CORROBORATION_BONUS: u8 = 10;

/// Credibility tallies across one evidence set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceAnalysis {
    /// Results whose link classifies as a HIGH-credibility source.
    pub high_credibility_count: usize,
    /// Results detected as fact-check content.
    pub fact_check_count: usize,
}

/// Outcome of one claim verification.
///
/// Constructed fresh per request and returned to the caller; never stored.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// True exactly when the verdict is TRUE.
    pub prediction: bool,
    pub verdict: Verdict,
    /// Confidence in the verdict, 0 to 100, after the corroboration bonus.
    pub confidence: u8,
    /// The full generation response, or the error message on failure.
    pub detailed_analysis: String,
    pub source_analysis: SourceAnalysis,
    /// The evidence the verdict was based on.
    pub search_results: Vec<SearchResult>,
}

/// Verifies claims against live news evidence.
///
/// Both collaborators are injected, so tests can drive the whole pipeline
/// with fakes and production wires in [`SerpApiClient`] plus a
/// [`RetryAsk`]-wrapped [`ChatCompletionsClient`].
pub struct ClaimVerifier<S, G> {
    search: S,
    generator: G,
    tables: SourceTables,
}

impl<S, G> ClaimVerifier<S, G>
where
    S: NewsSearch,
    G: AskAsync<Response = String>,
{
    pub fn new(search: S, generator: G, tables: SourceTables) -> Self {
        Self {
            search,
            generator,
            tables,
        }
    }

    /// Verify a claim end to end.
    ///
    /// Search failures and empty evidence short-circuit to UNVERIFIABLE with
    /// zero confidence; generation failures surface as
    /// [`Verdict::Error`]. The report always comes back, whatever went
    /// wrong.
    #[instrument(level = "info", skip_all, fields(claim_len = claim.len()))]
    pub async fn verify(&self, claim: &str) -> VerificationReport {
        let results = match self.search.search_news(claim).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "News search failed");
                return VerificationReport {
                    prediction: false,
                    verdict: Verdict::Unverifiable,
                    confidence: 0,
                    detailed_analysis: format!("Search error: {e}"),
                    source_analysis: SourceAnalysis::default(),
                    search_results: Vec::new(),
                };
            }
        };

        if results.is_empty() {
            info!("No search results for claim");
            return VerificationReport {
                prediction: false,
                verdict: Verdict::Unverifiable,
                confidence: 0,
                detailed_analysis: "No search results found for this news.".to_string(),
                source_analysis: SourceAnalysis::default(),
                search_results: Vec::new(),
            };
        }

        self.analyze(claim, results).await
    }

    /// Ask the generation collaborator for a verdict over gathered evidence.
    async fn analyze(&self, claim: &str, results: Vec<SearchResult>) -> VerificationReport {
        let analysis = self.tally(&results);
        let prompt = build_prompt(claim, &results, &self.tables);

        let response = match self.generator.ask(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Verdict generation failed");
                return VerificationReport {
                    prediction: false,
                    verdict: Verdict::Error,
                    confidence: 0,
                    detailed_analysis: format!("Error analyzing news: {e}"),
                    source_analysis: analysis,
                    search_results: results,
                };
            }
        };

        let parsed = parse_verdict_response(&response);
        if !parsed.verdict_marker_found || !parsed.confidence_marker_found {
            warn!(
                verdict_marker = parsed.verdict_marker_found,
                confidence_marker = parsed.confidence_marker_found,
                "Generation response deviated from the marker contract"
            );
        }
        let mut confidence = parsed.confidence;
        if analysis.high_credibility_count >= CORROBORATION_THRESHOLD {
            confidence = confidence.saturating_add(CORROBORATION_BONUS).min(100);
        }

        info!(
            verdict = ?parsed.verdict,
            confidence,
            high_credibility = analysis.high_credibility_count,
            fact_checks = analysis.fact_check_count,
            "Claim analysis completed"
        );

        VerificationReport {
            prediction: parsed.verdict == Verdict::True,
            verdict: parsed.verdict,
            confidence,
            detailed_analysis: response,
            source_analysis: analysis,
            search_results: results,
        }
    }

    /// Count high-credibility and fact-check results in the evidence.
    fn tally(&self, results: &[SearchResult]) -> SourceAnalysis {
        let mut analysis = SourceAnalysis::default();
        for result in results {
            if self.tables.classify(&result.link) == Tier::High {
                analysis.high_credibility_count += 1;
            }
            if self.tables.detect_fact_check(&result.link, &result.title).is_some() {
                analysis.fact_check_count += 1;
            }
        }
        analysis
    }
}

/// Assemble the analysis prompt: the claim, the numbered evidence annotated
/// with credibility signals, and the response contract the parser expects.
fn build_prompt(claim: &str, results: &[SearchResult], tables: &SourceTables) -> String {
    let mut context = String::new();
    for (idx, result) in results.iter().enumerate() {
        let mut annotation = format!("Credibility: {}", tables.classify(&result.link));
        if let Some(hit) = tables.detect_fact_check(&result.link, &result.title) {
            annotation.push_str(&format!(", fact-check piece from {}", hit.source_name));
        }
        context.push_str(&format!(
            "{}. {}\n   Source: {}\n   Snippet: {}\n   {}\n\n",
            idx + 1,
            result.title,
            result.source,
            result.snippet,
            annotation,
        ));
    }

    format!(
        "You are an expert news fact-checker. Analyze the following news claim against real search results.\n\
         \n\
         News Claim: \"{claim}\"\n\
         \n\
         Search Results:\n\
         \n\
         {context}\
         Based on the search results above, provide:\n\
         1. A verdict: Is this claim TRUE, FALSE, or UNVERIFIABLE?\n\
         2. Your confidence level (0-100%)\n\
         3. A brief explanation (2-3 sentences)\n\
         4. Key supporting or contradicting facts from the search results\n\
         \n\
         Format your response as:\n\
         VERDICT: [TRUE/FALSE/UNVERIFIABLE]\n\
         CONFIDENCE: [0-100]%\n\
         EXPLANATION: [Your explanation]\n\
         KEY FACTS: [Key facts from search results]"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    struct FakeSearch {
        results: Vec<SearchResult>,
    }

    impl NewsSearch for FakeSearch {
        async fn search_news(&self, _query: &str) -> Result<Vec<SearchResult>, Box<dyn Error>> {
            Ok(self.results.clone())
        }
    }

    struct FailingSearch;

    impl NewsSearch for FailingSearch {
        async fn search_news(&self, _query: &str) -> Result<Vec<SearchResult>, Box<dyn Error>> {
            Err("quota exhausted".into())
        }
    }

    struct FakeGenerator {
        response: String,
    }

    impl AskAsync for FakeGenerator {
        type Response = String;

        async fn ask(&self, _text: &str) -> Result<String, Box<dyn Error>> {
            Ok(self.response.clone())
        }
    }

    struct FailingGenerator;

    impl AskAsync for FailingGenerator {
        type Response = String;

        async fn ask(&self, _text: &str) -> Result<String, Box<dyn Error>> {
            Err("model unavailable".into())
        }
    }

    fn result(title: &str, link: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            source: "Test Wire".to_string(),
            snippet: "snippet text".to_string(),
            link: link.to_string(),
        }
    }

    fn high_credibility_evidence() -> Vec<SearchResult> {
        vec![
            result("Minister announces relief package", "https://www.bbc.com/news/a"),
            result("Relief package confirmed", "https://www.theguardian.com/world/b"),
            result("Cabinet approves relief", "https://www.ndtv.com/india-news/c"),
        ]
    }

    #[tokio::test]
    async fn test_search_failure_degrades_to_unverifiable() {
        let verifier = ClaimVerifier::new(
            FailingSearch,
            FakeGenerator {
                response: "unused".to_string(),
            },
            SourceTables::builtin(),
        );
        let report = verifier.verify("some claim").await;
        assert_eq!(report.verdict, Verdict::Unverifiable);
        assert_eq!(report.confidence, 0);
        assert!(!report.prediction);
        assert!(report.detailed_analysis.starts_with("Search error:"));
        assert!(report.search_results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_results_short_circuit() {
        let verifier = ClaimVerifier::new(
            FakeSearch { results: vec![] },
            FakeGenerator {
                response: "unused".to_string(),
            },
            SourceTables::builtin(),
        );
        let report = verifier.verify("some claim").await;
        assert_eq!(report.verdict, Verdict::Unverifiable);
        assert_eq!(report.confidence, 0);
        assert_eq!(report.detailed_analysis, "No search results found for this news.");
    }

    #[tokio::test]
    async fn test_generation_failure_reports_error_verdict() {
        let verifier = ClaimVerifier::new(
            FakeSearch {
                results: high_credibility_evidence(),
            },
            FailingGenerator,
            SourceTables::builtin(),
        );
        let report = verifier.verify("some claim").await;
        assert_eq!(report.verdict, Verdict::Error);
        assert_eq!(report.confidence, 0);
        assert!(report.detailed_analysis.starts_with("Error analyzing news:"));
        // evidence was gathered, so the tallies and results survive
        assert_eq!(report.source_analysis.high_credibility_count, 3);
        assert_eq!(report.search_results.len(), 3);
    }

    #[tokio::test]
    async fn test_true_verdict_with_parsed_confidence() {
        let verifier = ClaimVerifier::new(
            FakeSearch {
                results: vec![result("Story", "https://example-random-blog.net/a")],
            },
            FakeGenerator {
                response: "VERDICT: TRUE\nCONFIDENCE: 85%\nEXPLANATION: solid".to_string(),
            },
            SourceTables::builtin(),
        );
        let report = verifier.verify("some claim").await;
        assert_eq!(report.verdict, Verdict::True);
        assert!(report.prediction);
        assert_eq!(report.confidence, 85);
        assert_eq!(report.source_analysis.high_credibility_count, 0);
    }

    #[tokio::test]
    async fn test_corroboration_bonus_applies_and_caps() {
        let verifier = ClaimVerifier::new(
            FakeSearch {
                results: high_credibility_evidence(),
            },
            FakeGenerator {
                response: "VERDICT: TRUE\nCONFIDENCE: 92%".to_string(),
            },
            SourceTables::builtin(),
        );
        let report = verifier.verify("some claim").await;
        assert_eq!(report.source_analysis.high_credibility_count, 3);
        // 92 + 10 would exceed the scale; capped at 100
        assert_eq!(report.confidence, 100);
    }

    #[tokio::test]
    async fn test_bonus_needs_three_high_credibility_results() {
        let verifier = ClaimVerifier::new(
            FakeSearch {
                results: high_credibility_evidence().into_iter().take(2).collect(),
            },
            FakeGenerator {
                response: "VERDICT: TRUE\nCONFIDENCE: 80%".to_string(),
            },
            SourceTables::builtin(),
        );
        let report = verifier.verify("some claim").await;
        assert_eq!(report.source_analysis.high_credibility_count, 2);
        assert_eq!(report.confidence, 80);
    }

    #[tokio::test]
    async fn test_false_verdict_means_prediction_false() {
        let verifier = ClaimVerifier::new(
            FakeSearch {
                results: vec![result(
                    "Claim debunked as hoax",
                    "https://altnews.in/review",
                )],
            },
            FakeGenerator {
                response: "VERDICT: FALSE\nCONFIDENCE: 90%".to_string(),
            },
            SourceTables::builtin(),
        );
        let report = verifier.verify("some claim").await;
        assert_eq!(report.verdict, Verdict::False);
        assert!(!report.prediction);
        assert_eq!(report.source_analysis.fact_check_count, 1);
    }

    #[test]
    fn test_prompt_contains_claim_and_annotated_evidence() {
        let tables = SourceTables::builtin();
        let results = vec![
            result("Relief announced", "https://www.bbc.com/news/a"),
            result("Claim is fake, says checker", "https://altnews.in/review"),
        ];
        let prompt = build_prompt("The minister resigned", &results, &tables);

        assert!(prompt.contains("News Claim: \"The minister resigned\""));
        assert!(prompt.contains("1. Relief announced"));
        assert!(prompt.contains("Credibility: HIGH"));
        assert!(prompt.contains("fact-check piece from AltNews"));
        assert!(prompt.contains("VERDICT: [TRUE/FALSE/UNVERIFIABLE]"));
        assert!(prompt.contains("CONFIDENCE: [0-100]%"));
    }

    #[test]
    fn test_tally_counts_both_signals() {
        let verifier = ClaimVerifier::new(
            FakeSearch { results: vec![] },
            FakeGenerator {
                response: String::new(),
            },
            SourceTables::builtin(),
        );
        let results = vec![
            result("Plain story", "https://www.bbc.com/news/a"),
            result("Fact check: viral video is fake", "https://www.bbc.com/news/b"),
            result("Unrelated", "https://example-random-blog.net/c"),
        ];
        let analysis = verifier.tally(&results);
        // both bbc links are HIGH; the second also trips keyword detection
        assert_eq!(analysis.high_credibility_count, 2);
        assert_eq!(analysis.fact_check_count, 1);
    }
}
