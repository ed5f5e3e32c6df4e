//! Typed parsing of generation responses.
//!
//! The generation collaborator answers in free text following a marker
//! contract (`VERDICT:`, `CONFIDENCE:`). Scanning for those markers lives
//! here as a dedicated parser that returns a typed result plus explicit
//! marker-found flags, so callers and tests can tell a defaulted verdict
//! apart from an explicit UNVERIFIABLE.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Confidence used when no parsable `CONFIDENCE:` line is present.
const DEFAULT_CONFIDENCE: u8 = 50;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit-run pattern"));

/// Final verdict for a verified claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    True,
    False,
    Unverifiable,
    /// The generation collaborator failed outright.
    Error,
}

/// Parse result for one generation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseVerdict {
    pub verdict: Verdict,
    /// Confidence in the verdict, 0 to 100.
    pub confidence: u8,
    /// A `VERDICT:` line was present, making an UNVERIFIABLE explicit rather
    /// than defaulted.
    pub verdict_marker_found: bool,
    /// A `CONFIDENCE:` line was present and carried a usable digit run.
    pub confidence_marker_found: bool,
}

/// Scan a generation response for the verdict and confidence markers.
///
/// The verdict comes from the first line containing `VERDICT:`. A line with
/// `TRUE` and no `FALSE` reads as true; any line with `FALSE` reads as
/// false; everything else, including a missing marker, is
/// [`Verdict::Unverifiable`]. Marker matching is case-sensitive on purpose,
/// per the response contract the prompt dictates.
///
/// The confidence comes from the first run of digits on the first line
/// containing `CONFIDENCE:`, clamped to 100. Absent or unusable, it
/// defaults to 50.
pub fn parse_verdict_response(text: &str) -> ResponseVerdict {
    let mut verdict = Verdict::Unverifiable;
    let mut verdict_marker_found = false;
    if let Some(line) = text.lines().find(|line| line.contains("VERDICT:")) {
        verdict_marker_found = true;
        if line.contains("TRUE") && !line.contains("FALSE") {
            verdict = Verdict::True;
        } else if line.contains("FALSE") {
            verdict = Verdict::False;
        }
    }

    let mut confidence = DEFAULT_CONFIDENCE;
    let mut confidence_marker_found = false;
    if let Some(line) = text.lines().find(|line| line.contains("CONFIDENCE:")) {
        if let Some(run) = DIGIT_RUN.find(line) {
            if let Ok(value) = run.as_str().parse::<u32>() {
                confidence = value.min(100) as u8;
                confidence_marker_found = true;
            }
        }
    }

    ResponseVerdict {
        verdict,
        confidence,
        verdict_marker_found,
        confidence_marker_found,
    }
}
