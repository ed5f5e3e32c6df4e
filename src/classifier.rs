//! Headline classification seam.
//!
//! The trained model is an external collaborator: text in, boolean out.
//! [`TitleClassifier`] is that contract, and [`LexiconClassifier`] is the
//! transparent baseline shipped with the binary. Deployments with a real
//! model swap implementations at the trait; nothing downstream changes,
//! since the reconciler treats the prediction as an opaque raw signal.

/// A collaborator that predicts whether a headline looks genuine.
pub trait TitleClassifier {
    /// `true` means the headline looks like genuine reporting, `false` that
    /// it looks fabricated.
    fn predict(&self, title: &str) -> bool;
}

/// Weighted sensationalism markers. Scores accumulate per marker found.
const SENSATIONAL_MARKERS: &[(&str, u32)] = &[
    ("you won't believe", 3),
    ("doctors hate", 3),
    ("this one trick", 3),
    ("they don't want you to know", 3),
    ("mainstream media won't", 3),
    ("100% effective", 3),
    ("shocking", 2),
    ("miracle", 2),
    ("urgent warning", 2),
    ("forward this to everyone", 2),
    ("shared thousands of times", 2),
    ("wake up", 2),
    ("secret", 1),
    ("exposed", 1),
    ("banned", 1),
    ("goes viral", 1),
];

/// Lexicon-and-heuristics baseline for [`TitleClassifier`].
///
/// Scores a headline on sensationalism markers, exclamation density, and
/// shouting (mostly-uppercase text). Scores at or above the threshold read
/// as fabricated. Deliberately conservative: a plain declarative headline
/// scores zero.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    threshold: u32,
}

impl LexiconClassifier {
    pub fn new() -> Self {
        Self { threshold: 3 }
    }

    fn score(&self, title: &str) -> u32 {
        let lower = title.to_lowercase();
        let mut score: u32 = SENSATIONAL_MARKERS
            .iter()
            .filter(|(marker, _)| lower.contains(marker))
            .map(|(_, weight)| weight)
            .sum();

        let exclamations = title.chars().filter(|c| *c == '!').count();
        if exclamations >= 2 {
            score += 2;
        } else if exclamations == 1 {
            score += 1;
        }

        let alphabetic: Vec<char> = title.chars().filter(|c| c.is_alphabetic()).collect();
        if alphabetic.len() >= 12 {
            let uppercase = alphabetic.iter().filter(|c| c.is_uppercase()).count();
            if uppercase * 10 > alphabetic.len() * 6 {
                score += 2;
            }
        }

        score
    }
}

impl TitleClassifier for LexiconClassifier {
    fn predict(&self, title: &str) -> bool {
        self.score(title) < self.threshold
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}
