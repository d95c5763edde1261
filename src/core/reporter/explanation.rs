//! Human-readable explanations of a verdict.

use crate::core::classifier::Verdict;
use serde::{Deserialize, Serialize};

/// How a UI should present the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Informational dialog (signatures match)
    Info,
    /// Error dialog (signatures do not match)
    Error,
}

/// Dialog-ready explanation of a comparison verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictExplanation {
    /// Dialog title
    pub title: String,
    /// Dialog message with score and threshold
    pub message: String,
    /// One-line summary for logs and compact output
    pub summary: String,
    pub severity: Severity,
}

impl VerdictExplanation {
    pub fn new(verdict: &Verdict, threshold: f64) -> Self {
        let score = verdict.score();
        // Shortest round-trip form with a decimal point: 91.5, 100.0, 85.01
        let message = format!(
            "Similarity = {:?} %\nThreshold = {}%",
            score.value(),
            threshold
        );

        match verdict {
            Verdict::Match(_) => Self {
                title: "Success: Signatures Match".to_string(),
                message,
                summary: format!(
                    "Signatures match: {}% similar, above the {}% threshold",
                    score, threshold
                ),
                severity: Severity::Info,
            },
            Verdict::NoMatch(_) => Self {
                title: "Failure: Signatures Do Not Match".to_string(),
                message,
                summary: format!(
                    "Signatures do not match: {}% similar, not above the {}% threshold",
                    score, threshold
                ),
                severity: Severity::Error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::similarity::SimilarityScore;

    #[test]
    fn match_explanation() {
        let verdict = Verdict::Match(SimilarityScore::from_percent(91.5));
        let explanation = VerdictExplanation::new(&verdict, 85.0);

        assert_eq!(explanation.title, "Success: Signatures Match");
        assert_eq!(explanation.message, "Similarity = 91.5 %\nThreshold = 85%");
        assert_eq!(explanation.severity, Severity::Info);
    }

    #[test]
    fn message_keeps_significant_hundredths() {
        let perfect = VerdictExplanation::new(&Verdict::Match(SimilarityScore::from_ssim(1.0)), 85.0);
        assert!(perfect.message.starts_with("Similarity = 100.0 %"));

        let close = VerdictExplanation::new(&Verdict::Match(SimilarityScore::from_percent(85.01)), 85.0);
        assert!(close.message.starts_with("Similarity = 85.01 %"));

        let low = VerdictExplanation::new(&Verdict::NoMatch(SimilarityScore::from_percent(0.01)), 85.5);
        assert_eq!(low.message, "Similarity = 0.01 %\nThreshold = 85.5%");
    }

    #[test]
    fn no_match_explanation_at_threshold() {
        let verdict = Verdict::NoMatch(SimilarityScore::from_percent(85.0));
        let explanation = VerdictExplanation::new(&verdict, 85.0);

        assert_eq!(explanation.title, "Failure: Signatures Do Not Match");
        assert!(explanation.summary.contains("not above"));
        assert_eq!(explanation.message, "Similarity = 85.0 %\nThreshold = 85%");
        assert_eq!(explanation.severity, Severity::Error);
    }
}
