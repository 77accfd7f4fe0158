// Triage: one email in, category + confidence + rationale + reply out.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::classify::traits::{BackendKind, Category, Classification};
use crate::classify::EmailClassifier;
use crate::nlp::normalizer::Normalizer;
use crate::output::truncate_chars;
use crate::reply::suggest_reply;

/// How much of the original email is echoed back.
pub const EXCERPT_CHARS: usize = 500;

/// The full result for one email, shaped for display or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct TriageReport {
    pub category: Category,
    /// Rounded to three decimals
    pub confidence: Option<f64>,
    pub rationale: String,
    pub backend: BackendKind,
    pub suggested_reply: String,
    pub original_excerpt: String,
}

impl TriageReport {
    fn new(classification: Classification, original: &str) -> Self {
        Self {
            category: classification.category,
            confidence: classification.confidence.map(round3),
            rationale: classification.rationale,
            backend: classification.backend,
            suggested_reply: suggest_reply(classification.category).to_string(),
            original_excerpt: truncate_chars(original, EXCERPT_CHARS),
        }
    }
}

/// Shared, read-only pipeline. Safe to use from many requests at once.
pub struct Triage {
    normalizer: Normalizer,
    classifier: EmailClassifier,
}

impl Triage {
    pub fn new(normalizer: Normalizer, classifier: EmailClassifier) -> Arc<Self> {
        Arc::new(Self {
            normalizer,
            classifier,
        })
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn classifier(&self) -> &EmailClassifier {
        &self.classifier
    }

    /// Run the whole pipeline on already-extracted text.
    pub async fn process(&self, content: &str) -> TriageReport {
        let normalized = self.normalizer.normalize(content);
        let classification = self.classifier.classify(&normalized, content).await;

        info!(
            category = %classification.category,
            confidence = ?classification.confidence,
            backend = %classification.backend,
            stems = normalized.split_whitespace().count(),
            "Classified email"
        );

        TriageReport::new(classification, content)
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.9000000000000001), 0.9);
        assert_eq!(round3(0.12345), 0.123);
        assert_eq!(round3(0.55), 0.55);
    }

    #[test]
    fn test_report_excerpt_truncated() {
        let long = "x".repeat(EXCERPT_CHARS + 10);
        let report = TriageReport::new(
            Classification {
                category: Category::Produtivo,
                confidence: None,
                rationale: "r".to_string(),
                backend: BackendKind::RuleBased,
            },
            &long,
        );
        assert_eq!(report.original_excerpt.chars().count(), EXCERPT_CHARS + 3);
        assert!(report.original_excerpt.ends_with("..."));
        assert_eq!(report.confidence, None);
    }
}
