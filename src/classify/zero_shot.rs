// Zero-shot classifier backed by a Hugging Face style inference endpoint.
//
// Posts the original email plus both candidate labels to an NLI model
// (facebook/bart-large-mnli by default) and takes the top-ranked label and
// its score as-is. The endpoint can be the hosted Inference API or a local
// server speaking the same protocol.
//
// Two response shapes exist in the wild: the classic pipeline output
// `{"sequence", "labels": [...], "scores": [...]}` and the newer list of
// `{"label", "score"}` objects. Both are accepted.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{BackendKind, Category, Classification, ClassifierBackend};

pub const DEFAULT_MODEL: &str = "facebook/bart-large-mnli";
pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";

/// Connection settings for the zero-shot service.
#[derive(Debug, Clone)]
pub struct ZeroShotSettings {
    pub endpoint: String,
    /// Bearer token; optional for local servers
    pub api_token: Option<String>,
    /// Model name reported in the rationale
    pub model: String,
}

impl Default for ZeroShotSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_token: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

pub struct ZeroShotClassifier {
    client: Client,
    settings: ZeroShotSettings,
}

impl ZeroShotClassifier {
    pub fn new(settings: ZeroShotSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl ClassifierBackend for ZeroShotClassifier {
    fn kind(&self) -> BackendKind {
        BackendKind::ZeroShot
    }

    async fn classify(&self, _normalized: &str, original: &str) -> Result<Classification> {
        let candidate_labels: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        let request = ZeroShotRequest {
            inputs: original,
            parameters: ZeroShotParameters {
                candidate_labels,
                multi_label: false,
            },
        };

        let mut builder = self.client.post(&self.settings.endpoint).json(&request);
        if let Some(token) = self.settings.api_token.as_deref().filter(|t| !t.is_empty()) {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .context("Failed to call zero-shot classification endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Zero-shot endpoint returned {}: {}", status, body);
        }

        let result: ZeroShotResponse = response
            .json()
            .await
            .context("Failed to parse zero-shot response")?;

        let (label, score) = result.top()?;
        let category: Category = label.parse()?;

        debug!(
            category = %category,
            score,
            model = %self.settings.model,
            "Zero-shot classified email"
        );

        Ok(Classification {
            category,
            confidence: Some(score),
            rationale: format!("Classificação via zero-shot ({}).", self.settings.model),
            backend: BackendKind::ZeroShot,
        })
    }
}

// --- Zero-shot request/response types ---

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: Vec<&'a str>,
    multi_label: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Pipeline { labels: Vec<String>, scores: Vec<f64> },
    Ranked(Vec<LabelScore>),
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

impl ZeroShotResponse {
    /// The highest-scoring label. Pipeline output is already sorted; the
    /// ranked list is searched so ordering doesn't matter.
    fn top(self) -> Result<(String, f64)> {
        match self {
            ZeroShotResponse::Pipeline { labels, scores } => labels
                .into_iter()
                .zip(scores)
                .next()
                .context("Zero-shot response has no labels"),
            ZeroShotResponse::Ranked(items) => items
                .into_iter()
                .max_by(|a, b| a.score.total_cmp(&b.score))
                .map(|ls| (ls.label, ls.score))
                .context("Zero-shot response has no labels"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pipeline_shape() {
        let json = r#"{"sequence":"x","labels":["Improdutivo","Produtivo"],"scores":[0.81,0.19]}"#;
        let parsed: ZeroShotResponse = serde_json::from_str(json).unwrap();
        let (label, score) = parsed.top().unwrap();
        assert_eq!(label, "Improdutivo");
        assert!((score - 0.81).abs() < 1e-9);
    }

    #[test]
    fn test_parse_ranked_shape_unsorted() {
        let json = r#"[{"label":"Improdutivo","score":0.3},{"label":"Produtivo","score":0.7}]"#;
        let parsed: ZeroShotResponse = serde_json::from_str(json).unwrap();
        let (label, score) = parsed.top().unwrap();
        assert_eq!(label, "Produtivo");
        assert!((score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_empty_response_is_error() {
        let parsed: ZeroShotResponse =
            serde_json::from_str(r#"{"labels":[],"scores":[]}"#).unwrap();
        assert!(parsed.top().is_err());
        let parsed: ZeroShotResponse = serde_json::from_str("[]").unwrap();
        assert!(parsed.top().is_err());
    }
}
