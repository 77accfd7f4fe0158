// Chat-completion classifier (OpenAI-compatible API).
//
// Sends the original email with an instruction to answer with exactly one
// of the two labels. A reply that isn't exactly a label is not an error:
// the question-mark / length heuristic picks the category instead. Transport
// failures, non-2xx statuses and a missing API key are returned as Err.
//
// API docs: https://platform.openai.com/docs/api-reference/chat/create

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules::looks_actionable;
use super::traits::{BackendKind, Category, Classification, ClassifierBackend};
use crate::output::truncate_chars;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Fixed confidence: the chat API returns no score.
pub const CHAT_CONFIDENCE: f64 = 0.7;

/// Connection settings for the chat-completion service.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub api_key: String,
    /// Base URL without the trailing `/chat/completions`
    pub base_url: String,
    pub model: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

pub struct ChatCompletionClassifier {
    client: Client,
    settings: ChatSettings,
}

impl ChatCompletionClassifier {
    pub fn new(settings: ChatSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ClassifierBackend for ChatCompletionClassifier {
    fn kind(&self) -> BackendKind {
        BackendKind::ChatCompletion
    }

    async fn classify(&self, _normalized: &str, original: &str) -> Result<Classification> {
        if self.settings.api_key.is_empty() {
            anyhow::bail!("OPENAI_API_KEY not set: chat-completion backend unavailable");
        }

        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(original),
            }],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to call chat-completion API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat-completion API returned {}: {}", status, body);
        }

        let result: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat-completion response")?;

        let answer = result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .context("Chat-completion response has no message content")?;

        let category = label_or_heuristic(&answer, original);

        debug!(
            answer = %truncate_chars(answer.trim(), 40),
            category = %category,
            model = %self.settings.model,
            "Chat-completion classified email"
        );

        Ok(Classification {
            category,
            confidence: Some(CHAT_CONFIDENCE),
            rationale: "Classificação via OpenAI Chat Completions.".to_string(),
            backend: BackendKind::ChatCompletion,
        })
    }
}

fn build_prompt(original: &str) -> String {
    format!(
        "Classifique o email como 'Produtivo' ou 'Improdutivo'. \
         Apenas responda com uma das duas palavras.\n\nEmail:\n{original}"
    )
}

/// Accept the model's answer only if it is exactly one label (after trimming).
fn label_or_heuristic(answer: &str, original: &str) -> Category {
    match answer.trim().parse::<Category>() {
        Ok(category) => category,
        Err(_) if looks_actionable(original) => Category::Produtivo,
        Err(_) => Category::Improdutivo,
    }
}

// --- Chat-completion request/response types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_exact_match_after_trim() {
        assert_eq!(label_or_heuristic(" Produtivo\n", "oi"), Category::Produtivo);
        assert_eq!(
            label_or_heuristic("Improdutivo", "Preciso de ajuda?"),
            Category::Improdutivo
        );
    }

    #[test]
    fn test_unexpected_answer_uses_heuristic() {
        assert_eq!(
            label_or_heuristic("Produtivo.", "Consegue verificar?"),
            Category::Produtivo
        );
        assert_eq!(
            label_or_heuristic("Este email é produtivo", "Valeu!"),
            Category::Improdutivo
        );
    }

    #[test]
    fn test_prompt_contains_email() {
        let prompt = build_prompt("Olá, tudo bem?");
        assert!(prompt.ends_with("Email:\nOlá, tudo bem?"));
        assert!(prompt.contains("'Produtivo' ou 'Improdutivo'"));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let clf = ChatCompletionClassifier::new(ChatSettings {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..ChatSettings::default()
        });
        assert_eq!(clf.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_error() {
        let clf = ChatCompletionClassifier::new(ChatSettings::default());
        assert!(clf.classify("", "Preciso de ajuda").await.is_err());
    }
}
