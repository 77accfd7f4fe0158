// Classifier backend trait: the swap-ready abstraction.
//
// Every strategy (rule-based, chat-completion, zero-shot) implements this
// trait and returns an explicit Result. The orchestrating EmailClassifier
// decides what happens on Err; backends never fall back on their own.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The two fixed email categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Requires a response or some action.
    Produtivo,
    /// Courtesy message, no action needed.
    Improdutivo,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Produtivo, Category::Improdutivo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produtivo => "Produtivo",
            Category::Improdutivo => "Improdutivo",
        }
    }

    pub fn is_actionable(&self) -> bool {
        matches!(self, Category::Produtivo)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    /// Exact match against the two labels. Anything else is rejected.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Produtivo" => Ok(Category::Produtivo),
            "Improdutivo" => Ok(Category::Improdutivo),
            other => anyhow::bail!("Unknown email category: {other:?}"),
        }
    }
}

/// Which strategy produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    RuleBased,
    ChatCompletion,
    ZeroShot,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::RuleBased => "rule_based",
            BackendKind::ChatCompletion => "chat_completion",
            BackendKind::ZeroShot => "zero_shot",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of classifying one email.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub category: Category,
    /// 0.0 to 1.0, or None if the backend gives no score
    pub confidence: Option<f64>,
    /// Human-readable explanation, never empty
    pub rationale: String,
    pub backend: BackendKind,
}

/// Trait for email classification strategies. Async because the external
/// backends make HTTP calls.
#[async_trait]
pub trait ClassifierBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Classify one email given its normalized stems and the original text.
    async fn classify(&self, normalized: &str, original: &str) -> Result<Classification>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_exact() {
        assert_eq!("Produtivo".parse::<Category>().unwrap(), Category::Produtivo);
        assert_eq!(
            "Improdutivo".parse::<Category>().unwrap(),
            Category::Improdutivo
        );
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        assert!("produtivo".parse::<Category>().is_err());
        assert!(" Produtivo".parse::<Category>().is_err());
        assert!("Spam".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_only_produtivo_is_actionable() {
        assert!(Category::Produtivo.is_actionable());
        assert!(!Category::Improdutivo.is_actionable());
    }

    #[test]
    fn test_category_display_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }
}
