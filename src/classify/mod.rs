// Email classification: trait-based abstraction over three strategies.
//
// The EmailClassifier holds at most one external backend (chat-completion or
// zero-shot, chosen once at startup) plus the always-available rule-based
// baseline. If the external backend returns Err for a request, that request
// is classified by the baseline instead; callers never see the failure.

pub mod chat;
pub mod rules;
pub mod traits;
pub mod zero_shot;

use tracing::{info, warn};

use self::chat::{ChatCompletionClassifier, ChatSettings};
use self::rules::RuleBasedClassifier;
use self::traits::{BackendKind, Classification, ClassifierBackend};
use self::zero_shot::{ZeroShotClassifier, ZeroShotSettings};

/// Which strategy classifies first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendChoice {
    RuleBased,
    ChatCompletion,
    ZeroShot,
}

impl BackendChoice {
    /// Resolve the two enable flags. Chat-completion wins when both are set.
    pub fn from_flags(use_chat: bool, use_zero_shot: bool) -> Self {
        match (use_chat, use_zero_shot) {
            (true, _) => BackendChoice::ChatCompletion,
            (false, true) => BackendChoice::ZeroShot,
            (false, false) => BackendChoice::RuleBased,
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            BackendChoice::RuleBased => BackendKind::RuleBased,
            BackendChoice::ChatCompletion => BackendKind::ChatCompletion,
            BackendChoice::ZeroShot => BackendKind::ZeroShot,
        }
    }
}

/// Everything needed to build an EmailClassifier.
#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub backend: BackendChoice,
    pub chat: ChatSettings,
    pub zero_shot: ZeroShotSettings,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            backend: BackendChoice::RuleBased,
            chat: ChatSettings::default(),
            zero_shot: ZeroShotSettings::default(),
        }
    }
}

pub struct EmailClassifier {
    external: Option<Box<dyn ClassifierBackend>>,
    baseline: RuleBasedClassifier,
}

impl EmailClassifier {
    pub fn new(settings: ClassifierSettings) -> Self {
        let external: Option<Box<dyn ClassifierBackend>> = match settings.backend {
            BackendChoice::ChatCompletion => {
                Some(Box::new(ChatCompletionClassifier::new(settings.chat)))
            }
            BackendChoice::ZeroShot => Some(Box::new(ZeroShotClassifier::new(settings.zero_shot))),
            BackendChoice::RuleBased => None,
        };
        info!(backend = %settings.backend.kind(), "Email classifier ready");
        Self::with_backend(external)
    }

    /// Build around an arbitrary external backend (or none).
    pub fn with_backend(external: Option<Box<dyn ClassifierBackend>>) -> Self {
        Self {
            external,
            baseline: RuleBasedClassifier,
        }
    }

    /// The strategy tried first for every request.
    pub fn primary_kind(&self) -> BackendKind {
        self.external
            .as_ref()
            .map(|b| b.kind())
            .unwrap_or(BackendKind::RuleBased)
    }

    /// Classify one email. Infallible: external errors degrade to the baseline.
    pub async fn classify(&self, normalized: &str, original: &str) -> Classification {
        if let Some(backend) = &self.external {
            match backend.classify(normalized, original).await {
                Ok(classification) => return classification,
                Err(e) => {
                    warn!(
                        backend = %backend.kind(),
                        error = %e,
                        "External classifier failed, falling back to rules"
                    );
                }
            }
        }
        self.baseline.classify_text(original)
    }
}
