// Rule-based baseline classifier.
//
// Counts which keywords from two fixed lists appear in the lowercased
// original text (substring membership, each keyword counted at most once).
// The larger count wins; a tie falls back to a question-mark / length check.
// Always available, no I/O, and the fallback for every external backend.

use anyhow::Result;
use async_trait::async_trait;

use super::traits::{BackendKind, Category, Classification, ClassifierBackend};

/// Indicators that the sender needs something done.
pub const ACTIONABLE_KEYWORDS: &[&str] = &[
    "erro",
    "bug",
    "suporte",
    "ajuda",
    "pendente",
    "urgente",
    "responder",
    "prazo",
    "solicitação",
    "solicitacao",
    "chamado",
    "ticket",
    "atualização",
    "atualizacao",
    "acesso",
    "senha",
    "login",
    "implementação",
    "implementacao",
    "dúvida",
    "duvida",
    "orçamento",
    "orcamento",
    "cotação",
    "cotacao",
    "agendar",
    "reunião",
    "reuniao",
    "fatura",
    "pagamento",
    "bloqueio",
];

/// Indicators of thanks, greetings and sign-offs.
pub const COURTESY_KEYWORDS: &[&str] = &[
    "obrigado",
    "agradeço",
    "agradeco",
    "parabéns",
    "parabens",
    "feliz aniversário",
    "feliz aniversario",
    "boas festas",
    "bom dia",
    "boa tarde",
    "boa noite",
    "atenciosamente",
];

/// Confidence reported when the keyword counts tie.
pub const TIE_CONFIDENCE: f64 = 0.55;

/// Texts longer than this (in characters) lean actionable on a tie.
pub const LONG_TEXT_CHARS: usize = 120;

const BASE_CONFIDENCE: f64 = 0.6;
const PER_HIT_CONFIDENCE: f64 = 0.1;
const MAX_CONFIDENCE: f64 = 0.99;

#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedClassifier;

impl RuleBasedClassifier {
    /// Classify from the original text alone. Infallible.
    pub fn classify_text(&self, original: &str) -> Classification {
        let lowered = original.to_lowercase();
        let actionable = count_hits(&lowered, ACTIONABLE_KEYWORDS);
        let courtesy = count_hits(&lowered, COURTESY_KEYWORDS);

        let (category, confidence, rationale) = if actionable > courtesy {
            (
                Category::Produtivo,
                hit_confidence(actionable),
                format!("Palavras indicativas de ação detectadas ({actionable})."),
            )
        } else if courtesy > actionable {
            (
                Category::Improdutivo,
                hit_confidence(courtesy),
                format!("Mensagem parece de cordialidade/sem ação ({courtesy})."),
            )
        } else if looks_actionable(&lowered) {
            (
                Category::Produtivo,
                TIE_CONFIDENCE,
                "Pergunta ou conteúdo mais extenso sugere necessidade de ação.".to_string(),
            )
        } else {
            (
                Category::Improdutivo,
                TIE_CONFIDENCE,
                "Sem indícios claros de ação; mensagem breve e cordial.".to_string(),
            )
        };

        Classification {
            category,
            confidence: Some(confidence),
            rationale,
            backend: BackendKind::RuleBased,
        }
    }
}

#[async_trait]
impl ClassifierBackend for RuleBasedClassifier {
    fn kind(&self) -> BackendKind {
        BackendKind::RuleBased
    }

    async fn classify(&self, _normalized: &str, original: &str) -> Result<Classification> {
        Ok(self.classify_text(original))
    }
}

/// Number of keywords from `keywords` that occur anywhere in `lowered`.
pub fn count_hits(lowered: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| lowered.contains(*k)).count()
}

/// A question or a long message suggests the sender expects action.
pub fn looks_actionable(text: &str) -> bool {
    text.contains('?') || text.chars().count() > LONG_TEXT_CHARS
}

fn hit_confidence(hits: usize) -> f64 {
    (BASE_CONFIDENCE + PER_HIT_CONFIDENCE * hits as f64).min(MAX_CONFIDENCE)
}
