// Composition tests: the whole pipeline end to end with the rule-based
// backend: submission -> extract -> normalize -> classify -> reply.
// No network calls and no filesystem side effects.

use std::sync::Arc;

use mailsort::classify::traits::{BackendKind, Category};
use mailsort::classify::{ClassifierSettings, EmailClassifier};
use mailsort::nlp::normalizer::Normalizer;
use mailsort::nlp::resources::LanguageResources;
use mailsort::pipeline::submission::{Rejection, Submission};
use mailsort::pipeline::triage::{Triage, EXCERPT_CHARS};

fn triage() -> Arc<Triage> {
    let resources = Arc::new(LanguageResources::load().unwrap());
    Triage::new(
        Normalizer::new(resources),
        EmailClassifier::new(ClassifierSettings::default()),
    )
}

// ============================================================
// Worked examples
// ============================================================

#[tokio::test]
async fn urgent_bug_gets_action_reply() {
    let report = triage()
        .process("Preciso de ajuda urgente com um bug no sistema, é urgente!")
        .await;
    assert_eq!(report.category, Category::Produtivo);
    assert!(report.confidence.unwrap() >= 0.8);
    assert!(report.suggested_reply.starts_with("Olá! Obrigado pela mensagem."));
    assert_eq!(report.backend, BackendKind::RuleBased);
}

#[tokio::test]
async fn thanks_gets_courtesy_reply() {
    let report = triage().process("Muito obrigado, bom dia!").await;
    assert_eq!(report.category, Category::Improdutivo);
    assert!(report.confidence.unwrap() >= 0.8);
    assert!(report
        .suggested_reply
        .starts_with("Olá! Muito obrigado pela mensagem."));
}

#[tokio::test]
async fn empty_text_hits_tie_break() {
    let t = triage();
    let normalized = t.normalizer().normalize("");
    assert_eq!(normalized, "");
    let c = t.classifier().classify(&normalized, "").await;
    assert_eq!(c.category, Category::Improdutivo);
    assert_eq!(c.confidence, Some(0.55));
}

// ============================================================
// Submission -> report
// ============================================================

#[tokio::test]
async fn txt_upload_overrides_inline_text() {
    let submission = Submission::from_text("Muito obrigado, bom dia!")
        .with_file("chamado.txt", "Erro no login, preciso de suporte".as_bytes().to_vec());
    let content = submission.resolve().unwrap();
    let report = triage().process(&content).await;
    assert_eq!(report.category, Category::Produtivo);
    assert_eq!(report.original_excerpt, "Erro no login, preciso de suporte");
}

#[tokio::test]
async fn corrupt_pdf_falls_back_to_inline_text() {
    let submission = Submission::from_text("Muito obrigado, bom dia!")
        .with_file("anexo.pdf", b"%PDF-broken".to_vec());
    let content = submission.resolve().unwrap();
    let report = triage().process(&content).await;
    assert_eq!(report.category, Category::Improdutivo);
}

#[tokio::test]
async fn pdf_upload_overrides_inline_text() {
    let pdf = include_bytes!("fixtures/two_pages.pdf").to_vec();
    let submission =
        Submission::from_text("Muito obrigado, bom dia!").with_file("chamado.pdf", pdf);
    let content = submission.resolve().unwrap();
    assert!(content.contains("suporte"));
    assert!(!content.contains("obrigado"));

    let report = triage().process(&content).await;
    assert_eq!(report.category, Category::Produtivo);
    assert!(report.original_excerpt.contains("fatura"));
}

#[test]
fn unsupported_upload_is_rejected_before_classification() {
    let submission = Submission::from_text("texto").with_file("anexo.zip", vec![1, 2, 3]);
    let err = submission.resolve().unwrap_err();
    assert_eq!(err, Rejection::UnsupportedFormat);
    assert_eq!(
        err.to_string(),
        "Formato de arquivo não suportado. Envie .txt ou .pdf."
    );
}

#[tokio::test]
async fn long_email_excerpt_is_truncated() {
    let body = "Olá equipe, segue o relatório mensal. ".repeat(30);
    let report = triage().process(&body).await;
    assert!(report.original_excerpt.ends_with("..."));
    assert_eq!(report.original_excerpt.chars().count(), EXCERPT_CHARS + 3);
    // no keywords, but long: leans actionable
    assert_eq!(report.category, Category::Produtivo);
    assert_eq!(report.confidence, Some(0.55));
}

#[tokio::test]
async fn confidence_is_rounded_for_output() {
    let report = triage()
        .process("Preciso de ajuda urgente com um bug no sistema, é urgente!")
        .await;
    assert_eq!(report.confidence, Some(0.9));
}

// ============================================================
// Concurrency
// ============================================================

#[tokio::test]
async fn concurrent_requests_share_one_pipeline() {
    let t = triage();
    let inputs = [
        ("Muito obrigado, bom dia!", Category::Improdutivo),
        ("Erro no login, preciso de suporte", Category::Produtivo),
        ("Feliz aniversário! Parabéns", Category::Improdutivo),
        ("Segue a fatura para pagamento", Category::Produtivo),
    ];

    let mut handles = Vec::new();
    for round in 0..8 {
        let (text, expected) = inputs[round % inputs.len()];
        let t = Arc::clone(&t);
        handles.push(tokio::spawn(async move {
            (t.process(text).await.category, expected)
        }));
    }

    for handle in handles {
        let (got, expected) = handle.await.unwrap();
        assert_eq!(got, expected);
    }
}

#[tokio::test]
async fn report_serializes_to_boundary_json() {
    let report = triage().process("Muito obrigado, bom dia!").await;
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["category"], "Improdutivo");
    assert_eq!(value["backend"], "rule_based");
    assert!(value["confidence"].is_number());
    assert!(!value["rationale"].as_str().unwrap().is_empty());
    assert!(value["suggested_reply"].is_string());
    assert_eq!(value["original_excerpt"], "Muito obrigado, bom dia!");
}
