// Colored terminal output for triage reports.
//
// main.rs delegates here for everything the `classify` and `status`
// commands print.

use colored::Colorize;

use crate::classify::traits::{BackendKind, Category};
use crate::pipeline::triage::TriageReport;

/// Display a full triage report in the terminal.
pub fn display_report(report: &TriageReport) {
    println!("\n{}", "=== Email Triage ===".bold());
    println!();

    println!("  Category:   {}", colorize_category(report.category));
    match report.confidence {
        Some(c) => println!("  Confidence: {:.3}", c),
        None => println!("  Confidence: {}", "n/a".dimmed()),
    }
    println!("  Rationale:  {}", report.rationale);
    println!("  Backend:    {}", describe_backend(report.backend).dimmed());

    println!("\n{}", "Suggested reply:".bold());
    for line in report.suggested_reply.lines() {
        println!("  {line}");
    }

    println!("\n{}", "Excerpt:".bold());
    for line in super::truncate_chars(&report.original_excerpt, 200).lines() {
        println!("  {}", line.dimmed());
    }
    println!();
}

/// Human-readable name for a backend.
pub fn describe_backend(kind: BackendKind) -> &'static str {
    match kind {
        BackendKind::RuleBased => "rule-based keywords",
        BackendKind::ChatCompletion => "OpenAI chat completion",
        BackendKind::ZeroShot => "zero-shot NLI",
    }
}

/// Colorize a category label: actionable stands out, courtesy is calm.
fn colorize_category(category: Category) -> colored::ColoredString {
    if category.is_actionable() {
        category.as_str().yellow().bold()
    } else {
        category.as_str().green()
    }
}
