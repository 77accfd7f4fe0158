use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use mailsort::classify::EmailClassifier;
use mailsort::config::Config;
use mailsort::nlp::normalizer::Normalizer;
use mailsort::nlp::resources::LanguageResources;
use mailsort::output::terminal;
use mailsort::pipeline::submission::Submission;
use mailsort::pipeline::triage::Triage;

/// mailsort: sort incoming email into actionable vs. courtesy.
///
/// Classifies a single email (inline text, stdin, or a .txt/.pdf file) and
/// suggests a reply template for it.
#[derive(Parser)]
#[command(name = "mailsort", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one email and suggest a reply
    Classify {
        /// Email text (read from stdin if neither TEXT nor --file is given)
        text: Option<String>,

        /// A .txt or .pdf file with the email; wins over TEXT when it has content
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the result as JSON instead of a colored report
        #[arg(long)]
        json: bool,
    },

    /// Print the normalized stem string for a text (diagnostic)
    Normalize {
        /// Text to normalize (read from stdin if omitted)
        text: Option<String>,
    },

    /// Show which classifier backend is configured and whether it is usable
    Status,

    /// Start the web server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: MAILSORT_PORT or 5000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: MAILSORT_BIND or 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mailsort=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Classify { text, file, json } => {
            let submission = build_submission(text, file)?;
            let content = submission.resolve()?;

            let triage = build_triage(&config)?;
            let report = triage.process(&content).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_report(&report);
            }
        }

        Commands::Normalize { text } => {
            let text = match text {
                Some(t) => t,
                None => read_stdin()?,
            };
            let resources = Arc::new(LanguageResources::load()?);
            println!("{}", Normalizer::new(resources).normalize(&text));
        }

        Commands::Status => {
            let choice = config.backend_choice();
            println!(
                "Classifier backend: {}",
                terminal::describe_backend(choice.kind()).bold()
            );
            match config.require_backend() {
                Ok(()) => println!("  {}", "ready".green()),
                Err(e) => {
                    println!("  {}", "misconfigured".red().bold());
                    println!("  {e}");
                    println!(
                        "  {}",
                        "Emails will be classified by the rule-based fallback.".dimmed()
                    );
                }
            }
            println!(
                "Upload limit: {:.1} MB",
                config.max_upload_bytes as f64 / (1024.0 * 1024.0)
            );
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let triage = build_triage(&config)?;
            let port = port.unwrap_or(config.port);
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            mailsort::web::run_server(config, triage, port, &bind).await?;
        }
    }

    Ok(())
}

/// One-time startup: load language resources and pick the classifier backend.
fn build_triage(config: &Config) -> Result<Arc<Triage>> {
    let resources = Arc::new(
        LanguageResources::load().context("Failed to initialize language resources")?,
    );
    let classifier = EmailClassifier::new(config.classifier_settings());
    info!(backend = %classifier.primary_kind(), "Pipeline initialized");
    Ok(Triage::new(Normalizer::new(resources), classifier))
}

fn build_submission(text: Option<String>, file: Option<PathBuf>) -> Result<Submission> {
    let text = match (&text, &file) {
        (None, None) => Some(read_stdin()?),
        _ => text,
    };

    let mut submission = Submission { text, file: None };
    if let Some(path) = file {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        submission = submission.with_file(filename, bytes);
    }
    Ok(submission)
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read email from stdin")?;
    Ok(buf)
}
