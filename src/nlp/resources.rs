// Language resource bundle: Portuguese and English stopword sets plus the
// matching Snowball stemmers.
//
// Built once at startup with `LanguageResources::load()` and shared
// read-only (behind an Arc) by every normalizer for the life of the process.
// Both stopword lists and both stemmers are compiled into the binary, so
// there is nothing to fetch at runtime.

use std::collections::HashSet;

use anyhow::Result;
use rust_stemmers::{Algorithm, Stemmer};
use stop_words::{get, LANGUAGE};
use tracing::info;

/// The two languages the normalizer understands, in stemming order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Portuguese,
    English,
}

impl Language {
    fn stopword_list(self) -> LANGUAGE {
        match self {
            Language::Portuguese => LANGUAGE::Portuguese,
            Language::English => LANGUAGE::English,
        }
    }

    fn stemmer_algorithm(self) -> Algorithm {
        match self {
            Language::Portuguese => Algorithm::Portuguese,
            Language::English => Algorithm::English,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Portuguese => "pt",
            Language::English => "en",
        }
    }
}

/// Stopwords and stemmer for a single language.
pub struct LanguagePack {
    pub language: Language,
    stopwords: HashSet<String>,
    stemmer: Stemmer,
}

impl LanguagePack {
    fn load(language: Language) -> Result<Self> {
        let stopwords: HashSet<String> = get(language.stopword_list())
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();

        if stopwords.is_empty() {
            anyhow::bail!(
                "Stopword list for '{}' is empty: language resources unavailable",
                language.as_str()
            );
        }

        Ok(Self {
            language,
            stopwords,
            stemmer: Stemmer::create(language.stemmer_algorithm()),
        })
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    pub fn stemmer(&self) -> &Stemmer {
        &self.stemmer
    }
}

/// Immutable bundle of both language packs.
///
/// `primary` (Portuguese) stems first; `secondary` (English) is applied on
/// top of the primary stem.
pub struct LanguageResources {
    pub primary: LanguagePack,
    pub secondary: LanguagePack,
}

impl LanguageResources {
    /// Load stopword sets and stemmers for both languages.
    ///
    /// Call once during startup and share the result.
    pub fn load() -> Result<Self> {
        let primary = LanguagePack::load(Language::Portuguese)?;
        let secondary = LanguagePack::load(Language::English)?;

        info!(
            pt_stopwords = primary.stopword_count(),
            en_stopwords = secondary.stopword_count(),
            "Loaded language resources"
        );

        Ok(Self { primary, secondary })
    }

    /// True if the token is a stopword in either language.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.primary.is_stopword(token) || self.secondary.is_stopword(token)
    }
}
