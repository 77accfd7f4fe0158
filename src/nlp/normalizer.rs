// Normalizer: raw email text to a language-agnostic stem string.
//
// Steps: collapse whitespace, lowercase, split into alphanumeric runs
// (accented Latin letters included), drop stopwords from either language and
// tokens of two characters or fewer, then stem with the Portuguese stemmer
// followed by the English stemmer on its output.
//
// The output is a pure function of the input and the resource bundle.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use regex_lite::Regex;
use rust_stemmers::Stemmer;
use tracing::debug;

use super::resources::LanguageResources;

/// Letters, digits and the lowercase Latin-1 accented letters.
/// U+00D7 (×) and U+00F7 (÷) sit inside that block and are excluded.
const TOKEN_PATTERN: &str = "[a-z0-9ßà-öø-ÿ]+";

/// Tokens this short carry no signal.
const MIN_TOKEN_CHARS: usize = 3;

pub struct Normalizer {
    resources: Arc<LanguageResources>,
    token_re: Regex,
}

impl Normalizer {
    pub fn new(resources: Arc<LanguageResources>) -> Self {
        Self {
            resources,
            // The pattern is a compile-time constant
            token_re: Regex::new(TOKEN_PATTERN).expect("token pattern is valid"),
        }
    }

    /// Normalize raw text into space-joined stems. Empty input gives empty output.
    pub fn normalize(&self, text: &str) -> String {
        let cleaned = collapse_whitespace(text);
        if cleaned.is_empty() {
            return String::new();
        }

        let lowered = cleaned.to_lowercase();
        let stems: Vec<String> = self
            .tokenize(&lowered)
            .filter(|t| self.keep_token(t))
            .map(|t| self.stem(t))
            .collect();

        stems.join(" ")
    }

    /// Split lowercased text into maximal alphanumeric runs.
    pub fn tokenize<'a>(&'a self, lowered: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.token_re.find_iter(lowered).map(|m| m.as_str())
    }

    fn keep_token(&self, token: &str) -> bool {
        token.chars().count() >= MIN_TOKEN_CHARS && !self.resources.is_stopword(token)
    }

    /// Portuguese stem first, then the English stemmer over that result.
    fn stem(&self, token: &str) -> String {
        let primary = stem_or_keep(self.resources.primary.stemmer(), token);
        stem_or_keep(self.resources.secondary.stemmer(), &primary)
    }
}

/// Replace line breaks with spaces, squeeze whitespace runs, trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stem a token, keeping it unchanged if the stemmer panics on odd input.
fn stem_or_keep(stemmer: &Stemmer, token: &str) -> String {
    match panic::catch_unwind(AssertUnwindSafe(|| stemmer.stem(token).into_owned())) {
        Ok(stem) => stem,
        Err(_) => {
            debug!(token, "Stemmer failed, keeping unstemmed token");
            token.to_string()
        }
    }
}
