// Submission resolution: picks the authoritative content for a request.
//
// An uploaded file with a recognized extension wins over inline text. If the
// file yields no text (empty, corrupt PDF) the trimmed inline text is used.
// A file with an unrecognized extension rejects the whole submission.

use std::fmt;

use crate::extract::{extract_bytes, DocumentFormat};

/// An uploaded file, already read into memory.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// What a user submitted: inline text, a file, or both.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub text: Option<String>,
    pub file: Option<Upload>,
}

/// Why a submission produced nothing to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    UnsupportedFormat,
    NoContent,
}

impl Rejection {
    /// User-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::UnsupportedFormat => "Formato de arquivo não suportado. Envie .txt ou .pdf.",
            Rejection::NoContent => "Nenhum conteúdo de email fornecido.",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for Rejection {}

impl Submission {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file: None,
        }
    }

    pub fn with_file(mut self, filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.file = Some(Upload {
            filename: filename.into(),
            bytes,
        });
        self
    }

    /// Resolve to the text that should be classified.
    pub fn resolve(&self) -> Result<String, Rejection> {
        let mut content = String::new();

        // A file part without a name is treated as no file at all
        if let Some(upload) = self.file.as_ref().filter(|u| !u.filename.is_empty()) {
            if DocumentFormat::from_filename(&upload.filename).is_none() {
                return Err(Rejection::UnsupportedFormat);
            }
            content = extract_bytes(&upload.bytes, &upload.filename);
        }

        if content.is_empty() {
            content = self.text.as_deref().unwrap_or_default().trim().to_string();
        }

        if content.is_empty() {
            return Err(Rejection::NoContent);
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only() {
        let s = Submission::from_text("  Olá, preciso de ajuda  ");
        assert_eq!(s.resolve().unwrap(), "Olá, preciso de ajuda");
    }

    #[test]
    fn test_file_takes_precedence() {
        let s = Submission::from_text("texto do formulário")
            .with_file("email.txt", b"texto do arquivo".to_vec());
        assert_eq!(s.resolve().unwrap(), "texto do arquivo");
    }

    #[test]
    fn test_empty_file_falls_back_to_text() {
        let s = Submission::from_text("texto do formulário").with_file("email.txt", Vec::new());
        assert_eq!(s.resolve().unwrap(), "texto do formulário");
    }

    #[test]
    fn test_corrupt_pdf_falls_back_to_text() {
        let s = Submission::from_text("texto do formulário")
            .with_file("email.pdf", b"not a pdf".to_vec());
        assert_eq!(s.resolve().unwrap(), "texto do formulário");
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let s = Submission::from_text("texto").with_file("email.docx", b"abc".to_vec());
        assert_eq!(s.resolve(), Err(Rejection::UnsupportedFormat));
    }

    #[test]
    fn test_unnamed_file_ignored() {
        let s = Submission::from_text("texto").with_file("", b"abc".to_vec());
        assert_eq!(s.resolve().unwrap(), "texto");
    }

    #[test]
    fn test_nothing_submitted() {
        assert_eq!(Submission::default().resolve(), Err(Rejection::NoContent));
        assert_eq!(
            Submission::from_text("   \n ").resolve(),
            Err(Rejection::NoContent)
        );
    }
}
