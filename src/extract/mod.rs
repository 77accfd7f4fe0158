// Content extraction: turns an uploaded artifact into plain text.
//
// Only two formats are recognized, sniffed from the filename extension:
// plain text and PDF. Anything else yields an empty string, and so does a
// PDF that cannot be parsed. The caller treats empty text as "no content".

pub mod pdf;
pub mod text;

use std::io::{Cursor, Read, Seek, SeekFrom};

use tracing::{debug, warn};

/// Upload formats the extractor knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
}

impl DocumentFormat {
    /// Sniff the format from a filename's extension (case-insensitive).
    ///
    /// Returns `None` for unsupported or missing extensions.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentFormat::PlainText),
            "pdf" => Some(DocumentFormat::Pdf),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "txt",
            DocumentFormat::Pdf => "pdf",
        }
    }
}

/// Extract plain text from a stream, using `filename` only to pick the format.
///
/// Never fails: unsupported formats, read errors and malformed documents all
/// come back as an empty string.
pub fn extract<R: Read + Seek>(stream: &mut R, filename: &str) -> String {
    let Some(format) = DocumentFormat::from_filename(filename) else {
        debug!(filename, "Unsupported upload format, nothing extracted");
        return String::new();
    };

    // Streams that can't seek (pipes, sockets) are read from where they are.
    if let Err(e) = stream.seek(SeekFrom::Start(0)) {
        debug!(error = %e, "Could not rewind upload stream");
    }

    let mut bytes = Vec::new();
    if let Err(e) = stream.read_to_end(&mut bytes) {
        warn!(error = %e, filename, "Failed to read upload stream");
        return String::new();
    }

    extract_format(&bytes, format)
}

/// Extract plain text from an in-memory upload.
pub fn extract_bytes(bytes: &[u8], filename: &str) -> String {
    extract(&mut Cursor::new(bytes), filename)
}

fn extract_format(bytes: &[u8], format: DocumentFormat) -> String {
    let text = match format {
        DocumentFormat::PlainText => text::decode_utf8_dropping_invalid(bytes),
        DocumentFormat::Pdf => pdf::extract_pdf_text(bytes),
    };
    debug!(
        format = format.extension(),
        bytes = bytes.len(),
        chars = text.chars().count(),
        "Extracted upload text"
    );
    text
}
