// PDF text extraction via the pure-Rust `pdf-extract` crate.
//
// A corrupt document is not an error for the request: it simply yields no
// text. pdf-extract reports most structural problems as `Err`, but a few
// malformed inputs make it panic, so the call runs under `catch_unwind`.

use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

/// Extract the text of every page, or an empty string if the document is unreadable.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(error = %e, bytes = bytes.len(), "PDF could not be parsed");
            String::new()
        }
        Err(_) => {
            warn!(bytes = bytes.len(), "PDF parser panicked on malformed document");
            String::new()
        }
    }
}
