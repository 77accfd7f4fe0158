// Permissive UTF-8 decoding for plain-text uploads.

/// Decode bytes as UTF-8, silently dropping invalid sequences.
///
/// Unlike `String::from_utf8_lossy`, no U+FFFD replacement characters are
/// inserted, so broken bytes never reach the normalizer as symbols.
pub fn decode_utf8_dropping_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
