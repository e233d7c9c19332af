//! Text decoding with an ordered encoding fallback chain.
//!
//! FFI 1001 is by definition pure ASCII. Files from the field occasionally
//! arrive in other encodings, so the decoder can optionally fall back to
//! UTF-8, CP1252, and Latin-1, in that order, taking the first candidate
//! that decodes cleanly.

use encoding_rs::WINDOWS_1252;

use crate::error::{Na1001Error, Result};

/// Code points left undefined by Windows-1252. Their presence disqualifies
/// the CP1252 leg of the chain so that Latin-1 remains a distinct fallback.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Decode raw bytes to text.
///
/// With `ascii_only` set, only strict 7-bit ASCII is accepted. Otherwise the
/// fallback chain is tried in order and any non-ASCII choice is reported via
/// `tracing::warn!`.
pub(crate) fn decode_text(data: &[u8], ascii_only: bool, source: &str) -> Result<String> {
    if data.is_ascii() {
        // ASCII bytes are valid UTF-8
        return Ok(String::from_utf8_lossy(data).into_owned());
    }

    if ascii_only {
        return Err(Na1001Error::Encoding { ascii_only });
    }

    if let Ok(text) = std::str::from_utf8(data) {
        tracing::warn!(source, encoding = "utf-8", "non-ASCII encoding used");
        return Ok(text.to_owned());
    }

    if !data.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
        let (text, _, _) = WINDOWS_1252.decode(data);
        tracing::warn!(source, encoding = "cp1252", "non-ASCII encoding used");
        return Ok(text.into_owned());
    }

    // Latin-1 maps every byte, so the chain always terminates here.
    tracing::warn!(source, encoding = "latin-1", "non-ASCII encoding used");
    Ok(encoding_rs::mem::decode_latin1(data).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ascii() {
        let text = decode_text(b"27 1001\nline two\n", true, "stream").unwrap();
        assert_eq!(text, "27 1001\nline two\n");
    }

    #[test]
    fn test_ascii_only_rejects_high_bytes() {
        let result = decode_text(b"caf\xc3\xa9", true, "stream");
        assert!(matches!(
            result,
            Err(Na1001Error::Encoding { ascii_only: true })
        ));
    }

    #[test]
    fn test_utf8_fallback() {
        let text = decode_text("Universität".as_bytes(), false, "stream").unwrap();
        assert_eq!(text, "Universität");
    }

    #[test]
    fn test_cp1252_fallback() {
        // 0x94 is a right double quote in CP1252, invalid as UTF-8
        let text = decode_text(b"quote\x94end", false, "stream").unwrap();
        assert_eq!(text, "quote\u{201d}end");
    }

    #[test]
    fn test_latin1_fallback() {
        // 0x81 is undefined in CP1252, so Latin-1 takes over
        let text = decode_text(b"a\x81b\xe4", false, "stream").unwrap();
        assert_eq!(text, "a\u{81}b\u{e4}");
    }
}
