//! Legacy text decoding.
//!
//! Jet stores text in the machine's ANSI codepage; for the databases
//! this tool reads that is Windows-1252. Decoding is a pure function
//! over bytes and cannot fail: the codepage assigns every byte a
//! codepoint.

use encoding_rs::WINDOWS_1252;

/// Decode Windows-1252 bytes to UTF-8 text.
pub fn decode_windows_1252(bytes: &[u8]) -> String {
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(decode_windows_1252(b"Konto 1"), "Konto 1");
    }

    #[test]
    fn test_swedish_letters() {
        assert_eq!(decode_windows_1252(b"\xC5tg\xE4rd"), "Åtgärd");
        assert_eq!(decode_windows_1252(b"L\xF6pnr"), "Löpnr");
        assert_eq!(decode_windows_1252(b"\xD6verf\xF6ringar"), "Överföringar");
    }

    #[test]
    fn test_c1_range_uses_windows_assignments() {
        // 0x85 and 0x96 are punctuation in Windows-1252, not ISO-8859-1
        // controls.
        assert_eq!(decode_windows_1252(b"\x85"), "\u{2026}");
        assert_eq!(decode_windows_1252(b"\x96"), "\u{2013}");
    }

    #[test]
    fn test_unassigned_bytes_decode_to_controls() {
        assert_eq!(decode_windows_1252(b"\x81"), "\u{0081}");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode_windows_1252(b""), "");
    }
}
