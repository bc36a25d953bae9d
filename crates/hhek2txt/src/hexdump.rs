//! Canonical hexadecimal dump for diagnostic output.
//!
//! Sixteen bytes per line: an eight-digit lowercase offset, two groups
//! of eight byte pairs, and a printable-ASCII gutter between bars.
//! Partial final lines are space-padded so the gutter column stays at
//! the same position on every line. The returned string carries no
//! trailing newline; callers own line separation.

/// Format `bytes` in the canonical 16-per-line hex dump layout.
///
/// Empty input yields an empty string.
pub fn dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() / 16 + 1) * 79);
    for (index, chunk) in bytes.chunks(16).enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{:08x}  ", index * 16));
        for position in 0..16 {
            match chunk.get(position) {
                Some(byte) => out.push_str(&format!("{byte:02x} ")),
                None => out.push_str("   "),
            }
            if position == 7 {
                out.push(' ');
            }
        }
        out.push_str(" |");
        for &byte in chunk {
            out.push(if (0x20..0x7f).contains(&byte) {
                byte as char
            } else {
                '.'
            });
        }
        out.push('|');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(dump(b""), "");
    }

    #[test]
    fn test_single_byte_line_is_padded() {
        let line = dump(b"A");
        assert_eq!(line.len(), 63);
        assert!(line.starts_with("00000000  41 "));
        assert!(line.ends_with("|A|"));
        assert_eq!(line.find('|'), Some(60));
    }

    #[test]
    fn test_full_line_layout() {
        let line = dump(b"Hello, world!ABC");
        assert_eq!(
            line,
            "00000000  48 65 6c 6c 6f 2c 20 77  6f 72 6c 64 21 41 42 43  |Hello, world!ABC|"
        );
        assert_eq!(line.len(), 78);
    }

    #[test]
    fn test_multi_line_dump() {
        let text = b"Go is an open source programming language.";
        let expected = concat!(
            "00000000  47 6f 20 69 73 20 61 6e  20 6f 70 65 6e 20 73 6f  |Go is an open so|\n",
            "00000010  75 72 63 65 20 70 72 6f  67 72 61 6d 6d 69 6e 67  |urce programming|\n",
            "00000020  20 6c 61 6e 67 75 61 67  65 2e                    | language.|",
        );
        assert_eq!(dump(text), expected);
    }

    #[test]
    fn test_no_trailing_newline() {
        assert!(!dump(b"abc").ends_with('\n'));
        assert!(!dump(&[0u8; 32]).ends_with('\n'));
    }

    #[test]
    fn test_gutter_masks_non_printables() {
        let line = dump(&[0x00, 0x1f, 0x20, 0x7e, 0x7f, 0xff]);
        assert!(line.ends_with("|.. ~..|"));
    }

    #[test]
    fn test_offsets_advance_by_sixteen() {
        let dumped = dump(&[0u8; 17]);
        let lines: Vec<&str> = dumped.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00000000  "));
        assert!(lines[1].starts_with("00000010  "));
    }
}
