//! Raw text decoding for plain-text and markdown input.

/// Decode a text buffer, trying encodings in order of preference:
/// UTF-8 (with any leading byte-order mark stripped), then Latin-1.
///
/// Latin-1 maps every byte to a character, so decoding always succeeds;
/// it is the guaranteed fallback. Outer whitespace is trimmed.
pub fn decode_text(data: &[u8]) -> String {
    let text = match std::str::from_utf8(data) {
        Ok(s) => {
            log::debug!("decoded {} bytes as utf-8", data.len());
            s.strip_prefix('\u{FEFF}').unwrap_or(s).to_string()
        }
        Err(_) => {
            // Stripping the BOM cannot rescue invalid utf-8, so go straight
            // to the byte-per-character fallback
            log::debug!("decoded {} bytes as latin-1", data.len());
            data.iter().map(|&b| b as char).collect()
        }
    };
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("héllo wörld".as_bytes()), "héllo wörld");
    }

    #[test]
    fn test_decode_strips_bom() {
        let mut data = UTF8_BOM.to_vec();
        data.extend_from_slice(b"content");
        assert_eq!(decode_text(&data), "content");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // 0xE9 is 'é' in Latin-1 but invalid as a standalone utf-8 byte
        let data = [b'c', b'a', b'f', 0xE9];
        assert_eq!(decode_text(&data), "café");
    }

    #[test]
    fn test_decode_trims() {
        assert_eq!(decode_text(b"  padded  \n"), "padded");
        assert_eq!(decode_text(b"   \n\t "), "");
    }
}
