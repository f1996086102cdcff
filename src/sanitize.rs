//! JSON-safety sanitization pipeline.
//!
//! Seven ordered transforms turn extracted text into a string that can be
//! embedded as a JSON string value — and survives being re-embedded as a
//! string value of an outer JSON document when a caller copies the response
//! text into a second request verbatim.
//!
//! Every stage is total: no input string can make one fail. The stage order
//! matters (escaping must run after all character rewriting), and the full
//! pipeline is a fixed point on its own output: sanitizing already-sanitized
//! text returns it unchanged.

use crate::error::{Error, Result};
use regex::Regex;

/// Stage 1: normalize `\r\n` and lone `\r` to `\n`.
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Stage 2: strip C0 control characters and DEL, keeping tab, newline,
/// and carriage return.
///
/// Carriage returns are kept by the character class but never survive in
/// practice because stage 1 has already rewritten them.
pub fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(
                c,
                '\u{0000}'..='\u{0008}'
                    | '\u{000B}'
                    | '\u{000C}'
                    | '\u{000E}'..='\u{001F}'
                    | '\u{007F}'
            )
        })
        .collect()
}

/// Stage 3: collapse runs of two or more ASCII spaces to a single space.
/// Tabs and newlines are untouched.
pub fn collapse_spaces(text: &str) -> String {
    let re = Regex::new(r" {2,}").unwrap();
    re.replace_all(text, " ").to_string()
}

/// Stage 4: replace typographic quotation marks with ASCII ones.
pub fn normalize_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

/// Stage 5: replace em-dash, en-dash, and the ellipsis glyph with ASCII
/// equivalents.
pub fn normalize_punctuation(text: &str) -> String {
    text.replace('\u{2014}', "--")
        .replace('\u{2013}', "-")
        .replace('\u{2026}', "...")
}

/// Stage 6: double every bare backslash.
///
/// A backslash that already forms a `\\` or `\"` pair is left intact, so
/// text that has been through the pipeline once is not re-escaped.
pub fn escape_backslashes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&next @ ('\\' | '"')) => {
                // Already a complete escape pair; keep it whole
                out.push('\\');
                out.push(next);
                chars.next();
            }
            _ => out.push_str("\\\\"),
        }
    }
    out
}

/// Stage 7: escape every quote that is not already escaped.
///
/// Runs after stage 6, which guarantees every backslash opens a `\\` or
/// `\"` pair; anything following a backslash is therefore already escaped
/// and skipped over.
pub fn escape_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

/// Run the full seven-stage pipeline.
pub fn sanitize(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let text = normalize_line_breaks(content);
    let text = strip_control_chars(&text);
    let text = collapse_spaces(&text);
    let text = normalize_quotes(&text);
    let text = normalize_punctuation(&text);
    let text = escape_backslashes(&text);
    escape_quotes(&text)
}

/// Post-hoc self-check: encode the final text as a JSON string value,
/// parse it back, and require exact equality.
///
/// Failure here means the pipeline itself is broken — it cannot be caused
/// by document content — so it surfaces as [`Error::Sanitize`], distinct
/// from parse and validation errors.
pub fn verify_json_safe(text: &str) -> Result<()> {
    let encoded = serde_json::to_string(text)
        .map_err(|e| Error::Sanitize(format!("failed to encode as JSON string: {e}")))?;
    let decoded: String = serde_json::from_str(&encoded)
        .map_err(|e| Error::Sanitize(format!("failed to parse encoded output: {e}")))?;
    if decoded != text {
        return Err(Error::Sanitize(
            "JSON round-trip did not recover the text".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_break_normalization() {
        assert_eq!(normalize_line_breaks("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_control_char_stripping() {
        assert_eq!(strip_control_chars("a\u{0000}b\u{0007}c"), "abc");
        // Tab, newline, CR survive
        assert_eq!(strip_control_chars("a\tb\nc\rd"), "a\tb\nc\rd");
        assert_eq!(strip_control_chars("x\u{007F}y"), "xy");
    }

    #[test]
    fn test_space_collapse() {
        assert_eq!(collapse_spaces("a  b     c"), "a b c");
        // Tabs and newlines untouched
        assert_eq!(collapse_spaces("a\t\tb\n\nc"), "a\t\tb\n\nc");
    }

    #[test]
    fn test_quote_normalization() {
        assert_eq!(normalize_quotes("\u{201C}hi\u{201D}"), "\"hi\"");
        assert_eq!(normalize_quotes("it\u{2019}s \u{2018}ok\u{2019}"), "it's 'ok'");
    }

    #[test]
    fn test_punctuation_normalization() {
        assert_eq!(normalize_punctuation("a\u{2014}b"), "a--b");
        assert_eq!(normalize_punctuation("1\u{2013}2"), "1-2");
        assert_eq!(normalize_punctuation("wait\u{2026}"), "wait...");
    }

    #[test]
    fn test_backslash_escaping() {
        assert_eq!(escape_backslashes(r"C:\temp"), r"C:\\temp");
        // Already-doubled backslashes stay doubled
        assert_eq!(escape_backslashes(r"C:\\temp"), r"C:\\temp");
        // Trailing bare backslash
        assert_eq!(escape_backslashes("end\\"), "end\\\\");
        // Three backslashes: one pair plus one bare
        assert_eq!(escape_backslashes(r"\\\"), r"\\\\");
    }

    #[test]
    fn test_quote_escaping() {
        assert_eq!(escape_quotes(r#"say "hi""#), r#"say \"hi\""#);
        // An escaped quote is not escaped again
        assert_eq!(escape_quotes(r#"say \"hi\""#), r#"say \"hi\""#);
    }

    #[test]
    fn test_sanitize_concrete_example() {
        // Straight quotes become escaped quotes, character for character
        assert_eq!(sanitize(r#"Hello, "World""#), r#"Hello, \"World\""#);
    }

    #[test]
    fn test_sanitize_dash_ellipsis_example() {
        assert_eq!(
            sanitize("\u{201C}Wait\u{2014}really\u{2026}\u{201D}"),
            r#"\"Wait--really...\""#
        );
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_sanitize_idempotent() {
        let inputs = [
            r#"Hello, "World""#,
            "C:\\temp\\file \u{201C}quoted\u{201D}",
            "line one\n\nline two\twith\ttabs",
            "trailing backslash\\",
            "\u{2014}\u{2013}\u{2026}\"'",
        ];
        for input in inputs {
            let once = sanitize(input);
            let twice = sanitize(&once);
            assert_eq!(once, twice, "pipeline not a fixed point for {input:?}");
        }
    }

    #[test]
    fn test_order_sensitivity_quotes_before_escaping() {
        // A typographic quote must be normalized (stage 4) before quote
        // escaping (stage 7) so it ends up escaped, not raw
        let out = sanitize("\u{201C}x\u{201D}");
        assert_eq!(out, r#"\"x\""#);
    }

    #[test]
    fn test_verbatim_embed_single_line() {
        // The output can be pasted between quotes in a JSON document
        let out = sanitize(r#"Hello, "World""#);
        let doc = format!("{{\"text\":\"{out}\"}}");
        let value: serde_json::Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(value["text"], "Hello, \"World\"");
    }

    #[test]
    fn test_verify_json_safe() {
        assert!(verify_json_safe("plain text").is_ok());
        assert!(verify_json_safe(&sanitize("multi\nline \"quoted\"")).is_ok());
        assert!(verify_json_safe("").is_ok());
    }
}
