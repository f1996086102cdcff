//! Paragraph fragment rendering.

use crate::model::Paragraph;

/// Bullet glyph used for list items.
const BULLET: char = '\u{2022}';

/// Render a paragraph as a fragment.
///
/// Returns `None` for whitespace-only paragraphs, which contribute nothing
/// to the output. A list item gets a prefix of two spaces per nesting level
/// followed by a bullet and one space; everything else — headings and plain
/// paragraphs alike — is emitted unprefixed.
pub fn paragraph_fragment(paragraph: &Paragraph) -> Option<String> {
    if paragraph.is_blank() {
        return None;
    }

    if paragraph.is_list_item() {
        let indent = "  ".repeat(paragraph.list_level() as usize);
        Some(format!("{indent}{BULLET} {}", paragraph.text))
    } else {
        Some(paragraph.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeId;

    #[test]
    fn test_plain_paragraph_unprefixed() {
        let p = Paragraph::with_text(NodeId::new(0), "Plain text.");
        assert_eq!(paragraph_fragment(&p).as_deref(), Some("Plain text."));
    }

    #[test]
    fn test_heading_unprefixed() {
        let mut p = Paragraph::with_text(NodeId::new(0), "Introduction");
        p.style_name = "Heading1".to_string();
        assert_eq!(paragraph_fragment(&p).as_deref(), Some("Introduction"));
    }

    #[test]
    fn test_blank_paragraph_skipped() {
        let p = Paragraph::with_text(NodeId::new(0), "   \t  ");
        assert_eq!(paragraph_fragment(&p), None);
    }

    #[test]
    fn test_top_level_list_item() {
        let p = Paragraph::list_item(NodeId::new(0), "first point", 0);
        assert_eq!(paragraph_fragment(&p).as_deref(), Some("\u{2022} first point"));
    }

    #[test]
    fn test_level_two_list_item() {
        // Exactly 4 leading spaces, bullet, one space, then the text
        let p = Paragraph::list_item(NodeId::new(0), "deep point", 2);
        assert_eq!(
            paragraph_fragment(&p).as_deref(),
            Some("    \u{2022} deep point")
        );
    }
}
