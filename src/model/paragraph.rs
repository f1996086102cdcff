//! Paragraph types.

use super::NodeId;
use serde::{Deserialize, Serialize};

/// A paragraph of text content.
///
/// Covers headings, plain paragraphs, and list items alike; list membership
/// is exposed through [`Paragraph::is_list_item`] and
/// [`Paragraph::list_level`] so extraction code never touches the parser's
/// markup details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// Identity of the body node this paragraph was resolved from
    pub node: NodeId,

    /// Raw paragraph text
    pub text: String,

    /// Style name from the document (e.g. "Normal", "Heading 1")
    pub style_name: String,

    /// List information if this paragraph is a list item
    pub list_info: Option<ListInfo>,
}

impl Paragraph {
    /// Create a paragraph with plain text and default style.
    pub fn with_text(node: NodeId, text: impl Into<String>) -> Self {
        Self {
            node,
            text: text.into(),
            style_name: "Normal".to_string(),
            list_info: None,
        }
    }

    /// Create a list-item paragraph at the given nesting level.
    pub fn list_item(node: NodeId, text: impl Into<String>, level: u8) -> Self {
        Self {
            node,
            text: text.into(),
            style_name: "List Paragraph".to_string(),
            list_info: Some(ListInfo { level }),
        }
    }

    /// Check if this paragraph is a list item.
    pub fn is_list_item(&self) -> bool {
        self.list_info.is_some()
    }

    /// List nesting level, zero-based. 0 for non-list paragraphs.
    pub fn list_level(&self) -> u8 {
        self.list_info.as_ref().map(|info| info.level).unwrap_or(0)
    }

    /// Check if the paragraph text is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Information about a list item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListInfo {
    /// Nesting level (0 = top level)
    pub level: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paragraph() {
        let p = Paragraph::with_text(NodeId::new(0), "Hello");
        assert!(!p.is_list_item());
        assert_eq!(p.list_level(), 0);
        assert!(!p.is_blank());
    }

    #[test]
    fn test_list_item() {
        let p = Paragraph::list_item(NodeId::new(0), "nested point", 2);
        assert!(p.is_list_item());
        assert_eq!(p.list_level(), 2);
    }

    #[test]
    fn test_blank_detection() {
        let p = Paragraph::with_text(NodeId::new(0), "   \t ");
        assert!(p.is_blank());

        let p = Paragraph::with_text(NodeId::new(1), "");
        assert!(p.is_blank());
    }
}
