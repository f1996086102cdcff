//! Input format detection and extension routing.

use std::path::Path;

/// Kind of input the extractor can handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// An OOXML word-processing container (.docx)
    Docx,
    /// Raw text content (plain text or lightly-marked-up markdown)
    Text,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Docx => write!(f, "docx"),
            InputKind::Text => write!(f, "text"),
        }
    }
}

/// Zip local-file-header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Detect the input kind from bytes.
///
/// A buffer starting with the zip magic is treated as a document container;
/// anything else falls through to the raw-text path, which always succeeds
/// (Latin-1 is the guaranteed decoding fallback).
///
/// # Example
/// ```
/// use undocx::detect::{detect_kind, InputKind};
///
/// assert_eq!(detect_kind(b"PK\x03\x04rest-of-archive"), InputKind::Docx);
/// assert_eq!(detect_kind(b"just some text"), InputKind::Text);
/// ```
pub fn detect_kind(data: &[u8]) -> InputKind {
    if data.starts_with(ZIP_MAGIC) {
        InputKind::Docx
    } else {
        InputKind::Text
    }
}

/// Check if bytes look like an OOXML container.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_kind(data) == InputKind::Docx
}

/// Map a file extension to an input kind.
///
/// Returns `None` for extensions no parser handles. Used by the CLI to
/// reject unsupported uploads by name before reading content.
pub fn kind_for_extension(ext: &str) -> Option<InputKind> {
    match ext.to_ascii_lowercase().as_str() {
        "docx" | "doc" => Some(InputKind::Docx),
        "md" | "markdown" | "txt" => Some(InputKind::Text),
        _ => None,
    }
}

/// Map a file path to an input kind by its extension.
pub fn kind_for_path<P: AsRef<Path>>(path: P) -> Option<InputKind> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .and_then(kind_for_extension)
}
