//! # undocx
//!
//! Word document text extraction for Rust, with output that is safe to
//! embed in JSON string literals.
//!
//! This library parses OOXML (`.docx`) containers — or raw text and
//! markdown buffers — and flattens them to a single string that preserves
//! the document's reading order across mixed paragraphs, lists, and
//! tables, then runs it through a sanitization pipeline whose output
//! survives being nested inside JSON documents, once or twice.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undocx::{extract_file, ExtractOptions};
//!
//! fn main() -> undocx::Result<()> {
//!     let result = extract_file("document.docx", &ExtractOptions::default())?;
//!     println!("{}", result.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Reading-order extraction**: body flow drives output order, not the
//!   separate paragraph/table collections
//! - **List rendering**: nesting-aware bullet prefixes
//! - **Table flattening**: one line per row, columns kept aligned
//! - **JSON-safe output**: a seven-stage sanitization pipeline with a
//!   round-trip self-check
//! - **Token budgets**: per-model ceilings enforced through a pluggable
//!   counter
//!
//! Every extraction call reads only its own input and produces only its
//! own output, so calls may run concurrently without coordination.

pub mod budget;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod sanitize;

// Re-export commonly used types
pub use budget::{BudgetEnforcement, CharEstimateCounter, TokenCounter, TokenUsage};
pub use detect::{detect_kind, InputKind};
pub use error::{Error, Result};
pub use extract::{
    extract_bytes, extract_document, Extraction, ExtractionStats, ExtractOptions,
    OrderedElementWalker,
};
pub use model::{Document, ListInfo, Metadata, NodeId, Paragraph, Table, TableRow};
pub use parser::{DocxParser, ParseOptions};

use std::path::Path;

/// Parse a document file into the structured model.
///
/// # Example
///
/// ```no_run
/// use undocx::parse_file;
///
/// let doc = parse_file("document.docx").unwrap();
/// println!("Paragraphs: {}", doc.paragraph_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let data = std::fs::read(path)?;
    parse_bytes(&data)
}

/// Parse a document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    DocxParser::from_bytes(data)?.parse()
}

/// Extract JSON-safe text from a file, without a token gate.
///
/// The input may be a `.docx` container or raw text; the kind is sniffed
/// from content.
pub fn extract_file<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> Result<Extraction> {
    let data = std::fs::read(path)?;
    extract::extract_bytes(&data, ParseOptions::default(), options, None)
}

/// Builder for configuring and running extractions.
///
/// # Example
///
/// ```no_run
/// use undocx::Undocx;
///
/// let result = Undocx::new()
///     .with_model("gpt-4")
///     .with_default_counter()
///     .extract_file("document.docx")?;
/// println!("{}", result.text);
/// # Ok::<(), undocx::Error>(())
/// ```
pub struct Undocx {
    parse_options: ParseOptions,
    extract_options: ExtractOptions,
    counter: Option<Box<dyn TokenCounter>>,
}

impl Undocx {
    /// Create a new builder. No token counter is configured; the budget
    /// gate only runs once one is attached.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            extract_options: ExtractOptions::default(),
            counter: None,
        }
    }

    /// Set the model identifier used for token counting.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.extract_options = self.extract_options.with_model(model);
        self
    }

    /// Set the maximum accepted input size in bytes.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.parse_options = self.parse_options.with_max_bytes(max_bytes);
        self
    }

    /// Skip reading document metadata.
    pub fn without_metadata(mut self) -> Self {
        self.parse_options = self.parse_options.with_metadata(false);
        self
    }

    /// Treat token-counter failures as fatal.
    pub fn strict_budget(mut self) -> Self {
        self.extract_options = self.extract_options.strict_budget();
        self
    }

    /// Attach a token counter, enabling the budget gate.
    pub fn with_token_counter(mut self, counter: impl TokenCounter + 'static) -> Self {
        self.counter = Some(Box::new(counter));
        self
    }

    /// Attach the built-in character-estimate counter.
    pub fn with_default_counter(self) -> Self {
        self.with_token_counter(CharEstimateCounter::new())
    }

    /// Extract from a byte buffer.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Extraction> {
        extract::extract_bytes(
            data,
            self.parse_options.clone(),
            &self.extract_options,
            self.counter.as_deref(),
        )
    }

    /// Extract from a file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Extraction> {
        let data = std::fs::read(path)?;
        self.extract_bytes(&data)
    }
}

impl Default for Undocx {
    fn default() -> Self {
        Self::new()
    }
}
