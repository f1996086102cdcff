//! Extraction pipeline: walk, classify, flatten, assemble, sanitize, gate.
//!
//! This module wires the stages together. Data flows strictly downward —
//! walker to classifier/flattener to assembler to sanitizer to budget gate —
//! and each call is pure with respect to shared state: it reads its own
//! input and produces its own output, so calls may run concurrently with
//! no coordination.

mod assemble;
mod classify;
mod flatten;
mod walker;

pub use assemble::assemble;
pub use classify::paragraph_fragment;
pub use flatten::table_fragments;
pub use walker::{BodyElement, OrderedElementWalker};

use crate::budget::{self, BudgetEnforcement, TokenCounter, TokenUsage};
use crate::detect::{self, InputKind};
use crate::error::{Error, Result};
use crate::model::{Document, Metadata};
use crate::parser::{text, DocxParser, ParseOptions};
use crate::sanitize;
use serde::{Deserialize, Serialize};

/// Options for the extraction pipeline.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Model identifier handed to the token counter
    pub model: String,

    /// How token-counter failures are treated
    pub enforcement: BudgetEnforcement,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model identifier used for token counting.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Treat token-counter failures as fatal.
    pub fn strict_budget(mut self) -> Self {
        self.enforcement = BudgetEnforcement::Strict;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            enforcement: BudgetEnforcement::Advisory,
        }
    }
}

/// Counters describing one extraction run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Paragraph fragments emitted
    pub paragraph_fragments: u32,

    /// Table-row fragments emitted
    pub table_row_fragments: u32,

    /// Whitespace-only paragraphs that contributed nothing
    pub blank_paragraphs_skipped: u32,

    /// Body nodes skipped because they resolved to no rich object.
    /// Nonzero means the output is missing document content.
    pub unresolved_nodes: u32,

    /// Token usage measured by the budget gate, when a counter ran
    pub tokens: Option<TokenUsage>,
}

/// Result of one extraction call.
///
/// Created fresh per call and never mutated after return; no state is
/// shared between calls.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The sanitized, JSON-literal-safe text
    pub text: String,

    /// Metadata from the source document (empty for raw-text input)
    pub metadata: Metadata,

    /// Counters from the run
    pub stats: ExtractionStats,
}

/// Collect fragments from a document in body order.
pub fn document_fragments(doc: &Document) -> (Vec<String>, ExtractionStats) {
    let mut fragments = Vec::new();
    let mut stats = ExtractionStats::default();

    let mut elements = OrderedElementWalker::new(doc);
    for element in elements.by_ref() {
        match element {
            BodyElement::Paragraph(p) => match paragraph_fragment(p) {
                Some(fragment) => {
                    stats.paragraph_fragments += 1;
                    fragments.push(fragment);
                }
                None => stats.blank_paragraphs_skipped += 1,
            },
            BodyElement::Table(t) => {
                let rows = table_fragments(t);
                stats.table_row_fragments += rows.len() as u32;
                fragments.extend(rows);
            }
        }
    }
    stats.unresolved_nodes = elements.unresolved_count();

    (fragments, stats)
}

/// Flatten a document to unsanitized text in body order.
pub fn document_text(doc: &Document) -> (String, ExtractionStats) {
    let (fragments, stats) = document_fragments(doc);
    (assemble(&fragments), stats)
}

/// Run the full pipeline over a parsed document.
pub fn extract_document(
    doc: &Document,
    options: &ExtractOptions,
    counter: Option<&dyn TokenCounter>,
) -> Result<Extraction> {
    let (raw, stats) = document_text(doc);
    finish(raw, doc.metadata.clone(), stats, options, counter)
}

/// Run the full pipeline over an input byte buffer.
///
/// A zip container goes through the document parser; anything else is
/// decoded as raw text. Both paths share the sanitize and budget stages.
pub fn extract_bytes(
    data: &[u8],
    parse_options: ParseOptions,
    options: &ExtractOptions,
    counter: Option<&dyn TokenCounter>,
) -> Result<Extraction> {
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }

    match detect::detect_kind(data) {
        InputKind::Docx => {
            let doc = DocxParser::from_bytes_with_options(data, parse_options)?.parse()?;
            extract_document(&doc, options, counter)
        }
        InputKind::Text => {
            if parse_options.max_bytes > 0 && data.len() > parse_options.max_bytes {
                return Err(Error::Other(format!(
                    "document is {} bytes, maximum is {}",
                    data.len(),
                    parse_options.max_bytes
                )));
            }
            let raw = text::decode_text(data);
            finish(
                raw,
                Metadata::default(),
                ExtractionStats::default(),
                options,
                counter,
            )
        }
    }
}

fn finish(
    raw: String,
    metadata: Metadata,
    mut stats: ExtractionStats,
    options: &ExtractOptions,
    counter: Option<&dyn TokenCounter>,
) -> Result<Extraction> {
    let text = sanitize::sanitize(&raw);
    sanitize::verify_json_safe(&text)?;

    if let Some(counter) = counter {
        stats.tokens = budget::enforce(&text, &options.model, counter, options.enforcement)?;
    }

    log::debug!(
        "extracted {} chars ({} paragraph fragments, {} table rows, {} unresolved nodes)",
        text.len(),
        stats.paragraph_fragments,
        stats.table_row_fragments,
        stats.unresolved_nodes
    );
    Ok(Extraction {
        text,
        metadata,
        stats,
    })
}
