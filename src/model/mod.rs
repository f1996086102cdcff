//! Document model types for word-processing content.
//!
//! This module defines the intermediate representation (IR) that bridges
//! container parsing and text extraction. The model keeps two views of the
//! same content: the ordered `body` node list (native document flow) and
//! flat `paragraphs` / `tables` collections. Extraction order is defined by
//! `body` alone.

mod document;
mod paragraph;
mod table;

pub use document::{BodyNode, Document, Metadata, NodeId, NodeKind};
pub use paragraph::{ListInfo, Paragraph};
pub use table::{Table, TableRow};
