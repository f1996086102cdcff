//! Document-level types.

use super::{Paragraph, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a raw body node.
///
/// Node ids are assigned by the parser in body order and are the link
/// between the raw `body` tree and the rich objects in the flat
/// collections. They are opaque to everything outside the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Create a node id. Exposed for building documents by hand in tests
    /// and for alternate parser backends.
    pub fn new(raw: u32) -> Self {
        NodeId(raw)
    }
}

/// Kind of a top-level body node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A paragraph node (headings, plain paragraphs, and list items)
    Paragraph,
    /// A table node
    Table,
}

/// A raw node in the document body, in native flow order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyNode {
    /// What the node is
    pub kind: NodeKind,
    /// Identity used to resolve the corresponding rich object
    pub node: NodeId,
}

/// A parsed word-processing document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (author, title, timestamps)
    pub metadata: Metadata,

    /// Body nodes in native document order
    pub body: Vec<BodyNode>,

    /// All paragraphs in the document
    pub paragraphs: Vec<Paragraph>,

    /// All tables in the document
    pub tables: Vec<Table>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            body: Vec::new(),
            paragraphs: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Append a paragraph, registering it in the body flow.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(BodyNode {
            kind: NodeKind::Paragraph,
            node: paragraph.node,
        });
        self.paragraphs.push(paragraph);
    }

    /// Append a table, registering it in the body flow.
    pub fn push_table(&mut self, table: Table) {
        self.body.push(BodyNode {
            kind: NodeKind::Table,
            node: table.node,
        });
        self.tables.push(table);
    }

    /// Number of top-level body nodes.
    pub fn block_count(&self) -> usize {
        self.body.len()
    }

    /// Number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Check if the document has no body content.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document metadata from the container's core properties.
///
/// All fields are optional; a document with an unreadable or absent
/// properties part simply yields the default record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document author
    pub author: Option<String>,

    /// Document title
    pub title: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Check if no metadata fields are populated.
    pub fn is_empty(&self) -> bool {
        self.author.is_none()
            && self.title.is_none()
            && self.created.is_none()
            && self.modified.is_none()
    }
}
