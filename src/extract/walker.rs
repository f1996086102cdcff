//! Ordered walk over the document body.

use crate::model::{Document, NodeId, NodeKind, Paragraph, Table};
use std::collections::HashMap;

/// A body node resolved to its rich object.
#[derive(Debug)]
pub enum BodyElement<'a> {
    /// A resolved paragraph
    Paragraph(&'a Paragraph),
    /// A resolved table
    Table(&'a Table),
}

/// Iterator over body nodes in native document order.
///
/// Construction runs a single pre-pass building node-identity indexes over
/// the flat paragraph and table collections; each step of the walk then
/// resolves in O(1). The walk is lazy, finite, and non-restartable, and
/// never mutates the document.
///
/// A body node with no counterpart in the collections is skipped rather
/// than failing the walk, but never silently: it is logged and counted,
/// and the total is available from [`unresolved_count`] after the walk.
///
/// [`unresolved_count`]: OrderedElementWalker::unresolved_count
pub struct OrderedElementWalker<'a> {
    doc: &'a Document,
    paragraphs: HashMap<NodeId, &'a Paragraph>,
    tables: HashMap<NodeId, &'a Table>,
    position: usize,
    unresolved: u32,
}

impl<'a> OrderedElementWalker<'a> {
    /// Create a walker over a document, building the resolution index.
    pub fn new(doc: &'a Document) -> Self {
        let paragraphs = doc.paragraphs.iter().map(|p| (p.node, p)).collect();
        let tables = doc.tables.iter().map(|t| (t.node, t)).collect();
        Self {
            doc,
            paragraphs,
            tables,
            position: 0,
            unresolved: 0,
        }
    }

    /// Number of body nodes skipped because they resolved to nothing.
    ///
    /// Only meaningful once the walk has been driven to completion.
    pub fn unresolved_count(&self) -> u32 {
        self.unresolved
    }
}

impl<'a> Iterator for OrderedElementWalker<'a> {
    type Item = BodyElement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.doc.body.len() {
            let node = self.doc.body[self.position];
            self.position += 1;

            let resolved = match node.kind {
                NodeKind::Paragraph => self
                    .paragraphs
                    .get(&node.node)
                    .copied()
                    .map(BodyElement::Paragraph),
                NodeKind::Table => self.tables.get(&node.node).copied().map(BodyElement::Table),
            };

            match resolved {
                Some(element) => return Some(element),
                None => {
                    self.unresolved += 1;
                    log::warn!("skipping unresolved {:?} body node {:?}", node.kind, node.node);
                }
            }
        }
        None
    }
}
