//! OOXML (.docx) container parsing.
//!
//! Reads `word/document.xml` out of the OPC zip package and builds the
//! document model by walking the body in source order: every top-level
//! `w:p` and `w:tbl` becomes a body node with an identity, plus a rich
//! object in the flat collections. `docProps/core.xml` supplies metadata;
//! any failure there is swallowed into an empty record.

use crate::error::{Error, Result};
use crate::model::{Document, ListInfo, Metadata, NodeId, Paragraph, Table, TableRow};
use crate::parser::ParseOptions;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";
const CORE_PROPS_PART: &str = "docProps/core.xml";

/// Parser for OOXML word-processing documents.
pub struct DocxParser<'a> {
    data: &'a [u8],
    options: ParseOptions,
}

impl<'a> DocxParser<'a> {
    /// Create a parser over a byte buffer with default options.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Create a parser over a byte buffer with custom options.
    pub fn from_bytes_with_options(data: &'a [u8], options: ParseOptions) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        if options.max_bytes > 0 && data.len() > options.max_bytes {
            return Err(Error::Other(format!(
                "document is {} bytes, maximum is {}",
                data.len(),
                options.max_bytes
            )));
        }
        Ok(Self { data, options })
    }

    /// Parse the container into a [`Document`].
    pub fn parse(&self) -> Result<Document> {
        let mut archive = zip::ZipArchive::new(Cursor::new(self.data))?;

        let body_xml = read_part(&mut archive, DOCUMENT_PART)?;
        let mut doc = Document::new();
        parse_document_xml(&body_xml, &mut doc)?;

        if self.options.extract_metadata {
            doc.metadata = match read_part(&mut archive, CORE_PROPS_PART) {
                Ok(xml) => parse_core_properties(&xml),
                Err(err) => {
                    log::debug!("no readable core properties: {err}");
                    Metadata::default()
                }
            };
        }

        log::debug!(
            "parsed document: {} body nodes, {} paragraphs, {} tables",
            doc.block_count(),
            doc.paragraph_count(),
            doc.table_count()
        );
        Ok(doc)
    }
}

fn read_part(archive: &mut zip::ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<String> {
    let mut part = archive.by_name(name).map_err(|err| match err {
        zip::result::ZipError::FileNotFound => Error::MissingPart(name.to_string()),
        other => Error::from(other),
    })?;
    let mut content = String::new();
    part.read_to_string(&mut content)
        .map_err(|err| Error::Encoding(format!("{name}: {err}")))?;
    Ok(content)
}

/// Walk `word/document.xml`, appending body nodes in source order.
fn parse_document_xml(xml: &str, doc: &mut Document) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    let mut in_body = false;
    let mut next_node: u32 = 0;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().local_name().as_ref() {
                b"body" => in_body = true,
                b"p" if in_body => {
                    let node = NodeId::new(next_node);
                    next_node += 1;
                    let data = parse_paragraph(&mut reader)?;
                    doc.push_paragraph(Paragraph {
                        node,
                        text: data.text,
                        style_name: data.style_name,
                        list_info: data.list_info,
                    });
                }
                b"tbl" if in_body => {
                    let node = NodeId::new(next_node);
                    next_node += 1;
                    let rows = parse_table(&mut reader)?;
                    let mut table = Table::new(node);
                    table.rows = rows;
                    doc.push_table(table);
                }
                _ => {}
            },
            // Self-closing <w:p/> is an empty paragraph; record it so the
            // body node count stays faithful to the source
            Event::Empty(e) if in_body && e.name().local_name().as_ref() == b"p" => {
                let node = NodeId::new(next_node);
                next_node += 1;
                doc.push_paragraph(Paragraph::with_text(node, ""));
            }
            Event::End(e) => {
                if e.name().local_name().as_ref() == b"body" {
                    in_body = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(())
}

/// Content of one `w:p` element.
struct ParagraphData {
    text: String,
    style_name: String,
    list_info: Option<ListInfo>,
}

/// Consume events until the closing `w:p`, collecting text and properties.
///
/// Called with the reader positioned just past the paragraph's start tag.
fn parse_paragraph(reader: &mut Reader<&[u8]>) -> Result<ParagraphData> {
    let mut text = String::new();
    let mut style_name = String::from("Normal");
    let mut is_list = false;
    let mut level: u8 = 0;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().local_name().as_ref() {
                b"t" => in_text = true,
                b"numPr" => is_list = true,
                b"pStyle" => {
                    if let Some(val) = attr_val(&e) {
                        style_name = val;
                    }
                }
                b"ilvl" => {
                    if let Some(val) = attr_val(&e) {
                        level = val.parse().unwrap_or(0);
                    }
                }
                _ => {}
            },
            Event::Empty(e) => match e.name().local_name().as_ref() {
                b"numPr" => is_list = true,
                b"pStyle" => {
                    if let Some(val) = attr_val(&e) {
                        style_name = val;
                    }
                }
                b"ilvl" => {
                    if let Some(val) = attr_val(&e) {
                        level = val.parse().unwrap_or(0);
                    }
                }
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                let unescaped = t
                    .unescape()
                    .map_err(|err| Error::DocxParse(err.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::End(e) => match e.name().local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => break,
                _ => {}
            },
            Event::Eof => {
                return Err(Error::DocxParse(
                    "unexpected end of document.xml inside paragraph".to_string(),
                ));
            }
            _ => {}
        }
    }

    Ok(ParagraphData {
        text,
        style_name,
        list_info: is_list.then_some(ListInfo { level }),
    })
}

/// Consume events until the closing `w:tbl`, collecting rows of cell text.
///
/// Cell text is the cell's paragraph texts joined with newlines. Tables
/// nested inside cells are consumed but not flattened into the cell.
fn parse_table(reader: &mut Reader<&[u8]>) -> Result<Vec<TableRow>> {
    let mut rows = Vec::new();
    let mut current_row: Option<Vec<String>> = None;
    let mut current_cell: Option<Vec<String>> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().local_name().as_ref() {
                b"tr" => current_row = Some(Vec::new()),
                b"tc" => current_cell = Some(Vec::new()),
                b"p" => {
                    let data = parse_paragraph(reader)?;
                    if let Some(cell) = current_cell.as_mut() {
                        cell.push(data.text);
                    }
                }
                b"tbl" => {
                    parse_table(reader)?;
                }
                _ => {}
            },
            Event::End(e) => match e.name().local_name().as_ref() {
                b"tc" => {
                    if let (Some(row), Some(cell)) = (current_row.as_mut(), current_cell.take()) {
                        row.push(cell.join("\n"));
                    }
                }
                b"tr" => {
                    if let Some(cells) = current_row.take() {
                        rows.push(TableRow { cells });
                    }
                }
                b"tbl" => break,
                _ => {}
            },
            Event::Eof => {
                return Err(Error::DocxParse(
                    "unexpected end of document.xml inside table".to_string(),
                ));
            }
            _ => {}
        }
    }
    Ok(rows)
}

/// Read the `w:val` attribute of an element, if present and well-formed.
fn attr_val(e: &BytesStart) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"val")
        .and_then(|attr| attr.unescape_value().ok())
        .map(|val| val.into_owned())
}

/// Parse `docProps/core.xml`. Total: anything unreadable yields defaults.
fn parse_core_properties(xml: &str) -> Metadata {
    #[derive(Clone, Copy)]
    enum Field {
        Author,
        Title,
        Created,
        Modified,
    }

    let mut metadata = Metadata::default();
    let mut reader = Reader::from_str(xml);
    let mut current: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                current = match e.name().local_name().as_ref() {
                    b"creator" => Some(Field::Author),
                    b"title" => Some(Field::Title),
                    b"created" => Some(Field::Created),
                    b"modified" => Some(Field::Modified),
                    _ => None,
                };
            }
            Ok(Event::Text(t)) => {
                if let (Some(field), Ok(value)) = (current, t.unescape()) {
                    let value = value.trim().to_string();
                    if value.is_empty() {
                        continue;
                    }
                    match field {
                        Field::Author => metadata.author = Some(value),
                        Field::Title => metadata.title = Some(value),
                        Field::Created => metadata.created = parse_timestamp(&value),
                        Field::Modified => metadata.modified = parse_timestamp(&value),
                    }
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                log::debug!("core properties unreadable: {err}");
                break;
            }
        }
    }
    metadata
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_empty() {
        let result = DocxParser::from_bytes(&[]);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_from_bytes_size_limit() {
        let options = ParseOptions::new().with_max_bytes(4);
        let result = DocxParser::from_bytes_with_options(b"PK\x03\x04more", options);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_not_a_zip() {
        let parser = DocxParser::from_bytes(b"definitely not an archive").unwrap();
        assert!(matches!(parser.parse(), Err(Error::Corrupted(_))));
    }

    #[test]
    fn test_parse_paragraph_with_list() {
        let xml = r#"<w:document><w:body><w:p>
            <w:pPr><w:pStyle w:val="ListParagraph"/>
            <w:numPr><w:ilvl w:val="2"/><w:numId w:val="1"/></w:numPr></w:pPr>
            <w:r><w:t>nested item</w:t></w:r>
        </w:p></w:body></w:document>"#;
        let mut doc = Document::new();
        parse_document_xml(xml, &mut doc).unwrap();

        assert_eq!(doc.paragraph_count(), 1);
        let p = &doc.paragraphs[0];
        assert_eq!(p.text, "nested item");
        assert_eq!(p.style_name, "ListParagraph");
        assert!(p.is_list_item());
        assert_eq!(p.list_level(), 2);
    }

    #[test]
    fn test_parse_paragraph_tabs_and_breaks() {
        let xml = r#"<w:document><w:body><w:p><w:r>
            <w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t>
        </w:r></w:p></w:body></w:document>"#;
        let mut doc = Document::new();
        parse_document_xml(xml, &mut doc).unwrap();
        assert_eq!(doc.paragraphs[0].text, "a\tb\nc");
    }

    #[test]
    fn test_parse_preserves_body_order() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>before</w:t></w:r></w:p>
            <w:tbl><w:tr>
                <w:tc><w:p><w:r><w:t>c1</w:t></w:r></w:p></w:tc>
                <w:tc><w:p><w:r><w:t>c2</w:t></w:r></w:p></w:tc>
            </w:tr></w:tbl>
            <w:p><w:r><w:t>after</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let mut doc = Document::new();
        parse_document_xml(xml, &mut doc).unwrap();

        assert_eq!(doc.block_count(), 3);
        assert_eq!(doc.paragraph_count(), 2);
        assert_eq!(doc.table_count(), 1);
        assert_eq!(doc.tables[0].rows[0].cells, vec!["c1", "c2"]);
        use crate::model::NodeKind;
        assert_eq!(doc.body[0].kind, NodeKind::Paragraph);
        assert_eq!(doc.body[1].kind, NodeKind::Table);
        assert_eq!(doc.body[2].kind, NodeKind::Paragraph);
    }

    #[test]
    fn test_table_paragraphs_stay_out_of_body() {
        // Paragraphs inside cells must not appear as body paragraphs
        let xml = r#"<w:document><w:body>
            <w:tbl><w:tr><w:tc>
                <w:p><w:r><w:t>cell line 1</w:t></w:r></w:p>
                <w:p><w:r><w:t>cell line 2</w:t></w:r></w:p>
            </w:tc></w:tr></w:tbl>
        </w:body></w:document>"#;
        let mut doc = Document::new();
        parse_document_xml(xml, &mut doc).unwrap();

        assert_eq!(doc.paragraph_count(), 0);
        assert_eq!(doc.table_count(), 1);
        assert_eq!(doc.tables[0].rows[0].cells, vec!["cell line 1\ncell line 2"]);
    }

    #[test]
    fn test_self_closing_paragraph_recorded() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>real</w:t></w:r></w:p>
            <w:p/>
        </w:body></w:document>"#;
        let mut doc = Document::new();
        parse_document_xml(xml, &mut doc).unwrap();

        assert_eq!(doc.paragraph_count(), 2);
        assert!(doc.paragraphs[1].is_blank());
    }

    #[test]
    fn test_parse_core_properties() {
        let xml = r#"<cp:coreProperties>
            <dc:title>Quarterly Report</dc:title>
            <dc:creator>Jane Analyst</dc:creator>
            <dcterms:created>2024-03-01T09:30:00Z</dcterms:created>
            <dcterms:modified>2024-03-05T17:45:00Z</dcterms:modified>
        </cp:coreProperties>"#;
        let metadata = parse_core_properties(xml);

        assert_eq!(metadata.title.as_deref(), Some("Quarterly Report"));
        assert_eq!(metadata.author.as_deref(), Some("Jane Analyst"));
        assert!(metadata.created.is_some());
        assert!(metadata.modified.is_some());
    }

    #[test]
    fn test_core_properties_failures_swallowed() {
        let metadata = parse_core_properties("<broken <<< xml");
        assert!(metadata.is_empty());

        let metadata = parse_core_properties(
            "<cp:coreProperties><dcterms:created>not a date</dcterms:created></cp:coreProperties>",
        );
        assert!(metadata.created.is_none());
    }
}
