// DOCX text extraction: a .docx file is a zip container whose body lives in
// word/document.xml. Paragraph text is the concatenation of its <w:t> runs,
// with <w:tab/> and <w:br/> rendered as tab and newline. Text boxes and
// paragraph properties are not body text.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::types::ExtractorStrategy;
use super::ExtractionError;
use crate::pipeline::import::DocumentFormat;

const DOCUMENT_PART: &str = "word/document.xml";

/// Subtrees whose contents never count as paragraph text.
const SKIPPED_ELEMENTS: &[&[u8]] = &[b"w:txbxContent", b"mc:Fallback", b"w:pPr"];

pub struct DocxStrategy;

impl ExtractorStrategy for DocxStrategy {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes =
            std::fs::read(path).map_err(|e| ExtractionError::failed(DocumentFormat::Docx, e))?;
        let xml = read_document_xml(&bytes)?;
        let paragraphs = paragraph_texts(&xml)?;

        tracing::debug!(paragraph_count = paragraphs.len(), "DOCX body read");

        Ok(paragraphs.join("\n").trim().to_string())
    }
}

fn read_document_xml(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::failed(DocumentFormat::Docx, e))?;

    let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
        ExtractionError::failed(DocumentFormat::Docx, format!("{DOCUMENT_PART}: {e}"))
    })?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractionError::failed(DocumentFormat::Docx, e))?;
    Ok(xml)
}

/// Text of every outermost paragraph in document order (empty paragraphs included).
fn paragraph_texts(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut paragraph_depth = 0usize;
    // Element depth inside a skipped subtree; 0 when reading normally.
    let mut skip_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractionError::failed(DocumentFormat::Docx, e))?;

        match event {
            Event::Start(_) if skip_depth > 0 => skip_depth += 1,
            Event::End(_) if skip_depth > 0 => skip_depth -= 1,
            Event::Empty(_) | Event::Text(_) if skip_depth > 0 => {}

            Event::Start(e) => match e.name().as_ref() {
                name if SKIPPED_ELEMENTS.contains(&name) => skip_depth = 1,
                b"w:p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current.clear();
                    }
                }
                b"w:t" if paragraph_depth > 0 => in_text = true,
                name if paragraph_depth > 0 => push_control(&mut current, name),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" if paragraph_depth == 0 => paragraphs.push(String::new()),
                name if paragraph_depth > 0 => push_control(&mut current, name),
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractionError::failed(DocumentFormat::Docx, e))?;
                current.push_str(&text);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" if paragraph_depth > 0 => {
                    paragraph_depth -= 1;
                    if paragraph_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Tabs and line breaks inside a run.
fn push_control(text: &mut String, name: &[u8]) {
    match name {
        b"w:tab" => text.push('\t'),
        b"w:br" | b"w:cr" => text.push('\n'),
        _ => {}
    }
}
