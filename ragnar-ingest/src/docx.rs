//! Word-processor (DOCX) text extraction
//!
//! A .docx file is a zip package; the document body lives in
//! `word/document.xml` as WordprocessingML. Text runs (`<w:t>`) are collected
//! per paragraph (`<w:p>`), one paragraph per output line.

use crate::error::{IngestError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const DOCUMENT_XML: &str = "word/document.xml";

/// Extract paragraph text from a DOCX file, one paragraph per line, in
/// document order.
pub fn extract_docx(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| IngestError::docx(path, format!("not a zip package: {e}")))?;

    let mut document_xml = String::new();
    archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| IngestError::docx(path, format!("missing {DOCUMENT_XML}: {e}")))?
        .read_to_string(&mut document_xml)
        .map_err(|e| IngestError::docx(path, e))?;

    let paragraphs = collect_paragraphs(&document_xml)
        .map_err(|message| IngestError::docx(path, message))?;

    tracing::debug!(
        "Extracted {} paragraphs from {}",
        paragraphs.len(),
        path.display()
    );
    Ok(paragraphs.join("\n"))
}

/// Walk the WordprocessingML body and collect the text of each paragraph.
fn collect_paragraphs(document_xml: &str) -> std::result::Result<Vec<String>, String> {
    let mut reader = Reader::from_str(document_xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;
    let mut in_paragraph = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" if in_paragraph => current.push('\t'),
                b"w:br" if in_paragraph => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run => {
                current.push_str(&t.unescape().map_err(|e| e.to_string())?);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    in_paragraph = false;
                    paragraphs.push(std::mem::take(&mut current));
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
