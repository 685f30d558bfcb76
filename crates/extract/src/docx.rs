use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Body paragraphs of a DOCX document, one per line.
///
/// Paragraphs inside tables or nested inside another paragraph (text boxes)
/// are not body paragraphs and are skipped. Empty paragraphs still produce an
/// (empty) line.
pub(crate) fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| ExtractError::Docx(format!("missing {DOCUMENT_PART}")))?;
    let mut xml = Vec::new();
    part.read_to_end(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    let paragraphs = body_paragraphs(&xml)?;
    Ok(paragraphs.join("\n"))
}

fn body_paragraphs(xml: &[u8]) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut table_depth = 0usize;
    let mut in_properties = false;
    let mut in_text_node = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:p" => open.push(String::new()),
                b"w:pPr" => in_properties = true,
                b"w:t" => in_text_node = true,
                b"w:tab" if !in_properties => push_char(&mut open, '\t'),
                b"w:br" | b"w:cr" => push_char(&mut open, '\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:p" => {
                    if open.is_empty() && table_depth == 0 {
                        paragraphs.push(String::new());
                    }
                }
                // Tab stops in paragraph properties are layout, not text.
                b"w:tab" if !in_properties => push_char(&mut open, '\t'),
                b"w:br" | b"w:cr" => push_char(&mut open, '\n'),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text_node {
                    let value = e
                        .unescape()
                        .map_err(|err| ExtractError::Docx(err.to_string()))?;
                    if let Some(current) = open.last_mut() {
                        current.push_str(&value);
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text_node = false,
                b"w:pPr" => in_properties = false,
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:p" => {
                    if let Some(paragraph) = open.pop() {
                        if open.is_empty() && table_depth == 0 {
                            paragraphs.push(paragraph);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(ExtractError::Docx(format!(
                    "malformed document XML at byte {}: {err}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn push_char(open: &mut [String], c: char) {
    if let Some(current) = open.last_mut() {
        current.push(c);
    }
}
