//! Document text extraction for uploaded resumes and job descriptions.
//!
//! Extraction never fails: unsupported or corrupt documents produce an empty
//! string (logged), so one bad upload cannot abort a whole screening batch.
//! The candidate simply scores low.

use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

/// The part of a .docx archive holding the body text.
const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Chosen by file extension; anything unknown is read as text.
    pub fn from_filename(filename: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => DocumentKind::Pdf,
            "docx" => DocumentKind::Docx,
            _ => DocumentKind::PlainText,
        }
    }
}

/// Returns the plain text of an uploaded document, or `""` if it cannot be read.
pub async fn extract_text(bytes: Bytes, filename: &str) -> String {
    let kind = DocumentKind::from_filename(filename);

    let result = match kind {
        DocumentKind::PlainText => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        // Parsers are CPU-bound and pdf-extract can panic on malformed input;
        // a panic surfaces here as a JoinError instead of taking the worker down.
        DocumentKind::Pdf | DocumentKind::Docx => {
            tokio::task::spawn_blocking(move || match kind {
                DocumentKind::Pdf => pdf_text(&bytes),
                _ => docx_text(&bytes),
            })
            .await
            .context("extraction task panicked")
            .and_then(|r| r)
        }
    };

    match result {
        Ok(text) => {
            debug!(filename, chars = text.len(), "Extracted document text");
            text
        }
        Err(e) => {
            warn!(filename, error = %format!("{e:#}"), "Text extraction failed, using empty text");
            String::new()
        }
    }
}

fn pdf_text(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| anyhow::anyhow!("failed to read PDF: {e:?}"))?;
    Ok(text.trim().to_string())
}

/// Concatenates the `<w:t>` runs of the document body, one line per paragraph.
fn docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).context("not a zip archive")?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .context("missing word/document.xml")?
        .read_to_string(&mut xml)
        .context("failed to read word/document.xml")?;

    document_xml_text(&xml)
}

fn document_xml_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event().context("malformed document.xml")? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) if matches!(e.name().as_ref(), b"w:tab") => out.push('\t'),
            Event::Empty(e) if matches!(e.name().as_ref(), b"w:br" | b"w:cr") => out.push('\n'),
            Event::Text(t) if in_text_run => {
                out.push_str(&t.decode().context("invalid text encoding")?);
            }
            Event::GeneralRef(r) if in_text_run => {
                if let Some(ch) = r.resolve_char_ref().context("invalid character reference")? {
                    out.push(ch);
                } else {
                    match r.decode().context("invalid entity")?.as_ref() {
                        "amp" => out.push('&'),
                        "lt" => out.push('<'),
                        "gt" => out.push('>'),
                        "quot" => out.push('"'),
                        "apos" => out.push('\''),
                        _ => {}
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out.trim().to_string())
}
