use std::io::{Cursor, Read};
use std::path::Path;
use quick_xml::events::Event;
use quick_xml::Reader;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{Result, TranslyError};

/// Document formats the input adapter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Docx,
    Pdf,
}

impl DocumentKind {
    /// Pick the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" => Ok(Self::Text),
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            _ => Err(TranslyError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read a supported document as plain text
pub async fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let kind = DocumentKind::from_path(path)?;

    if !path.exists() {
        return Err(TranslyError::FileNotFound(path.display().to_string()));
    }

    info!("Loading {:?} document: {}", kind, path.display());

    let text = match kind {
        DocumentKind::Text => fs::read_to_string(path).await?,
        DocumentKind::Docx => {
            let bytes = fs::read(path).await?;
            tokio::task::spawn_blocking(move || extract_docx_text(&bytes))
                .await
                .map_err(|e| TranslyError::Document(format!("Extraction task failed: {}", e)))??
        }
        DocumentKind::Pdf => {
            let bytes = fs::read(path).await?;
            tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
                .await
                .map_err(|e| TranslyError::Document(format!("Extraction task failed: {}", e)))??
        }
    };

    debug!("Loaded {} chars from {}", text.chars().count(), path.display());
    Ok(text)
}

/// Write text verbatim as UTF-8
pub async fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, text.as_bytes()).await?;
    info!("Saved {} chars to {}", text.chars().count(), path.display());
    Ok(())
}

fn document_error(e: impl std::fmt::Display) -> TranslyError {
    TranslyError::Document(e.to_string())
}

/// Paragraph text of a .docx file, one paragraph per line
pub fn extract_docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(document_error)?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(document_error)?
        .read_to_string(&mut xml)?;

    paragraphs_from_document_xml(&xml).map(|paragraphs| paragraphs.join("\n"))
}

fn paragraphs_from_document_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event().map_err(document_error)? {
            Event::Start(element) if element.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(element) => match element.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Empty(element) => match element.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(text) if in_text_run => {
                current.push_str(&text.decode().map_err(document_error)?);
            }
            Event::GeneralRef(reference) if in_text_run => {
                if let Some(ch) = reference.resolve_char_ref().map_err(document_error)? {
                    current.push(ch);
                } else {
                    let name = reference.decode().map_err(document_error)?;
                    if let Some(value) = quick_xml::escape::resolve_predefined_entity(&name) {
                        current.push_str(value);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Text of every page of a PDF
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(document_error)
}
