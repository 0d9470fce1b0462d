//! Document text extraction.
//!
//! Extraction is best-effort: a document that cannot be read or parsed
//! degrades to a visible placeholder string so a batch over many documents
//! keeps going. Callers never see an extraction error.

use std::io::Read;
use std::path::Path;

use async_trait::async_trait;
use regex::Regex;
use tracing::warn;

/// Placeholder used when a document yields no extractable text at all.
pub const EMPTY_PLACEHOLDER: &str = "No text could be extracted from this file.";

/// Supported document kinds, sniffed from the file extension.
/// Anything that is not PDF or DOCX is treated as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("pdf") => DocumentKind::Pdf,
            Some("docx") => DocumentKind::Docx,
            _ => DocumentKind::PlainText,
        }
    }
}

/// Document text source. Carried in `AppState` as `Arc<dyn TextExtractor>`;
/// implement this to swap extraction backends without touching handler code.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Best-effort plain text for the document at `path`. Never fails:
    /// unreadable documents come back as a placeholder string.
    async fn extract(&self, path: &Path) -> String;
}

/// Default extractor: reads local files, dispatching on extension.
pub struct FileTextExtractor;

#[async_trait]
impl TextExtractor for FileTextExtractor {
    async fn extract(&self, path: &Path) -> String {
        let result = match DocumentKind::from_path(path) {
            DocumentKind::Pdf => extract_pdf(path),
            DocumentKind::Docx => extract_docx(path),
            DocumentKind::PlainText => {
                std::fs::read_to_string(path).map_err(anyhow::Error::from)
            }
        };

        match result {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => EMPTY_PLACEHOLDER.to_string(),
            Err(e) => {
                warn!("Extraction failed for {}: {e}", path.display());
                format!("Error reading file: {e}")
            }
        }
    }
}

fn extract_pdf(path: &Path) -> anyhow::Result<String> {
    pdf_extract::extract_text(path).map_err(|e| anyhow::anyhow!("pdf parse failed: {e:?}"))
}

/// A .docx file is a zip container whose body text lives in
/// word/document.xml. Paragraph closes become line breaks, remaining tags
/// are stripped, and the predefined XML entities are decoded.
fn extract_docx(path: &Path) -> anyhow::Result<String> {
    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;

    let with_breaks = xml.replace("</w:p>", "</w:p>\n");
    let tag = Regex::new(r"<[^>]+>").unwrap();
    let stripped = tag.replace_all(&with_breaks, "");
    Ok(decode_entities(&stripped))
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
