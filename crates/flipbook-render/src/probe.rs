//! Structural inspection of PDF bytes without rasterizing

use flipbook_core::{FlipbookError, Result};
use lopdf::{Document, Object};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub page_count: usize,
    pub version: String,
    pub title: Option<String>,
}

/// Parse `data` with lopdf and read page count, version and `/Title`
pub fn probe(data: &[u8]) -> Result<DocumentInfo> {
    let doc = Document::load_mem(data)
        .map_err(|e| FlipbookError::InvalidDocument(format!("Failed to parse PDF: {}", e)))?;

    Ok(DocumentInfo {
        page_count: doc.get_pages().len(),
        version: doc.version.clone(),
        title: document_title(&doc),
    })
}

/// Cheap check for the `%PDF-` header, which may be preceded by junk
pub fn has_pdf_header(data: &[u8]) -> bool {
    let head = &data[..data.len().min(1024)];
    head.windows(5).any(|w| w == b"%PDF-")
}

fn document_title(doc: &Document) -> Option<String> {
    let info = match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };

    let title = lopdf::decode_text_string(info.get(b"Title").ok()?).ok()?;
    // lopdf keeps the UTF-8 byte order mark of PDF 2.0 strings
    let title = title.trim_start_matches('\u{feff}').trim();
    (!title.is_empty()).then(|| title.to_string())
}
