//! Opening documents from files, memory or URLs

use crate::backend::RenderBackend;
use crate::probe::{has_pdf_header, probe};
use flipbook_core::{DocumentId, DocumentSource, FlipbookError, Result};
use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Refuse downloads larger than this
pub const MAX_DOWNLOAD_BYTES: u64 = 200 * 1024 * 1024;

static NEXT_DOC_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> DocumentId {
    DocumentId(NEXT_DOC_ID.fetch_add(1, Ordering::SeqCst))
}

/// A loaded PDF. Cloning is cheap; the bytes are shared.
#[derive(Debug, Clone)]
pub struct DocumentHandle {
    pub id: DocumentId,
    pub name: String,
    pub title: Option<String>,
    pub page_count: usize,
    data: Arc<[u8]>,
}

impl DocumentHandle {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn contains(&self, page: usize) -> bool {
        (1..=self.page_count).contains(&page)
    }

    /// Title from the document info if present, else the source name
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Read a source and open it with `backend`
pub async fn load_document(
    source: DocumentSource,
    backend: Arc<dyn RenderBackend>,
) -> Result<DocumentHandle> {
    let name = source.display_name();
    let data = read_source(source).await?;
    open_bytes(name, data, backend).await
}

/// Fetch the raw bytes of a source
pub async fn read_source(source: DocumentSource) -> Result<Vec<u8>> {
    match source {
        DocumentSource::Path(path) => tokio::fs::read(&path).await.map_err(|e| {
            FlipbookError::InvalidDocument(format!("Cannot read {}: {}", path.display(), e))
        }),
        DocumentSource::Bytes { data, .. } => Ok(data),
        DocumentSource::Url(url) => tokio::task::spawn_blocking(move || fetch_url(&url)).await?,
    }
}

/// Download a PDF over HTTP(S)
pub fn fetch_url(url: &str) -> Result<Vec<u8>> {
    log::info!("Downloading {}", url);

    let response = ureq::get(url).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => {
            FlipbookError::InvalidDocument(format!("Server returned {} for {}", code, url))
        }
        other => FlipbookError::InvalidDocument(format!("Failed to fetch {}: {}", url, other)),
    })?;

    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_DOWNLOAD_BYTES + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| FlipbookError::InvalidDocument(format!("Download interrupted: {}", e)))?;

    if bytes.len() as u64 > MAX_DOWNLOAD_BYTES {
        return Err(FlipbookError::InvalidDocument(format!(
            "{} is larger than {} bytes",
            url, MAX_DOWNLOAD_BYTES
        )));
    }

    Ok(bytes)
}

/// Validate bytes and count pages with `backend`
pub async fn open_bytes(
    name: String,
    data: Vec<u8>,
    backend: Arc<dyn RenderBackend>,
) -> Result<DocumentHandle> {
    if !has_pdf_header(&data) {
        return Err(FlipbookError::InvalidDocument(format!(
            "{} is not a PDF file",
            name
        )));
    }

    let data: Arc<[u8]> = Arc::from(data);
    let shared = data.clone();

    let (page_count, title) = tokio::task::spawn_blocking(move || {
        let page_count = backend.page_count(&shared)?;
        // The title is a nicety; a document lopdf can't parse may still render
        let title = probe(&shared).ok().and_then(|info| info.title);
        Ok::<_, FlipbookError>((page_count, title))
    })
    .await??;

    if page_count == 0 {
        return Err(FlipbookError::InvalidDocument(format!(
            "{} has no pages",
            name
        )));
    }

    let handle = DocumentHandle {
        id: next_id(),
        name,
        title,
        page_count,
        data,
    };
    log::info!(
        "Loaded '{}' ({} pages) as {:?}",
        handle.name,
        handle.page_count,
        handle.id
    );

    Ok(handle)
}
