use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlipbookError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("Failed to render page {page}: {reason}")]
    RenderFailure { page: usize, reason: String },
    #[error("Invalid share link: {0}")]
    InvalidLink(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, FlipbookError>;

impl FlipbookError {
    pub fn render(page: usize, reason: impl Into<String>) -> Self {
        Self::RenderFailure {
            page,
            reason: reason.into(),
        }
    }
}

/// Handle to a loaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// Where a document comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    /// Local file on disk
    Path(PathBuf),
    /// Bytes already in memory (e.g. an upload)
    Bytes { name: String, data: Vec<u8> },
    /// Publicly reachable URL
    Url(String),
}

impl DocumentSource {
    /// Interpret a command-line style argument: `http(s)://` is a URL, anything else a path
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            DocumentSource::Url(arg.to_string())
        } else {
            DocumentSource::Path(PathBuf::from(arg))
        }
    }

    /// Display name derived from the source, without the `.pdf` extension
    pub fn display_name(&self) -> String {
        let raw = match self {
            DocumentSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            DocumentSource::Bytes { name, .. } => name.clone(),
            DocumentSource::Url(url) => {
                let without_query = url.split(['?', '#']).next().unwrap_or(url);
                let last = without_query.rsplit('/').next().unwrap_or_default();
                urlencoding::decode(last)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| last.to_string())
            }
        };

        let trimmed = raw
            .strip_suffix(".pdf")
            .or_else(|| raw.strip_suffix(".PDF"))
            .unwrap_or(&raw);

        if trimmed.is_empty() {
            "Untitled".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Encoding of a rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }
}

/// A rendered, encoded page. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PageImage {
    /// 1-indexed page number
    pub page: usize,
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub format: ImageFormat,
    pub data: Vec<u8>,
}

impl PageImage {
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

/// Catalog entry for a flipbook. Holds no page data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FlipbookRecord {
    pub id: String,
    pub name: String,
    pub total_pages: usize,
    pub created_at: DateTime<Utc>,
}

impl FlipbookRecord {
    pub fn new(name: impl Into<String>, total_pages: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            name: name.into(),
            total_pages,
            created_at: Utc::now(),
        }
    }
}
