use crate::backend::RenderBackend;
use flipbook_core::{FlipbookError, Result};
use image::RgbaImage;
use pdfium_render::prelude::*;
use std::path::PathBuf;
use std::sync::Mutex;

// Pdfium is not thread-safe and is bound once per process. Every call into it
// goes through this lock.
static PDFIUM: Mutex<Option<Pdfium>> = Mutex::new(None);

/// Initialize Pdfium, trying the vendored library first, then falling back to system
pub fn init_pdfium() -> std::result::Result<Pdfium, PdfiumError> {
    // When running from cargo, the working directory is the workspace root
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}

/// Backend that renders through the pdfium library
#[derive(Debug, Clone, Default)]
pub struct PdfiumBackend {
    library_dir: Option<PathBuf>,
}

impl PdfiumBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load pdfium from `dir` instead of the vendored/system locations.
    /// Ignored if another backend already bound the library.
    pub fn with_library_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: Some(dir.into()),
        }
    }

    fn bind(&self) -> std::result::Result<Pdfium, PdfiumError> {
        match &self.library_dir {
            Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
                .map(Pdfium::new),
            None => init_pdfium(),
        }
    }

    /// Run `f` against the shared library, binding it on first use
    fn with_pdfium<T>(
        &self,
        unavailable: impl FnOnce(PdfiumError) -> FlipbookError,
        f: impl FnOnce(&Pdfium) -> Result<T>,
    ) -> Result<T> {
        let mut guard = PDFIUM.lock().unwrap_or_else(|e| e.into_inner());
        let pdfium = match guard.take() {
            Some(pdfium) => pdfium,
            None => {
                let pdfium = self.bind().map_err(unavailable)?;
                log::info!("Bound pdfium library");
                pdfium
            }
        };
        f(guard.insert(pdfium))
    }
}

impl RenderBackend for PdfiumBackend {
    fn name(&self) -> &'static str {
        "pdfium"
    }

    fn page_count(&self, data: &[u8]) -> Result<usize> {
        self.with_pdfium(
            |e| FlipbookError::InvalidDocument(format!("PDF renderer unavailable: {}", e)),
            |pdfium| {
                let document = pdfium.load_pdf_from_byte_slice(data, None).map_err(|e| {
                    FlipbookError::InvalidDocument(format!("Failed to load PDF: {}", e))
                })?;
                Ok(document.pages().len() as usize)
            },
        )
    }

    fn rasterize(&self, data: &[u8], page: usize, scale: f32) -> Result<RgbaImage> {
        let index = page
            .checked_sub(1)
            .and_then(|i| u16::try_from(i).ok())
            .ok_or_else(|| FlipbookError::render(page, "page number out of range"))?;

        self.with_pdfium(
            |e| FlipbookError::render(page, format!("PDF renderer unavailable: {}", e)),
            |pdfium| {
                let document = pdfium
                    .load_pdf_from_byte_slice(data, None)
                    .map_err(|e| FlipbookError::render(page, e.to_string()))?;
                let pdf_page = document
                    .pages()
                    .get(index)
                    .map_err(|e| FlipbookError::render(page, e.to_string()))?;

                let config = PdfRenderConfig::new().scale_page_by_factor(scale);
                let bitmap = pdf_page
                    .render_with_config(&config)
                    .map_err(|e| FlipbookError::render(page, e.to_string()))?;

                let width = bitmap.width() as u32;
                let height = bitmap.height() as u32;
                RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes().to_vec()).ok_or_else(
                    || FlipbookError::render(page, format!("bitmap is not {}x{} RGBA", width, height)),
                )
            },
        )
    }
}
