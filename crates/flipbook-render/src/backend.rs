use flipbook_core::Result;
use image::RgbaImage;

/// Rasterizes PDF bytes. Page numbers are 1-indexed.
///
/// Implementations are called from blocking tasks and may be called from
/// several threads at once.
pub trait RenderBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Number of pages, or `InvalidDocument` if the bytes cannot be parsed
    fn page_count(&self, data: &[u8]) -> Result<usize>;

    /// Render one page at `scale` (1.0 = 72 DPI)
    fn rasterize(&self, data: &[u8], page: usize, scale: f32) -> Result<RgbaImage>;
}
