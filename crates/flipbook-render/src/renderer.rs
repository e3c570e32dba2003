use crate::backend::RenderBackend;
use crate::encode::encode;
use crate::loader::DocumentHandle;
use flipbook_core::{
    DEFAULT_JPEG_QUALITY, DEFAULT_THUMBNAIL_SCALE, DEFAULT_VIEW_SCALE, FlipbookError, ImageFormat,
    PageImage, Result, ViewerOptions,
};
use std::sync::Arc;

/// Named render scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPreset {
    /// Main page view
    View,
    /// Thumbnail strip
    Thumbnail,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub view_scale: f32,
    pub thumbnail_scale: f32,
    pub quality: u8,
    pub format: ImageFormat,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            view_scale: DEFAULT_VIEW_SCALE,
            thumbnail_scale: DEFAULT_THUMBNAIL_SCALE,
            quality: DEFAULT_JPEG_QUALITY,
            format: ImageFormat::Jpeg,
        }
    }
}

impl From<&ViewerOptions> for RenderSettings {
    fn from(options: &ViewerOptions) -> Self {
        Self {
            view_scale: options.view_scale,
            thumbnail_scale: options.thumbnail_scale,
            quality: options.jpeg_quality,
            format: ImageFormat::Jpeg,
        }
    }
}

/// Turns document pages into encoded images
#[derive(Clone)]
pub struct Renderer {
    backend: Arc<dyn RenderBackend>,
    settings: RenderSettings,
}

impl Renderer {
    pub fn new(backend: Arc<dyn RenderBackend>) -> Self {
        Self::with_settings(backend, RenderSettings::default())
    }

    pub fn with_settings(backend: Arc<dyn RenderBackend>, settings: RenderSettings) -> Self {
        Self { backend, settings }
    }

    pub fn backend(&self) -> Arc<dyn RenderBackend> {
        self.backend.clone()
    }

    pub fn scale_for(&self, preset: RenderPreset) -> f32 {
        match preset {
            RenderPreset::View => self.settings.view_scale,
            RenderPreset::Thumbnail => self.settings.thumbnail_scale,
        }
    }

    /// Render and encode one page. Blocking.
    pub fn render_page(
        &self,
        handle: &DocumentHandle,
        page: usize,
        scale: f32,
    ) -> Result<PageImage> {
        if !handle.contains(page) {
            return Err(FlipbookError::render(
                page,
                format!("page out of range 1..={}", handle.page_count),
            ));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(FlipbookError::render(page, format!("invalid scale {}", scale)));
        }

        let rgba = self.backend.rasterize(handle.data(), page, scale)?;
        let (width, height) = rgba.dimensions();
        let data = encode(&rgba, self.settings.format, self.settings.quality, page)?;

        log::debug!(
            "Rendered page {} with {} at {:.2}x ({}x{}, {} bytes)",
            page,
            self.backend.name(),
            scale,
            width,
            height,
            data.len()
        );

        Ok(PageImage {
            page,
            width,
            height,
            scale,
            format: self.settings.format,
            data,
        })
    }

    /// Blocking render at a preset scale
    pub fn render_preset(
        &self,
        handle: &DocumentHandle,
        page: usize,
        preset: RenderPreset,
    ) -> Result<PageImage> {
        self.render_page(handle, page, self.scale_for(preset))
    }

    /// Render on the blocking pool
    pub async fn render(
        &self,
        handle: &DocumentHandle,
        page: usize,
        preset: RenderPreset,
    ) -> Result<PageImage> {
        let renderer = self.clone();
        let handle = handle.clone();
        tokio::task::spawn_blocking(move || renderer.render_preset(&handle, page, preset)).await?
    }
}
