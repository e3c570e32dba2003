use flipbook_core::*;
use flipbook_render::*;
use image::{Rgba, RgbaImage};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Backend that understands `%PDF-fake pages=N` and paints each page a flat colour
#[derive(Default)]
struct FakeBackend {
    rasterized: AtomicUsize,
    broken_page: Option<usize>,
}

impl FakeBackend {
    fn parse(data: &[u8]) -> Result<usize> {
        let text = std::str::from_utf8(data)
            .map_err(|_| FlipbookError::InvalidDocument("not utf-8".to_string()))?;
        text.strip_prefix("%PDF-fake pages=")
            .and_then(|n| n.trim().parse().ok())
            .ok_or_else(|| FlipbookError::InvalidDocument("not a fake pdf".to_string()))
    }
}

impl RenderBackend for FakeBackend {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn page_count(&self, data: &[u8]) -> Result<usize> {
        Self::parse(data)
    }

    fn rasterize(&self, data: &[u8], page: usize, scale: f32) -> Result<RgbaImage> {
        Self::parse(data)?;
        if self.broken_page == Some(page) {
            return Err(FlipbookError::render(page, "corrupt content stream"));
        }
        self.rasterized.fetch_add(1, Ordering::SeqCst);
        let width = (100.0 * scale).round() as u32;
        let height = (140.0 * scale).round() as u32;
        Ok(RgbaImage::from_pixel(
            width,
            height,
            Rgba([(page * 20) as u8, 80, 160, 255]),
        ))
    }
}

fn fake_pdf(pages: usize) -> Vec<u8> {
    format!("%PDF-fake pages={}", pages).into_bytes()
}

async fn open(pages: usize, backend: Arc<dyn RenderBackend>) -> DocumentHandle {
    open_bytes("sample".to_string(), fake_pdf(pages), backend)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_open_bytes_counts_pages() {
    let handle = open(7, Arc::new(FakeBackend::default())).await;
    assert_eq!(handle.page_count, 7);
    assert_eq!(handle.name, "sample");
    assert_eq!(handle.display_title(), "sample");
    assert!(handle.contains(1));
    assert!(handle.contains(7));
    assert!(!handle.contains(0));
    assert!(!handle.contains(8));
}

#[tokio::test]
async fn test_handles_get_distinct_ids() {
    let backend: Arc<dyn RenderBackend> = Arc::new(FakeBackend::default());
    let a = open(1, backend.clone()).await;
    let b = open(1, backend).await;
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn test_non_pdf_is_invalid() {
    let result = open_bytes(
        "page.html".to_string(),
        b"<html></html>".to_vec(),
        Arc::new(FakeBackend::default()),
    )
    .await;
    assert!(matches!(result, Err(FlipbookError::InvalidDocument(_))));
}

#[tokio::test]
async fn test_unparseable_is_invalid() {
    let result = open_bytes(
        "broken.pdf".to_string(),
        b"%PDF-1.7 garbage".to_vec(),
        Arc::new(FakeBackend::default()),
    )
    .await;
    assert!(matches!(result, Err(FlipbookError::InvalidDocument(_))));
}

#[tokio::test]
async fn test_zero_pages_is_invalid() {
    let result = open_bytes(
        "empty.pdf".to_string(),
        fake_pdf(0),
        Arc::new(FakeBackend::default()),
    )
    .await;
    match result {
        Err(FlipbookError::InvalidDocument(msg)) => assert!(msg.contains("no pages")),
        other => panic!("expected InvalidDocument, got {:?}", other.map(|h| h.page_count)),
    }
}

#[tokio::test]
async fn test_load_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Quarterly Report.pdf");
    tokio::fs::write(&path, fake_pdf(3)).await.unwrap();

    let handle = load_document(
        DocumentSource::Path(path),
        Arc::new(FakeBackend::default()),
    )
    .await
    .unwrap();
    assert_eq!(handle.name, "Quarterly Report");
    assert_eq!(handle.page_count, 3);
}

#[tokio::test]
async fn test_load_missing_path_is_invalid() {
    let result = load_document(
        DocumentSource::Path("/definitely/not/here.pdf".into()),
        Arc::new(FakeBackend::default()),
    )
    .await;
    assert!(matches!(result, Err(FlipbookError::InvalidDocument(_))));
}

#[tokio::test]
async fn test_load_from_bytes() {
    let handle = load_document(
        DocumentSource::Bytes {
            name: "upload.pdf".to_string(),
            data: fake_pdf(2),
        },
        Arc::new(FakeBackend::default()),
    )
    .await
    .unwrap();
    assert_eq!(handle.name, "upload");
}

#[tokio::test]
async fn test_render_page_encodes_jpeg() {
    let handle = open(3, Arc::new(FakeBackend::default())).await;
    let renderer = Renderer::new(Arc::new(FakeBackend::default()));

    let image = renderer.render(&handle, 2, RenderPreset::View).await.unwrap();
    assert_eq!(image.page, 2);
    assert_eq!(image.format, ImageFormat::Jpeg);
    assert_eq!(image.scale, DEFAULT_VIEW_SCALE);
    assert_eq!((image.width, image.height), (150, 210));
    assert_eq!(&image.data[..2], &[0xFF, 0xD8]);
}

#[tokio::test]
async fn test_thumbnails_are_smaller() {
    let backend: Arc<dyn RenderBackend> = Arc::new(FakeBackend::default());
    let handle = open(3, backend.clone()).await;
    let renderer = Renderer::new(backend);

    let view = renderer.render(&handle, 1, RenderPreset::View).await.unwrap();
    let thumb = renderer
        .render(&handle, 1, RenderPreset::Thumbnail)
        .await
        .unwrap();
    assert!(thumb.width < view.width);
    assert!(thumb.height < view.height);
    assert_eq!((thumb.width, thumb.height), (30, 42));
}

#[tokio::test]
async fn test_render_is_deterministic() {
    let backend: Arc<dyn RenderBackend> = Arc::new(FakeBackend::default());
    let handle = open(4, backend.clone()).await;
    let renderer = Renderer::new(backend);

    let first = renderer.render_page(&handle, 3, 0.5).unwrap();
    let second = renderer.render_page(&handle, 3, 0.5).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_out_of_range_is_render_failure() {
    let backend = Arc::new(FakeBackend::default());
    let handle = open(2, backend.clone()).await;
    let renderer = Renderer::new(backend.clone());

    for page in [0, 3, 100] {
        match renderer.render_page(&handle, page, 1.0) {
            Err(FlipbookError::RenderFailure { page: failed, .. }) => assert_eq!(failed, page),
            other => panic!("expected RenderFailure, got {:?}", other.map(|i| i.page)),
        }
    }
    // The backend was never asked
    assert_eq!(backend.rasterized.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_backend_fault_is_render_failure() {
    let backend = Arc::new(FakeBackend {
        broken_page: Some(2),
        ..Default::default()
    });
    let handle = open(3, backend.clone()).await;
    let renderer = Renderer::new(backend);

    assert!(renderer.render_page(&handle, 1, 1.0).is_ok());
    assert!(matches!(
        renderer.render_page(&handle, 2, 1.0),
        Err(FlipbookError::RenderFailure { page: 2, .. })
    ));
}

#[tokio::test]
async fn test_settings_from_options() {
    let mut options = ViewerOptions::default();
    options.view_scale = 2.0;
    options.jpeg_quality = 40;
    let settings = RenderSettings::from(&options);
    assert_eq!(settings.view_scale, 2.0);
    assert_eq!(settings.quality, 40);

    let backend: Arc<dyn RenderBackend> = Arc::new(FakeBackend::default());
    let handle = open(1, backend.clone()).await;
    let renderer = Renderer::with_settings(backend, settings);
    assert_eq!(renderer.scale_for(RenderPreset::View), 2.0);

    let image = renderer.render(&handle, 1, RenderPreset::View).await.unwrap();
    assert_eq!((image.width, image.height), (200, 280));
}
