mod backend;
pub mod encode;
mod loader;
#[cfg(all(feature = "pdfium", not(target_arch = "wasm32")))]
mod pdfium;
pub mod probe;
mod renderer;

pub use backend::RenderBackend;
pub use loader::{
    DocumentHandle, MAX_DOWNLOAD_BYTES, fetch_url, load_document, open_bytes, read_source,
};
#[cfg(all(feature = "pdfium", not(target_arch = "wasm32")))]
pub use pdfium::{PdfiumBackend, init_pdfium};
pub use probe::{DocumentInfo, probe};
pub use renderer::{RenderPreset, RenderSettings, Renderer};
