//! Document loading and rasterization.
//!
//! `DocumentSource` is the seam between the renderer state machine and the
//! actual PDF machinery; tests substitute controllable stubs. The real
//! implementation fetches the byte stream and rasterizes through pdfium on
//! a blocking worker (the pdfium session is not `Send`).

use std::fmt;
use std::future::Future;

use image::RgbaImage;
use pdfium_render::prelude::*;
use tracing::debug;

use super::locator::Locator;

/// The rasterized page surface: an RGBA bitmap sized exactly to the
/// rendered viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBitmap {
    image: RgbaImage,
}

impl PageBitmap {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Failure in the document pipeline, by stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The byte stream could not be retrieved.
    Fetch(String),
    /// The document could not be opened or has no first page.
    Open(String),
    /// Rasterization failed.
    Render(String),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Fetch(msg) => write!(f, "Could not load the document: {msg}"),
            DocumentError::Open(msg) => write!(f, "Could not open the document: {msg}"),
            DocumentError::Render(msg) => write!(f, "Could not render the page: {msg}"),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Loads a document and rasterizes its first page at the given scale.
pub trait DocumentSource {
    fn load(
        &self,
        locator: &Locator,
        scale: f32,
    ) -> impl Future<Output = Result<PageBitmap, DocumentError>> + Send;
}

/// Production source: reqwest for http(s) locators, the filesystem for
/// local paths, pdfium for rasterization.
#[derive(Debug, Clone, Default)]
pub struct PdfiumSource {
    http: reqwest::Client,
}

impl PdfiumSource {
    pub fn new() -> Self {
        Self::default()
    }

    async fn fetch(&self, locator: &Locator) -> Result<Vec<u8>, DocumentError> {
        if locator.is_remote() {
            let response = self
                .http
                .get(locator.as_str())
                .send()
                .await
                .map_err(|e| DocumentError::Fetch(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(DocumentError::Fetch(format!("HTTP {status}")));
            }
            let bytes = response
                .bytes()
                .await
                .map_err(|e| DocumentError::Fetch(e.to_string()))?;
            Ok(bytes.to_vec())
        } else {
            tokio::fs::read(locator.as_str())
                .await
                .map_err(|e| DocumentError::Fetch(format!("{}: {e}", locator.as_str())))
        }
    }
}

impl DocumentSource for PdfiumSource {
    async fn load(&self, locator: &Locator, scale: f32) -> Result<PageBitmap, DocumentError> {
        let bytes = self.fetch(locator).await?;
        debug!(locator = %locator, len = bytes.len(), "document fetched");

        // Pdfium types are not Send; bind and rasterize on a blocking worker.
        tokio::task::spawn_blocking(move || rasterize_first_page(&bytes, scale))
            .await
            .map_err(|e| DocumentError::Render(format!("worker: {e}")))?
    }
}

/// Opens the document from bytes, requests a viewport at `scale` relative
/// to the first page's intrinsic dimensions, and renders it into an RGBA
/// bitmap sized to that viewport.
fn rasterize_first_page(bytes: &[u8], scale: f32) -> Result<PageBitmap, DocumentError> {
    let bindings = Pdfium::bind_to_system_library()
        .map_err(|e| DocumentError::Render(format!("pdfium unavailable: {e}")))?;
    let pdfium = Pdfium::new(bindings);

    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| DocumentError::Open(e.to_string()))?;
    let page = document
        .pages()
        .get(0)
        .map_err(|e| DocumentError::Open(e.to_string()))?;

    let config = PdfRenderConfig::new().scale_page_by_factor(scale);
    let rendered = page
        .render_with_config(&config)
        .map_err(|e| DocumentError::Render(e.to_string()))?;

    Ok(PageBitmap::new(rendered.as_image().into_rgba8()))
}
