//! Document viewing pipeline.
//!
//! Resolves a locator, loads the PDF byte stream, rasterizes the first page
//! at a fixed 1.5x scale, and tracks the Idle -> Loading -> Ready | Failed
//! lifecycle with a stale-result guard.

pub mod bitmap;
pub mod locator;
pub mod renderer;
pub mod source;

pub use bitmap::{downscale_to_width, encode_png};
pub use locator::Locator;
pub use renderer::{DocumentRenderer, RenderState, RenderTicket};
pub use source::{DocumentError, DocumentSource, PageBitmap, PdfiumSource};

/// Fixed rasterization scale relative to the page's intrinsic dimensions.
pub const PAGE_SCALE: f32 = 1.5;
