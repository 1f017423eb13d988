use anyhow::{bail, Context, Result};
use lectern_core::viewer::{
    downscale_to_width, encode_png, DocumentRenderer, Locator, PdfiumSource, RenderState,
};

/// Renders the first page of the located document to a PNG file.
///
/// `raw` may be a plain locator (URL or path) or a viewer URL carrying the
/// document in its `file` query parameter.
pub async fn render(raw: &str, out: &str, max_width: Option<u32>) -> Result<()> {
    let locator = Locator::from_viewer_url(raw).unwrap_or_else(|| Locator::parse(raw));

    let mut renderer = DocumentRenderer::new(PdfiumSource::new());
    let bitmap = match renderer.render(locator).await {
        RenderState::Ready(bitmap) => bitmap.clone(),
        RenderState::Failed(message) => bail!("{message}"),
        RenderState::Idle | RenderState::Loading => bail!("render did not complete"),
    };

    let bitmap = match max_width {
        Some(width) => downscale_to_width(bitmap, width).map_err(anyhow::Error::msg)?,
        None => bitmap,
    };

    let png = encode_png(&bitmap).map_err(anyhow::Error::msg)?;
    tokio::fs::write(out, png)
        .await
        .with_context(|| format!("Failed to write {out}"))?;
    println!("Wrote {}x{} page to {out}.", bitmap.width(), bitmap.height());
    Ok(())
}
