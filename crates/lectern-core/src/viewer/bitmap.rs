//! Bitmap encode/resize helpers for the viewer surface.

use super::source::PageBitmap;

/// Encodes the surface as PNG bytes (fast compression).
///
/// # Errors
/// Returns an error string if PNG encoding fails.
pub fn encode_png(bitmap: &PageBitmap) -> Result<Vec<u8>, String> {
    use image::ImageEncoder as _;
    use image::codecs::png::{CompressionType, FilterType, PngEncoder};

    let mut buf = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buf, CompressionType::Fast, FilterType::Adaptive);
    encoder
        .write_image(
            bitmap.image().as_raw(),
            bitmap.width(),
            bitmap.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| format!("encode: {e}"))?;

    Ok(buf)
}

/// Downscales the surface so its width does not exceed `max_width`,
/// preserving aspect ratio. Returns the bitmap unchanged when it already
/// fits.
pub fn downscale_to_width(bitmap: PageBitmap, max_width: u32) -> Result<PageBitmap, String> {
    use fast_image_resize as fir;

    let max_width = max_width.max(1);
    let (src_w, src_h) = (bitmap.width(), bitmap.height());
    if src_w <= max_width {
        return Ok(bitmap);
    }

    let dst_w = max_width;
    let dst_h = ((u64::from(src_h) * u64::from(dst_w)) / u64::from(src_w)).max(1) as u32;

    let src_pixels = bitmap.into_image().into_raw();
    let src_image = fir::images::Image::from_vec_u8(src_w, src_h, src_pixels, fir::PixelType::U8x4)
        .map_err(|e| format!("resize: {e}"))?;

    let mut dst_image = fir::images::Image::new(dst_w, dst_h, fir::PixelType::U8x4);
    let mut resizer = fir::Resizer::new();
    let options = fir::ResizeOptions::new().resize_alg(fir::ResizeAlg::Nearest);
    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| format!("resize: {e}"))?;

    let rgba = image::RgbaImage::from_raw(dst_w, dst_h, dst_image.into_vec())
        .ok_or_else(|| "resize: invalid output buffer".to_string())?;
    Ok(PageBitmap::new(rgba))
}
