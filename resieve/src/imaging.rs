//! Raster decode and JPEG output

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use libsieve::Raster;
use std::path::Path;

/// Decoded image reduced to a single intensity channel
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub raster: Raster,
    /// Detected container (e.g. "PNG", "JPEG")
    pub source_format: Option<String>,
}

/// Read an image file from disk
pub fn read_image_file(path: &Path) -> Result<DecodedImage> {
    let bytes = std::fs::read(path).context("Failed to open image file")?;
    read_image_from_bytes(&bytes)
}

/// Decode any supported image and convert it to 8-bit luma
pub fn read_image_from_bytes(bytes: &[u8]) -> Result<DecodedImage> {
    let source_format = image::guess_format(bytes)
        .ok()
        .map(|f| format!("{:?}", f).to_uppercase());

    let decoded = image::load_from_memory(bytes).context("Unsupported image format")?;
    let luma = decoded.to_luma8();
    let (width, height) = luma.dimensions();

    log::debug!(
        "decoded {}x{} image ({})",
        width,
        height,
        source_format.as_deref().unwrap_or("unknown")
    );

    let raster = Raster::new(width as usize, height as usize, luma.into_raw())
        .context("Decoded image has an inconsistent pixel buffer")?;

    Ok(DecodedImage {
        raster,
        source_format,
    })
}

/// Encode a raster as a grayscale JPEG
///
/// # Arguments
/// * `raster` - Non-empty raster
/// * `quality` - JPEG quality, 1-100
pub fn write_jpeg_to_bytes(raster: &Raster, quality: u8) -> Result<Vec<u8>> {
    let width = u32::try_from(raster.width()).context("Image too wide for JPEG")?;
    let height = u32::try_from(raster.height()).context("Image too tall for JPEG")?;

    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .encode(raster.pixels(), width, height, ExtendedColorType::L8)
        .context("Failed to encode JPEG")?;
    Ok(out)
}
