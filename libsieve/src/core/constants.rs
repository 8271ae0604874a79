/// Maximum positive value for 16-bit signed integer (2^15 - 1)
pub const I16_MAX_F64: f64 = 32767.0;

/// Minimum value for 16-bit signed integer (-2^15)
pub const I16_MIN_F64: f64 = -32768.0;

/// Brightest 8-bit intensity
pub const PIXEL_MAX_F64: f64 = 255.0;

/// Default edge length of a square transform block
pub const DEFAULT_BLOCK_SIZE: usize = 8;

/// Largest accepted block edge length
pub const MAX_BLOCK_SIZE: usize = 256;

/// Default absolute coefficient cutoff for raster blocks
pub const DEFAULT_IMAGE_THRESHOLD: f64 = 50.0;

/// Default cutoff for audio, as a fraction of the peak coefficient
pub const DEFAULT_AUDIO_RATIO: f64 = 0.1;

/// Clip a reconstructed intensity into `[0, 255]`, truncating toward zero
#[inline]
pub fn f64_to_pixel(sample: f64) -> u8 {
    sample.clamp(0.0, PIXEL_MAX_F64) as u8
}

/// Convert a full-scale value to i16, truncating toward zero
#[inline]
pub fn f64_to_i16(sample: f64) -> i16 {
    sample.clamp(I16_MIN_F64, I16_MAX_F64) as i16
}
