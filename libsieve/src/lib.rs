#![allow(clippy::needless_range_loop)]
//! Transform-domain lossy compression for intensity rasters and PCM audio.
//!
//! Two independent compressors share one orthonormal DCT primitive:
//!
//! - [`BlockCompressor`] crops a raster to whole 8x8 blocks, zeroes every
//!   block coefficient below an absolute cutoff and rebuilds the pixels.
//! - [`SignalCompressor`] transforms an entire audio signal at once, zeroes
//!   coefficients below a fraction of the peak and renormalizes the
//!   reconstruction to full 16-bit scale.
//!
//! Both are pure functions of their input and options.

pub mod audio;
pub mod core;
pub mod raster;
pub mod transform;

mod wasm;

pub use crate::core::{
    AudioOptions, AudioSignal, ImageOptions, Plane, Raster, SieveError, SieveResult,
    DEFAULT_AUDIO_RATIO, DEFAULT_BLOCK_SIZE, DEFAULT_IMAGE_THRESHOLD, MAX_BLOCK_SIZE,
};
pub use audio::{AudioStats, Guard, SignalCompressor};
pub use raster::{BlockCompressor, ImageStats};
pub use transform::{dct, idct, Dct};

/// compress a raster with the block compressor
///
/// # Arguments
/// * `raster` - Single-channel 8-bit raster of any size
/// * `options` - Block size and absolute cutoff
///
/// # Returns
/// Raster of `(width - width % bs) x (height - height % bs)` pixels, which is
/// empty when either edge is shorter than one block
pub fn compress_image(raster: &Raster, options: &ImageOptions) -> SieveResult<Raster> {
    BlockCompressor::new(*options)?.compress(raster)
}

/// compress a 16-bit signal with the whole-signal compressor
///
/// # Arguments
/// * `signal` - PCM samples and sample rate
/// * `options` - Relative cutoff
///
/// # Returns
/// Signal of the same length and sample rate, renormalized to full scale
pub fn compress_audio(signal: &AudioSignal, options: &AudioOptions) -> SieveResult<AudioSignal> {
    SignalCompressor::new(*options)?.compress(signal)
}
