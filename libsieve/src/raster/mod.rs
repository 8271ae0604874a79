//! Block transform compressor for single-channel rasters
//!
//! Crops the raster to whole blocks, runs a 2D DCT per block, zeroes every
//! coefficient below a fixed absolute cutoff and rebuilds the pixels.

pub mod compressor;

pub use compressor::{BlockCompressor, ImageStats};
