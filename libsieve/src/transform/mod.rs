//! Separable cosine transforms shared by the raster and audio compressors

pub mod block;
pub mod dct;

pub use block::{forward_2d, inverse_2d, threshold_absolute, BlockScratch, ThresholdCount};
pub use dct::{dct, idct, Dct, TABLE_MAX_LEN};
