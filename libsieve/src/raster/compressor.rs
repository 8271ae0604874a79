use log::debug;
use rayon::prelude::*;

use crate::core::{f64_to_pixel, ImageOptions, Plane, Raster, SieveError, SieveResult};
use crate::transform::{forward_2d, inverse_2d, threshold_absolute, BlockScratch, Dct, ThresholdCount};

/// Counters from one raster compression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageStats {
    /// Number of blocks transformed
    pub blocks: usize,
    /// Coefficients at or above the cutoff
    pub coefficients_kept: usize,
    /// Coefficients zeroed by the cutoff
    pub coefficients_zeroed: usize,
}

impl ImageStats {
    /// Fraction of coefficients that were zeroed (0.0 for an empty raster)
    pub fn sparsity(&self) -> f64 {
        let total = self.coefficients_kept + self.coefficients_zeroed;
        if total == 0 {
            0.0
        } else {
            self.coefficients_zeroed as f64 / total as f64
        }
    }
}

/// Block DCT compressor
///
/// One instance can serve any number of rasters, from any number of threads.
pub struct BlockCompressor {
    options: ImageOptions,
    dct: Dct,
}

impl BlockCompressor {
    /// Create a compressor, rejecting out-of-range options
    pub fn new(options: ImageOptions) -> SieveResult<Self> {
        options.validate()?;
        Ok(Self {
            dct: Dct::new(options.block_size),
            options,
        })
    }

    pub fn options(&self) -> &ImageOptions {
        &self.options
    }

    /// Output shape for an input of `width x height`: both edges rounded down
    /// to whole blocks
    pub fn output_dimensions(&self, width: usize, height: usize) -> (usize, usize) {
        let bs = self.options.block_size;
        (width - width % bs, height - height % bs)
    }

    /// Compress an 8-bit raster
    pub fn compress(&self, raster: &Raster) -> SieveResult<Raster> {
        self.compress_with_stats(raster).map(|(out, _)| out)
    }

    /// Compress an 8-bit raster and report coefficient counts
    pub fn compress_with_stats(&self, raster: &Raster) -> SieveResult<(Raster, ImageStats)> {
        let (width, height) = self.output_dimensions(raster.width(), raster.height());
        let arena = crop_rows(raster.pixels(), raster.width(), width, height);
        self.run(&arena, width, height)
    }

    /// Compress a floating-point plane
    ///
    /// Fails with [`SieveError::NonFiniteSample`] if any sample is NaN or
    /// infinite, including samples in the cropped border.
    pub fn compress_plane(&self, plane: &Plane) -> SieveResult<(Raster, ImageStats)> {
        if let Some(index) = plane.first_non_finite() {
            return Err(SieveError::NonFiniteSample { index });
        }
        let (width, height) = self.output_dimensions(plane.width(), plane.height());
        let arena = crop_rows(plane.samples(), plane.width(), width, height);
        self.run(&arena, width, height)
    }

    fn run(&self, arena: &[f64], width: usize, height: usize) -> SieveResult<(Raster, ImageStats)> {
        let bs = self.options.block_size;
        let cutoff = self.options.threshold;
        let mut pixels = vec![0u8; width * height];

        let count = if pixels.is_empty() {
            ThresholdCount::default()
        } else {
            // one band = one row of blocks
            let band_len = bs * width;
            arena
                .par_chunks(band_len)
                .zip(pixels.par_chunks_mut(band_len))
                .map_init(
                    || (BlockScratch::new(bs), vec![0.0f64; bs * bs]),
                    |(scratch, block), (band, out)| {
                        let mut count = ThresholdCount::default();
                        for x0 in (0..width).step_by(bs) {
                            for r in 0..bs {
                                let src = r * width + x0;
                                block[r * bs..(r + 1) * bs].copy_from_slice(&band[src..src + bs]);
                            }

                            forward_2d(&self.dct, block, scratch);
                            count += threshold_absolute(block, cutoff);
                            inverse_2d(&self.dct, block, scratch);

                            for r in 0..bs {
                                let dst = r * width + x0;
                                for (o, &v) in out[dst..dst + bs]
                                    .iter_mut()
                                    .zip(&block[r * bs..(r + 1) * bs])
                                {
                                    *o = f64_to_pixel(v);
                                }
                            }
                        }
                        count
                    },
                )
                .reduce(ThresholdCount::default, |a, b| a + b)
        };

        let stats = ImageStats {
            blocks: (width / bs) * (height / bs),
            coefficients_kept: count.kept,
            coefficients_zeroed: count.zeroed,
        };

        debug!(
            "raster {}x{}: {} blocks, {} kept, {} zeroed (cutoff {})",
            width, height, stats.blocks, stats.coefficients_kept, stats.coefficients_zeroed, cutoff
        );

        Ok((Raster::new(width, height, pixels)?, stats))
    }
}

/// Copy the top-left `width x height` window of a row-major buffer into f64
fn crop_rows<T: Copy + Into<f64>>(
    src: &[T],
    src_width: usize,
    width: usize,
    height: usize,
) -> Vec<f64> {
    let mut arena = Vec::with_capacity(width * height);
    for y in 0..height {
        let start = y * src_width;
        arena.extend(src[start..start + width].iter().map(|&s| s.into()));
    }
    arena
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_rows_drops_border() {
        let src: Vec<u8> = (0..20).collect(); // 5 wide, 4 tall
        let cropped = crop_rows(&src, 5, 3, 2);
        assert_eq!(cropped, vec![0.0, 1.0, 2.0, 5.0, 6.0, 7.0]);
    }
}
