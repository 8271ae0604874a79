//! common types for sieve

use super::error::{SieveError, SieveResult};

fn checked_area(width: usize, height: usize) -> SieveResult<usize> {
    width
        .checked_mul(height)
        .ok_or(SieveError::InvalidDimensions {
            width,
            height,
            reason: "area overflows usize",
        })
}

// rasters

/// single-channel 8-bit intensity raster, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Wrap a row-major pixel buffer.
    ///
    /// Fails with [`SieveError::InvalidPixelData`] when the buffer length does
    /// not equal `width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> SieveResult<Self> {
        let expected = checked_area(width, height)?;
        if pixels.len() != expected {
            return Err(SieveError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Raster {
            width,
            height,
            pixels,
        })
    }

    /// A raster with no rows and no columns
    pub fn empty() -> Self {
        Raster {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Raster filled with a single intensity
    pub fn filled(width: usize, height: usize, value: u8) -> SieveResult<Self> {
        let area = checked_area(width, height)?;
        Raster::new(width, height, vec![value; area])
    }

    /// Build from nested rows, rejecting ragged input
    pub fn from_rows(rows: Vec<Vec<u8>>) -> SieveResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if rows.iter().any(|r| r.len() != width) {
            return Err(SieveError::InvalidDimensions {
                width,
                height,
                reason: "rows have different lengths",
            });
        }

        let pixels = rows.into_iter().flatten().collect();
        Raster::new(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// true when the raster covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// pixel at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// one row of pixels
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.pixels[start..start + self.width])
    }

    /// Copy out the `width x height` window whose top-left corner is `(x, y)`.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> SieveResult<Raster> {
        let fits_x = x.checked_add(width).is_some_and(|end| end <= self.width);
        let fits_y = y.checked_add(height).is_some_and(|end| end <= self.height);
        if !fits_x || !fits_y {
            return Err(SieveError::InvalidDimensions {
                width,
                height,
                reason: "crop window extends past the raster",
            });
        }

        let mut pixels = Vec::with_capacity(width * height);
        for row in y..y + height {
            let start = row * self.width + x;
            pixels.extend_from_slice(&self.pixels[start..start + width]);
        }
        Raster::new(width, height, pixels)
    }
}

/// floating-point intensity plane, row-major
///
/// Same layout as [`Raster`] but unvalidated sample values, so callers that
/// already hold float data can hand it over directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: usize,
    height: usize,
    samples: Vec<f64>,
}

impl Plane {
    pub fn new(width: usize, height: usize, samples: Vec<f64>) -> SieveResult<Self> {
        let expected = checked_area(width, height)?;
        if samples.len() != expected {
            return Err(SieveError::InvalidPixelData {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Plane {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// index of the first NaN or infinite sample
    pub fn first_non_finite(&self) -> Option<usize> {
        self.samples.iter().position(|s| !s.is_finite())
    }
}

impl From<&Raster> for Plane {
    fn from(raster: &Raster) -> Self {
        Plane {
            width: raster.width,
            height: raster.height,
            samples: raster.pixels.iter().map(|&p| p as f64).collect(),
        }
    }
}

// audio

/// 16-bit PCM samples plus their sample rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSignal {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl AudioSignal {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        AudioSignal {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// largest absolute sample value (as i32 so that -32768 fits)
    pub fn peak(&self) -> i32 {
        self.samples
            .iter()
            .map(|&s| (s as i32).abs())
            .max()
            .unwrap_or(0)
    }

    /// true when every sample is zero
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0)
    }

    /// Duration in seconds, treating the buffer as a single sequence
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
