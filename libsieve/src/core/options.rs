//! Compressor settings

use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_AUDIO_RATIO, DEFAULT_BLOCK_SIZE, DEFAULT_IMAGE_THRESHOLD, MAX_BLOCK_SIZE,
};
use super::error::{SieveError, SieveResult};

/// Settings for the block image compressor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    /// Edge length of each square block
    pub block_size: usize,
    /// Coefficients with magnitude strictly below this are zeroed
    pub threshold: f64,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            threshold: DEFAULT_IMAGE_THRESHOLD,
        }
    }
}

impl ImageOptions {
    /// Set the absolute coefficient cutoff
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the block edge length
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn validate(&self) -> SieveResult<()> {
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(SieveError::InvalidOption {
                name: "block_size",
                reason: format!(
                    "expected 1-{}, got {}",
                    MAX_BLOCK_SIZE, self.block_size
                ),
            });
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(SieveError::InvalidOption {
                name: "threshold",
                reason: format!("expected a finite value >= 0, got {}", self.threshold),
            });
        }
        Ok(())
    }
}

/// Settings for the whole-signal audio compressor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioOptions {
    /// Cutoff as a fraction of the largest coefficient magnitude
    pub relative_threshold: f64,
}

impl Default for AudioOptions {
    fn default() -> Self {
        Self {
            relative_threshold: DEFAULT_AUDIO_RATIO,
        }
    }
}

impl AudioOptions {
    /// Set the relative cutoff
    pub fn with_relative_threshold(mut self, ratio: f64) -> Self {
        self.relative_threshold = ratio;
        self
    }

    pub fn validate(&self) -> SieveResult<()> {
        if !self.relative_threshold.is_finite() || self.relative_threshold < 0.0 {
            return Err(SieveError::InvalidOption {
                name: "relative_threshold",
                reason: format!(
                    "expected a finite value >= 0, got {}",
                    self.relative_threshold
                ),
            });
        }
        Ok(())
    }
}
