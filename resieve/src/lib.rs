//! resieve - image and audio converter built on libsieve
//!
//! Decodes common image and audio containers, runs the DCT threshold
//! compressors over them and re-encodes the result as JPEG or 16-bit WAV.
//! It works on native targets and can be compiled to WebAssembly.

pub mod audio;
pub mod imaging;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod wasm;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use libsieve::{AudioOptions, ImageOptions, SieveError};
use libsieve::{AudioSignal, BlockCompressor, SignalCompressor};

/// Default JPEG quality for compressed images
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

// ============================================================================
// Configuration
// ============================================================================

/// Effective converter settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SieveConfig {
    pub image: ImageOptions,
    pub audio: AudioOptions,
    /// Quality of the JPEG container the compressed raster is stored in
    pub jpeg_quality: u8,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            image: ImageOptions::default(),
            audio: AudioOptions::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl SieveConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SieveConfig = serde_json::from_str(json).context("Invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn with_image(mut self, image: ImageOptions) -> Self {
        self.image = image;
        self
    }

    pub fn with_audio(mut self, audio: AudioOptions) -> Self {
        self.audio = audio;
        self
    }

    /// Set JPEG quality (clamped to 1-100)
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn validate(&self) -> Result<(), SieveError> {
        self.image.validate()?;
        self.audio.validate()?;
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SieveError::InvalidOption {
                name: "jpeg_quality",
                reason: format!("expected 1-100, got {}", self.jpeg_quality),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Reports
// ============================================================================

/// What a report describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
}

/// Summary of one conversion, serializable to JSON
#[derive(Debug, Clone, Serialize)]
pub struct CompressionReport {
    pub kind: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_format: Option<String>,
    /// Input file size in bytes
    pub original_size: usize,
    /// Output file size in bytes
    pub compressed_size: usize,
    /// `original_size / compressed_size`
    pub ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<usize>,
    pub coefficients_kept: usize,
    pub coefficients_zeroed: usize,
    /// Corner cases the audio compressor absorbed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub guards: Vec<String>,
    /// ISO-8601 UTC timestamp
    pub processed_at: String,
}

impl CompressionReport {
    fn new(kind: MediaKind, original_size: usize, compressed_size: usize) -> Self {
        let ratio = if compressed_size > 0 {
            original_size as f64 / compressed_size as f64
        } else {
            0.0
        };
        Self {
            kind,
            source_format: None,
            original_size,
            compressed_size,
            ratio,
            width: None,
            height: None,
            sample_rate: None,
            channels: None,
            samples: None,
            coefficients_kept: 0,
            coefficients_zeroed: 0,
            guards: Vec::new(),
            processed_at: timestamp(),
        }
    }
}

// use js_sys for WASM, chrono for native
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
fn timestamp() -> String {
    let date = js_sys::Date::new_0();
    date.to_iso_string().as_string().unwrap_or_default()
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

// ============================================================================
// Conversion
// ============================================================================

/// A compressed image and its report
#[derive(Debug, Clone)]
pub struct ImageOutcome {
    pub jpeg: Vec<u8>,
    pub report: CompressionReport,
}

/// A compressed audio file and its report
#[derive(Debug, Clone)]
pub struct AudioOutcome {
    pub wav: Vec<u8>,
    pub report: CompressionReport,
}

/// Compress image file bytes into a grayscale JPEG
///
/// # Arguments
/// * `image_bytes` - Raw bytes of an image file (PNG, JPEG, BMP, GIF, ...)
/// * `config` - Block settings and JPEG quality
///
/// # Returns
/// JPEG bytes of the cropped, compressed raster
pub fn compress_image_bytes(image_bytes: &[u8], config: &SieveConfig) -> Result<ImageOutcome> {
    config.validate()?;
    let decoded =
        imaging::read_image_from_bytes(image_bytes).context("Failed to read image file")?;

    let compressor = BlockCompressor::new(config.image)?;
    let (compressed, stats) = compressor
        .compress_with_stats(&decoded.raster)
        .context("Image compression failed")?;

    if compressed.is_empty() {
        let bs = compressor.options().block_size;
        bail!(
            "Image is {}x{}, smaller than one {}x{} block",
            decoded.raster.width(),
            decoded.raster.height(),
            bs,
            bs
        );
    }

    let jpeg = imaging::write_jpeg_to_bytes(&compressed, config.jpeg_quality)?;

    let mut report = CompressionReport::new(MediaKind::Image, image_bytes.len(), jpeg.len());
    report.source_format = decoded.source_format;
    report.width = Some(compressed.width());
    report.height = Some(compressed.height());
    report.coefficients_kept = stats.coefficients_kept;
    report.coefficients_zeroed = stats.coefficients_zeroed;

    Ok(ImageOutcome { jpeg, report })
}

/// Compress audio file bytes into a 16-bit WAV
///
/// All channels are compressed together as one interleaved sequence.
///
/// # Arguments
/// * `audio_bytes` - Raw bytes of an audio file (WAV, FLAC, MP3, OGG, ...)
/// * `config` - Relative threshold
///
/// # Returns
/// WAV bytes with the source sample rate and channel count
pub fn compress_audio_bytes(audio_bytes: &[u8], config: &SieveConfig) -> Result<AudioOutcome> {
    config.validate()?;
    let decoded = audio::read_audio_from_bytes(audio_bytes).context("Failed to read audio file")?;

    let signal = AudioSignal::new(decoded.samples, decoded.sample_rate);
    let compressor = SignalCompressor::new(config.audio)?;
    let (compressed, stats) = compressor
        .compress_with_stats(&signal)
        .context("Audio compression failed")?;

    let wav = audio::write_wav_to_bytes(&compressed.samples, compressed.sample_rate, decoded.channels)?;

    let mut report = CompressionReport::new(MediaKind::Audio, audio_bytes.len(), wav.len());
    report.source_format = decoded.source_format;
    report.sample_rate = Some(compressed.sample_rate);
    report.channels = Some(decoded.channels);
    report.samples = Some(compressed.len());
    report.coefficients_kept = stats.coefficients_kept;
    report.coefficients_zeroed = stats.coefficients_zeroed;
    report.guards = stats.guards.iter().map(|g| format!("{:?}", g)).collect();

    Ok(AudioOutcome { wav, report })
}
