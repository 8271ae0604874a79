use log::{debug, warn};

use crate::core::{f64_to_i16, AudioOptions, AudioSignal, SieveError, SieveResult, I16_MAX_F64};
use crate::transform::{threshold_absolute, Dct};

/// Numeric corner case the compressor absorbed instead of failing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Every forward coefficient is zero; the cutoff is zero and nothing is
    /// suppressed
    DegenerateSignal,
    /// The reconstruction is all zeros; a silent signal is emitted instead of
    /// rescaling
    DivideByZero,
}

/// Counters from one audio compression
#[derive(Debug, Clone, PartialEq)]
pub struct AudioStats {
    /// Largest coefficient magnitude before thresholding
    pub peak_coefficient: f64,
    /// Absolute cutoff that was applied
    pub threshold: f64,
    pub coefficients_kept: usize,
    pub coefficients_zeroed: usize,
    /// Largest reconstructed magnitude before rescaling
    pub reconstructed_peak: f64,
    /// Corner cases hit on the way, in the order they fired
    pub guards: Vec<Guard>,
}

/// Whole-signal DCT compressor for PCM audio
///
/// The full sequence is transformed as a single block. The surviving
/// coefficients are inverted and the result is stretched so its peak sits at
/// 32767, whatever the loudness of the input.
#[derive(Debug, Clone)]
pub struct SignalCompressor {
    options: AudioOptions,
}

impl SignalCompressor {
    /// Create a compressor, rejecting out-of-range options
    pub fn new(options: AudioOptions) -> SieveResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &AudioOptions {
        &self.options
    }

    /// Compress a 16-bit signal; length and sample rate are preserved
    pub fn compress(&self, signal: &AudioSignal) -> SieveResult<AudioSignal> {
        self.compress_with_stats(signal).map(|(out, _)| out)
    }

    /// Compress a 16-bit signal and report what the threshold did
    pub fn compress_with_stats(&self, signal: &AudioSignal) -> SieveResult<(AudioSignal, AudioStats)> {
        let samples: Vec<f64> = signal.samples.iter().map(|&s| s as f64).collect();
        self.compress_pcm(&samples, signal.sample_rate)
    }

    /// Compress floating-point samples into a 16-bit signal
    pub fn compress_pcm(
        &self,
        samples: &[f64],
        sample_rate: u32,
    ) -> SieveResult<(AudioSignal, AudioStats)> {
        if samples.is_empty() {
            return Err(SieveError::EmptySignal);
        }
        if sample_rate == 0 {
            return Err(SieveError::InvalidSampleRate);
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(SieveError::NonFiniteSample { index });
        }

        let n = samples.len();
        let dct = Dct::new(n);
        let mut guards = Vec::new();

        let mut coeffs = dct.forward(samples);
        let peak_coefficient = peak_abs(&coeffs);

        if peak_coefficient == 0.0 {
            warn!("audio: all {} coefficients are zero, nothing to suppress", n);
            guards.push(Guard::DegenerateSignal);
        }

        // zero peak gives a zero cutoff, which keeps every coefficient
        let threshold = self.options.relative_threshold * peak_coefficient;
        let count = threshold_absolute(&mut coeffs, threshold);

        let reconstructed = dct.inverse(&coeffs);
        let reconstructed_peak = peak_abs(&reconstructed);

        let output = if reconstructed_peak == 0.0 {
            warn!("audio: reconstruction is silent, emitting {} zero samples", n);
            guards.push(Guard::DivideByZero);
            vec![0i16; n]
        } else {
            reconstructed
                .iter()
                .map(|&v| f64_to_i16(v / reconstructed_peak * I16_MAX_F64))
                .collect()
        };

        debug!(
            "audio: {} samples @ {} Hz, peak coefficient {:.3}, cutoff {:.3}, {} of {} kept",
            n,
            sample_rate,
            peak_coefficient,
            threshold,
            count.kept,
            count.total()
        );

        let stats = AudioStats {
            peak_coefficient,
            threshold,
            coefficients_kept: count.kept,
            coefficients_zeroed: count.zeroed,
            reconstructed_peak,
            guards,
        };

        Ok((AudioSignal::new(output, sample_rate), stats))
    }
}

fn peak_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0f64, |m, v| m.max(v.abs()))
}
