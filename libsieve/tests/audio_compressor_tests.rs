//! Whole-signal audio compressor tests
use libsieve::{compress_audio, AudioOptions, AudioSignal, Guard, SieveError, SignalCompressor};
use std::f64::consts::PI;

fn sine(freq: f64, sample_rate: u32, amplitude: f64, len: usize) -> AudioSignal {
    let samples = (0..len)
        .map(|i| (amplitude * (2.0 * PI * freq * i as f64 / sample_rate as f64).sin()).round() as i16)
        .collect();
    AudioSignal::new(samples, sample_rate)
}

fn default_compressor() -> SignalCompressor {
    SignalCompressor::new(AudioOptions::default()).unwrap()
}

#[test]
fn test_sine_is_renormalized_to_full_scale() {
    // 500 Hz at 8 kHz lands exactly on the crest every 16 samples
    let input = sine(500.0, 8000, 1000.0, 8000);
    assert_eq!(input.peak(), 1000);

    let output = default_compressor().compress(&input).unwrap();

    assert_eq!(output.len(), input.len());
    assert_eq!(output.sample_rate, 8000);
    assert_eq!(output.peak(), 32767);
}

#[test]
fn test_silence_stays_silent() {
    let input = AudioSignal::new(vec![0; 4410], 44100);
    let (output, stats) = default_compressor().compress_with_stats(&input).unwrap();

    assert_eq!(output.len(), 4410);
    assert_eq!(output.sample_rate, 44100);
    assert!(output.is_silent());
    assert_eq!(stats.peak_coefficient, 0.0);
    assert_eq!(stats.threshold, 0.0);
    assert_eq!(stats.coefficients_zeroed, 0);
    assert_eq!(stats.guards, vec![Guard::DegenerateSignal, Guard::DivideByZero]);
}

#[test]
fn test_ratio_above_one_suppresses_everything() {
    let input = sine(300.0, 16000, 5000.0, 1600);
    let compressor = SignalCompressor::new(AudioOptions::default().with_relative_threshold(1.5)).unwrap();
    let (output, stats) = compressor.compress_with_stats(&input).unwrap();

    assert!(output.is_silent());
    assert_eq!(stats.coefficients_kept, 0);
    assert_eq!(stats.guards, vec![Guard::DivideByZero]);
}

#[test]
fn test_threshold_is_relative_to_peak() {
    let input = sine(1000.0, 22050, 12000.0, 2205);
    let (_, stats) = default_compressor().compress_with_stats(&input).unwrap();

    assert!(stats.peak_coefficient > 0.0);
    assert!((stats.threshold - 0.1 * stats.peak_coefficient).abs() < 1e-9);
    assert_eq!(stats.coefficients_kept + stats.coefficients_zeroed, 2205);
    assert!(stats.coefficients_kept >= 1);
    assert!(stats.guards.is_empty());
}

#[test]
fn test_loudness_does_not_matter() {
    let quiet = sine(523.25, 11025, 200.0, 3000);
    let loud = AudioSignal::new(quiet.samples.iter().map(|&s| s * 100).collect(), 11025);

    let compressor = default_compressor();
    let a = compressor.compress(&quiet).unwrap();
    let b = compressor.compress(&loud).unwrap();

    for (x, y) in a.samples.iter().zip(&b.samples) {
        assert!((*x as i32 - *y as i32).abs() <= 1, "{} vs {}", x, y);
    }
}

#[test]
fn test_zero_ratio_only_rescales() {
    let input = sine(60.0, 1000, 2000.0, 997);
    let compressor = SignalCompressor::new(AudioOptions::default().with_relative_threshold(0.0)).unwrap();
    let (output, stats) = compressor.compress_with_stats(&input).unwrap();

    assert_eq!(stats.coefficients_zeroed, 0);
    let peak = input.peak() as f64;
    for (&x, &y) in input.samples.iter().zip(&output.samples) {
        let expected = x as f64 / peak * 32767.0;
        assert!((expected - y as f64).abs() <= 1.01, "{} -> {}", x, y);
    }
}

#[test]
fn test_single_basis_tone_survives_intact() {
    // A pure DCT basis vector has exactly one non-zero coefficient
    let n = 1024;
    let k0 = 37.0;
    let samples: Vec<f64> = (0..n)
        .map(|i| 3000.0 * (PI / n as f64 * (i as f64 + 0.5) * k0).cos())
        .collect();
    let (output, stats) = default_compressor().compress_pcm(&samples, 48000).unwrap();

    assert_eq!(stats.coefficients_kept, 1);
    let peak = samples.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    for (&x, &y) in samples.iter().zip(&output.samples) {
        let expected = x / peak * 32767.0;
        assert!((expected - y as f64).abs() <= 1.5, "{} vs {}", expected, y);
    }
}

#[test]
fn test_raising_ratio_never_keeps_more() {
    // Two tones plus a little noise-like texture
    let samples: Vec<i16> = (0..4000)
        .map(|i| {
            let t = i as f64 / 8000.0;
            let v = 4000.0 * (2.0 * PI * 440.0 * t).sin()
                + 1500.0 * (2.0 * PI * 1250.0 * t).sin()
                + 300.0 * ((i * 7919 % 211) as f64 / 211.0 - 0.5);
            v as i16
        })
        .collect();
    let input = AudioSignal::new(samples, 8000);

    let mut last_kept = usize::MAX;
    for ratio in [0.0, 0.01, 0.05, 0.1, 0.3, 0.7, 1.0] {
        let compressor = SignalCompressor::new(AudioOptions::default().with_relative_threshold(ratio)).unwrap();
        let (_, stats) = compressor.compress_with_stats(&input).unwrap();
        assert!(stats.coefficients_kept <= last_kept, "ratio {}", ratio);
        last_kept = stats.coefficients_kept;
    }
    // the peak itself always survives a ratio of exactly 1
    assert!(last_kept >= 1);
}

#[test]
fn test_single_sample_signals() {
    let out = compress_audio(&AudioSignal::new(vec![5], 8000), &AudioOptions::default()).unwrap();
    assert_eq!(out.samples, vec![32767]);

    let out = compress_audio(&AudioSignal::new(vec![-32768], 8000), &AudioOptions::default()).unwrap();
    assert_eq!(out.samples, vec![-32767]);
}

#[test]
fn test_output_stays_in_16bit_range() {
    let samples: Vec<i16> = (0..5000)
        .map(|i| if i % 3 == 0 { i16::MIN } else { i16::MAX })
        .collect();
    let input = AudioSignal::new(samples, 44100);
    let output = default_compressor().compress(&input).unwrap();
    assert_eq!(output.len(), 5000);
    assert!(output.peak() <= 32767);
}

#[test]
fn test_empty_signal_is_rejected() {
    let err = default_compressor()
        .compress(&AudioSignal::new(vec![], 44100))
        .unwrap_err();
    assert_eq!(err, SieveError::EmptySignal);
    assert!(err.is_invalid_input());
}

#[test]
fn test_zero_sample_rate_is_rejected() {
    let err = default_compressor()
        .compress(&AudioSignal::new(vec![1, 2, 3], 0))
        .unwrap_err();
    assert_eq!(err, SieveError::InvalidSampleRate);
}

#[test]
fn test_non_finite_pcm_is_rejected() {
    let samples = vec![0.0, 1.0, f64::NEG_INFINITY, 2.0];
    let err = default_compressor().compress_pcm(&samples, 8000).unwrap_err();
    assert_eq!(err, SieveError::NonFiniteSample { index: 2 });
}

#[test]
fn test_odd_and_prime_lengths() {
    for len in [2usize, 3, 65, 127, 1009, 7919] {
        let input = sine(100.0, 8000, 900.0, len);
        let output = default_compressor().compress(&input).unwrap();
        assert_eq!(output.len(), len);
        if !input.is_silent() {
            assert_eq!(output.peak(), 32767, "length {}", len);
        }
    }
}
