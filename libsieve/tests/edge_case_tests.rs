//! Edge cases for the sample containers and error reporting
use libsieve::core::{f64_to_i16, f64_to_pixel};
use libsieve::{compress_image, AudioSignal, ImageOptions, Plane, Raster, SieveError};

// ============================================================================
// Raster construction
// ============================================================================

#[test]
fn test_raster_length_mismatch() {
    let err = Raster::new(4, 4, vec![0; 15]).unwrap_err();
    assert_eq!(
        err,
        SieveError::InvalidPixelData {
            expected: 16,
            actual: 15
        }
    );
    assert!(err.is_invalid_input());
}

#[test]
fn test_ragged_rows_are_not_rectangular() {
    let rows = vec![vec![1, 2, 3], vec![4, 5], vec![6, 7, 8]];
    let err = Raster::from_rows(rows).unwrap_err();
    assert!(matches!(err, SieveError::InvalidDimensions { .. }));
}

#[test]
fn test_from_rows_layout() {
    let raster = Raster::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
    assert_eq!((raster.width(), raster.height()), (2, 3));
    assert_eq!(raster.pixels(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(raster.get(1, 2), Some(6));
    assert_eq!(raster.get(2, 0), None);
    assert_eq!(raster.row(1), Some(&[3u8, 4][..]));
    assert_eq!(raster.row(3), None);
}

#[test]
fn test_from_no_rows_is_empty() {
    let raster = Raster::from_rows(vec![]).unwrap();
    assert!(raster.is_empty());
    assert_eq!(raster, Raster::empty());
}

#[test]
fn test_overflowing_area() {
    let err = Raster::new(usize::MAX, 2, vec![]).unwrap_err();
    assert!(matches!(err, SieveError::InvalidDimensions { .. }));
}

#[test]
fn test_crop_bounds() {
    let raster = Raster::filled(10, 6, 9).unwrap();
    assert!(raster.crop(8, 0, 2, 6).is_ok());
    assert!(raster.crop(8, 0, 3, 6).is_err());
    assert!(raster.crop(0, 5, 1, 2).is_err());
    assert!(raster.crop(usize::MAX, 0, 2, 1).is_err());
}

#[test]
fn test_plane_length_mismatch() {
    assert!(matches!(
        Plane::new(3, 3, vec![0.0; 8]),
        Err(SieveError::InvalidPixelData { expected: 9, actual: 8 })
    ));
}

#[test]
fn test_empty_raster_compresses_to_empty() {
    let out = compress_image(&Raster::empty(), &ImageOptions::default()).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_zero_height_keeps_truncated_width() {
    let raster = Raster::new(24, 0, vec![]).unwrap();
    let out = compress_image(&raster, &ImageOptions::default()).unwrap();
    assert_eq!((out.width(), out.height()), (24, 0));
    assert!(out.is_empty());
}

// ============================================================================
// Sample conversion
// ============================================================================

#[test]
fn test_pixel_conversion_clips_and_truncates() {
    assert_eq!(f64_to_pixel(-12.0), 0);
    assert_eq!(f64_to_pixel(-0.7), 0);
    assert_eq!(f64_to_pixel(300.0), 255);
    assert_eq!(f64_to_pixel(255.0), 255);
    assert_eq!(f64_to_pixel(199.9999999), 199);
    assert_eq!(f64_to_pixel(127.4), 127);
    assert_eq!(f64_to_pixel(127.6), 127);
}

#[test]
fn test_row_out_of_range_is_none() {
    let raster = Raster::filled(8, 8, 1).unwrap();
    assert_eq!(raster.row(7), Some(&[1u8; 8][..]));
    assert_eq!(raster.row(8), None);
    assert_eq!(Raster::empty().row(0), None);
}

#[test]
fn test_into_pixels_hands_back_the_buffer() {
    let raster = Raster::new(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(raster.into_pixels(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_i16_conversion_truncates_toward_zero() {
    assert_eq!(f64_to_i16(32767.0), 32767);
    assert_eq!(f64_to_i16(-32767.0), -32767);
    assert_eq!(f64_to_i16(1.9), 1);
    assert_eq!(f64_to_i16(-1.9), -1);
    assert_eq!(f64_to_i16(1e9), 32767);
    assert_eq!(f64_to_i16(-1e9), -32768);
}

// ============================================================================
// Audio container
// ============================================================================

#[test]
fn test_audio_signal_helpers() {
    let signal = AudioSignal::new(vec![0, -32768, 100], 3);
    assert_eq!(signal.len(), 3);
    assert_eq!(signal.peak(), 32768);
    assert!(!signal.is_silent());
    assert_eq!(signal.duration_secs(), 1.0);

    let silent = AudioSignal::new(vec![0; 10], 0);
    assert!(silent.is_silent());
    assert_eq!(silent.duration_secs(), 0.0);
    assert_eq!(AudioSignal::new(vec![], 8000).peak(), 0);
}

// ============================================================================
// Error messages
// ============================================================================

#[test]
fn test_error_display() {
    let err = SieveError::InvalidDimensions {
        width: 3,
        height: 4,
        reason: "rows have different lengths",
    };
    assert_eq!(err.to_string(), "Invalid dimensions 3x4: rows have different lengths");
    assert_eq!(
        SieveError::NonFiniteSample { index: 5 }.to_string(),
        "Non-finite sample at index 5"
    );
    assert_eq!(SieveError::EmptySignal.to_string(), "Audio signal has no samples");

    let boxed: Box<dyn std::error::Error> = Box::new(SieveError::InvalidSampleRate);
    assert!(boxed.to_string().contains("Sample rate"));
}
