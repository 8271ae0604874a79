//! Whole-signal transform compressor for PCM audio

pub mod compressor;

pub use compressor::{AudioStats, Guard, SignalCompressor};
