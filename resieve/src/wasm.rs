use wasm_bindgen::prelude::*;

use crate::{AudioOptions, ImageOptions, SieveConfig};

fn to_js_err(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

/// Compress image file bytes into a grayscale JPEG
#[wasm_bindgen(js_name = compressImageFile)]
pub fn compress_image_file(image_bytes: &[u8], threshold: f64) -> Result<Vec<u8>, JsValue> {
    let config =
        SieveConfig::default().with_image(ImageOptions::default().with_threshold(threshold));
    crate::compress_image_bytes(image_bytes, &config)
        .map(|outcome| outcome.jpeg)
        .map_err(to_js_err)
}

/// Compress audio file bytes into a 16-bit WAV
#[wasm_bindgen(js_name = compressAudioFile)]
pub fn compress_audio_file(audio_bytes: &[u8], ratio: f64) -> Result<Vec<u8>, JsValue> {
    let config = SieveConfig::default()
        .with_audio(AudioOptions::default().with_relative_threshold(ratio));
    crate::compress_audio_bytes(audio_bytes, &config)
        .map(|outcome| outcome.wav)
        .map_err(to_js_err)
}

/// Report for an image conversion, as a JSON string
#[wasm_bindgen(js_name = imageReportJson)]
pub fn image_report_json(image_bytes: &[u8], threshold: f64) -> Result<String, JsValue> {
    let config =
        SieveConfig::default().with_image(ImageOptions::default().with_threshold(threshold));
    let outcome = crate::compress_image_bytes(image_bytes, &config).map_err(to_js_err)?;
    serde_json::to_string(&outcome.report).map_err(|e| JsValue::from_str(&e.to_string()))
}

// Initialize wasm-bindgen panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
