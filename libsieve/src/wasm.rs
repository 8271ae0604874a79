//! Browser bindings over raw sample buffers

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::{compress_audio, compress_image, AudioOptions, AudioSignal, ImageOptions, Raster, SieveError};

/// turn an error into js
fn to_js_err(e: SieveError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Read options from a JS object; `undefined` or `null` means defaults
fn options_from_js<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

/// compress a grayscale image
///
/// # Arguments
/// * `pixels` - Row-major 8-bit intensities
/// * `width` - Width in pixels
/// * `height` - Height in pixels
/// * `options` - Optional `{ block_size, threshold }`
///
/// # Returns
/// `{ pixels: Uint8Array, width, height }` with both edges cropped to whole blocks
#[wasm_bindgen(js_name = compressImage)]
pub fn compress_image_js(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let options: ImageOptions = options_from_js(options)?;
    let raster = Raster::new(width as usize, height as usize, pixels.to_vec()).map_err(to_js_err)?;
    let compressed = compress_image(&raster, &options).map_err(to_js_err)?;

    let (out_width, out_height) = (compressed.width() as u32, compressed.height() as u32);
    let pixels = compressed.into_pixels();

    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"width".into(), &out_width.into())?;
    js_sys::Reflect::set(&obj, &"height".into(), &out_height.into())?;
    js_sys::Reflect::set(
        &obj,
        &"pixels".into(),
        &js_sys::Uint8Array::from(&pixels[..]).into(),
    )?;
    Ok(obj.into())
}

/// compress 16-bit PCM audio
///
/// # Arguments
/// * `samples` - PCM samples, treated as one sequence
/// * `sample_rate` - Sample rate in Hz
/// * `options` - Optional `{ relative_threshold }`
///
/// # Returns
/// Samples of the same length, renormalized to full 16-bit scale
#[wasm_bindgen(js_name = compressAudio)]
pub fn compress_audio_js(
    samples: &[i16],
    sample_rate: u32,
    options: JsValue,
) -> Result<Vec<i16>, JsValue> {
    let options: AudioOptions = options_from_js(options)?;
    let signal = AudioSignal::new(samples.to_vec(), sample_rate);
    compress_audio(&signal, &options)
        .map(|out| out.samples)
        .map_err(to_js_err)
}
