//! WASM-compatible wrapper for slide export conversion.
//!
//! This crate exposes the normalizers and markup serializer to JavaScript
//! hosts such as the editor front end or a Cloudflare Worker.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use slidekit_core::{
    normalize_background, parse_document, serialize_content, Background, ConversionStats,
    Element, ElementNormalizer, RawRecord, SlideConverter, SlideDocument, ThemeDefaults,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of converting a whole export document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResult {
    /// The converted slides.
    pub document: SlideDocument,
    /// Number of slides produced.
    pub slide_count: usize,
    /// Number of elements produced.
    pub element_count: usize,
    /// Number of elements skipped because their kind was not recognized.
    pub skipped_count: usize,
}

impl DocumentResult {
    fn new(document: SlideDocument, stats: ConversionStats) -> Self {
        Self {
            document,
            slide_count: stats.slides,
            element_count: stats.elements,
            skipped_count: stats.skipped,
        }
    }
}

/// Convert an export document given as JSON text.
///
/// # Arguments
/// * `data` - The export JSON (an array of slides or an object with `slides`)
/// * `theme` - Optional `{ fontName, fontColor }` fallback theme
///
/// # Returns
/// A JavaScript object with the converted document and counts, or throws on
/// unparseable input.
#[wasm_bindgen]
pub fn convert_document(data: &str, theme: JsValue) -> Result<JsValue, JsValue> {
    let theme = theme_from_js(theme)?;
    let result = convert_document_impl(data, &theme).map_err(|e| JsValue::from_str(&e))?;

    to_js(&result)
}

fn convert_document_impl(data: &str, theme: &ThemeDefaults) -> Result<DocumentResult, String> {
    let document = parse_document(data).map_err(|e| e.to_string())?;
    let (converted, stats) = SlideConverter::new().convert_document(&document, theme);
    Ok(DocumentResult::new(converted, stats))
}

/// Convert a single raw element.
///
/// Returns `null` when the element's kind is not recognized.
#[wasm_bindgen]
pub fn convert_element(element: JsValue, theme: JsValue) -> Result<JsValue, JsValue> {
    let element = value_from_js(element)?;
    let theme = theme_from_js(theme)?;

    match convert_element_impl(&element, &theme) {
        Some(converted) => to_js(&converted),
        None => Ok(JsValue::NULL),
    }
}

fn convert_element_impl(element: &Value, theme: &ThemeDefaults) -> Option<Element> {
    ElementNormalizer::new().normalize(RawRecord::new(element), theme)
}

/// Convert a raw slide background.
#[wasm_bindgen]
pub fn convert_background(background: JsValue) -> Result<JsValue, JsValue> {
    let background = value_from_js(background)?;
    to_js(&convert_background_impl(&background))
}

fn convert_background_impl(background: &Value) -> Background {
    normalize_background(RawRecord::new(background))
}

/// Flatten a raw content tree into markup.
#[wasm_bindgen]
pub fn content_to_html(content: JsValue) -> Result<String, JsValue> {
    let content = value_from_js(content)?;
    Ok(content_to_html_impl(&content))
}

fn content_to_html_impl(content: &Value) -> String {
    serialize_content(content)
}

fn value_from_js(value: JsValue) -> Result<Value, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid input: {}", e)))
}

fn theme_from_js(theme: JsValue) -> Result<ThemeDefaults, JsValue> {
    if theme.is_undefined() || theme.is_null() {
        return Ok(ThemeDefaults::default());
    }
    serde_wasm_bindgen::from_value(theme)
        .map_err(|e| JsValue::from_str(&format!("Invalid theme: {}", e)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
