//! WASM bindings for jsxport-core
//!
//! Provides JavaScript-callable functions for converting component source
//! in the browser. Requests and responses are JSON strings.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use wasm_bindgen::prelude::*;

use crate::convert::{Converter, Target};
use crate::stats::ConversionStats;
use crate::style::{StyleTable, Vocabulary};

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConvertRequest {
    source: String,
    #[serde(default)]
    target: Target,
    file_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConvertResponse {
    code: String,
    stats: ConversionStats,
    warnings: Vec<String>,
    output_name: String,
}

#[derive(Debug, Serialize)]
struct TargetInfo {
    name: String,
    description: &'static str,
}

/// Convert component source
///
/// # Arguments
/// * `request_json` - JSON string containing:
///   - `source`: Component source code
///   - `target`: `"react-native"` (default) or `"react"`
///   - `fileName`: Optional original file name, used for `outputName`
///
/// # Returns
/// JSON string with `code`, `stats`, `warnings` and `outputName`
#[wasm_bindgen(js_name = convertCode)]
pub fn convert_code(request_json: &str) -> Result<String, JsValue> {
    let request: ConvertRequest = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse request: {}", e)))?;

    let result = Converter::for_target(request.target).convert(&request.source);
    let response = ConvertResponse {
        code: result.code,
        stats: result.stats,
        warnings: result.warnings,
        output_name: request.target.output_name(request.file_name.as_deref()),
    };

    serde_json::to_string(&response)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize response: {}", e)))
}

/// List the supported targets as a JSON array of `{name, description}`
#[wasm_bindgen(js_name = getSupportedTargets)]
pub fn get_supported_targets() -> String {
    let targets: Vec<TargetInfo> = Target::iter()
        .map(|t| TargetInfo {
            name: t.to_string(),
            description: t.description(),
        })
        .collect();
    serde_json::to_string(&targets).unwrap_or_else(|_| "[]".to_string())
}

/// Built-in table of a vocabulary (`"tailwind"` or `"bootstrap"`) as a JSON
/// object of class name to style properties
#[wasm_bindgen(js_name = getVocabulary)]
pub fn get_vocabulary(name: &str) -> Result<String, JsValue> {
    let vocabulary: Vocabulary = name
        .parse()
        .map_err(|_| JsValue::from_str(&format!("Unknown vocabulary: {}", name)))?;

    let table = StyleTable::builtin(vocabulary);
    let entries: serde_json::Map<String, serde_json::Value> = table
        .sorted_entries()
        .into_iter()
        .map(|(class, style)| (class.to_string(), serde_json::to_value(style).unwrap_or_default()))
        .collect();

    serde_json::to_string(&entries)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize vocabulary: {}", e)))
}
