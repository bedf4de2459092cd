//! Shared helpers for the WASM API
//!
//! Serialization across the JS boundary, with failures logged before they
//! are handed back to JavaScript as strings.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::EventsError;

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        to_js_error(EventsError::InvalidDescriptor(format!("{}: {}", error_context, e)))
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Convert a crate error to a JsValue, logging it on the way out
pub fn to_js_error(error: EventsError) -> JsValue {
    let msg = error.to_string();
    log::error!("{}", msg);
    JsValue::from_str(&msg)
}
