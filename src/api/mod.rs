//! JavaScript-facing API
//!
//! Exposes the pure translation tables so a JavaScript host can consult them
//! without going through a mounted surface.
//!
//! # Module Structure
//!
//! - `helpers`: serialization and error conversion across the JS boundary

pub mod helpers;

use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use crate::commands::CommandDescriptor;
use crate::controller::ListenerTable;
use crate::events::{ModifierState, RawEvent};
use crate::platform::Platform;
use crate::translate::{classify_input_type, translate_key, InputTypeAction};

use helpers::{deserialize, serialize};

/// Result of looking up a keydown in the keyboard table.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyDownTranslation {
    pub binding: String,
    pub command: CommandDescriptor,
    pub prevent_default: bool,
}

/// Translate a keydown without dispatching it.
pub fn translate_key_down_descriptor(
    modifiers: ModifierState,
    platform: &Platform,
) -> Option<KeyDownTranslation> {
    let binding = translate_key(&modifiers, platform)?;
    let event = Rc::new(RawEvent::key_down("", modifiers));
    Some(KeyDownTranslation {
        binding: binding.name.to_string(),
        command: binding.action.command(&event).descriptor(),
        prevent_default: binding.prevent_default,
    })
}

/// Event names registered on a surface for `platform`, in registration order.
pub fn listener_event_names(platform: &Platform) -> Vec<&'static str> {
    ListenerTable::for_platform(platform)
        .event_types()
        .map(|event_type| event_type.as_str())
        .collect()
}

// ============================================================================
// WASM exports
// ============================================================================

/// Look up a keydown (`{keyCode, ctrl, shift, alt, meta}`) in the keyboard
/// table. Returns `null` when no binding matches.
#[wasm_bindgen(js_name = translateKeyDown)]
pub fn translate_key_down(modifiers: JsValue, platform: JsValue) -> Result<JsValue, JsValue> {
    let modifiers: ModifierState = deserialize(modifiers, "translateKeyDown modifiers")?;
    let platform: Platform = deserialize(platform, "translateKeyDown platform")?;

    match translate_key_down_descriptor(modifiers, &platform) {
        Some(translation) => serialize(&translation, "translateKeyDown result"),
        None => Ok(JsValue::NULL),
    }
}

/// Classify an `InputEvent.inputType` string.
#[wasm_bindgen(js_name = classifyInputType)]
pub fn classify_input_type_js(input_type: &str) -> Result<JsValue, JsValue> {
    let action: InputTypeAction = classify_input_type(input_type);
    serialize(&action, "classifyInputType result")
}

#[wasm_bindgen(js_name = platformFromUserAgent)]
pub fn platform_from_user_agent(
    user_agent: &str,
    platform_name: &str,
    before_input: bool,
) -> Result<JsValue, JsValue> {
    let platform = Platform::from_user_agent(user_agent, platform_name, before_input);
    serialize(&platform, "platformFromUserAgent result")
}

#[wasm_bindgen(js_name = listenerEventTypes)]
pub fn listener_event_types(platform: JsValue) -> Result<JsValue, JsValue> {
    let platform: Platform = deserialize(platform, "listenerEventTypes platform")?;
    serialize(&listener_event_names(&platform), "listenerEventTypes result")
}
