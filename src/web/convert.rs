//! DOM event conversion

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::events::{
    EventDetail, EventType, InputDetail, KeyboardDetail, ModifierState, RawEvent, TargetRange,
};
use crate::host::HostNode;

use super::dom::DomNode;

pub fn raw_event_from_dom(event_type: EventType, event: &web_sys::Event) -> RawEvent {
    let detail = match event_type {
        EventType::KeyDown => event
            .dyn_ref::<web_sys::KeyboardEvent>()
            .map(|keyboard| {
                EventDetail::Keyboard(KeyboardDetail {
                    key: keyboard.key(),
                    modifiers: ModifierState {
                        key_code: keyboard.key_code(),
                        ctrl: keyboard.ctrl_key(),
                        shift: keyboard.shift_key(),
                        alt: keyboard.alt_key(),
                        meta: keyboard.meta_key(),
                    },
                })
            })
            .unwrap_or(EventDetail::None),
        EventType::BeforeInput | EventType::Input => event
            .dyn_ref::<web_sys::InputEvent>()
            .map(|input| EventDetail::Input(input_detail(input)))
            .unwrap_or(EventDetail::None),
        EventType::CompositionStart | EventType::CompositionEnd => event
            .dyn_ref::<web_sys::CompositionEvent>()
            .map(|composition| EventDetail::Composition {
                data: composition.data(),
            })
            .unwrap_or(EventDetail::Composition { data: None }),
        EventType::Click => event
            .dyn_ref::<web_sys::MouseEvent>()
            .map(|mouse| EventDetail::Pointer {
                button: mouse.button(),
            })
            .unwrap_or(EventDetail::None),
        _ => EventDetail::None,
    };
    RawEvent::new(event_type, detail)
}

fn input_detail(input: &web_sys::InputEvent) -> InputDetail {
    InputDetail {
        input_type: input.input_type(),
        data: input.data(),
        transfer_text: input
            .data_transfer()
            .and_then(|transfer| transfer.get_data("text/plain").ok()),
        target_range: first_target_range(input),
    }
}

fn first_target_range(input: &web_sys::InputEvent) -> Option<TargetRange> {
    let method = js_sys::Reflect::get(input, &JsValue::from_str("getTargetRanges")).ok()?;
    let method = method.dyn_into::<js_sys::Function>().ok()?;
    let ranges = method.call0(input).ok()?.dyn_into::<js_sys::Array>().ok()?;
    let range = ranges.get(0).dyn_into::<web_sys::StaticRange>().ok()?;

    let start: Rc<dyn HostNode> = Rc::new(DomNode::new(range.start_container()));
    let end: Rc<dyn HostNode> = Rc::new(DomNode::new(range.end_container()));
    Some(TargetRange {
        start_container: start,
        start_offset: range.start_offset() as usize,
        end_container: end,
        end_offset: range.end_offset() as usize,
    })
}
