//! Zero-delay deferral and platform detection for browsers

use once_cell::unsync::OnceCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::platform::Platform;
use crate::scheduler::{DeferredTask, TaskScheduler};

/// Runs deferred tasks from `setTimeout(task, 0)`.
#[derive(Default)]
pub struct TimeoutScheduler;

impl TaskScheduler for TimeoutScheduler {
    fn defer(&self, task: DeferredTask) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window to defer on, running task now");
            task();
            return;
        };
        let callback = Closure::once_into_js(move || task());
        if let Err(e) = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
        {
            log::error!("setTimeout failed: {:?}", e);
        }
    }
}

thread_local! {
    static PLATFORM: OnceCell<Platform> = OnceCell::new();
}

/// Platform flags for the running browser, detected once per thread.
pub fn detect_platform() -> Platform {
    PLATFORM.with(|cell| *cell.get_or_init(read_platform))
}

fn read_platform() -> Platform {
    let Some(window) = web_sys::window() else {
        return Platform::default();
    };
    let navigator = window.navigator();
    let user_agent = navigator.user_agent().unwrap_or_default();
    let platform_name = navigator.platform().unwrap_or_default();
    Platform::from_user_agent(&user_agent, &platform_name, supports_before_input())
}

/// `beforeinput` is only usable when input events expose target ranges.
fn supports_before_input() -> bool {
    web_sys::InputEvent::new("input")
        .ok()
        .and_then(|event| js_sys::Reflect::has(&event, &JsValue::from_str("getTargetRanges")).ok())
        .unwrap_or(false)
}
