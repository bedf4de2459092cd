//! Editor Events WASM Module
//!
//! Input-event normalization for editable surfaces. Raw platform events
//! (keys, composition, before-input, clicks, document selection changes)
//! are filtered, corrected for platform quirks, and turned into a small set
//! of editing commands for the editing engine.
//!
//! # Module Structure
//!
//! - `controller`: listener table, `attach`/`detach`
//! - `handlers`, `composition`: per-event semantic handlers
//! - `translate`: keyboard and input-type tables
//! - `arbitration`: active nested editors and document selection changes
//! - `host`, `scheduler`: the boundary the host platform implements
//! - `api`: JavaScript exports; `web`: web-sys host adapter (wasm32)

pub mod api;
pub mod arbitration;
pub mod commands;
pub mod composition;
pub mod controller;
pub mod error;
pub mod events;
pub mod handlers;
pub mod host;
pub mod model;
pub mod platform;
pub mod scheduler;
pub mod translate;

#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-export commonly used types
pub use commands::{Command, CommandDescriptor, CommandName, FormatKind, Payload};
pub use controller::{EventController, Listener, ListenerTable};
pub use error::EventsError;
pub use events::{EventType, InputDetail, ModifierState, RawEvent, TargetRange};
pub use host::{HostDocument, HostElement, HostNode, Surface};
pub use model::{EditingEngine, Editor, EditorKey, NodeKey, RangeSelection};
pub use platform::Platform;
pub use scheduler::{DeferredQueue, TaskScheduler};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init only fails because a logger is already installed.
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Editor events WASM module initialized");
}
