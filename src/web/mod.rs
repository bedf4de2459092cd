//! Browser host adapter (wasm32 only)
//!
//! Implements the host traits on top of web-sys so the controller can be
//! attached to real `contenteditable` elements.
//!
//! - `dom`: `DomElement`, `DomDocument`, `DomNode` and surface mounting
//! - `convert`: DOM events to `RawEvent`
//! - `timeout`: `TimeoutScheduler` and platform detection

pub mod convert;
pub mod dom;
pub mod timeout;

pub use dom::{mount, unmount, DomDocument, DomElement, DomNode};
pub use timeout::{detect_platform, TimeoutScheduler};
