//! Raw platform events
//!
//! Host adapters convert whatever their platform delivers into a `RawEvent`.
//! The event keeps its own `preventDefault` flag; adapters copy it back onto
//! the native event once the handler returns.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::host::HostNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    KeyDown,
    CompositionStart,
    CompositionEnd,
    Input,
    BeforeInput,
    Click,
    Cut,
    Copy,
    DragStart,
    Drop,
    Paste,
    Focus,
    Blur,
}

impl EventType {
    /// DOM event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::KeyDown => "keydown",
            EventType::CompositionStart => "compositionstart",
            EventType::CompositionEnd => "compositionend",
            EventType::Input => "input",
            EventType::BeforeInput => "beforeinput",
            EventType::Click => "click",
            EventType::Cut => "cut",
            EventType::Copy => "copy",
            EventType::DragStart => "dragstart",
            EventType::Drop => "drop",
            EventType::Paste => "paste",
            EventType::Focus => "focus",
            EventType::Blur => "blur",
        }
    }
}

/// Key code plus modifier snapshot of one keyboard event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModifierState {
    pub key_code: u32,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl ModifierState {
    pub fn key(key_code: u32) -> Self {
        Self {
            key_code,
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

/// The range a before-input event says it will modify.
#[derive(Clone)]
pub struct TargetRange {
    pub start_container: Rc<dyn HostNode>,
    pub start_offset: usize,
    pub end_container: Rc<dyn HostNode>,
    pub end_offset: usize,
}

impl PartialEq for TargetRange {
    fn eq(&self, other: &Self) -> bool {
        same_node(&self.start_container, &other.start_container)
            && same_node(&self.end_container, &other.end_container)
            && self.start_offset == other.start_offset
            && self.end_offset == other.end_offset
    }
}

fn same_node(a: &Rc<dyn HostNode>, b: &Rc<dyn HostNode>) -> bool {
    Rc::as_ptr(a) as *const u8 == Rc::as_ptr(b) as *const u8
}

impl fmt::Debug for TargetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetRange")
            .field("start_offset", &self.start_offset)
            .field("end_offset", &self.end_offset)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardDetail {
    /// `KeyboardEvent.key`, e.g. `"a"`, `"Enter"` or `"Unidentified"`.
    pub key: String,
    pub modifiers: ModifierState,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputDetail {
    pub input_type: String,
    pub data: Option<String>,
    /// Plain-text contents of the event's data transfer, when it has one.
    pub transfer_text: Option<String>,
    pub target_range: Option<TargetRange>,
}

impl InputDetail {
    pub fn new(input_type: impl Into<String>) -> Self {
        Self {
            input_type: input_type.into(),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_transfer_text(mut self, text: impl Into<String>) -> Self {
        self.transfer_text = Some(text.into());
        self
    }

    pub fn with_target_range(mut self, range: TargetRange) -> Self {
        self.target_range = Some(range);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EventDetail {
    None,
    Keyboard(KeyboardDetail),
    Input(InputDetail),
    Composition { data: Option<String> },
    Pointer { button: i16 },
}

/// A platform event as seen by the handlers.
#[derive(Debug, PartialEq)]
pub struct RawEvent {
    event_type: EventType,
    detail: EventDetail,
    default_prevented: Cell<bool>,
}

impl RawEvent {
    pub fn new(event_type: EventType, detail: EventDetail) -> Self {
        Self {
            event_type,
            detail,
            default_prevented: Cell::new(false),
        }
    }

    /// An event with no detail (focus, blur, clipboard, drag).
    pub fn plain(event_type: EventType) -> Self {
        Self::new(event_type, EventDetail::None)
    }

    pub fn key_down(key: impl Into<String>, modifiers: ModifierState) -> Self {
        Self::new(
            EventType::KeyDown,
            EventDetail::Keyboard(KeyboardDetail {
                key: key.into(),
                modifiers,
            }),
        )
    }

    pub fn before_input(detail: InputDetail) -> Self {
        Self::new(EventType::BeforeInput, EventDetail::Input(detail))
    }

    pub fn input(detail: InputDetail) -> Self {
        Self::new(EventType::Input, EventDetail::Input(detail))
    }

    pub fn composition_start(data: Option<String>) -> Self {
        Self::new(EventType::CompositionStart, EventDetail::Composition { data })
    }

    pub fn composition_end(data: Option<String>) -> Self {
        Self::new(EventType::CompositionEnd, EventDetail::Composition { data })
    }

    pub fn click(button: i16) -> Self {
        Self::new(EventType::Click, EventDetail::Pointer { button })
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn detail(&self) -> &EventDetail {
        &self.detail
    }

    pub fn keyboard(&self) -> Option<&KeyboardDetail> {
        match &self.detail {
            EventDetail::Keyboard(keyboard) => Some(keyboard),
            _ => None,
        }
    }

    pub fn input_detail(&self) -> Option<&InputDetail> {
        match &self.detail {
            EventDetail::Input(input) => Some(input),
            _ => None,
        }
    }

    pub fn target_range(&self) -> Option<&TargetRange> {
        self.input_detail().and_then(|input| input.target_range.as_ref())
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
