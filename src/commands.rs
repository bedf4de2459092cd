//! Commands emitted to the editing engine
//!
//! A command is a name from a fixed vocabulary plus an optional payload.
//! It is the only thing this crate hands to the engine.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::rc::Rc;

use crate::events::{EventType, RawEvent};

// ============================================================================
// Vocabulary
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandName {
    // Editing
    InsertText,
    InsertRawText,
    InsertLineBreak,
    InsertParagraph,
    RemoveText,
    DeleteCharacter,
    DeleteWord,
    DeleteLine,
    FormatText,
    Undo,
    Redo,
    SelectionChange,

    // Keys handed to the engine with the raw event
    KeyArrowLeft,
    KeyArrowRight,
    KeyArrowUp,
    KeyArrowDown,
    KeyEnter,
    KeyBackspace,
    KeyDelete,
    KeyEscape,
    KeyTab,

    // Pass-through events, named after the event type
    Cut,
    Copy,
    DragStart,
    Paste,
    Focus,
    Blur,
    Drop,
}

impl CommandName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::InsertText => "insertText",
            CommandName::InsertRawText => "insertRawText",
            CommandName::InsertLineBreak => "insertLineBreak",
            CommandName::InsertParagraph => "insertParagraph",
            CommandName::RemoveText => "removeText",
            CommandName::DeleteCharacter => "deleteCharacter",
            CommandName::DeleteWord => "deleteWord",
            CommandName::DeleteLine => "deleteLine",
            CommandName::FormatText => "formatText",
            CommandName::Undo => "undo",
            CommandName::Redo => "redo",
            CommandName::SelectionChange => "selectionChange",
            CommandName::KeyArrowLeft => "keyArrowLeft",
            CommandName::KeyArrowRight => "keyArrowRight",
            CommandName::KeyArrowUp => "keyArrowUp",
            CommandName::KeyArrowDown => "keyArrowDown",
            CommandName::KeyEnter => "keyEnter",
            CommandName::KeyBackspace => "keyBackspace",
            CommandName::KeyDelete => "keyDelete",
            CommandName::KeyEscape => "keyEscape",
            CommandName::KeyTab => "keyTab",
            CommandName::Cut => "cut",
            CommandName::Copy => "copy",
            CommandName::DragStart => "dragstart",
            CommandName::Paste => "paste",
            CommandName::Focus => "focus",
            CommandName::Blur => "blur",
            CommandName::Drop => "drop",
        }
    }

    /// The command a pass-through event is forwarded as.
    pub fn for_pass_through(event_type: EventType) -> Option<CommandName> {
        match event_type {
            EventType::Cut => Some(CommandName::Cut),
            EventType::Copy => Some(CommandName::Copy),
            EventType::DragStart => Some(CommandName::DragStart),
            EventType::Paste => Some(CommandName::Paste),
            EventType::Focus => Some(CommandName::Focus),
            EventType::Blur => Some(CommandName::Blur),
            EventType::Drop => Some(CommandName::Drop),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl FormatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Bold => "bold",
            FormatKind::Italic => "italic",
            FormatKind::Underline => "underline",
            FormatKind::Strikethrough => "strikethrough",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    None,
    Event(Rc<RawEvent>),
    Text(String),
    Flag(bool),
    Format(FormatKind),
}

// ============================================================================
// Command
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    pub name: CommandName,
    pub payload: Payload,
}

impl Command {
    pub fn new(name: CommandName) -> Self {
        Self {
            name,
            payload: Payload::None,
        }
    }

    pub fn with_event(name: CommandName, event: &Rc<RawEvent>) -> Self {
        Self {
            name,
            payload: Payload::Event(Rc::clone(event)),
        }
    }

    pub fn with_flag(name: CommandName, flag: bool) -> Self {
        Self {
            name,
            payload: Payload::Flag(flag),
        }
    }

    pub fn insert_text(text: impl Into<String>) -> Self {
        Self {
            name: CommandName::InsertText,
            payload: Payload::Text(text.into()),
        }
    }

    pub fn insert_raw_text(text: impl Into<String>) -> Self {
        Self {
            name: CommandName::InsertRawText,
            payload: Payload::Text(text.into()),
        }
    }

    pub fn delete_character(backward: bool) -> Self {
        Self::with_flag(CommandName::DeleteCharacter, backward)
    }

    pub fn delete_word(backward: bool) -> Self {
        Self::with_flag(CommandName::DeleteWord, backward)
    }

    pub fn delete_line(backward: bool) -> Self {
        Self::with_flag(CommandName::DeleteLine, backward)
    }

    pub fn format_text(kind: FormatKind) -> Self {
        Self {
            name: CommandName::FormatText,
            payload: Payload::Format(kind),
        }
    }

    pub fn descriptor(&self) -> CommandDescriptor {
        let payload = match &self.payload {
            Payload::None => Value::Null,
            Payload::Event(event) => json!({ "event": event.event_type().as_str() }),
            Payload::Text(text) => Value::String(text.clone()),
            Payload::Flag(flag) => Value::Bool(*flag),
            Payload::Format(kind) => Value::String(kind.as_str().to_string()),
        };
        CommandDescriptor {
            name: self.name.as_str().to_string(),
            payload,
        }
    }
}

/// Serializable view of a command, for JavaScript hosts and logs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub name: String,
    pub payload: Value,
}
