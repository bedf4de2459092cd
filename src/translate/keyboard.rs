//! Keyboard shortcut table
//!
//! An ordered list of bindings evaluated top to bottom; the first predicate
//! that matches wins. Order is priority: shift+Enter must be seen before
//! plain Enter, and backspace before the word/line deletes that share its
//! key code. Every platform keybinding difference lives in this file.

use std::rc::Rc;

use crate::commands::{Command, CommandName, FormatKind};
use crate::events::{ModifierState, RawEvent};
use crate::platform::Platform;

pub const KEY_BACKSPACE: u32 = 8;
pub const KEY_TAB: u32 = 9;
pub const KEY_RETURN: u32 = 13;
pub const KEY_ESCAPE: u32 = 27;
pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;
pub const KEY_DELETE: u32 = 46;
pub const KEY_B: u32 = 66;
pub const KEY_D: u32 = 68;
pub const KEY_H: u32 = 72;
pub const KEY_I: u32 = 73;
pub const KEY_O: u32 = 79;
pub const KEY_U: u32 = 85;
pub const KEY_Y: u32 = 89;
pub const KEY_Z: u32 = 90;

/// Key code reported for every key of an IME or soft keyboard.
pub const KEY_PROCESS: u32 = 229;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    InsertLineBreak,
    OpenLineBreak,
    Enter,
    Backspace,
    DeleteCharacter { backward: bool },
    Escape,
    Delete,
    DeleteWord { backward: bool },
    DeleteLine { backward: bool },
    Format(FormatKind),
    Tab,
    Undo,
    Redo,
}

impl KeyAction {
    pub fn command(&self, event: &Rc<RawEvent>) -> Command {
        match *self {
            KeyAction::ArrowLeft => Command::with_event(CommandName::KeyArrowLeft, event),
            KeyAction::ArrowRight => Command::with_event(CommandName::KeyArrowRight, event),
            KeyAction::ArrowUp => Command::with_event(CommandName::KeyArrowUp, event),
            KeyAction::ArrowDown => Command::with_event(CommandName::KeyArrowDown, event),
            KeyAction::InsertLineBreak => Command::new(CommandName::InsertLineBreak),
            KeyAction::OpenLineBreak => Command::with_flag(CommandName::InsertLineBreak, true),
            KeyAction::Enter => Command::with_event(CommandName::KeyEnter, event),
            KeyAction::Backspace => Command::with_event(CommandName::KeyBackspace, event),
            KeyAction::DeleteCharacter { backward } => Command::delete_character(backward),
            KeyAction::Escape => Command::with_event(CommandName::KeyEscape, event),
            KeyAction::Delete => Command::with_event(CommandName::KeyDelete, event),
            KeyAction::DeleteWord { backward } => Command::delete_word(backward),
            KeyAction::DeleteLine { backward } => Command::delete_line(backward),
            KeyAction::Format(kind) => Command::format_text(kind),
            KeyAction::Tab => Command::with_event(CommandName::KeyTab, event),
            KeyAction::Undo => Command::new(CommandName::Undo),
            KeyAction::Redo => Command::new(CommandName::Redo),
        }
    }
}

pub type KeyPredicate = fn(&ModifierState, &Platform) -> bool;

pub struct KeyBinding {
    pub name: &'static str,
    pub matches: KeyPredicate,
    pub action: KeyAction,
    /// Suppress the platform's native handling before dispatching.
    pub prevent_default: bool,
}

// ============================================================================
// Predicates
// ============================================================================

fn no_ctrl_meta_alt(m: &ModifierState) -> bool {
    !m.ctrl && !m.meta && !m.alt
}

fn is_move_backward(m: &ModifierState, _: &Platform) -> bool {
    m.key_code == KEY_LEFT && no_ctrl_meta_alt(m)
}

fn is_move_forward(m: &ModifierState, _: &Platform) -> bool {
    m.key_code == KEY_RIGHT && no_ctrl_meta_alt(m)
}

fn is_move_up(m: &ModifierState, _: &Platform) -> bool {
    m.key_code == KEY_UP && no_ctrl_meta_alt(m)
}

fn is_move_down(m: &ModifierState, _: &Platform) -> bool {
    m.key_code == KEY_DOWN && no_ctrl_meta_alt(m)
}

fn is_line_break(m: &ModifierState, _: &Platform) -> bool {
    m.key_code == KEY_RETURN && m.shift
}

fn is_open_line_break(m: &ModifierState, p: &Platform) -> bool {
    p.apple && m.ctrl && m.key_code == KEY_O
}

fn is_paragraph(m: &ModifierState, _: &Platform) -> bool {
    m.key_code == KEY_RETURN && !m.shift
}

fn is_backspace(m: &ModifierState, p: &Platform) -> bool {
    if m.key_code != KEY_BACKSPACE || m.alt || m.meta {
        return false;
    }
    p.apple || !m.ctrl
}

// ctrl+H on apple
fn is_emacs_delete_backward(m: &ModifierState, p: &Platform) -> bool {
    p.apple && m.ctrl && m.key_code == KEY_H && !m.alt && !m.meta
}

fn is_escape(m: &ModifierState, _: &Platform) -> bool {
    m.key_code == KEY_ESCAPE
}

fn is_delete(m: &ModifierState, p: &Platform) -> bool {
    if m.key_code != KEY_DELETE || m.alt || m.meta {
        return false;
    }
    if p.apple {
        !m.shift
    } else {
        !m.ctrl
    }
}

// ctrl+D on apple
fn is_emacs_delete_forward(m: &ModifierState, p: &Platform) -> bool {
    p.apple && m.ctrl && m.key_code == KEY_D && !m.shift && !m.alt && !m.meta
}

fn is_delete_word_backward(m: &ModifierState, p: &Platform) -> bool {
    m.key_code == KEY_BACKSPACE && if p.apple { m.alt } else { m.ctrl }
}

fn is_delete_word_forward(m: &ModifierState, p: &Platform) -> bool {
    m.key_code == KEY_DELETE && if p.apple { m.alt } else { m.ctrl }
}

fn is_delete_line_backward(m: &ModifierState, p: &Platform) -> bool {
    p.apple && m.meta && m.key_code == KEY_BACKSPACE
}

fn is_delete_line_forward(m: &ModifierState, p: &Platform) -> bool {
    p.apple && m.meta && m.key_code == KEY_DELETE
}

fn is_format(key_code: u32, m: &ModifierState, p: &Platform) -> bool {
    m.key_code == key_code && !m.alt && p.control_or_meta(m.ctrl, m.meta)
}

fn is_bold(m: &ModifierState, p: &Platform) -> bool {
    is_format(KEY_B, m, p)
}

fn is_underline(m: &ModifierState, p: &Platform) -> bool {
    is_format(KEY_U, m, p)
}

fn is_italic(m: &ModifierState, p: &Platform) -> bool {
    is_format(KEY_I, m, p)
}

fn is_tab(m: &ModifierState, _: &Platform) -> bool {
    m.key_code == KEY_TAB && no_ctrl_meta_alt(m)
}

fn is_undo(m: &ModifierState, p: &Platform) -> bool {
    m.key_code == KEY_Z && !m.shift && p.control_or_meta(m.ctrl, m.meta)
}

fn is_redo(m: &ModifierState, p: &Platform) -> bool {
    if p.apple {
        return m.key_code == KEY_Z && m.meta && m.shift;
    }
    (m.key_code == KEY_Y && m.ctrl) || (m.key_code == KEY_Z && m.ctrl && m.shift)
}

// ============================================================================
// Table
// ============================================================================

macro_rules! binding {
    ($name:literal, $matches:expr, $action:expr, $prevent:expr) => {
        KeyBinding {
            name: $name,
            matches: $matches,
            action: $action,
            prevent_default: $prevent,
        }
    };
}

pub static KEY_BINDINGS: &[KeyBinding] = &[
    binding!("moveBackward", is_move_backward, KeyAction::ArrowLeft, false),
    binding!("moveForward", is_move_forward, KeyAction::ArrowRight, false),
    binding!("moveUp", is_move_up, KeyAction::ArrowUp, false),
    binding!("moveDown", is_move_down, KeyAction::ArrowDown, false),
    binding!("lineBreak", is_line_break, KeyAction::InsertLineBreak, true),
    binding!("openLineBreak", is_open_line_break, KeyAction::OpenLineBreak, true),
    binding!("paragraph", is_paragraph, KeyAction::Enter, false),
    binding!("backspace", is_backspace, KeyAction::Backspace, false),
    binding!(
        "deleteBackward",
        is_emacs_delete_backward,
        KeyAction::DeleteCharacter { backward: true },
        true
    ),
    binding!("escape", is_escape, KeyAction::Escape, false),
    binding!("delete", is_delete, KeyAction::Delete, false),
    binding!(
        "deleteForward",
        is_emacs_delete_forward,
        KeyAction::DeleteCharacter { backward: false },
        true
    ),
    binding!(
        "deleteWordBackward",
        is_delete_word_backward,
        KeyAction::DeleteWord { backward: true },
        true
    ),
    binding!(
        "deleteWordForward",
        is_delete_word_forward,
        KeyAction::DeleteWord { backward: false },
        true
    ),
    binding!(
        "deleteLineBackward",
        is_delete_line_backward,
        KeyAction::DeleteLine { backward: true },
        true
    ),
    binding!(
        "deleteLineForward",
        is_delete_line_forward,
        KeyAction::DeleteLine { backward: false },
        true
    ),
    binding!("bold", is_bold, KeyAction::Format(FormatKind::Bold), true),
    binding!("underline", is_underline, KeyAction::Format(FormatKind::Underline), true),
    binding!("italic", is_italic, KeyAction::Format(FormatKind::Italic), true),
    binding!("tab", is_tab, KeyAction::Tab, false),
    binding!("undo", is_undo, KeyAction::Undo, true),
    binding!("redo", is_redo, KeyAction::Redo, true),
];

/// First binding in `KEY_BINDINGS` matching the modifier snapshot.
pub fn translate_key(modifiers: &ModifierState, platform: &Platform) -> Option<&'static KeyBinding> {
    KEY_BINDINGS
        .iter()
        .find(|binding| (binding.matches)(modifiers, platform))
}

/// A keydown that may be a soft keyboard's placeholder keystroke.
///
/// Android soft keyboards report `key == "Unidentified"` with key code 229.
/// Desktop IMEs also use 229 but name the key `"Process"`, so the code alone
/// is not enough.
pub fn is_possible_soft_key(key: &str, key_code: u32) -> bool {
    key == "Unidentified" && key_code == KEY_PROCESS
}
