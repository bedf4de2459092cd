//! Semantic event handlers
//!
//! Each handler receives the surface it fired on and the editor attached to
//! it, already past the editability gate. Handlers decide on zero or one
//! command and dispatch it inside the editor's update scope.

use std::rc::Rc;

use crate::arbitration::Arbiter;
use crate::commands::{Command, CommandName};
use crate::events::{EventDetail, InputDetail, RawEvent};
use crate::host::Surface;
use crate::model::{EditingEngine, Editor, NodeKind, PointType, RangeSelection};
use crate::platform::Platform;
use crate::scheduler::TaskScheduler;
use crate::translate::{classify_input_type, is_possible_soft_key, translate_key, InputTypeAction};

pub struct HandlerContext<'a> {
    pub surface: &'a Surface,
    pub editor: &'a Rc<Editor>,
    pub platform: &'a Platform,
    pub arbiter: &'a Arbiter,
    pub scheduler: &'a Rc<dyn TaskScheduler>,
}

pub type SemanticHandler = fn(&HandlerContext<'_>, &Rc<RawEvent>);

// ============================================================================
// Shared helpers
// ============================================================================

/// Move a clean, collapsed, non-root selection onto the range the platform
/// reported, so the command acts on what the platform actually targeted.
pub fn align_selection_with_target(engine: &dyn EditingEngine, event: &RawEvent) {
    let Some(range) = event.target_range() else {
        return;
    };
    let Some(selection) = engine.selection() else {
        return;
    };
    if selection.dirty || !selection.is_collapsed() {
        return;
    }
    let anchored_on_root = engine
        .node(&selection.anchor.key)
        .is_some_and(|node| node.kind == NodeKind::Root);
    if !anchored_on_root {
        engine.apply_target_range(range);
    }
}

/// A composition delete may not remove a lone atomic node; that has to go
/// through an explicit delete command.
pub fn can_remove_text(engine: &dyn EditingEngine, selection: &RangeSelection) -> bool {
    let (anchor, focus) = (&selection.anchor, &selection.focus);
    if anchor.key != focus.key
        || anchor.kind == PointType::Element
        || focus.kind == PointType::Element
    {
        return true;
    }
    match engine.node(&anchor.key) {
        Some(node) => node.is_element() || !node.atomic,
        None => true,
    }
}

// ============================================================================
// keydown
// ============================================================================

pub fn on_key_down(cx: &HandlerContext<'_>, event: &Rc<RawEvent>) {
    let Some(keyboard) = event.keyboard() else {
        return;
    };
    let modifiers = keyboard.modifiers;
    cx.arbiter
        .set_last_key_was_soft_key(is_possible_soft_key(&keyboard.key, modifiers.key_code));

    if cx.editor.is_composing() {
        log::trace!("keydown {} ignored while composing", modifiers.key_code);
        return;
    }
    let Some(binding) = translate_key(&modifiers, cx.platform) else {
        return;
    };
    log::debug!("keydown {} -> {}", modifiers.key_code, binding.name);

    let editor = cx.editor;
    editor.update(|| {
        align_selection_with_target(editor.engine(), event);
        if binding.prevent_default {
            event.prevent_default();
        }
        editor.execute(binding.action.command(event));
    });
}

// ============================================================================
// beforeinput
// ============================================================================

pub fn on_before_input(cx: &HandlerContext<'_>, event: &Rc<RawEvent>) {
    let Some(input) = event.input_detail() else {
        return;
    };
    let action = classify_input_type(&input.input_type);
    if action == InputTypeAction::NativeComposition {
        return;
    }

    let editor = cx.editor;
    let engine = editor.engine();
    editor.update(|| {
        if action == InputTypeAction::SoftKeyboardDelete {
            engine.set_composition_key(None);
            event.prevent_default();
            editor.execute(Command::delete_character(true));
            return;
        }

        align_selection_with_target(engine, event);
        let Some(selection) = engine.selection() else {
            return;
        };

        match action {
            InputTypeAction::InsertText => insert_text(editor, event, input, &selection),
            InputTypeAction::Dispatch {
                command,
                ends_composition,
            } => {
                event.prevent_default();
                if ends_composition {
                    engine.set_composition_key(None);
                }
                editor.execute(command.command(|name| Command::with_event(name, event)));
            }
            InputTypeAction::RemoveIfPermitted => {
                event.prevent_default();
                if can_remove_text(engine, &selection) {
                    editor.execute(Command::new(CommandName::RemoveText));
                } else {
                    log::debug!("composition delete of atomic node suppressed");
                }
            }
            InputTypeAction::Unrecognized => {
                log::trace!("beforeinput {} not handled", input.input_type);
            }
            InputTypeAction::NativeComposition | InputTypeAction::SoftKeyboardDelete => {}
        }
    });
}

fn insert_text(editor: &Editor, event: &RawEvent, input: &InputDetail, selection: &RangeSelection) {
    match input.data.as_deref() {
        Some("\n") => {
            event.prevent_default();
            editor.execute(Command::new(CommandName::InsertLineBreak));
        }
        Some("\n\n") => {
            event.prevent_default();
            editor.execute(Command::new(CommandName::InsertParagraph));
        }
        // Safari text replacement arrives without data, only a data transfer.
        None => {
            if let Some(text) = &input.transfer_text {
                event.prevent_default();
                editor.execute(Command::insert_raw_text(text.clone()));
            }
        }
        Some(data) => {
            if editor.engine().should_insert_text(selection, data, true) {
                event.prevent_default();
                editor.execute(Command::insert_text(data));
            }
        }
    }
}

// ============================================================================
// input
// ============================================================================

pub fn on_input(cx: &HandlerContext<'_>, event: &Rc<RawEvent>) {
    let data = event.input_detail().and_then(|input| input.data.as_deref());
    let editor = cx.editor;
    let engine = editor.engine();
    editor.update(|| {
        let inserted = match (data, engine.selection()) {
            (Some(data), Some(selection)) if engine.should_insert_text(&selection, data, false) => {
                editor.execute(Command::insert_text(data))
            }
            _ => false,
        };
        if !inserted {
            engine.flush_mutations();
        }
    });
}

// ============================================================================
// click
// ============================================================================

/// Primary button as reported by `MouseEvent.button`.
const PRIMARY_BUTTON: i16 = 0;

pub fn on_click(cx: &HandlerContext<'_>, event: &Rc<RawEvent>) {
    if !matches!(event.detail(), EventDetail::Pointer { button } if *button == PRIMARY_BUTTON) {
        return;
    }
    let editor = cx.editor;
    let engine = editor.engine();
    editor.update(|| {
        let Some(selection) = engine.selection() else {
            return;
        };
        let anchor = &selection.anchor;
        let sole_empty_block = anchor.kind == PointType::Element
            && anchor.offset == 0
            && selection.is_collapsed()
            && engine.root_children_count() == 1
            && engine.is_top_level_element_empty(&anchor.key);
        if !sole_empty_block {
            return;
        }
        let unchanged = engine
            .committed_selection()
            .is_some_and(|committed| selection.is(&committed));
        if unchanged {
            log::debug!("click: clearing stale native selection in empty document");
            cx.surface.document().clear_native_selection();
            engine.mark_selection_dirty();
        }
    });
}
