//! IME composition
//!
//! An editor is `Composing` while its engine holds a composition key and
//! `Idle` otherwise. Only compositionstart enters `Composing` and only
//! compositionend (or an input that ends composition) leaves it.

use std::rc::Rc;

use crate::commands::Command;
use crate::events::RawEvent;
use crate::handlers::HandlerContext;
use crate::model::{Editor, PointType};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositionState {
    Idle,
    Composing,
}

impl CompositionState {
    pub fn of(editor: &Editor) -> Self {
        if editor.is_composing() {
            CompositionState::Composing
        } else {
            CompositionState::Idle
        }
    }
}

pub fn on_composition_start(cx: &HandlerContext<'_>, _event: &Rc<RawEvent>) {
    let editor = cx.editor;
    let engine = editor.engine();
    let soft_key = cx.arbiter.last_key_was_soft_key();
    editor.update(|| {
        let Some(selection) = engine.selection() else {
            return;
        };
        if engine.is_composing() {
            log::trace!("compositionstart while already composing");
            return;
        }
        let anchor = &selection.anchor;
        engine.set_composition_key(Some(anchor.key.clone()));

        // Some platforms refuse to compose without a text node under the
        // caret, so give them one.
        if !soft_key || anchor.kind == PointType::Element || !selection.is_collapsed() {
            editor.execute(Command::insert_text(" "));
        }
    });
}

pub fn on_composition_end(cx: &HandlerContext<'_>, _event: &Rc<RawEvent>) {
    if cx.platform.firefox {
        // Firefox fires input after compositionend; reconcile once it has.
        let editor = Rc::clone(cx.editor);
        cx.scheduler.defer(Box::new(move || end_composition(&editor)));
    } else {
        end_composition(cx.editor);
    }
}

fn end_composition(editor: &Editor) {
    let engine = editor.engine();
    editor.update(|| {
        engine.set_composition_key(None);
        engine.flush_mutations();
    });
}
