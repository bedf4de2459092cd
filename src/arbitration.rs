//! Selection change arbitration
//!
//! Owns the process-wide state of the event layer: which nested editor is
//! active under each root editor, the soft-keyboard flag, and the
//! per-document selection-change listeners. All reads and writes go through
//! `Arbiter`; there are no free-standing statics.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::commands::{Command, CommandName};
use crate::host::{
    DocumentId, HostDocument, HostNode, ListenerId, SelectionChangeListener, Surface, SurfaceId,
};
use crate::model::{Editor, EditorKey, PointType, TextFormat};

struct TrackedDocument {
    listener: ListenerId,
    surfaces: HashMap<SurfaceId, Weak<Surface>>,
}

impl TrackedDocument {
    /// Forget surfaces the host dropped without detaching.
    fn prune(&mut self) {
        self.surfaces.retain(|_, surface| surface.strong_count() > 0);
    }
}

#[derive(Default)]
pub struct Arbiter {
    /// Root editor key -> active nested editor. A root is never its own value.
    active_nested: RefCell<HashMap<EditorKey, Rc<Editor>>>,
    soft_key: Cell<bool>,
    documents: RefCell<HashMap<DocumentId, TrackedDocument>>,
}

impl Arbiter {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Soft-keyboard flag
    // ------------------------------------------------------------------------

    /// Whether the last keydown looked like a soft keyboard's placeholder key.
    pub fn last_key_was_soft_key(&self) -> bool {
        self.soft_key.get()
    }

    pub fn set_last_key_was_soft_key(&self, value: bool) {
        self.soft_key.set(value);
    }

    // ------------------------------------------------------------------------
    // Active nested editors
    // ------------------------------------------------------------------------

    pub fn active_nested_editor(&self, root: EditorKey) -> Option<Rc<Editor>> {
        self.active_nested.borrow().get(&root).cloned()
    }

    pub fn active_nested_count(&self) -> usize {
        self.active_nested.borrow().len()
    }

    /// Whether any map entry refers to `editor`, as key or as value.
    pub fn references(&self, editor: &Editor) -> bool {
        let key = editor.key();
        self.active_nested
            .borrow()
            .iter()
            .any(|(root, active)| *root == key || active.key() == key)
    }

    /// Drop map entries that refer to `editor`, as root key or as active
    /// nested editor. Scans the whole map: parent links are weak, so the
    /// editor's root may no longer be reachable.
    pub fn forget_editor(&self, editor: &Rc<Editor>) {
        let key = editor.key();
        let mut map = self.active_nested.borrow_mut();
        let before = map.len();
        map.retain(|root, active| *root != key && !Rc::ptr_eq(active, editor));
        if map.len() != before {
            log::debug!("arbiter: forgot editor {} ({} entries)", key, before - map.len());
        }
    }

    // ------------------------------------------------------------------------
    // Document listeners
    // ------------------------------------------------------------------------

    /// Count `surface` against its document, installing the document's
    /// selection-change listener on first use. Returns whether a listener was
    /// installed by this call.
    pub fn track_surface(
        &self,
        document: &dyn HostDocument,
        surface: &Rc<Surface>,
        listener: impl FnOnce() -> SelectionChangeListener,
    ) -> bool {
        let mut documents = self.documents.borrow_mut();
        if let Some(tracked) = documents.get_mut(&document.id()) {
            tracked.prune();
            tracked.surfaces.insert(surface.id(), Rc::downgrade(surface));
            return false;
        }
        let id = document.add_selection_change_listener(listener());
        log::debug!("arbiter: installed selection listener on document {:?}", document.id());
        documents.insert(
            document.id(),
            TrackedDocument {
                listener: id,
                surfaces: HashMap::from([(surface.id(), Rc::downgrade(surface))]),
            },
        );
        true
    }

    /// Stop counting `surface`; the document listener goes away with the
    /// last live surface.
    pub fn untrack_surface(&self, document: &dyn HostDocument, surface: SurfaceId) {
        let mut documents = self.documents.borrow_mut();
        let Some(tracked) = documents.get_mut(&document.id()) else {
            return;
        };
        tracked.surfaces.remove(&surface);
        tracked.prune();
        if tracked.surfaces.is_empty() {
            document.remove_selection_change_listener(tracked.listener);
            documents.remove(&document.id());
            log::debug!("arbiter: removed selection listener from document {:?}", document.id());
        }
    }

    /// Live surfaces counted against `document`.
    pub fn tracked_surface_count(&self, document: DocumentId) -> usize {
        self.documents.borrow().get(&document).map_or(0, |tracked| {
            tracked
                .surfaces
                .values()
                .filter(|surface| surface.strong_count() > 0)
                .count()
        })
    }

    pub fn is_tracking(&self, document: DocumentId) -> bool {
        self.documents.borrow().contains_key(&document)
    }

    // ------------------------------------------------------------------------
    // Arbitration
    // ------------------------------------------------------------------------

    /// Handle a document-level selection change.
    pub fn on_selection_change(&self, document: &dyn HostDocument) {
        let Some(anchor) = document.selection_anchor() else {
            return;
        };
        let Some(next) = nearest_editor(anchor) else {
            log::trace!("arbiter: selection outside any editor");
            return;
        };

        let root = next.root();
        let root_key = root.key();
        let active_nested = self.active_nested_editor(root_key);
        let previous = active_nested.clone().unwrap_or_else(|| Rc::clone(&root));

        if !Rc::ptr_eq(&previous, &next) {
            log::debug!("arbiter: editor {} -> {}", previous.key(), next.key());
            deactivate(&previous);
        }
        activate(&next);

        if !Rc::ptr_eq(&next, &root) {
            self.active_nested.borrow_mut().insert(root_key, next);
        } else if active_nested.is_some() {
            self.active_nested.borrow_mut().remove(&root_key);
        }
    }
}

/// Walk up from `node` to the first editable node whose surface has an editor.
pub fn nearest_editor(node: Rc<dyn HostNode>) -> Option<Rc<Editor>> {
    let mut current = Some(node);
    while let Some(node) = current {
        if node.is_editable() {
            if let Some(editor) = node.surface().and_then(|surface| surface.editor()) {
                return Some(editor);
            }
        }
        current = node.parent_node();
    }
    None
}

fn deactivate(editor: &Editor) {
    let engine = editor.engine();
    editor.update(|| {
        engine.set_selection(None);
        engine.mark_selection_dirty();
    });
}

fn activate(editor: &Editor) {
    let engine = editor.engine();
    editor.update(|| {
        if let Some(selection) = engine.selection() {
            if selection.is_collapsed() {
                let format = match selection.anchor.kind {
                    PointType::Text => engine
                        .node(&selection.anchor.key)
                        .map(|node| node.format)
                        .unwrap_or_default(),
                    PointType::Element => TextFormat::NONE,
                };
                engine.set_selection_format(format);
            }
        }
        editor.execute(Command::new(CommandName::SelectionChange));
    });
}
