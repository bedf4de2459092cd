//! Editor handles and the editing-engine boundary

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::commands::Command;
use crate::events::TargetRange;
use crate::host::{Surface, SurfaceId};

use super::{EditorKey, NodeInfo, NodeKey, RangeSelection, TextFormat};

/// The editing engine behind an editor: the command executor plus the small
/// set of state queries and selection mutations the event layer relies on.
///
/// Implementations are expected to use interior mutability; every method
/// takes `&self` so handlers can call back into the engine from inside an
/// `update` scope.
pub trait EditingEngine {
    /// Execute a command. Returns whether any handler accepted it.
    fn execute(&self, command: Command) -> bool;

    /// Run `scope` inside one transactional update.
    fn update(&self, scope: &mut dyn FnMut());

    /// The pending selection, if the editor has one.
    fn selection(&self) -> Option<RangeSelection>;

    /// The selection of the last committed editor state.
    fn committed_selection(&self) -> Option<RangeSelection>;

    fn set_selection(&self, selection: Option<RangeSelection>);

    fn mark_selection_dirty(&self);

    fn set_selection_format(&self, format: TextFormat);

    /// Move the pending selection onto the range the platform targeted.
    fn apply_target_range(&self, range: &TargetRange);

    fn is_composing(&self) -> bool;

    fn set_composition_key(&self, key: Option<NodeKey>);

    /// Reconcile text mutations the platform applied directly to the surface.
    fn flush_mutations(&self);

    fn node(&self, key: &NodeKey) -> Option<NodeInfo>;

    fn root_children_count(&self) -> usize;

    /// Whether the top-level element containing `key` has no content.
    fn is_top_level_element_empty(&self, key: &NodeKey) -> bool;

    /// Insert policy: should `text` be inserted by a command, or will the
    /// platform's own edit already produce the right content?
    fn should_insert_text(&self, selection: &RangeSelection, text: &str, from_before_input: bool)
        -> bool;
}

/// Handle to one editable surface's editor. Nested editors keep a
/// non-owning reference to their parent.
pub struct Editor {
    key: EditorKey,
    parent: Option<Weak<Editor>>,
    engine: Rc<dyn EditingEngine>,
    attached_to: RefCell<Weak<Surface>>,
}

impl Editor {
    pub fn new(engine: Rc<dyn EditingEngine>) -> Rc<Self> {
        Self::with_key(EditorKey::new(), engine, None)
    }

    pub fn new_nested(engine: Rc<dyn EditingEngine>, parent: &Rc<Editor>) -> Rc<Self> {
        Self::with_key(EditorKey::new(), engine, Some(parent))
    }

    pub fn with_key(
        key: EditorKey,
        engine: Rc<dyn EditingEngine>,
        parent: Option<&Rc<Editor>>,
    ) -> Rc<Self> {
        Rc::new(Self {
            key,
            parent: parent.map(Rc::downgrade),
            engine,
            attached_to: RefCell::new(Weak::new()),
        })
    }

    pub fn key(&self) -> EditorKey {
        self.key
    }

    pub fn parent(&self) -> Option<Rc<Editor>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Walk parent links to the top of the editor tree.
    pub fn root(self: &Rc<Self>) -> Rc<Editor> {
        let mut current = Rc::clone(self);
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    pub fn engine(&self) -> &dyn EditingEngine {
        self.engine.as_ref()
    }

    pub fn execute(&self, command: Command) -> bool {
        log::debug!("editor {}: execute {}", self.key, command.name.as_str());
        self.engine.execute(command)
    }

    /// Run `f` once inside the engine's transactional update.
    pub fn update(&self, f: impl FnOnce()) {
        let mut f = Some(f);
        self.engine.update(&mut || {
            if let Some(f) = f.take() {
                f();
            }
        });
    }

    pub fn is_composing(&self) -> bool {
        self.engine.is_composing()
    }

    /// The live surface this editor is attached to. A surface dropped
    /// without `detach` no longer counts.
    pub fn attached_surface(&self) -> Option<SurfaceId> {
        self.attached_to.borrow().upgrade().map(|surface| surface.id())
    }

    pub(crate) fn set_attached_surface(&self, surface: Option<&Rc<Surface>>) {
        *self.attached_to.borrow_mut() = surface.map(Rc::downgrade).unwrap_or_default();
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("key", &self.key)
            .field("nested", &self.parent.is_some())
            .field("attached_to", &self.attached_surface())
            .finish()
    }
}
