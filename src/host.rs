//! Host platform boundary
//!
//! The host (a browser through `web`, or an in-memory fake in tests) supplies
//! elements, documents and nodes through these traits. `Surface` is the
//! crate-side record of one editable element: its editor back-reference and
//! the callbacks that undo `attach`.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::events::{EventType, RawEvent};
use crate::model::Editor;

pub type EventListener = Rc<dyn Fn(&Rc<RawEvent>)>;
pub type SelectionChangeListener = Rc<dyn Fn(&dyn HostDocument)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Any node in the host's document tree.
pub trait HostNode {
    fn parent_node(&self) -> Option<Rc<dyn HostNode>>;

    fn is_editable(&self) -> bool;

    /// The surface this node is the root element of, if any.
    fn surface(&self) -> Option<Rc<Surface>>;

    /// Lets engines recover their concrete node type from a target range.
    fn as_any(&self) -> &dyn Any;
}

/// The element an editor is mounted on.
pub trait HostElement {
    fn is_editable(&self) -> bool;

    fn owner_document(&self) -> Rc<dyn HostDocument>;

    fn add_event_listener(&self, event_type: EventType, listener: EventListener) -> ListenerId;

    fn remove_event_listener(&self, event_type: EventType, id: ListenerId);
}

pub trait HostDocument {
    fn id(&self) -> DocumentId;

    fn add_selection_change_listener(&self, listener: SelectionChangeListener) -> ListenerId;

    fn remove_selection_change_listener(&self, id: ListenerId);

    /// Anchor node of the document's native selection.
    fn selection_anchor(&self) -> Option<Rc<dyn HostNode>>;

    /// Drop every range from the native selection.
    fn clear_native_selection(&self);
}

// ============================================================================
// Removal handles
// ============================================================================

pub type RemovalHandle = Box<dyn FnOnce()>;

/// Ordered callbacks that together reverse one `attach`.
#[derive(Default)]
pub struct RemovalHandleList {
    handles: Vec<RemovalHandle>,
}

impl RemovalHandleList {
    pub fn push(&mut self, handle: RemovalHandle) {
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn run_all(self) {
        for handle in self.handles {
            handle();
        }
    }
}

// ============================================================================
// Surface
// ============================================================================

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

pub struct Surface {
    id: SurfaceId,
    element: Rc<dyn HostElement>,
    editor: RefCell<Option<Rc<Editor>>>,
    removal_handles: RefCell<RemovalHandleList>,
}

impl Surface {
    pub fn new(element: Rc<dyn HostElement>) -> Rc<Self> {
        Rc::new(Self {
            id: SurfaceId(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed)),
            element,
            editor: RefCell::new(None),
            removal_handles: RefCell::new(RemovalHandleList::default()),
        })
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn element(&self) -> &Rc<dyn HostElement> {
        &self.element
    }

    pub fn is_editable(&self) -> bool {
        self.element.is_editable()
    }

    pub fn document(&self) -> Rc<dyn HostDocument> {
        self.element.owner_document()
    }

    /// The editor currently attached to this surface.
    pub fn editor(&self) -> Option<Rc<Editor>> {
        self.editor.borrow().clone()
    }

    pub fn removal_handle_count(&self) -> usize {
        self.removal_handles.borrow().len()
    }

    pub(crate) fn set_editor(&self, editor: Option<Rc<Editor>>) {
        *self.editor.borrow_mut() = editor;
    }

    pub(crate) fn push_removal_handle(&self, handle: RemovalHandle) {
        self.removal_handles.borrow_mut().push(handle);
    }

    pub(crate) fn take_removal_handles(&self) -> RemovalHandleList {
        std::mem::take(&mut *self.removal_handles.borrow_mut())
    }
}

// A surface dropped without `detach` still takes its listeners off the element.
impl Drop for Surface {
    fn drop(&mut self) {
        let handles = std::mem::take(self.removal_handles.get_mut());
        if !handles.is_empty() {
            log::debug!("{} dropped while attached, removing {} listeners", self.id, handles.len());
        }
        handles.run_all();
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("id", &self.id)
            .field("editor", &self.editor.borrow().as_ref().map(|e| e.key()))
            .field("removal_handles", &self.removal_handle_count())
            .finish()
    }
}
