//! web-sys implementations of the host traits

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::events::EventType;
use crate::host::{
    DocumentId, EventListener, HostDocument, HostElement, HostNode, ListenerId,
    SelectionChangeListener, Surface,
};

use super::convert::raw_event_from_dom;

/// Attribute marking an element as the root of a mounted surface.
const SURFACE_ATTRIBUTE: &str = "data-editor-surface";

type DomClosure = Closure<dyn Fn(web_sys::Event)>;

thread_local! {
    static SURFACES: RefCell<HashMap<String, Weak<Surface>>> = RefCell::new(HashMap::new());
    static NEXT_DOCUMENT_ID: Cell<u64> = Cell::new(1);
}

/// Wrap `element` in a surface and tag it so selection changes inside it
/// can find the surface again.
pub fn mount(element: web_sys::HtmlElement, document: Rc<DomDocument>) -> Rc<Surface> {
    let dom_element = Rc::new(DomElement::new(element.clone(), document));
    let surface = Surface::new(dom_element);
    let tag = surface.id().to_string();
    if let Err(e) = element.set_attribute(SURFACE_ATTRIBUTE, &tag) {
        log::error!("could not tag surface element: {:?}", e);
    }
    SURFACES.with(|surfaces| {
        surfaces.borrow_mut().insert(tag, Rc::downgrade(&surface));
    });
    surface
}

/// Forget a mounted surface. Detach it from its controller first.
pub fn unmount(surface: &Surface, element: &web_sys::HtmlElement) {
    let tag = surface.id().to_string();
    SURFACES.with(|surfaces| {
        surfaces.borrow_mut().remove(&tag);
    });
    if let Err(e) = element.remove_attribute(SURFACE_ATTRIBUTE) {
        log::error!("could not untag surface element: {:?}", e);
    }
}

fn surface_for_tag(tag: &str) -> Option<Rc<Surface>> {
    SURFACES.with(|surfaces| surfaces.borrow().get(tag).and_then(Weak::upgrade))
}

// ============================================================================
// Nodes
// ============================================================================

pub struct DomNode {
    node: web_sys::Node,
}

impl DomNode {
    pub fn new(node: web_sys::Node) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &web_sys::Node {
        &self.node
    }
}

impl HostNode for DomNode {
    fn parent_node(&self) -> Option<Rc<dyn HostNode>> {
        self.node
            .parent_node()
            .map(|parent| Rc::new(DomNode::new(parent)) as Rc<dyn HostNode>)
    }

    fn is_editable(&self) -> bool {
        self.node
            .dyn_ref::<web_sys::HtmlElement>()
            .is_some_and(|element| element.is_content_editable())
    }

    fn surface(&self) -> Option<Rc<Surface>> {
        let element = self.node.dyn_ref::<web_sys::Element>()?;
        let tag = element.get_attribute(SURFACE_ATTRIBUTE)?;
        surface_for_tag(&tag)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Document
// ============================================================================

pub struct DomDocument {
    id: DocumentId,
    document: web_sys::Document,
    this: Weak<DomDocument>,
    next_listener: Cell<u64>,
    listeners: RefCell<HashMap<u64, DomClosure>>,
}

impl DomDocument {
    pub fn new(document: web_sys::Document) -> Rc<Self> {
        let id = NEXT_DOCUMENT_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            DocumentId(id)
        });
        Rc::new_cyclic(|this| Self {
            id,
            document,
            this: this.clone(),
            next_listener: Cell::new(1),
            listeners: RefCell::new(HashMap::new()),
        })
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    fn native_selection(&self) -> Option<web_sys::Selection> {
        self.document.get_selection().ok().flatten()
    }
}

impl HostDocument for DomDocument {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn add_selection_change_listener(&self, listener: SelectionChangeListener) -> ListenerId {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);

        let this = self.this.clone();
        let closure: DomClosure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            if let Some(document) = this.upgrade() {
                listener(document.as_ref());
            }
        }) as Box<dyn Fn(web_sys::Event)>);
        if let Err(e) = self
            .document
            .add_event_listener_with_callback("selectionchange", closure.as_ref().unchecked_ref())
        {
            log::error!("selectionchange listener failed: {:?}", e);
        }
        self.listeners.borrow_mut().insert(id, closure);
        ListenerId(id)
    }

    fn remove_selection_change_listener(&self, id: ListenerId) {
        if let Some(closure) = self.listeners.borrow_mut().remove(&id.0) {
            if let Err(e) = self.document.remove_event_listener_with_callback(
                "selectionchange",
                closure.as_ref().unchecked_ref(),
            ) {
                log::error!("selectionchange listener removal failed: {:?}", e);
            }
        }
    }

    fn selection_anchor(&self) -> Option<Rc<dyn HostNode>> {
        let anchor = self.native_selection()?.anchor_node()?;
        Some(Rc::new(DomNode::new(anchor)))
    }

    fn clear_native_selection(&self) {
        if let Some(selection) = self.native_selection() {
            if let Err(e) = selection.remove_all_ranges() {
                log::error!("could not clear native selection: {:?}", e);
            }
        }
    }
}

// ============================================================================
// Element
// ============================================================================

pub struct DomElement {
    element: web_sys::HtmlElement,
    document: Rc<DomDocument>,
    next_listener: Cell<u64>,
    listeners: RefCell<HashMap<u64, DomClosure>>,
}

impl DomElement {
    pub fn new(element: web_sys::HtmlElement, document: Rc<DomDocument>) -> Self {
        Self {
            element,
            document,
            next_listener: Cell::new(1),
            listeners: RefCell::new(HashMap::new()),
        }
    }

    pub fn element(&self) -> &web_sys::HtmlElement {
        &self.element
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl HostElement for DomElement {
    fn is_editable(&self) -> bool {
        self.element.is_content_editable()
    }

    fn owner_document(&self) -> Rc<dyn HostDocument> {
        self.document.clone()
    }

    fn add_event_listener(&self, event_type: EventType, listener: EventListener) -> ListenerId {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);

        let closure: DomClosure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let raw = Rc::new(raw_event_from_dom(event_type, &event));
            listener(&raw);
            if raw.default_prevented() {
                event.prevent_default();
            }
        }) as Box<dyn Fn(web_sys::Event)>);
        if let Err(e) = self
            .element
            .add_event_listener_with_callback(event_type.as_str(), closure.as_ref().unchecked_ref())
        {
            log::error!("{} listener failed: {:?}", event_type.as_str(), e);
        }
        self.listeners.borrow_mut().insert(id, closure);
        ListenerId(id)
    }

    fn remove_event_listener(&self, event_type: EventType, id: ListenerId) {
        if let Some(closure) = self.listeners.borrow_mut().remove(&id.0) {
            if let Err(e) = self.element.remove_event_listener_with_callback(
                event_type.as_str(),
                closure.as_ref().unchecked_ref(),
            ) {
                log::error!("{} listener removal failed: {:?}", event_type.as_str(), e);
            }
        }
    }
}
