//! In-memory host and recording engine shared by the integration tests.

#![allow(dead_code)]

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use editor_events::commands::{Command, CommandDescriptor};
use editor_events::events::{EventType, RawEvent, TargetRange};
use editor_events::host::{
    DocumentId, EventListener, HostDocument, HostElement, HostNode, ListenerId,
    SelectionChangeListener, Surface,
};
use editor_events::model::{
    EditingEngine, Editor, NodeInfo, NodeKey, Point, RangeSelection, TextFormat,
};
use editor_events::{DeferredQueue, EventController, Platform};

// ============================================================================
// Recording engine
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Execute(CommandDescriptor),
    SetSelection(Option<RangeSelection>),
    MarkDirty,
    SetFormat(TextFormat),
    ApplyTargetRange,
    SetCompositionKey(Option<NodeKey>),
    FlushMutations,
}

pub struct RecordingEngine {
    calls: RefCell<Vec<Call>>,
    commands: RefCell<Vec<Command>>,
    updates: Cell<usize>,
    depth: Cell<usize>,
    outside_update: Cell<usize>,
    selection: RefCell<Option<RangeSelection>>,
    committed: RefCell<Option<RangeSelection>>,
    nodes: RefCell<HashMap<NodeKey, NodeInfo>>,
    composition_key: RefCell<Option<NodeKey>>,
    insert_policy: Cell<bool>,
    root_children: Cell<usize>,
    empty_blocks: RefCell<HashSet<NodeKey>>,
}

impl RecordingEngine {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            calls: RefCell::new(Vec::new()),
            commands: RefCell::new(Vec::new()),
            updates: Cell::new(0),
            depth: Cell::new(0),
            outside_update: Cell::new(0),
            selection: RefCell::new(None),
            committed: RefCell::new(None),
            nodes: RefCell::new(HashMap::new()),
            composition_key: RefCell::new(None),
            insert_policy: Cell::new(true),
            root_children: Cell::new(1),
            empty_blocks: RefCell::new(HashSet::new()),
        })
    }

    pub fn with_text_caret(key: &str, offset: usize) -> Rc<Self> {
        let engine = Self::new();
        engine.add_node(key, NodeInfo::text(TextFormat::NONE));
        engine.set_pending_selection(Some(RangeSelection::collapsed(Point::text(key, offset))));
        engine
    }

    pub fn add_node(&self, key: &str, info: NodeInfo) {
        self.nodes.borrow_mut().insert(NodeKey::from(key), info);
    }

    pub fn set_pending_selection(&self, selection: Option<RangeSelection>) {
        *self.selection.borrow_mut() = selection;
    }

    pub fn pending_selection(&self) -> Option<RangeSelection> {
        self.selection.borrow().clone()
    }

    pub fn set_committed_selection(&self, selection: Option<RangeSelection>) {
        *self.committed.borrow_mut() = selection;
    }

    pub fn set_composing(&self, key: Option<&str>) {
        *self.composition_key.borrow_mut() = key.map(NodeKey::from);
    }

    pub fn composition_key(&self) -> Option<NodeKey> {
        self.composition_key.borrow().clone()
    }

    pub fn set_insert_policy(&self, accept: bool) {
        self.insert_policy.set(accept);
    }

    pub fn set_root_children(&self, count: usize) {
        self.root_children.set(count);
    }

    pub fn mark_block_empty(&self, key: &str) {
        self.empty_blocks.borrow_mut().insert(NodeKey::from(key));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.commands.borrow().clone()
    }

    pub fn descriptors(&self) -> Vec<CommandDescriptor> {
        self.commands.borrow().iter().map(Command::descriptor).collect()
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands.borrow().iter().map(|c| c.name.as_str()).collect()
    }

    pub fn update_count(&self) -> usize {
        self.updates.get()
    }

    /// Mutations made without an enclosing update scope.
    pub fn mutations_outside_update(&self) -> usize {
        self.outside_update.get()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
        self.commands.borrow_mut().clear();
        self.updates.set(0);
    }

    fn record(&self, call: Call) {
        if self.depth.get() == 0 {
            self.outside_update.set(self.outside_update.get() + 1);
        }
        self.calls.borrow_mut().push(call);
    }
}

impl EditingEngine for RecordingEngine {
    fn execute(&self, command: Command) -> bool {
        self.record(Call::Execute(command.descriptor()));
        self.commands.borrow_mut().push(command);
        true
    }

    fn update(&self, scope: &mut dyn FnMut()) {
        self.updates.set(self.updates.get() + 1);
        self.depth.set(self.depth.get() + 1);
        scope();
        self.depth.set(self.depth.get() - 1);
    }

    fn selection(&self) -> Option<RangeSelection> {
        self.selection.borrow().clone()
    }

    fn committed_selection(&self) -> Option<RangeSelection> {
        self.committed.borrow().clone()
    }

    fn set_selection(&self, selection: Option<RangeSelection>) {
        self.record(Call::SetSelection(selection.clone()));
        *self.selection.borrow_mut() = selection;
    }

    fn mark_selection_dirty(&self) {
        self.record(Call::MarkDirty);
        if let Some(selection) = self.selection.borrow_mut().as_mut() {
            selection.dirty = true;
        }
    }

    fn set_selection_format(&self, format: TextFormat) {
        self.record(Call::SetFormat(format));
        if let Some(selection) = self.selection.borrow_mut().as_mut() {
            selection.format = format;
        }
    }

    fn apply_target_range(&self, _range: &TargetRange) {
        self.record(Call::ApplyTargetRange);
    }

    fn is_composing(&self) -> bool {
        self.composition_key.borrow().is_some()
    }

    fn set_composition_key(&self, key: Option<NodeKey>) {
        self.record(Call::SetCompositionKey(key.clone()));
        *self.composition_key.borrow_mut() = key;
    }

    fn flush_mutations(&self) {
        self.record(Call::FlushMutations);
    }

    fn node(&self, key: &NodeKey) -> Option<NodeInfo> {
        self.nodes.borrow().get(key).cloned()
    }

    fn root_children_count(&self) -> usize {
        self.root_children.get()
    }

    fn is_top_level_element_empty(&self, key: &NodeKey) -> bool {
        self.empty_blocks.borrow().contains(key)
    }

    fn should_insert_text(&self, _selection: &RangeSelection, _text: &str, _from_before_input: bool) -> bool {
        self.insert_policy.get()
    }
}

// ============================================================================
// Mock host
// ============================================================================

static NEXT_DOCUMENT: AtomicU64 = AtomicU64::new(1);

pub struct MockDocument {
    id: DocumentId,
    next_listener: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, SelectionChangeListener)>>,
    anchor: RefCell<Option<Rc<dyn HostNode>>>,
    cleared: Cell<usize>,
}

impl MockDocument {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            id: DocumentId(NEXT_DOCUMENT.fetch_add(1, Ordering::Relaxed)),
            next_listener: Cell::new(1),
            listeners: RefCell::new(Vec::new()),
            anchor: RefCell::new(None),
            cleared: Cell::new(0),
        })
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn cleared_count(&self) -> usize {
        self.cleared.get()
    }

    /// Move the native selection and notify listeners.
    pub fn select(&self, anchor: Rc<dyn HostNode>) {
        *self.anchor.borrow_mut() = Some(anchor);
        self.fire_selection_change();
    }

    pub fn fire_selection_change(&self) {
        let listeners: Vec<_> = self.listeners.borrow().iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener(self);
        }
    }
}

impl HostDocument for MockDocument {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn add_selection_change_listener(&self, listener: SelectionChangeListener) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_selection_change_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
    }

    fn selection_anchor(&self) -> Option<Rc<dyn HostNode>> {
        self.anchor.borrow().clone()
    }

    fn clear_native_selection(&self) {
        self.cleared.set(self.cleared.get() + 1);
        *self.anchor.borrow_mut() = None;
    }
}

/// A plain node (text or non-editable element) in the mock tree.
pub struct MockNode {
    parent: Option<Rc<dyn HostNode>>,
    editable: bool,
}

impl MockNode {
    pub fn text_in(parent: Rc<dyn HostNode>) -> Rc<Self> {
        Rc::new(Self {
            parent: Some(parent),
            editable: false,
        })
    }

    pub fn detached() -> Rc<Self> {
        Rc::new(Self {
            parent: None,
            editable: false,
        })
    }
}

impl HostNode for MockNode {
    fn parent_node(&self) -> Option<Rc<dyn HostNode>> {
        self.parent.clone()
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn surface(&self) -> Option<Rc<Surface>> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The root element of a surface; also a node in the mock tree.
pub struct MockElement {
    editable: Cell<bool>,
    document: Rc<MockDocument>,
    parent: Option<Rc<dyn HostNode>>,
    next_listener: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, EventType, EventListener)>>,
    surface: RefCell<Weak<Surface>>,
}

impl MockElement {
    pub fn new(document: &Rc<MockDocument>, parent: Option<Rc<dyn HostNode>>) -> Rc<Self> {
        Rc::new(Self {
            editable: Cell::new(true),
            document: Rc::clone(document),
            parent,
            next_listener: Cell::new(1),
            listeners: RefCell::new(Vec::new()),
            surface: RefCell::new(Weak::new()),
        })
    }

    pub fn set_editable(&self, editable: bool) {
        self.editable.set(editable);
    }

    pub fn tag(&self, surface: &Rc<Surface>) {
        *self.surface.borrow_mut() = Rc::downgrade(surface);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listener_types(&self) -> Vec<EventType> {
        self.listeners.borrow().iter().map(|(_, t, _)| *t).collect()
    }

    /// Deliver `event` to every listener registered for its type.
    pub fn fire(&self, event: RawEvent) -> Rc<RawEvent> {
        let event = Rc::new(event);
        let listeners: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, t, _)| *t == event.event_type())
            .map(|(_, _, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(&event);
        }
        event
    }
}

impl HostElement for MockElement {
    fn is_editable(&self) -> bool {
        self.editable.get()
    }

    fn owner_document(&self) -> Rc<dyn HostDocument> {
        self.document.clone()
    }

    fn add_event_listener(&self, event_type: EventType, listener: EventListener) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, event_type, listener));
        id
    }

    fn remove_event_listener(&self, event_type: EventType, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(existing, t, _)| !(*existing == id && *t == event_type));
    }
}

impl HostNode for MockElement {
    fn parent_node(&self) -> Option<Rc<dyn HostNode>> {
        self.parent.clone()
    }

    fn is_editable(&self) -> bool {
        self.editable.get()
    }

    fn surface(&self) -> Option<Rc<Surface>> {
        self.surface.borrow().upgrade()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Fixture
// ============================================================================

pub struct Mounted {
    pub element: Rc<MockElement>,
    pub surface: Rc<Surface>,
    pub editor: Rc<Editor>,
    pub engine: Rc<RecordingEngine>,
}

impl Mounted {
    pub fn fire(&self, event: RawEvent) -> Rc<RawEvent> {
        self.element.fire(event)
    }

    /// A text node inside this surface.
    pub fn text_node(&self) -> Rc<MockNode> {
        MockNode::text_in(self.element.clone())
    }
}

pub struct Fixture {
    pub controller: EventController,
    pub queue: Rc<DeferredQueue>,
    pub document: Rc<MockDocument>,
}

impl Fixture {
    pub fn new(platform: Platform) -> Self {
        let queue = Rc::new(DeferredQueue::new());
        Self {
            controller: EventController::new(platform, queue.clone()),
            queue,
            document: MockDocument::new(),
        }
    }

    pub fn with_before_input() -> Self {
        Self::new(Platform {
            before_input: true,
            ..Platform::default()
        })
    }

    /// Create an editor on `engine` and a surface for it, without attaching.
    pub fn surface(
        &self,
        engine: &Rc<RecordingEngine>,
        parent: Option<(&Rc<Editor>, Rc<dyn HostNode>)>,
    ) -> Mounted {
        let element = MockElement::new(&self.document, parent.as_ref().map(|(_, node)| node.clone()));
        let surface = Surface::new(element.clone());
        element.tag(&surface);
        let editor = match parent {
            Some((parent_editor, _)) => Editor::new_nested(engine.clone(), parent_editor),
            None => Editor::new(engine.clone()),
        };
        Mounted {
            element,
            surface,
            editor,
            engine: Rc::clone(engine),
        }
    }

    /// Create and attach a root editor.
    pub fn mount(&self, engine: &Rc<RecordingEngine>) -> Mounted {
        let mounted = self.surface(engine, None);
        self.attach(&mounted);
        mounted
    }

    /// Create and attach an editor nested inside `parent`'s content.
    pub fn mount_nested(&self, engine: &Rc<RecordingEngine>, parent: &Mounted) -> Mounted {
        let host: Rc<dyn HostNode> = parent.text_node();
        let mounted = self.surface(engine, Some((&parent.editor, host)));
        self.attach(&mounted);
        mounted
    }

    pub fn attach(&self, mounted: &Mounted) {
        self.controller
            .attach(&mounted.surface, &mounted.editor)
            .expect("attach should succeed");
    }
}
