//! Listener registration and lifecycle
//!
//! `EventController` is created once by the embedding application. It
//! resolves the listener table for the platform, attaches it to surfaces,
//! and owns the `Arbiter` holding all cross-surface state.

use std::fmt;
use std::rc::Rc;

use crate::arbitration::Arbiter;
use crate::commands::{Command, CommandName};
use crate::composition::{on_composition_end, on_composition_start};
use crate::error::{EventsError, Result};
use crate::events::{EventType, RawEvent};
use crate::handlers::{on_before_input, on_click, on_input, on_key_down, HandlerContext, SemanticHandler};
use crate::host::{EventListener, HostDocument, SelectionChangeListener, Surface};
use crate::model::Editor;
use crate::platform::Platform;
use crate::scheduler::TaskScheduler;

// ============================================================================
// Listener table
// ============================================================================

#[derive(Clone, Copy)]
pub enum Listener {
    /// Run a handler when the surface is editable.
    Semantic(SemanticHandler),
    /// Dispatch a command named after the event, with the event as payload.
    PassThrough,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Semantic(_) => f.write_str("Semantic"),
            Listener::PassThrough => f.write_str("PassThrough"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListenerTable {
    entries: Vec<(EventType, Listener)>,
}

impl ListenerTable {
    pub fn for_platform(platform: &Platform) -> Self {
        let mut entries = vec![
            (EventType::KeyDown, Listener::Semantic(on_key_down)),
            (EventType::CompositionStart, Listener::Semantic(on_composition_start)),
            (EventType::CompositionEnd, Listener::Semantic(on_composition_end)),
            (EventType::Input, Listener::Semantic(on_input)),
            (EventType::Click, Listener::Semantic(on_click)),
            (EventType::Cut, Listener::PassThrough),
            (EventType::Copy, Listener::PassThrough),
            (EventType::DragStart, Listener::PassThrough),
            (EventType::Paste, Listener::PassThrough),
            (EventType::Focus, Listener::PassThrough),
            (EventType::Blur, Listener::PassThrough),
        ];
        // Without beforeinput, drops reach the engine as a plain event and
        // text mutations are recovered from `input`.
        if platform.before_input {
            entries.push((EventType::BeforeInput, Listener::Semantic(on_before_input)));
        } else {
            entries.push((EventType::Drop, Listener::PassThrough));
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[(EventType, Listener)] {
        &self.entries
    }

    pub fn event_types(&self) -> impl Iterator<Item = EventType> + '_ {
        self.entries.iter().map(|(event_type, _)| *event_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Controller
// ============================================================================

struct ControllerInner {
    platform: Platform,
    table: ListenerTable,
    arbiter: Arbiter,
    scheduler: Rc<dyn TaskScheduler>,
}

pub struct EventController {
    inner: Rc<ControllerInner>,
}

impl EventController {
    pub fn new(platform: Platform, scheduler: Rc<dyn TaskScheduler>) -> Self {
        log::debug!("event controller for {:?}", platform);
        Self {
            inner: Rc::new(ControllerInner {
                table: ListenerTable::for_platform(&platform),
                platform,
                arbiter: Arbiter::new(),
                scheduler,
            }),
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.inner.platform
    }

    pub fn listener_table(&self) -> &ListenerTable {
        &self.inner.table
    }

    pub fn arbiter(&self) -> &Arbiter {
        &self.inner.arbiter
    }

    /// Register the listener table on `surface` for `editor`.
    ///
    /// Attaching a surface that already has listeners replaces them, so the
    /// net effect of repeated attaches is a single registration.
    pub fn attach(&self, surface: &Rc<Surface>, editor: &Rc<Editor>) -> Result<()> {
        if let Some(other) = editor.attached_surface() {
            if other != surface.id() {
                return Err(EventsError::EditorAlreadyAttached {
                    editor: editor.key(),
                    surface: other,
                });
            }
        }

        match surface.editor() {
            Some(previous) if !Rc::ptr_eq(&previous, editor) => self.detach(surface),
            _ => surface.take_removal_handles().run_all(),
        }

        editor.set_attached_surface(Some(surface));
        self.add_document_selection_change_tracking(surface, editor);

        for &(event_type, listener) in self.inner.table.entries() {
            let callback = self.event_listener(surface, editor, event_type, listener);
            let element = Rc::clone(surface.element());
            let id = element.add_event_listener(event_type, callback);
            surface.push_removal_handle(Box::new(move || {
                element.remove_event_listener(event_type, id);
            }));
        }
        log::debug!(
            "attached editor {} to {} ({} listeners)",
            editor.key(),
            surface.id(),
            surface.removal_handle_count()
        );
        Ok(())
    }

    /// Reverse `attach`: remove every listener, clear the editor
    /// back-reference and forget arbitration state for the editor.
    pub fn detach(&self, surface: &Rc<Surface>) {
        let document = surface.document();
        self.inner.arbiter.untrack_surface(document.as_ref(), surface.id());

        if let Some(editor) = surface.editor() {
            self.inner.arbiter.forget_editor(&editor);
            if editor.attached_surface() == Some(surface.id()) {
                editor.set_attached_surface(None);
            }
            surface.set_editor(None);
            log::debug!("detached editor {} from {}", editor.key(), surface.id());
        }
        surface.take_removal_handles().run_all();
    }

    /// Tag `surface` with `editor` and make sure its document reports
    /// selection changes. The document listener is installed once per
    /// document, however many surfaces it hosts.
    pub fn add_document_selection_change_tracking(&self, surface: &Rc<Surface>, editor: &Rc<Editor>) {
        surface.set_editor(Some(Rc::clone(editor)));
        let document = surface.document();
        let inner = Rc::downgrade(&self.inner);
        self.inner
            .arbiter
            .track_surface(document.as_ref(), surface, move || -> SelectionChangeListener {
                Rc::new(move |document: &dyn HostDocument| {
                    if let Some(inner) = inner.upgrade() {
                        inner.arbiter.on_selection_change(document);
                    }
                })
            });
    }

    /// Forget arbitration state for an editor that is going away.
    pub fn teardown_editor(&self, editor: &Rc<Editor>) {
        self.inner.arbiter.forget_editor(editor);
    }

    fn event_listener(
        &self,
        surface: &Rc<Surface>,
        editor: &Rc<Editor>,
        event_type: EventType,
        listener: Listener,
    ) -> EventListener {
        let inner = Rc::downgrade(&self.inner);
        let surface = Rc::downgrade(surface);
        let editor = Rc::clone(editor);

        Rc::new(move |event: &Rc<RawEvent>| {
            let (Some(inner), Some(surface)) = (inner.upgrade(), surface.upgrade()) else {
                log::warn!("{} fired after its surface was dropped", event_type.as_str());
                return;
            };
            if !surface.is_editable() {
                log::trace!("{} ignored on read-only {}", event_type.as_str(), surface.id());
                return;
            }

            match listener {
                Listener::Semantic(handler) => {
                    let cx = HandlerContext {
                        surface: &surface,
                        editor: &editor,
                        platform: &inner.platform,
                        arbiter: &inner.arbiter,
                        scheduler: &inner.scheduler,
                    };
                    handler(&cx, event);
                }
                Listener::PassThrough => {
                    if let Some(name) = CommandName::for_pass_through(event_type) {
                        editor.update(|| {
                            editor.execute(Command::with_event(name, event));
                        });
                    }
                }
            }
        })
    }
}
