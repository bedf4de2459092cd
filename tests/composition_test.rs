// Test the IME composition state machine

mod common;

use common::{Call, Fixture, RecordingEngine};
use editor_events::composition::CompositionState;
use editor_events::events::{InputDetail, ModifierState, RawEvent};
use editor_events::model::{NodeInfo, NodeKey, Point, RangeSelection};
use editor_events::translate::keyboard::KEY_PROCESS;
use editor_events::Platform;
use serde_json::json;

fn firefox() -> Platform {
    Platform {
        firefox: true,
        ..Platform::default()
    }
}

#[test]
fn test_start_on_text_caret_inserts_one_space() {
    let fixture = Fixture::new(Platform::default());
    let engine = RecordingEngine::with_text_caret("t1", 2);
    let mounted = fixture.mount(&engine);
    assert_eq!(CompositionState::of(&mounted.editor), CompositionState::Idle);

    mounted.fire(RawEvent::composition_start(Some(String::new())));

    let descriptors = engine.descriptors();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].name, "insertText");
    assert_eq!(descriptors[0].payload, json!(" "));
    assert_eq!(engine.composition_key(), Some(NodeKey::from("t1")));
    assert_eq!(CompositionState::of(&mounted.editor), CompositionState::Composing);
}

#[test]
fn test_soft_keyboard_start_on_text_caret_skips_the_space() {
    let fixture = Fixture::new(Platform::default());
    let engine = RecordingEngine::with_text_caret("t1", 2);
    let mounted = fixture.mount(&engine);

    mounted.fire(RawEvent::key_down("Unidentified", ModifierState::key(KEY_PROCESS)));
    mounted.fire(RawEvent::composition_start(None));

    assert!(engine.commands().is_empty());
    assert_eq!(engine.composition_key(), Some(NodeKey::from("t1")));
}

#[test]
fn test_soft_keyboard_start_still_needs_a_text_node() {
    let element_anchor = RecordingEngine::new();
    element_anchor.add_node("p1", NodeInfo::element());
    element_anchor.set_pending_selection(Some(RangeSelection::collapsed(Point::element("p1", 0))));

    let expanded = RecordingEngine::new();
    expanded.add_node("t1", NodeInfo::text(Default::default()));
    expanded.set_pending_selection(Some(RangeSelection::new(
        Point::text("t1", 0),
        Point::text("t1", 3),
    )));

    for engine in [element_anchor, expanded] {
        let fixture = Fixture::new(Platform::default());
        let mounted = fixture.mount(&engine);
        mounted.fire(RawEvent::key_down("Unidentified", ModifierState::key(KEY_PROCESS)));
        mounted.fire(RawEvent::composition_start(None));
        assert_eq!(engine.command_names(), ["insertText"]);
    }
}

#[test]
fn test_second_start_while_composing_is_ignored() {
    let fixture = Fixture::new(Platform::default());
    let engine = RecordingEngine::with_text_caret("t1", 0);
    let mounted = fixture.mount(&engine);

    mounted.fire(RawEvent::composition_start(None));
    engine.add_node("t2", NodeInfo::text(Default::default()));
    engine.set_pending_selection(Some(RangeSelection::collapsed(Point::text("t2", 0))));
    mounted.fire(RawEvent::composition_start(None));

    assert_eq!(engine.command_names(), ["insertText"]);
    assert_eq!(engine.composition_key(), Some(NodeKey::from("t1")));
}

#[test]
fn test_start_without_selection_stays_idle() {
    let fixture = Fixture::new(Platform::default());
    let engine = RecordingEngine::new();
    let mounted = fixture.mount(&engine);

    mounted.fire(RawEvent::composition_start(None));

    assert!(engine.calls().is_empty());
    assert_eq!(CompositionState::of(&mounted.editor), CompositionState::Idle);
}

#[test]
fn test_end_reconciles_synchronously() {
    let fixture = Fixture::new(Platform::default());
    let engine = RecordingEngine::with_text_caret("t1", 0);
    let mounted = fixture.mount(&engine);
    mounted.fire(RawEvent::composition_start(None));
    engine.clear();

    mounted.fire(RawEvent::composition_end(Some("か".to_string())));

    assert_eq!(engine.calls(), [Call::SetCompositionKey(None), Call::FlushMutations]);
    assert_eq!(fixture.queue.pending(), 0);
    assert_eq!(CompositionState::of(&mounted.editor), CompositionState::Idle);
}

#[test]
fn test_firefox_end_waits_for_the_input_event() {
    let fixture = Fixture::new(firefox());
    let engine = RecordingEngine::with_text_caret("t1", 0);
    let mounted = fixture.mount(&engine);
    mounted.fire(RawEvent::composition_start(None));
    engine.clear();

    mounted.fire(RawEvent::composition_end(Some("か".to_string())));
    assert!(engine.calls().is_empty());
    assert_eq!(fixture.queue.pending(), 1);
    assert_eq!(CompositionState::of(&mounted.editor), CompositionState::Composing);

    engine.set_insert_policy(false);
    mounted.fire(RawEvent::input(InputDetail::new("insertCompositionText").with_data("か")));
    assert_eq!(engine.calls(), [Call::FlushMutations]);

    assert_eq!(fixture.queue.run_pending(), 1);
    assert_eq!(
        engine.calls(),
        [
            Call::FlushMutations,
            Call::SetCompositionKey(None),
            Call::FlushMutations,
        ]
    );
    assert_eq!(CompositionState::of(&mounted.editor), CompositionState::Idle);
}

#[test]
fn test_deferred_end_survives_detach() {
    let fixture = Fixture::new(firefox());
    let engine = RecordingEngine::with_text_caret("t1", 0);
    let mounted = fixture.mount(&engine);
    mounted.fire(RawEvent::composition_start(None));
    mounted.fire(RawEvent::composition_end(None));

    fixture.controller.detach(&mounted.surface);
    fixture.queue.run_pending();

    assert_eq!(engine.composition_key(), None);
}

#[test]
fn test_keys_resume_after_composition_ends() {
    let fixture = Fixture::new(Platform::default());
    let engine = RecordingEngine::with_text_caret("t1", 0);
    let mounted = fixture.mount(&engine);
    let left = || RawEvent::key_down("ArrowLeft", ModifierState::key(37));

    mounted.fire(RawEvent::composition_start(None));
    mounted.fire(left());
    mounted.fire(RawEvent::composition_end(None));
    mounted.fire(left());

    assert_eq!(engine.command_names(), ["insertText", "keyArrowLeft"]);
}
