#![allow(clippy::unwrap_used, clippy::expect_used)]

// Kept in its own test binary: the capture buffer is process-global and
// the success-path test counts start/end pairs.

use rewind_core::logging_facility::test_capture::init_test_capture;
use rewind_core::model::{PatchDirection, User};
use rewind_core::EngineConfig;
use rewind_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use rewind_engine::TemporalEngine;

#[test]
fn test_failed_reconstruct_logs_error_code() {
    let capture = init_test_capture();
    let engine: TemporalEngine<User> = TemporalEngine::new(&EngineConfig::default());
    engine.insert_entity(User::new(42, "Nobody", 1)).unwrap();

    assert!(engine.reconstruct(42, 99, PatchDirection::Inverse).is_err());

    let failure = capture
        .events_for_op("reconstruct")
        .into_iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_END_ERROR)
                && e.entity_id() == Some(42)
        })
        .expect("reconstruct error event");
    assert_eq!(failure.err_code(), Some("ERR_NO_EVENTS"));
    assert_eq!(failure.event_id(), Some(99));
}

#[test]
fn test_every_start_has_exactly_one_outcome() {
    let capture = init_test_capture();
    let engine: TemporalEngine<User> = TemporalEngine::new(&EngineConfig::default());
    engine.insert_entity(User::new(7, "Ann", 30)).unwrap();
    engine
        .update_entity("admin", "u", "user_update", User::new(7, "Ann", 31))
        .unwrap();
    assert!(engine.reconstruct(8, 1, PatchDirection::Inverse).is_err());
    engine.reconstruct(7, 1, PatchDirection::Inverse).unwrap();

    let count = |op: &str, event: &str| {
        capture.count_events(|e| e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event))
    };
    let outcomes = |op: &str| count(op, EVENT_END) + count(op, EVENT_END_ERROR);
    assert_eq!(count("update_entity", EVENT_START), outcomes("update_entity"));
    assert!(count("reconstruct", EVENT_END_ERROR) >= 1);
}
