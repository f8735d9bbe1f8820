use rewind_core::errors::{ExError, ExErrorKind, RewindError};

#[test]
fn test_entity_not_found_carries_entity_id() {
    let ex_err: ExError = RewindError::EntityNotFound { entity_id: 42 }.into();

    assert_eq!(ex_err.kind(), ExErrorKind::NotFound);
    assert_eq!(ex_err.code(), "ERR_NOT_FOUND");
    assert_eq!(ex_err.entity_id(), Some(42));
}

#[test]
fn test_no_events_distinct_from_not_found() {
    let ex_err: ExError = RewindError::NoEvents {
        event_id: 99,
        event_count: 1,
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::NoEvents);
    assert_ne!(ex_err.kind(), ExErrorKind::NotFound);
    assert_eq!(ex_err.event_id(), Some(99));
    assert_eq!(ex_err.op(), Some("range_from"));
}

#[test]
fn test_patch_apply_keeps_failing_event() {
    let err = RewindError::PatchApply {
        event_id: None,
        reason: "path not found".to_string(),
    }
    .at_event(5);
    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::PatchApply);
    assert_eq!(ex_err.event_id(), Some(5));
    assert!(ex_err.message().contains("at event 5"));
}

#[test]
fn test_input_errors_share_invalid_input_kind() {
    let direction: ExError = RewindError::InvalidDirection {
        value: "sideways".to_string(),
    }
    .into();
    let seed: ExError = RewindError::SeedValidation {
        reason: "duplicate id".to_string(),
    }
    .into();

    assert_eq!(direction.kind(), ExErrorKind::InvalidInput);
    assert_eq!(seed.kind(), ExErrorKind::InvalidInput);
    assert!(direction.message().contains("sideways"));
}

#[test]
fn test_kind_shorthand_matches_conversion() {
    let cases = vec![
        (
            RewindError::Encoding {
                reason: "x".to_string(),
            },
            "ERR_ENCODING",
        ),
        (
            RewindError::PatchDecode {
                reason: "x".to_string(),
            },
            "ERR_PATCH_DECODE",
        ),
        (
            RewindError::Decode {
                reason: "x".to_string(),
            },
            "ERR_DECODE",
        ),
        (
            RewindError::InvalidFilter {
                input: "soon".to_string(),
                reason: "x".to_string(),
            },
            "ERR_INVALID_FILTER",
        ),
        (
            RewindError::InvalidPointer {
                pointer: "bag".to_string(),
                reason: "x".to_string(),
            },
            "ERR_INVALID_POINTER",
        ),
        (
            RewindError::Config {
                reason: "x".to_string(),
            },
            "ERR_CONFIG",
        ),
        (
            RewindError::Io {
                op: "read seed".to_string(),
                reason: "x".to_string(),
            },
            "ERR_IO",
        ),
        (RewindError::StatePoisoned, "ERR_CONCURRENCY"),
    ];

    for (err, expected_code) in cases {
        assert_eq!(err.kind().code(), expected_code, "for {:?}", err);
    }
}

#[test]
fn test_poison_error_maps_to_state_poisoned() {
    use std::sync::{Arc, Mutex};

    let lock = Arc::new(Mutex::new(0));
    let poisoner = Arc::clone(&lock);
    let _ = std::thread::spawn(move || {
        let _guard = poisoner.lock().unwrap();
        panic!("poison the lock");
    })
    .join();

    let err: RewindError = lock.lock().map(|_| ()).unwrap_err().into();
    assert_eq!(err, RewindError::StatePoisoned);
}
