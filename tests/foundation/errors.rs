//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use stowage_foundation::{EntityId, Error, ErrorContext, ErrorKind, ValueType};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_type_mismatch() {
    let id = EntityId::from_u128(1);
    let err = Error::type_mismatch(id, "habitat.volume", ValueType::Float, ValueType::Int);
    assert!(matches!(
        err.kind,
        ErrorKind::TypeMismatch { expected: ValueType::Float, actual: ValueType::Int, .. }
    ));
    let msg = format!("{err}");
    assert!(msg.contains("habitat.volume"));
}

#[test]
fn error_unresolved_definition() {
    let err = Error::unresolved_definition("fuel_cell");
    assert!(err.is_unresolved_definition());
    assert!(format!("{err}").contains("fuel_cell"));
}

#[test]
fn error_unknown_process() {
    let id = EntityId::from_u128(2);
    let err = Error::unknown_process(id, "sabatier");
    assert!(matches!(err.kind, ErrorKind::UnknownProcess { .. }));
    assert!(!err.is_unresolved_definition());
    assert!(format!("{err}").contains("sabatier"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_context_display() {
    let id = EntityId::from_u128(3);
    let ctx = ErrorContext::new()
        .with_entity(id)
        .with_tick(12)
        .with_frame("commit scrubber");
    let text = ctx.to_string();
    assert!(text.contains("at tick 12"));
    assert!(text.contains("in commit scrubber"));
}

#[test]
fn error_with_context_keeps_kind() {
    let err = Error::unresolved_definition("x").with_context(ErrorContext::new().with_tick(4));
    assert!(err.is_unresolved_definition());
    assert_eq!(err.context.and_then(|c| c.tick), Some(4));
}
