//! Custom assertion helpers for reports and events.

use mk_protocol::ipc::Event;
use mk_protocol::workflow_models::{ErrorKind, StepOutcome, WorkflowReport};

/// Assert that `step` succeeded and return its value.
#[allow(dead_code)]
pub fn assert_step_success<'a>(report: &'a WorkflowReport, step: &str) -> &'a str {
    match report.get(step) {
        Some(StepOutcome::Success { value }) => value,
        other => panic!("step '{step}' should have succeeded, got {other:?}"),
    }
}

/// Assert that `step` failed with `kind`.
#[allow(dead_code)]
pub fn assert_step_failed(report: &WorkflowReport, step: &str, kind: ErrorKind) {
    match report.get(step) {
        Some(StepOutcome::Failed { error }) => assert_eq!(error.kind, kind, "step '{step}'"),
        other => panic!("step '{step}' should have failed, got {other:?}"),
    }
}

/// Assert the run starts with `WorkflowStarted`, ends with
/// `WorkflowCompleted` and carries one run id throughout.
#[allow(dead_code)]
pub fn assert_event_sequence(events: &[Event]) {
    assert!(!events.is_empty(), "Event sequence is empty");
    assert!(
        matches!(events[0], Event::WorkflowStarted { .. }),
        "First event should be WorkflowStarted, got: {:?}",
        events[0]
    );
    assert!(
        matches!(events.last(), Some(Event::WorkflowCompleted { .. })),
        "Last event should be WorkflowCompleted, got: {:?}",
        events.last()
    );

    let run_id = events[0].run_id();
    assert!(events.iter().all(|e| e.run_id() == run_id));
}
