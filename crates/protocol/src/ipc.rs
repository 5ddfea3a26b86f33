//! Progress events emitted by the workflow engine.
//!
//! Events are sent over a `tokio::sync::mpsc` channel so a front end can
//! render progress while a workflow is still running. Sending is best-effort:
//! a dropped receiver never fails the run.
//!
//! A run emits `WorkflowStarted`, then exactly one `StepFinished` per
//! declared step in step order, then `WorkflowCompleted`. `StepStarted`
//! precedes the `StepFinished` of every step that calls its agent. Steps
//! skipped after a fail-fast failure never start, so they get a
//! `StepFinished` with a `Skipped` outcome and no `StepStarted`.
//!
//! Uses tagged enum serialization:
//! ```json
//! {
//!   "type": "stepFinished",
//!   "payload": {
//!     "run_id": "uuid-here",
//!     "step_index": 1,
//!     "step_name": "draft",
//!     "outcome": { "status": "Success", "value": "..." }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workflow_models::StepOutcome;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A workflow run has begun.
    WorkflowStarted {
        run_id: Uuid,
        workflow_name: String,
        total_steps: usize,
    },

    /// A step is about to call its agent. Not emitted for skipped steps.
    StepStarted {
        run_id: Uuid,
        step_index: usize,
        step_name: String,
        agent: String,
    },

    /// A step has an outcome. Emitted once for every declared step,
    /// including skipped ones.
    StepFinished {
        run_id: Uuid,
        step_index: usize,
        step_name: String,
        outcome: StepOutcome,
    },

    /// Every step has an outcome.
    WorkflowCompleted {
        run_id: Uuid,
        succeeded: usize,
        failed: usize,
        skipped: usize,
    },
}

impl Event {
    pub fn run_id(&self) -> Uuid {
        match self {
            Self::WorkflowStarted { run_id, .. }
            | Self::StepStarted { run_id, .. }
            | Self::StepFinished { run_id, .. }
            | Self::WorkflowCompleted { run_id, .. } => *run_id,
        }
    }
}
