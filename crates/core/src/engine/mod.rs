//! Workflow execution engine.
//!
//! The `WorkflowEngine` runs workflow steps strictly in order, feeding every
//! successful result into the context of the steps after it. Step failures
//! are recorded rather than returned, so one report always covers every
//! declared step.

use crate::agents::manager::AgentManager;
use crate::error::{OrchestrationError, OrchestrationResult};
use chrono::Utc;
use mk_protocol::context_models::{merge_context, Context};
use mk_protocol::ipc::Event;
use mk_protocol::workflow_models::{StepOutcome, StepRecord, Workflow, WorkflowReport, WorkflowStep};
use serde_json::Value;
use std::collections::HashSet;
use tokio::sync::mpsc::Sender;
use uuid::Uuid;

/// Runs a [`Workflow`] against the agents registered in an [`AgentManager`].
///
/// Usually reached through [`AgentManager::run_workflow`].
pub struct WorkflowEngine<'a> {
    manager: &'a AgentManager,
}

/// The name a step is recorded under: its declared name, or `step_{index}`
/// when that is blank.
pub fn step_name(step: &WorkflowStep, index: usize) -> String {
    let name = step.name.trim();
    if name.is_empty() {
        format!("step_{index}")
    } else {
        name.to_string()
    }
}

/// Resolve every step name and reject duplicates.
fn resolve_step_names(workflow: &Workflow) -> OrchestrationResult<Vec<String>> {
    let names: Vec<String> = workflow
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| step_name(step, index))
        .collect();

    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name.as_str()) {
            return Err(OrchestrationError::InvalidStrategy(format!(
                "workflow '{}' declares step '{name}' more than once",
                workflow.name
            )));
        }
    }
    Ok(names)
}

impl<'a> WorkflowEngine<'a> {
    pub fn new(manager: &'a AgentManager) -> Self {
        Self { manager }
    }

    /// Execute a workflow and return its report.
    ///
    /// 1. Validates step names (duplicates are rejected before any step runs)
    /// 2. Emits `WorkflowStarted`
    /// 3. Runs each step with the accumulated context plus its own context
    /// 4. Records one outcome per step, emitting `StepStarted`/`StepFinished`
    /// 5. Emits `WorkflowCompleted`
    ///
    /// With `fail_fast` set, the first failed step marks every later step
    /// `Skipped`. Skipped steps emit `StepFinished` but no `StepStarted`.
    ///
    /// # Arguments
    ///
    /// * `workflow` - The workflow definition to execute
    /// * `events_tx` - Optional channel for progress events
    ///
    /// # Errors
    ///
    /// Only `InvalidStrategy` for duplicate step names. Step failures are
    /// captured in the report.
    pub async fn run(
        &self,
        workflow: &Workflow,
        events_tx: Option<&Sender<Event>>,
    ) -> OrchestrationResult<WorkflowReport> {
        let names = resolve_step_names(workflow)?;
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        tracing::info!(%run_id, workflow = %workflow.name, steps = names.len(), "workflow started");
        emit(
            events_tx,
            Event::WorkflowStarted {
                run_id,
                workflow_name: workflow.name.clone(),
                total_steps: names.len(),
            },
        )
        .await;

        let mut accumulated = Context::new();
        let mut records = Vec::with_capacity(names.len());
        let mut aborted = false;

        for (step_index, (step, name)) in workflow.steps.iter().zip(names).enumerate() {
            let outcome = if aborted {
                StepOutcome::Skipped
            } else {
                emit(
                    events_tx,
                    Event::StepStarted {
                        run_id,
                        step_index,
                        step_name: name.clone(),
                        agent: step.agent.clone(),
                    },
                )
                .await;
                self.execute_step(step, &name, &accumulated).await
            };

            match &outcome {
                StepOutcome::Success { value } => {
                    accumulated.insert(name.clone(), Value::String(value.clone()));
                }
                StepOutcome::Failed { error } => {
                    tracing::warn!(%run_id, step = %name, kind = %error.kind, "{}", error.message);
                    aborted = workflow.fail_fast;
                }
                StepOutcome::Skipped => {}
            }

            emit(
                events_tx,
                Event::StepFinished {
                    run_id,
                    step_index,
                    step_name: name.clone(),
                    outcome: outcome.clone(),
                },
            )
            .await;

            records.push(StepRecord {
                name,
                agent: step.agent.clone(),
                outcome,
            });
        }

        let report = WorkflowReport {
            run_id,
            workflow: workflow.name.clone(),
            started_at,
            finished_at: Utc::now(),
            steps: records,
        };

        tracing::info!(
            %run_id,
            succeeded = report.succeeded(),
            failed = report.failed(),
            skipped = report.skipped(),
            "workflow finished"
        );
        emit(
            events_tx,
            Event::WorkflowCompleted {
                run_id,
                succeeded: report.succeeded(),
                failed: report.failed(),
                skipped: report.skipped(),
            },
        )
        .await;

        Ok(report)
    }

    async fn execute_step(&self, step: &WorkflowStep, name: &str, accumulated: &Context) -> StepOutcome {
        let Some(agent) = self.manager.get_agent(&step.agent) else {
            return StepOutcome::Failed {
                error: OrchestrationError::AgentNotFound(step.agent.clone()).to_step_error(),
            };
        };

        let context = merge_context(accumulated, step.context.as_ref());
        tracing::debug!(step = %name, agent = %step.agent, context_keys = context.len(), "running step");

        match agent.execute_task(&step.task, Some(&context)).await {
            Ok(value) => StepOutcome::Success { value },
            Err(e) => StepOutcome::Failed {
                error: e.to_step_error(),
            },
        }
    }
}

/// Send an event if a channel is attached. A closed receiver is ignored.
async fn emit(events_tx: Option<&Sender<Event>>, event: Event) {
    if let Some(tx) = events_tx {
        let _ = tx.send(event).await;
    }
}
