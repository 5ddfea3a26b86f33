//! Workflow models for `.maki/workflows/*.yaml` and their run reports.
//!
//! A workflow is a strictly linear list of steps. Each step is executed by
//! one agent, and every successful result is fed into the context of the
//! steps that follow it under the step's name.

use crate::context_models::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single step of a workflow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkflowStep {
    /// Unique within the workflow; the context key for this step's result.
    ///
    /// Left blank, the engine names the step `step_{index}`.
    #[serde(default)]
    pub name: String,

    /// Name of the agent that executes this step.
    pub agent: String,

    pub task: String,

    /// Declared context. Wins over accumulated results on key collision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
}

impl WorkflowStep {
    pub fn new(name: impl Into<String>, agent: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agent: agent.into(),
            task: task.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }
}

/// Defines a full workflow.
///
/// # Example
///
/// ```yaml
/// name: research-and-write
/// fail-fast: false
/// steps:
///   - name: research
///     agent: researcher
///     task: "Collect the key facts about Rust's ownership model"
///   - name: draft
///     agent: writer
///     task: "Write a short article from the research"
///     context:
///       audience: beginners
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Workflow {
    /// Defaults to the file stem when loaded from `.maki/workflows/`.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Stop at the first failed step and mark the rest as skipped.
    #[serde(default)]
    pub fail_fast: bool,

    pub steps: Vec<WorkflowStep>,
}

impl Workflow {
    pub fn new(name: impl Into<String>, steps: Vec<WorkflowStep>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            fail_fast: false,
            steps,
        }
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// Classification of an orchestration error, stable across serialization.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    AgentNotFound,
    DuplicateName,
    InvalidAgentName,
    Endpoint,
    InvalidStrategy,
    Synthesis,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AgentNotFound => "agent not found",
            Self::DuplicateName => "duplicate name",
            Self::InvalidAgentName => "invalid agent name",
            Self::Endpoint => "endpoint error",
            Self::InvalidStrategy => "invalid strategy",
            Self::Synthesis => "synthesis failed",
        };
        f.write_str(s)
    }
}

/// A captured step failure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StepError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Outcome of a single workflow step.
///
/// Serialized as `{"status": "Success", "value": ...}`,
/// `{"status": "Failed", "error": {...}}` or `{"status": "Skipped"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status")]
pub enum StepOutcome {
    Success { value: String },
    Failed { error: StepError },
    Skipped,
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Success { value } => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&StepError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// The recorded outcome of one declared step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub name: String,
    pub agent: String,
    pub outcome: StepOutcome,
}

/// Result of one workflow run: exactly one record per declared step, in
/// declaration order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub run_id: Uuid,
    pub workflow: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<StepRecord>,
}

impl WorkflowReport {
    pub fn get(&self, step_name: &str) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|record| record.name == step_name)
            .map(|record| &record.outcome)
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|record| record.name.as_str()).collect()
    }

    pub fn succeeded(&self) -> usize {
        self.steps.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.steps.iter().filter(|r| r.outcome.is_failed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.steps.iter().filter(|r| r.outcome.is_skipped()).count()
    }

    /// True when every step succeeded.
    pub fn is_success(&self) -> bool {
        self.steps.iter().all(|r| r.outcome.is_success())
    }
}
