//! Error types for orchestration operations.
//!
//! Configuration mistakes (`AgentNotFound`, `DuplicateName`,
//! `InvalidStrategy`) are kept distinct from runtime endpoint failures so
//! callers can tell them apart.

use crate::endpoint::EndpointError;
use mk_protocol::coordination_models::CoordinationReport;
use mk_protocol::workflow_models::{ErrorKind, StepError};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum OrchestrationError {
    #[error("Agent '{0}' not found in registry")]
    AgentNotFound(String),

    #[error("Agent '{0}' is already registered")]
    DuplicateName(String),

    #[error("Invalid agent name: {0}")]
    InvalidAgentName(String),

    #[error("Endpoint call failed for agent '{agent}': {source}")]
    Endpoint {
        agent: String,
        #[source]
        source: EndpointError,
    },

    #[error("Invalid strategy configuration: {0}")]
    InvalidStrategy(String),

    /// The synthesis call failed. `contributions` holds every per-agent
    /// result gathered before the failure.
    #[error("Synthesis by '{synthesizer}' failed after {} contributions: {source}", .contributions.len())]
    SynthesisFailed {
        synthesizer: String,
        contributions: CoordinationReport,
        #[source]
        source: EndpointError,
    },
}

impl OrchestrationError {
    pub fn endpoint(agent: impl Into<String>, source: EndpointError) -> Self {
        Self::Endpoint {
            agent: agent.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AgentNotFound(_) => ErrorKind::AgentNotFound,
            Self::DuplicateName(_) => ErrorKind::DuplicateName,
            Self::InvalidAgentName(_) => ErrorKind::InvalidAgentName,
            Self::Endpoint { .. } => ErrorKind::Endpoint,
            Self::InvalidStrategy(_) => ErrorKind::InvalidStrategy,
            Self::SynthesisFailed { .. } => ErrorKind::Synthesis,
        }
    }

    /// Capture this error as a serializable step outcome.
    pub fn to_step_error(&self) -> StepError {
        StepError {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

pub type OrchestrationResult<T> = Result<T, OrchestrationError>;
