//! Sequential coordination: one agent after another, in listed order.

use super::{context_for, run_one, CoordinationStrategy, ResolvedAgent};
use crate::error::OrchestrationResult;
use async_trait::async_trait;
use mk_protocol::coordination_models::{CoordinationEntry, CoordinationRequest};

/// Every agent gets the original task and the shared context. Results do
/// not flow between agents; the first failure aborts the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialStrategy;

#[async_trait]
impl CoordinationStrategy for SequentialStrategy {
    async fn run(
        &self,
        request: &CoordinationRequest,
        agents: &[ResolvedAgent],
        _parallel_limit: usize,
    ) -> OrchestrationResult<Vec<CoordinationEntry>> {
        let shared = request.context.clone().unwrap_or_default();
        let mut entries = Vec::with_capacity(agents.len());

        for resolved in agents {
            let context = context_for(request, resolved.agent.name(), &shared);
            entries.push(run_one(resolved, &request.task, &context).await?);
        }

        Ok(entries)
    }
}
