//! Parallel coordination: all agents at once, no data flow between them.

use super::{run_concurrently, CoordinationStrategy, ResolvedAgent};
use crate::error::OrchestrationResult;
use async_trait::async_trait;
use mk_protocol::coordination_models::{CoordinationEntry, CoordinationRequest};

#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelStrategy;

#[async_trait]
impl CoordinationStrategy for ParallelStrategy {
    async fn run(
        &self,
        request: &CoordinationRequest,
        agents: &[ResolvedAgent],
        parallel_limit: usize,
    ) -> OrchestrationResult<Vec<CoordinationEntry>> {
        let shared = request.context.clone().unwrap_or_default();
        run_concurrently(request, agents, &shared, parallel_limit).await
    }
}
