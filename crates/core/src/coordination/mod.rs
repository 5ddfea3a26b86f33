//! Multi-agent coordination strategies.
//!
//! A [`CoordinationRequest`] names a task, the participating agents and a
//! [`Strategy`]. The manager resolves every agent up front, then hands the
//! resolved list to the [`CoordinationStrategy`] implementation selected by
//! [`strategy_for`].
//!
//! Every strategy returns entries in `agent_names` order, whatever order the
//! endpoint calls finished in.

pub mod collaborative;
pub mod hybrid;
pub mod parallel;
pub mod sequential;

pub use collaborative::Collaboration;
pub use hybrid::HybridStrategy;
pub use parallel::ParallelStrategy;
pub use sequential::SequentialStrategy;

use crate::agents::Agent;
use crate::error::OrchestrationResult;
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::stream::{self, StreamExt, TryStreamExt};
use mk_protocol::context_models::{merge_context, Context};
use mk_protocol::coordination_models::{CoordinationEntry, CoordinationRequest, Strategy};
use std::sync::Arc;

/// An agent looked up for one position in the request's `agent_names`.
#[derive(Debug, Clone)]
pub struct ResolvedAgent {
    /// Result key for this position.
    pub key: String,
    pub agent: Arc<Agent>,
}

#[async_trait]
pub trait CoordinationStrategy: Send + Sync {
    /// Run the request across `agents`, which are already resolved and
    /// aligned one-to-one with `request.agent_names`.
    ///
    /// `parallel_limit` bounds how many endpoint calls may be in flight.
    async fn run(
        &self,
        request: &CoordinationRequest,
        agents: &[ResolvedAgent],
        parallel_limit: usize,
    ) -> OrchestrationResult<Vec<CoordinationEntry>>;
}

/// Select the implementation for a strategy.
pub fn strategy_for(strategy: Strategy) -> Box<dyn CoordinationStrategy> {
    match strategy {
        Strategy::Sequential => Box::new(SequentialStrategy),
        Strategy::Parallel => Box::new(ParallelStrategy),
        Strategy::Hybrid => Box::new(HybridStrategy),
    }
}

/// Context one agent sees: `base` overlaid by its per-agent entry.
pub(crate) fn context_for(request: &CoordinationRequest, agent_name: &str, base: &Context) -> Context {
    merge_context(base, request.agent_context.get(agent_name))
}

pub(crate) async fn run_one(
    resolved: &ResolvedAgent,
    task: &str,
    context: &Context,
) -> OrchestrationResult<CoordinationEntry> {
    let output = resolved.agent.execute_task(task, Some(context)).await?;
    Ok(CoordinationEntry {
        key: resolved.key.clone(),
        agent: resolved.agent.name().to_string(),
        output,
    })
}

/// Run every agent concurrently against the same `base` context.
///
/// At most `limit` calls are in flight. Results come back in input order and
/// the first error in that order is returned.
pub(crate) async fn run_concurrently(
    request: &CoordinationRequest,
    agents: &[ResolvedAgent],
    base: &Context,
    limit: usize,
) -> OrchestrationResult<Vec<CoordinationEntry>> {
    let task = request.task.as_str();
    let calls: Vec<BoxFuture<'_, OrchestrationResult<CoordinationEntry>>> = agents
        .iter()
        .map(|resolved| {
            let context = context_for(request, resolved.agent.name(), base);
            Box::pin(async move { run_one(resolved, task, &context).await }) as BoxFuture<'_, _>
        })
        .collect();

    stream::iter(calls)
        .buffered(limit.max(1))
        .try_collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::MockEndpoint;
    use serde_json::json;

    #[test]
    fn test_context_for_overlays_agent_entry() {
        let request = CoordinationRequest::new("t", vec!["a".to_string()], Strategy::Sequential)
            .with_agent_context("a", Context::from([("tone".to_string(), json!("formal"))]));
        let base = Context::from([
            ("tone".to_string(), json!("casual")),
            ("topic".to_string(), json!("rust")),
        ]);

        let merged = context_for(&request, "a", &base);
        assert_eq!(merged["tone"], json!("formal"));
        assert_eq!(merged["topic"], json!("rust"));

        let untouched = context_for(&request, "b", &base);
        assert_eq!(untouched, base);
    }

    #[tokio::test]
    async fn test_run_one_builds_entry() {
        let resolved = ResolvedAgent {
            key: "a#0".to_string(),
            agent: Arc::new(Agent::new("a", "", "", Arc::new(MockEndpoint::success("ok")))),
        };

        let entry = run_one(&resolved, "task", &Context::new()).await.unwrap();
        assert_eq!(entry.key, "a#0");
        assert_eq!(entry.agent, "a");
        assert_eq!(entry.output, "ok");
    }
}
