//! Hybrid coordination: ordered groups, parallel inside each group.

use super::{run_concurrently, CoordinationStrategy, ResolvedAgent};
use crate::error::{OrchestrationError, OrchestrationResult};
use async_trait::async_trait;
use mk_protocol::context_models::Context;
use mk_protocol::coordination_models::{CoordinationEntry, CoordinationRequest};
use serde_json::Value;

/// Groups run one after another. Each group sees the results of every
/// earlier group, keyed by result key, on top of the shared context.
///
/// Without explicit grouping the first agent forms its own group and the
/// rest run together on its result.
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridStrategy;

/// Check `request.grouping` and return the size of each group.
///
/// Validation happens before any agent runs.
pub fn group_sizes(request: &CoordinationRequest) -> OrchestrationResult<Vec<usize>> {
    let names = &request.agent_names;

    let Some(grouping) = &request.grouping else {
        return Ok(match names.len() {
            0 => Vec::new(),
            1 => vec![1],
            n => vec![1, n - 1],
        });
    };

    if let Some(index) = grouping.groups.iter().position(Vec::is_empty) {
        return Err(OrchestrationError::InvalidStrategy(format!(
            "hybrid group {index} is empty"
        )));
    }

    let flattened: Vec<&String> = grouping.groups.iter().flatten().collect();
    if flattened.len() != names.len() || flattened.iter().zip(names).any(|(a, b)| *a != b) {
        return Err(OrchestrationError::InvalidStrategy(
            "hybrid groups must list exactly the requested agents, in order".to_string(),
        ));
    }

    Ok(grouping.groups.iter().map(Vec::len).collect())
}

#[async_trait]
impl CoordinationStrategy for HybridStrategy {
    async fn run(
        &self,
        request: &CoordinationRequest,
        agents: &[ResolvedAgent],
        parallel_limit: usize,
    ) -> OrchestrationResult<Vec<CoordinationEntry>> {
        let sizes = group_sizes(request)?;
        let mut context: Context = request.context.clone().unwrap_or_default();
        let mut entries = Vec::with_capacity(agents.len());
        let mut offset = 0;

        for (index, size) in sizes.into_iter().enumerate() {
            let Some(group) = agents.get(offset..offset + size) else {
                return Err(OrchestrationError::InvalidStrategy(
                    "resolved agents do not match the hybrid grouping".to_string(),
                ));
            };
            offset += size;
            tracing::debug!(group = index, size, "running hybrid group");

            let results = run_concurrently(request, group, &context, parallel_limit).await?;
            for entry in &results {
                context.insert(entry.key.clone(), Value::String(entry.output.clone()));
            }
            entries.extend(results);
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mk_protocol::coordination_models::Strategy;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_grouping() {
        let request = CoordinationRequest::new("t", names(&["a", "b", "c"]), Strategy::Hybrid);
        assert_eq!(group_sizes(&request).unwrap(), vec![1, 2]);

        let single = CoordinationRequest::new("t", names(&["a"]), Strategy::Hybrid);
        assert_eq!(group_sizes(&single).unwrap(), vec![1]);
    }

    #[test]
    fn test_explicit_grouping() {
        let request = CoordinationRequest::new("t", names(&["a", "b", "c", "d"]), Strategy::Hybrid)
            .with_grouping(vec![names(&["a", "b"]), names(&["c"]), names(&["d"])]);
        assert_eq!(group_sizes(&request).unwrap(), vec![2, 1, 1]);
    }

    #[test]
    fn test_rejects_empty_group() {
        let request = CoordinationRequest::new("t", names(&["a", "b"]), Strategy::Hybrid)
            .with_grouping(vec![names(&["a"]), vec![], names(&["b"])]);
        assert!(matches!(
            group_sizes(&request),
            Err(OrchestrationError::InvalidStrategy(_))
        ));
    }

    #[test]
    fn test_rejects_mismatched_grouping() {
        let reordered = CoordinationRequest::new("t", names(&["a", "b"]), Strategy::Hybrid)
            .with_grouping(vec![names(&["b"]), names(&["a"])]);
        assert!(group_sizes(&reordered).is_err());

        let missing = CoordinationRequest::new("t", names(&["a", "b"]), Strategy::Hybrid)
            .with_grouping(vec![names(&["a"])]);
        assert!(group_sizes(&missing).is_err());
    }
}
