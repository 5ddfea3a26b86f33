//! Agent manager for orchestrating multiple agents.
//!
//! The `AgentManager` is responsible for:
//! - Registering agents under unique names
//! - Looking up agents by name
//! - Assigning single tasks and coordinating multi-agent tasks
//! - Running workflows

use crate::agents::base::Agent;
use crate::config::models::AppConfig;
use crate::coordination::collaborative::{synthesis_task, Collaboration};
use crate::coordination::{strategy_for, ResolvedAgent};
use crate::endpoint::{Endpoint, EndpointError, EndpointFactory};
use crate::engine::WorkflowEngine;
use crate::error::{OrchestrationError, OrchestrationResult};
use mk_protocol::context_models::Context;
use mk_protocol::coordination_models::{result_keys, CoordinationReport, CoordinationRequest, Strategy};
use mk_protocol::ipc::Event;
use mk_protocol::workflow_models::{Workflow, WorkflowReport};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc::Sender;

const DEFAULT_PARALLEL_LIMIT: usize = 4;

#[derive(Default)]
struct Registry {
    agents: HashMap<String, Arc<Agent>>,
    /// Names in insertion order.
    order: Vec<String>,
}

/// Registry of agents keyed by unique name, plus the coordination and
/// workflow operations that run across them.
///
/// Agents are never created implicitly: every name a request references
/// must already be registered.
pub struct AgentManager {
    default_endpoint: Arc<dyn Endpoint>,
    registry: RwLock<Registry>,
    parallel_limit: usize,
}

impl AgentManager {
    /// Create an empty manager. `default_endpoint` serves every agent added
    /// without its own binding.
    pub fn new(default_endpoint: Arc<dyn Endpoint>) -> Self {
        Self {
            default_endpoint,
            registry: RwLock::new(Registry::default()),
            parallel_limit: DEFAULT_PARALLEL_LIMIT,
        }
    }

    /// Bound the number of endpoint calls in flight during parallel and
    /// hybrid coordination. Zero is treated as one.
    pub fn with_parallel_limit(mut self, limit: usize) -> Self {
        self.parallel_limit = limit.max(1);
        self
    }

    /// Build a manager and register every configured agent.
    ///
    /// Agents that override the model or temperature get their own endpoint;
    /// the rest share the default one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` from the endpoint factory, or `DuplicateName`
    /// if two configured agents share a name.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigureError> {
        let base = &config.global.endpoint;
        let manager = Self::new(EndpointFactory::create(base)?)
            .with_parallel_limit(config.global.coordination.parallel_limit);

        for agent in &config.agents {
            let endpoint = if agent.overrides_endpoint() {
                let overridden = base.with_overrides(agent.model.as_deref(), agent.temperature);
                Some(EndpointFactory::create(&overridden)?)
            } else {
                None
            };
            manager.add_agent(&agent.name, &agent.role, &agent.instructions, endpoint)?;
        }

        Ok(manager)
    }

    pub fn default_endpoint(&self) -> &Arc<dyn Endpoint> {
        &self.default_endpoint
    }

    pub fn parallel_limit(&self) -> usize {
        self.parallel_limit
    }

    /// Create and register an agent.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique, non-blank agent name (surrounding whitespace is trimmed)
    /// * `role` - Persona label, may be empty
    /// * `instructions` - Standing instructions included in every prompt
    /// * `endpoint` - Endpoint binding; the manager default when `None`
    ///
    /// # Errors
    ///
    /// `InvalidAgentName` for a blank name, `DuplicateName` if the name is
    /// taken. The registry is unchanged on error.
    pub fn add_agent(
        &self,
        name: &str,
        role: &str,
        instructions: &str,
        endpoint: Option<Arc<dyn Endpoint>>,
    ) -> OrchestrationResult<Arc<Agent>> {
        let endpoint = endpoint.unwrap_or_else(|| Arc::clone(&self.default_endpoint));
        self.register(Agent::new(name, role, instructions, endpoint))
    }

    /// Register an agent built with [`Agent::new`].
    pub fn register(&self, agent: Agent) -> OrchestrationResult<Arc<Agent>> {
        let name = agent.name().to_string();
        if name.is_empty() {
            return Err(OrchestrationError::InvalidAgentName(
                "agent name must not be blank".to_string(),
            ));
        }

        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        if registry.agents.contains_key(&name) {
            return Err(OrchestrationError::DuplicateName(name));
        }

        let agent = Arc::new(agent);
        registry.agents.insert(name.clone(), Arc::clone(&agent));
        registry.order.push(name.clone());
        tracing::info!(agent = %name, role = %agent.role(), "agent registered");
        Ok(agent)
    }

    pub fn get_agent(&self, name: &str) -> Option<Arc<Agent>> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .agents
            .get(name)
            .cloned()
    }

    pub fn has_agent(&self, name: &str) -> bool {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .agents
            .contains_key(name)
    }

    /// Remove an agent. Removing an absent name is a no-op returning `None`.
    pub fn remove_agent(&self, name: &str) -> Option<Arc<Agent>> {
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        let removed = registry.agents.remove(name)?;
        registry.order.retain(|n| n != name);
        tracing::info!(agent = %name, "agent removed");
        Some(removed)
    }

    /// Registered names in insertion order.
    pub fn list_agents(&self) -> Vec<String> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .clone()
    }

    fn require(&self, name: &str) -> OrchestrationResult<Arc<Agent>> {
        self.get_agent(name)
            .ok_or_else(|| OrchestrationError::AgentNotFound(name.to_string()))
    }

    /// Run one task on one named agent. Never writes the agent's memory.
    ///
    /// # Errors
    ///
    /// `AgentNotFound` (with no endpoint call) when the name is unknown,
    /// `Endpoint` when the call fails.
    pub async fn assign_task(
        &self,
        agent_name: &str,
        task: &str,
        context: Option<&Context>,
    ) -> OrchestrationResult<String> {
        let agent = self.require(agent_name)?;
        agent.execute_task(task, context).await
    }

    fn resolve(&self, agent_names: &[String]) -> OrchestrationResult<Vec<ResolvedAgent>> {
        if agent_names.is_empty() {
            return Err(OrchestrationError::InvalidStrategy(
                "at least one agent is required".to_string(),
            ));
        }

        agent_names
            .iter()
            .zip(result_keys(agent_names))
            .map(|(name, key)| {
                Ok(ResolvedAgent {
                    key,
                    agent: self.require(name)?,
                })
            })
            .collect()
    }

    /// Run a task across several agents under the request's strategy.
    ///
    /// Every agent is resolved before any endpoint call. Entries in the
    /// report follow `agent_names` order.
    pub async fn coordinate(
        &self,
        request: &CoordinationRequest,
    ) -> OrchestrationResult<CoordinationReport> {
        let agents = self.resolve(&request.agent_names)?;
        tracing::debug!(
            strategy = %request.strategy,
            agents = agents.len(),
            "coordinating task"
        );

        let entries = strategy_for(request.strategy)
            .run(request, &agents, self.parallel_limit)
            .await?;

        Ok(CoordinationReport {
            strategy: request.strategy,
            task: request.task.clone(),
            entries,
        })
    }

    /// Gather sequential contributions, then ask one agent to synthesize them.
    ///
    /// The synthesizer defaults to the first listed agent.
    ///
    /// # Errors
    ///
    /// Besides the `coordinate` errors, a failed synthesis call returns
    /// `SynthesisFailed` carrying every contribution gathered.
    pub async fn collaborative_task(
        &self,
        task: &str,
        agent_names: &[String],
        context: Option<&Context>,
        synthesizer: Option<&str>,
    ) -> OrchestrationResult<Collaboration> {
        let synthesizer_name = match synthesizer {
            Some(name) => name.to_string(),
            None => agent_names.first().cloned().ok_or_else(|| {
                OrchestrationError::InvalidStrategy("at least one agent is required".to_string())
            })?,
        };
        let synthesizer = self.require(&synthesizer_name)?;

        let mut request = CoordinationRequest::new(task, agent_names.to_vec(), Strategy::Sequential);
        request.context = context.cloned();
        let contributions = self.coordinate(&request).await?;

        let synthesis = match synthesizer
            .execute_task(&synthesis_task(task, &contributions), context)
            .await
        {
            Ok(synthesis) => synthesis,
            Err(OrchestrationError::Endpoint { source, .. }) => {
                tracing::warn!(synthesizer = %synthesizer_name, error = %source, "synthesis failed");
                return Err(OrchestrationError::SynthesisFailed {
                    synthesizer: synthesizer_name,
                    contributions,
                    source,
                });
            }
            Err(other) => return Err(other),
        };

        Ok(Collaboration {
            contributions,
            synthesizer: synthesizer_name,
            synthesis,
        })
    }

    /// Run every step of a workflow in order. See [`WorkflowEngine::run`].
    pub async fn run_workflow(&self, workflow: &Workflow) -> OrchestrationResult<WorkflowReport> {
        WorkflowEngine::new(self).run(workflow, None).await
    }

    /// Like [`AgentManager::run_workflow`], also emitting progress events.
    pub async fn run_workflow_with_events(
        &self,
        workflow: &Workflow,
        events_tx: Sender<Event>,
    ) -> OrchestrationResult<WorkflowReport> {
        WorkflowEngine::new(self).run(workflow, Some(&events_tx)).await
    }
}

/// Failure building a manager from configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigureError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error(transparent)]
    Registry(#[from] OrchestrationError),
}
