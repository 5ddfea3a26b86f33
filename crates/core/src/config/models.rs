//! Configuration models that aggregate all settings.
//!
//! `AppConfig` combines global settings, agent definitions and workflow
//! definitions into a single value.

use mk_protocol::agent_models::AgentConfig;
use mk_protocol::config_models::GlobalConfig;
use mk_protocol::workflow_models::Workflow;

/// Unified application configuration loaded from the `.maki/` directory.
///
/// - `config.toml`: global settings
/// - `agents/*.md`: agent definitions
/// - `workflows/*.yaml`: workflow definitions
///
/// # Example
///
/// ```rust,no_run
/// use mk_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Loaded {} agents and {} workflows",
///          config.agents.len(),
///          config.workflows.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// Agent definitions, ordered by file name.
    pub agents: Vec<AgentConfig>,

    /// Workflow definitions, ordered by file name.
    pub workflows: Vec<Workflow>,
}

impl AppConfig {
    pub fn agent(&self, name: &str) -> Option<&AgentConfig> {
        self.agents.iter().find(|agent| agent.name == name)
    }

    pub fn workflow(&self, name: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|workflow| workflow.name == name)
    }
}
