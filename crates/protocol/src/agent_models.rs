//! Agent configuration models for `.maki/agents/*.md`.
//!
//! Agents are defined as Markdown files with YAML front matter. The front
//! matter carries identity and optional endpoint overrides, the body carries
//! the instructions injected into every prompt the agent executes.

use serde::{Deserialize, Serialize};

/// Represents an agent's configuration and instructions.
///
/// # Example
///
/// ```markdown
/// ---
/// name: researcher
/// role: research analyst
/// description: Gathers and summarises background material
/// model: llama3
/// temperature: 0.2
/// ---
///
/// Cite every claim. Prefer primary sources.
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Unique identifier for this agent.
    ///
    /// Used to reference the agent in coordination requests and workflow steps.
    pub name: String,

    /// Free-text persona label. May be empty.
    #[serde(default)]
    pub role: String,

    /// Human-readable description of the agent's purpose.
    #[serde(default)]
    pub description: String,

    /// Model override. Falls back to the default endpoint's model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Temperature override. Falls back to the default endpoint's temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// The body of the .md file, not part of the front matter.
    #[serde(skip)]
    pub instructions: String,
}

impl AgentConfig {
    /// Whether this agent needs its own endpoint rather than the shared default.
    pub fn overrides_endpoint(&self) -> bool {
        self.model.is_some() || self.temperature.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_endpoint() {
        let mut config = AgentConfig {
            name: "writer".to_string(),
            role: String::new(),
            description: String::new(),
            model: None,
            temperature: None,
            instructions: String::new(),
        };
        assert!(!config.overrides_endpoint());

        config.temperature = Some(0.7);
        assert!(config.overrides_endpoint());
    }
}
