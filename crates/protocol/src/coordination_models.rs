//! Coordination request and report models.
//!
//! A coordination request runs one task across several agents under one of
//! three strategies. The report always lists results in the order the agents
//! were named in the request, whatever order the calls finished in.

use crate::context_models::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Policy for running a task across multiple agents.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// One agent after another, in listed order.
    Sequential,

    /// All agents independently and concurrently.
    Parallel,

    /// Ordered groups; agents inside a group run in parallel and each group
    /// sees the results of the groups before it.
    Hybrid,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(format!(
                "unknown strategy '{other}', expected sequential, parallel or hybrid"
            )),
        }
    }
}

/// Caller-supplied grouping for the hybrid strategy.
///
/// The concatenation of all groups must reproduce the request's
/// `agent_names` exactly, and no group may be empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HybridGrouping {
    pub groups: Vec<Vec<String>>,
}

/// A request to run one task across several agents.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct CoordinationRequest {
    pub task: String,

    /// Participating agents. Duplicates execute once per occurrence.
    pub agent_names: Vec<String>,

    pub strategy: Strategy,

    /// Context shared by every agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,

    /// Per-agent context, overlaid on the shared context for that agent.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub agent_context: HashMap<String, Context>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping: Option<HybridGrouping>,
}

impl CoordinationRequest {
    pub fn new(task: impl Into<String>, agent_names: Vec<String>, strategy: Strategy) -> Self {
        Self {
            task: task.into(),
            agent_names,
            strategy,
            context: None,
            agent_context: HashMap::new(),
            grouping: None,
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_agent_context(mut self, agent_name: impl Into<String>, context: Context) -> Self {
        self.agent_context.insert(agent_name.into(), context);
        self
    }

    pub fn with_grouping(mut self, groups: Vec<Vec<String>>) -> Self {
        self.grouping = Some(HybridGrouping { groups });
        self
    }
}

/// Compute the result key for every position in `agent_names`.
///
/// A name that appears once keys its result by itself. A repeated name keys
/// each occurrence as `name#position`. When that key is already another
/// agent's literal name, a `.n` suffix is added until it is free, so the
/// returned keys are always distinct.
pub fn result_keys(agent_names: &[String]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in agent_names {
        *counts.entry(name.as_str()).or_default() += 1;
    }
    let repeated = |name: &str| counts.get(name).copied().unwrap_or_default() > 1;

    let mut taken: HashSet<String> = agent_names
        .iter()
        .filter(|name| !repeated(name.as_str()))
        .cloned()
        .collect();

    agent_names
        .iter()
        .enumerate()
        .map(|(position, name)| {
            if !repeated(name.as_str()) {
                return name.clone();
            }
            let base = format!("{name}#{position}");
            let mut key = base.clone();
            let mut suffix = 1;
            while taken.contains(&key) {
                key = format!("{base}.{suffix}");
                suffix += 1;
            }
            taken.insert(key.clone());
            key
        })
        .collect()
}

/// One agent's contribution to a coordinated task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CoordinationEntry {
    /// Result key, see [`result_keys`].
    pub key: String,
    pub agent: String,
    pub output: String,
}

/// Ordered results of a coordination run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CoordinationReport {
    pub strategy: Strategy,
    pub task: String,
    pub entries: Vec<CoordinationEntry>,
}

impl CoordinationReport {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.output.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Agent names in report order.
    pub fn agents(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.agent.as_str()).collect()
    }

    /// Results keyed by result key, usable as prompt context.
    pub fn to_context(&self) -> Context {
        self.entries
            .iter()
            .map(|entry| (entry.key.clone(), Value::String(entry.output.clone())))
            .collect::<BTreeMap<_, _>>()
    }

    /// Concatenate all results in report order.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("## {}\n{}\n", entry.key, entry.output.trim_end()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_result_keys_unique_names() {
        assert_eq!(result_keys(&names(&["x", "y"])), names(&["x", "y"]));
    }

    #[test]
    fn test_result_keys_repeated_names() {
        assert_eq!(
            result_keys(&names(&["x", "y", "x"])),
            names(&["x#0", "y", "x#2"])
        );
    }

    #[test]
    fn test_result_keys_avoid_literal_hash_names() {
        let keys = result_keys(&names(&["a", "a#2", "a"]));
        assert_eq!(keys, names(&["a#0", "a#2", "a#2.1"]));

        let keys = result_keys(&names(&["a", "a#0", "a#0.1", "a"]));
        assert_eq!(keys, names(&["a#0.2", "a#0", "a#0.1", "a#3"]));
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Parallel".parse::<Strategy>(), Ok(Strategy::Parallel));
        assert_eq!(" hybrid ".parse::<Strategy>(), Ok(Strategy::Hybrid));
        assert!("round-robin".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_report_render_keeps_order() {
        let report = CoordinationReport {
            strategy: Strategy::Sequential,
            task: "t".to_string(),
            entries: vec![
                CoordinationEntry {
                    key: "b".to_string(),
                    agent: "b".to_string(),
                    output: "second\n".to_string(),
                },
                CoordinationEntry {
                    key: "a".to_string(),
                    agent: "a".to_string(),
                    output: "first".to_string(),
                },
            ],
        };

        assert_eq!(report.render(), "## b\nsecond\n\n## a\nfirst\n");
        assert_eq!(report.get("a"), Some("first"));
        assert_eq!(report.agents(), vec!["b", "a"]);
    }
}
