//! Collaborative tasks: sequential contributions followed by one synthesis.

use mk_protocol::coordination_models::CoordinationReport;
use serde::Serialize;

/// Result of a collaborative task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collaboration {
    /// Per-agent results, in listed order.
    pub contributions: CoordinationReport,
    pub synthesizer: String,
    pub synthesis: String,
}

/// Task given to the synthesizer once every contribution is in.
pub fn synthesis_task(task: &str, contributions: &CoordinationReport) -> String {
    format!(
        "You are coordinating a group of agents to solve a task.\n\n\
         Task: {task}\n\n\
         Agents involved: {agents}\n\n\
         Contributions:\n{rendered}\n\
         Combine these contributions into one coordinated response that \
         synthesizes input from all agents.",
        agents = contributions.agents().join(", "),
        rendered = contributions.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mk_protocol::coordination_models::{CoordinationEntry, Strategy};

    #[test]
    fn test_synthesis_task_lists_contributions_in_order() {
        let report = CoordinationReport {
            strategy: Strategy::Sequential,
            task: "plan a trip".to_string(),
            entries: vec![
                CoordinationEntry {
                    key: "planner".to_string(),
                    agent: "planner".to_string(),
                    output: "Go to Lisbon".to_string(),
                },
                CoordinationEntry {
                    key: "budget".to_string(),
                    agent: "budget".to_string(),
                    output: "Spend 800 EUR".to_string(),
                },
            ],
        };

        let task = synthesis_task("plan a trip", &report);
        assert!(task.contains("Task: plan a trip"));
        assert!(task.contains("Agents involved: planner, budget"));

        let first = task.find("Go to Lisbon").unwrap();
        let second = task.find("Spend 800 EUR").unwrap();
        assert!(first < second);
    }
}
