//! The Agent type and its execution history.

use crate::agents::decompose::{parse_subtasks, Subtask};
use crate::agents::memory::MemoryStore;
use crate::agents::prompt::{compose_prompt, Decomposition, SelfCorrection, StepByStep, TaskShaper};
use crate::endpoint::Endpoint;
use crate::error::{OrchestrationError, OrchestrationResult};
use chrono::{DateTime, Utc};
use mk_protocol::context_models::Context;
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// History entries kept per agent unless changed with
/// [`Agent::set_max_history_entries`].
pub const DEFAULT_MAX_HISTORY_ENTRIES: usize = 1000;

/// What produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Task,
    Reasoning,
    Correction,
    Decomposition,
}

/// A completed call made by an agent.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub kind: HistoryKind,
    /// The task as the caller supplied it, before any shaping.
    pub task: String,
    pub result: String,
    pub at: DateTime<Utc>,
}

/// Bounded call log; the oldest entries are dropped first.
#[derive(Debug)]
struct History {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl History {
    fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        self.trim();
    }

    fn trim(&mut self) {
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }
}

/// A named actor bound to one LLM endpoint, with role, instructions and
/// private memory.
///
/// Executing a task never writes to memory; callers opt in with
/// [`Agent::remember`].
pub struct Agent {
    name: String,
    role: String,
    instructions: String,
    endpoint: Arc<dyn Endpoint>,
    memory: MemoryStore,
    history: Mutex<History>,
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("model", &self.endpoint.model_name())
            .finish()
    }
}

impl Agent {
    /// Create a standalone agent. Surrounding whitespace is trimmed from the name.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        instructions: impl Into<String>,
        endpoint: Arc<dyn Endpoint>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            role: role.into(),
            instructions: instructions.into(),
            endpoint,
            memory: MemoryStore::new(),
            history: Mutex::new(History::new(DEFAULT_MAX_HISTORY_ENTRIES)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn endpoint(&self) -> &Arc<dyn Endpoint> {
        &self.endpoint
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// The prompt this agent would send for `task`.
    pub fn build_prompt(&self, task: &str, context: Option<&Context>) -> String {
        compose_prompt(&self.name, &self.role, &self.instructions, context, task)
    }

    /// Execute a single task and return the raw completion text.
    ///
    /// Endpoint failures come back as [`OrchestrationError::Endpoint`]
    /// carrying this agent's name.
    pub async fn execute_task(
        &self,
        task: &str,
        context: Option<&Context>,
    ) -> OrchestrationResult<String> {
        self.call(HistoryKind::Task, task, task, context, None).await
    }

    /// Execute a single task with an image attached to the request.
    pub async fn execute_task_with_image(
        &self,
        task: &str,
        context: Option<&Context>,
        image: &[u8],
    ) -> OrchestrationResult<String> {
        self.call(HistoryKind::Task, task, task, context, Some(image))
            .await
    }

    /// Execute `task` after rewriting it with `shaper`.
    pub async fn execute_shaped(
        &self,
        shaper: &dyn TaskShaper,
        task: &str,
        context: Option<&Context>,
    ) -> OrchestrationResult<String> {
        let shaped = shaper.shape(task);
        self.call(HistoryKind::Task, task, &shaped, context, None)
            .await
    }

    /// Ask for an explicit `steps`-step breakdown before the answer.
    pub async fn think_step_by_step(
        &self,
        problem: &str,
        steps: usize,
    ) -> OrchestrationResult<String> {
        let shaped = StepByStep { steps }.shape(problem);
        self.call(HistoryKind::Reasoning, problem, &shaped, None, None)
            .await
    }

    /// Revise an earlier response using feedback.
    pub async fn self_correct(
        &self,
        initial_response: &str,
        feedback: &str,
    ) -> OrchestrationResult<String> {
        let shaped = SelfCorrection {
            feedback: feedback.to_string(),
        }
        .shape(initial_response);
        self.call(HistoryKind::Correction, initial_response, &shaped, None, None)
            .await
    }

    /// Split a task into at most `max_subtasks` subtasks.
    ///
    /// An unparsable answer still yields one fallback subtask carrying the
    /// parse error; only endpoint failures are returned as errors.
    pub async fn decompose_task(
        &self,
        task: &str,
        max_subtasks: usize,
    ) -> OrchestrationResult<Vec<Subtask>> {
        let shaped = Decomposition { max_subtasks }.shape(task);
        let raw = self
            .call(HistoryKind::Decomposition, task, &shaped, None, None)
            .await?;
        Ok(parse_subtasks(&raw, task, max_subtasks))
    }

    async fn call(
        &self,
        kind: HistoryKind,
        original_task: &str,
        task: &str,
        context: Option<&Context>,
        image: Option<&[u8]>,
    ) -> OrchestrationResult<String> {
        let prompt = self.build_prompt(task, context);
        tracing::debug!(agent = %self.name, ?kind, prompt_len = prompt.len(), "dispatching prompt");

        let result = self.endpoint.send(&prompt, image).await.map_err(|e| {
            tracing::warn!(agent = %self.name, error = %e, "endpoint call failed");
            OrchestrationError::endpoint(&self.name, e)
        })?;

        self.history_lock().push(HistoryEntry {
            kind,
            task: original_task.to_string(),
            result: result.clone(),
            at: Utc::now(),
        });
        Ok(result)
    }

    /// Store a value under `key`, replacing any previous value.
    pub fn remember(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.memory.insert(key.into(), value.into());
    }

    /// Look up a stored value. Absence is `None`, not an error.
    pub fn recall(&self, key: &str) -> Option<Value> {
        self.memory.get(key)
    }

    pub fn forget(&self, key: &str) -> Option<Value> {
        self.memory.remove(key)
    }

    pub fn clear_memory(&self) {
        self.memory.clear();
    }

    pub fn memory_keys(&self) -> Vec<String> {
        self.memory.keys()
    }

    /// Successful calls made by this agent, oldest first. At most
    /// [`max_history_entries`](Self::max_history_entries) are kept.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history_lock().entries.iter().cloned().collect()
    }

    pub fn max_history_entries(&self) -> usize {
        self.history_lock().max_entries
    }

    /// Change the history cap. Existing entries beyond it are dropped,
    /// oldest first. Zero is treated as one.
    pub fn set_max_history_entries(&self, max_entries: usize) {
        let mut history = self.history_lock();
        history.max_entries = max_entries.max(1);
        history.trim();
    }

    fn history_lock(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{EndpointError, MockEndpoint};
    use serde_json::json;

    fn agent_with(endpoint: MockEndpoint) -> Agent {
        Agent::new("analyst", "data analyst", "Show your working.", Arc::new(endpoint))
    }

    #[tokio::test]
    async fn test_execute_task_sends_composed_prompt() {
        let endpoint = MockEndpoint::echo();
        let agent = agent_with(endpoint.clone());
        let context = Context::from([("year".to_string(), json!(2024))]);

        let result = agent.execute_task("Summarise sales", Some(&context)).await.unwrap();

        assert_eq!(result, agent.build_prompt("Summarise sales", Some(&context)));
        assert_eq!(endpoint.prompts(), vec![result.clone()]);
        assert!(result.starts_with("You are analyst, a data analyst.\nShow your working."));
        assert!(result.contains("- year: 2024"));
        assert!(result.ends_with("Task: Summarise sales"));
    }

    #[tokio::test]
    async fn test_execute_task_does_not_touch_memory() {
        let agent = agent_with(MockEndpoint::success("42"));
        agent.execute_task("compute", None).await.unwrap();
        assert!(agent.memory().is_empty());
    }

    #[tokio::test]
    async fn test_execute_task_propagates_endpoint_error() {
        let agent = agent_with(MockEndpoint::failing(EndpointError::Status {
            code: 500,
            body: "boom".to_string(),
        }));

        match agent.execute_task("compute", None).await {
            Err(OrchestrationError::Endpoint { agent: name, source }) => {
                assert_eq!(name, "analyst");
                assert_eq!(source.status_code(), Some(500));
            }
            other => panic!("expected endpoint error, got {:?}", other),
        }
        assert!(agent.history().is_empty());
    }

    #[test]
    fn test_remember_recall_clear() {
        let agent = agent_with(MockEndpoint::echo());

        agent.remember("k", 42);
        assert_eq!(agent.recall("k"), Some(json!(42)));

        agent.clear_memory();
        assert_eq!(agent.recall("k"), None);
    }

    #[test]
    fn test_forget_and_keys() {
        let agent = agent_with(MockEndpoint::echo());
        agent.remember("b", "two");
        agent.remember("a", json!({"one": 1}));

        assert_eq!(agent.memory_keys(), vec!["a", "b"]);
        assert_eq!(agent.forget("b"), Some(json!("two")));
        assert_eq!(agent.memory_keys(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_think_step_by_step_wraps_problem() {
        let endpoint = MockEndpoint::echo();
        let agent = agent_with(endpoint.clone());

        let result = agent.think_step_by_step("Why is the sky blue?", 4).await.unwrap();

        assert!(!result.is_empty());
        assert!(endpoint.prompts()[0].contains("into 4 clear reasoning steps"));

        let history = agent.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, HistoryKind::Reasoning);
        assert_eq!(history[0].task, "Why is the sky blue?");
    }

    #[tokio::test]
    async fn test_decompose_task_parses_response() {
        let agent = agent_with(MockEndpoint::success(
            r#"[{"description": "Outline"}, {"description": "Draft"}]"#,
        ));

        let subtasks = agent.decompose_task("Write a report", 5).await.unwrap();
        assert_eq!(subtasks.len(), 2);
        assert_eq!(subtasks[1].description, "Draft");
        assert_eq!(agent.history()[0].kind, HistoryKind::Decomposition);
    }

    #[tokio::test]
    async fn test_self_correct_records_history() {
        let agent = agent_with(MockEndpoint::success("better answer"));
        let result = agent.self_correct("first answer", "add sources").await.unwrap();

        assert_eq!(result, "better answer");
        assert_eq!(agent.history()[0].kind, HistoryKind::Correction);
    }

    #[tokio::test]
    async fn test_history_keeps_newest_entries() {
        let agent = agent_with(MockEndpoint::success("ok"));
        assert_eq!(agent.max_history_entries(), DEFAULT_MAX_HISTORY_ENTRIES);

        for i in 0..1500 {
            agent.execute_task(&format!("Task {i}"), None).await.unwrap();
        }

        let history = agent.history();
        assert_eq!(history.len(), 1000);
        assert_eq!(history[0].task, "Task 500");
        assert_eq!(history[999].task, "Task 1499");
    }

    #[tokio::test]
    async fn test_history_cap_applies_across_kinds() {
        let agent = agent_with(MockEndpoint::success("ok"));
        agent.set_max_history_entries(500);
        assert_eq!(agent.max_history_entries(), 500);

        for i in 0..375 {
            agent.execute_task(&format!("Task {i}"), None).await.unwrap();
            agent.think_step_by_step(&format!("Problem {i}"), 3).await.unwrap();
        }

        let history = agent.history();
        assert_eq!(history.len(), 500);
        assert_eq!(history[0].task, "Task 125");
        assert_eq!(history[499].task, "Problem 374");
        assert_eq!(history[499].kind, HistoryKind::Reasoning);
    }

    #[tokio::test]
    async fn test_lowering_history_cap_drops_oldest() {
        let agent = agent_with(MockEndpoint::success("ok"));
        for i in 0..10 {
            agent.execute_task(&format!("Task {i}"), None).await.unwrap();
        }

        agent.set_max_history_entries(3);
        let tasks: Vec<_> = agent.history().into_iter().map(|e| e.task).collect();
        assert_eq!(tasks, vec!["Task 7", "Task 8", "Task 9"]);

        agent.set_max_history_entries(0);
        assert_eq!(agent.max_history_entries(), 1);
        assert_eq!(agent.history().len(), 1);
    }

    #[test]
    fn test_name_is_trimmed() {
        let agent = Agent::new("  spaced  ", "", "", Arc::new(MockEndpoint::echo()));
        assert_eq!(agent.name(), "spaced");
    }
}
