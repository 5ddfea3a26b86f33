//! Prompt composition and prompt-shaping helpers.
//!
//! Every prompt an agent sends is built the same way: identity and role,
//! instructions, rendered context, then the task. Shapers rewrite only the
//! task text, so they compose with any agent without subclassing it.

use mk_protocol::context_models::Context;
use serde_json::Value;

/// Compose the full prompt for one task.
pub fn compose_prompt(
    name: &str,
    role: &str,
    instructions: &str,
    context: Option<&Context>,
    task: &str,
) -> String {
    let mut identity = if role.trim().is_empty() {
        format!("You are {name}.")
    } else {
        format!("You are {name}, a {}.", role.trim())
    };
    if !instructions.trim().is_empty() {
        identity.push('\n');
        identity.push_str(instructions.trim());
    }

    let mut sections = vec![identity];
    if let Some(context) = context.filter(|c| !c.is_empty()) {
        sections.push(format!("Context:\n{}", render_context(context)));
    }
    sections.push(format!("Task: {task}"));
    sections.join("\n\n")
}

/// Render context as one `- key: value` line per entry, in key order.
///
/// String values are written verbatim so earlier results appear in the
/// prompt exactly as they were produced; other values are compact JSON.
pub fn render_context(context: &Context) -> String {
    context
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("- {key}: {s}"),
            other => format!("- {key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrites a task into a more specific instruction.
pub trait TaskShaper: Send + Sync {
    fn shape(&self, task: &str) -> String;
}

/// Ask for an explicit N-step breakdown before the answer.
#[derive(Debug, Clone, Copy)]
pub struct StepByStep {
    pub steps: usize,
}

impl TaskShaper for StepByStep {
    fn shape(&self, problem: &str) -> String {
        format!(
            "Break down the following problem into {} clear reasoning steps, then give your answer.\n\
             Problem: {problem}\n\n\
             Provide a structured approach with:\n\
             1. Initial analysis\n\
             2. Key considerations\n\
             3. Solution approach",
            self.steps.max(1)
        )
    }
}

/// Revise an earlier response in light of feedback.
#[derive(Debug, Clone)]
pub struct SelfCorrection {
    pub feedback: String,
}

impl TaskShaper for SelfCorrection {
    fn shape(&self, initial_response: &str) -> String {
        format!(
            "Improve the following response based on feedback.\n\n\
             Original response: {initial_response}\n\
             Feedback: {}\n\n\
             Please revise your response to be more accurate and complete.",
            self.feedback
        )
    }
}

/// Request a JSON array of at most `max_subtasks` subtasks.
#[derive(Debug, Clone, Copy)]
pub struct Decomposition {
    pub max_subtasks: usize,
}

impl TaskShaper for Decomposition {
    fn shape(&self, task: &str) -> String {
        format!(
            "Decompose the following task into {} or fewer subtasks.\n\
             Task: {task}\n\n\
             Return ONLY a JSON array. Each element must be an object with these exact keys:\n\
             - \"description\": a clear description of the subtask\n\
             - \"resources\": required tools, data or skills\n\
             - \"expected_outcome\": what successful completion looks like",
            self.max_subtasks
        )
    }
}
