//! Parsing of task-decomposition responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const NOT_SPECIFIED: &str = "Not specified";
const EXCERPT_CHARS: usize = 200;

/// One unit of work proposed by a decomposition call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Subtask {
    pub description: String,
    pub resources: String,
    pub expected_outcome: String,

    /// Set when the model's answer could not be read as a JSON array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsing_error: Option<String>,
}

/// Turn a raw model response into at most `max_subtasks` subtasks.
///
/// Markdown code fences around the JSON are tolerated. Missing fields are
/// defaulted. If the response is not a JSON array, a single fallback subtask
/// is returned that carries an excerpt of the response and the parse error.
pub fn parse_subtasks(raw: &str, task: &str, max_subtasks: usize) -> Vec<Subtask> {
    let body = strip_code_fence(raw);

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .take(max_subtasks)
            .enumerate()
            .map(|(index, item)| subtask_from_value(index, item))
            .collect(),
        Ok(_) => vec![fallback(raw, task, "response is not a JSON array".to_string())],
        Err(e) => vec![fallback(
            raw,
            task,
            format!("failed to parse response as JSON: {e}"),
        )],
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

fn subtask_from_value(index: usize, item: Value) -> Subtask {
    match item {
        Value::Object(fields) => {
            let field = |name: &str| match fields.get(name) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            };
            Subtask {
                description: field("description")
                    .unwrap_or_else(|| format!("Subtask {}", index + 1)),
                resources: field("resources").unwrap_or_else(|| NOT_SPECIFIED.to_string()),
                expected_outcome: field("expected_outcome")
                    .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
                parsing_error: None,
            }
        }
        Value::String(description) => Subtask {
            description,
            resources: NOT_SPECIFIED.to_string(),
            expected_outcome: NOT_SPECIFIED.to_string(),
            parsing_error: None,
        },
        other => Subtask {
            description: other.to_string(),
            resources: NOT_SPECIFIED.to_string(),
            expected_outcome: NOT_SPECIFIED.to_string(),
            parsing_error: None,
        },
    }
}

fn fallback(raw: &str, task: &str, error: String) -> Subtask {
    let excerpt = if raw.chars().count() > EXCERPT_CHARS {
        format!("{}...", raw.chars().take(EXCERPT_CHARS).collect::<String>())
    } else {
        raw.to_string()
    };
    Subtask {
        description: format!("Task: {task}"),
        resources: "See model response".to_string(),
        expected_outcome: excerpt,
        parsing_error: Some(error),
    }
}
