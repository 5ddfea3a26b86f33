//! Scripted endpoints built on `MockEndpoint`.

use mk_core::endpoint::{EndpointError, MockEndpoint};

/// The agent name from a composed prompt ("You are {name}, ..." or
/// "You are {name}.").
#[allow(dead_code)]
pub fn agent_from_prompt(prompt: &str) -> String {
    let first_line = prompt.lines().next().unwrap_or_default();
    first_line
        .strip_prefix("You are ")
        .unwrap_or(first_line)
        .split([',', '.'])
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Answers every prompt with `"{agent}-done"`.
#[allow(dead_code)]
pub fn done_endpoint() -> MockEndpoint {
    MockEndpoint::new(|prompt: &str| Ok(format!("{}-done", agent_from_prompt(prompt))))
}

/// Echoes prompts, except those containing `needle`, which fail with HTTP 503.
#[allow(dead_code)]
pub fn failing_on(needle: &'static str) -> MockEndpoint {
    MockEndpoint::new(move |prompt: &str| {
        if prompt.contains(needle) {
            Err(EndpointError::Status {
                code: 503,
                body: "model overloaded".to_string(),
            })
        } else {
            Ok(prompt.to_string())
        }
    })
}
