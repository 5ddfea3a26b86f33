//! Terminal rendering for workflow progress and reports.

use colored::Colorize;
use mk_protocol::coordination_models::CoordinationReport;
use mk_protocol::ipc::Event;
use mk_protocol::workflow_models::{StepOutcome, WorkflowReport};

/// One progress line per event, or `None` for events not worth a line.
pub fn event_line(event: &Event) -> Option<String> {
    match event {
        Event::WorkflowStarted {
            workflow_name,
            total_steps,
            ..
        } => Some(format!(
            "{} {} ({total_steps} steps)",
            "▶".cyan(),
            workflow_name.bold()
        )),
        Event::StepStarted {
            step_index,
            step_name,
            agent,
            ..
        } => Some(format!(
            "  [{}] {step_name} {}",
            step_index + 1,
            format!("→ {agent}").dimmed()
        )),
        Event::StepFinished {
            step_name, outcome, ..
        } => Some(format!("      {} {step_name}", status_marker(outcome))),
        Event::WorkflowCompleted { .. } => None,
    }
}

fn status_marker(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Success { .. } => "ok".green().to_string(),
        StepOutcome::Failed { .. } => "failed".red().to_string(),
        StepOutcome::Skipped => "skipped".yellow().to_string(),
    }
}

/// Human-readable report: each step's result under a heading, then a summary.
pub fn workflow_report(report: &WorkflowReport) -> String {
    let mut out = String::new();
    for record in &report.steps {
        out.push_str(&format!("## {} ({})\n", record.name, record.agent));
        match &record.outcome {
            StepOutcome::Success { value } => out.push_str(value.trim_end()),
            StepOutcome::Failed { error } => {
                out.push_str(&format!("[{}] {}", error.kind, error.message));
            }
            StepOutcome::Skipped => out.push_str("(skipped)"),
        }
        out.push_str("\n\n");
    }
    out.push_str(&format!(
        "{}: {} succeeded, {} failed, {} skipped",
        report.workflow,
        report.succeeded(),
        report.failed(),
        report.skipped()
    ));
    out
}

/// Contributions kept from a collaboration whose synthesis failed.
pub fn partial_contributions(synthesizer: &str, contributions: &CoordinationReport) -> String {
    format!(
        "{}\n{}\n",
        format!(
            "Synthesis by {synthesizer} failed; {} contributions were gathered:",
            contributions.len()
        )
        .yellow(),
        contributions.render().trim_end()
    )
}
