//! End-to-end tests: load a `.maki/` project from disk, build the manager
//! from it and run its workflow through the echo provider.

mod common;

use common::*;
use mk_core::agents::AgentManager;
use mk_core::config::load_config;
use mk_core::plugins::{FileReader, FileWriter, WriteMode};

#[tokio::test]
async fn test_e2e_project_workflow() {
    let project = create_test_project().expect("Failed to create test project");
    let config = load_config(project.path()).await.expect("Failed to load config");

    let manager = AgentManager::from_config(&config).expect("Failed to build manager");
    assert_eq!(manager.list_agents(), names(&["builder", "planner"]));
    assert_eq!(manager.parallel_limit(), 2);

    let builder = manager.get_agent("builder").unwrap();
    assert_eq!(builder.instructions(), "Build what was planned.");

    let workflow = config
        .workflow("plan-and-build")
        .expect("workflow should be loaded");
    let report = manager.run_workflow(workflow).await.unwrap();

    assert!(report.is_success());
    let plan = assert_step_success(&report, "plan").to_string();
    assert!(plan.starts_with("You are planner, a planner.\nPlan before acting."));

    let build = assert_step_success(&report, "build");
    assert!(build.contains("- material: cedar"));
    assert!(build.contains(&format!("- plan: {plan}")));
    assert!(build.ends_with("Task: Build it"));
}

#[tokio::test]
async fn test_e2e_report_round_trips_through_file_plugins() {
    let project = create_test_project().expect("Failed to create test project");
    let config = load_config(project.path()).await.unwrap();
    let manager = AgentManager::from_config(&config).unwrap();
    let report = manager
        .run_workflow(config.workflow("plan-and-build").unwrap())
        .await
        .unwrap();

    let path = project.path().join("out/report.json");
    let json = serde_json::to_string_pretty(&report).unwrap();
    let written = FileWriter
        .write(&path, &json, WriteMode::CreateNew, true)
        .unwrap();
    assert!(written.success);
    assert_eq!(written.bytes_written, json.len());

    let read = FileReader.read(&path, None).unwrap();
    let parsed: mk_protocol::workflow_models::WorkflowReport =
        serde_json::from_str(&read.content).unwrap();
    assert_eq!(parsed, report);
}
