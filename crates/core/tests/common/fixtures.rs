//! Test fixtures for sample projects and populated managers.

use mk_core::agents::AgentManager;
use mk_core::endpoint::MockEndpoint;
use std::sync::Arc;
use tempfile::TempDir;

/// Owned agent names from string literals.
#[allow(dead_code)]
pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// A manager whose agents all share `endpoint`.
#[allow(dead_code)]
pub fn manager_with_agents(endpoint: MockEndpoint, agents: &[&str]) -> AgentManager {
    let manager = AgentManager::new(Arc::new(endpoint));
    for name in agents {
        manager
            .add_agent(name, "tester", "", None)
            .expect("Failed to add agent");
    }
    manager
}

/// Create a temporary project with a `.maki/` directory using the echo
/// provider, two agents and one workflow.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let maki_dir = temp_dir.path().join(".maki");

    std::fs::create_dir_all(maki_dir.join("agents"))?;
    std::fs::create_dir_all(maki_dir.join("workflows"))?;

    std::fs::write(
        maki_dir.join("config.toml"),
        "[endpoint]\nprovider = \"echo\"\n\n[coordination]\nparallel-limit = 2\n",
    )?;

    std::fs::write(
        maki_dir.join("agents/planner.md"),
        "---\nname: planner\nrole: planner\n---\nPlan before acting.",
    )?;
    std::fs::write(
        maki_dir.join("agents/builder.md"),
        "---\nname: builder\nrole: engineer\nmodel: codellama\n---\nBuild what was planned.",
    )?;

    let workflow_yaml = r#"
name: plan-and-build
steps:
  - name: plan
    agent: planner
    task: "Plan a birdhouse"
  - name: build
    agent: builder
    task: "Build it"
    context:
      material: cedar
"#;
    std::fs::write(maki_dir.join("workflows/plan-and-build.yaml"), workflow_yaml)?;

    Ok(temp_dir)
}
