//! Subcommand handlers.

use crate::render;
use color_eyre::eyre::{eyre, Result, WrapErr};
use colored::Colorize;
use mk_core::agents::AgentManager;
use mk_core::config::{load_config, AppConfig};
use mk_core::error::OrchestrationError;
use mk_core::init::{generate_maki_structure, InitOptions};
use mk_core::plugins::{FileWriter, WriteMode};
use mk_protocol::coordination_models::{CoordinationRequest, Strategy};
use mk_protocol::ipc::Event;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

async fn load(root: &Path) -> Result<(AppConfig, AgentManager)> {
    let config = load_config(root)
        .await
        .wrap_err_with(|| format!("failed to load configuration under {}", root.display()))?;
    let manager = AgentManager::from_config(&config)?;
    Ok((config, manager))
}

pub async fn init(root: &Path, force: bool, minimal: bool) -> Result<()> {
    let written = generate_maki_structure(InitOptions {
        target_dir: root.to_path_buf(),
        force,
        minimal,
    })
    .await?;

    for path in &written {
        println!("  {} {}", "created".green(), path.display());
    }
    println!("{}", "Project initialized.".bold());
    Ok(())
}

pub async fn list_agents(root: &Path) -> Result<()> {
    let config = load_config(root).await?;
    if config.agents.is_empty() {
        println!("No agents configured. Run `maki init` to create some.");
        return Ok(());
    }

    for agent in &config.agents {
        let model = agent
            .model
            .as_deref()
            .unwrap_or(config.global.endpoint.model.as_str());
        let role = if agent.role.is_empty() {
            "-"
        } else {
            agent.role.as_str()
        };
        println!("{:<20} {:<24} {}", agent.name.bold(), role, model.dimmed());
    }
    Ok(())
}

pub async fn ask(root: &Path, agent: &str, task: &str) -> Result<()> {
    let (_, manager) = load(root).await?;
    let answer = manager.assign_task(agent, task, None).await?;
    println!("{answer}");
    Ok(())
}

pub async fn coordinate(
    root: &Path,
    strategy: Strategy,
    agents: Vec<String>,
    groups: Vec<Vec<String>>,
    task: &str,
) -> Result<()> {
    let (_, manager) = load(root).await?;

    let mut request = CoordinationRequest::new(task, agents, strategy);
    if !groups.is_empty() {
        if strategy != Strategy::Hybrid {
            return Err(eyre!("--group only applies to the hybrid strategy"));
        }
        request = request.with_grouping(groups);
    }

    let report = manager.coordinate(&request).await?;
    print!("{}", report.render());
    Ok(())
}

pub async fn collaborate(
    root: &Path,
    agents: &[String],
    synthesizer: Option<&str>,
    task: &str,
) -> Result<()> {
    let (_, manager) = load(root).await?;
    let collaboration = match manager
        .collaborative_task(task, agents, None, synthesizer)
        .await
    {
        Ok(collaboration) => collaboration,
        Err(err) => {
            // Contributions gathered before a failed synthesis still go to stdout.
            if let OrchestrationError::SynthesisFailed {
                synthesizer,
                contributions,
                ..
            } = &err
            {
                print!("{}", render::partial_contributions(synthesizer, contributions));
            }
            return Err(err.into());
        }
    };

    println!("{}", "Contributions".bold());
    println!("{}", collaboration.contributions.render());
    println!(
        "{} {}",
        "Synthesis by".bold(),
        collaboration.synthesizer.bold()
    );
    println!("{}", collaboration.synthesis);
    Ok(())
}

pub async fn run_workflow(
    root: &Path,
    name: &str,
    fail_fast: bool,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let (config, manager) = load(root).await?;
    let mut workflow = config
        .workflow(name)
        .cloned()
        .ok_or_else(|| eyre!("workflow '{name}' not found in .maki/workflows"))?;
    workflow.fail_fast |= fail_fast;

    let manager = Arc::new(manager);
    let (tx, rx) = mpsc::channel::<Event>(64);
    let handle = tokio::spawn({
        let manager = Arc::clone(&manager);
        async move { manager.run_workflow_with_events(&workflow, tx).await }
    });

    let mut events = ReceiverStream::new(rx);
    while let Some(event) = events.next().await {
        if !json {
            if let Some(line) = render::event_line(&event) {
                eprintln!("{line}");
            }
        }
    }

    let report = handle.await??;
    let rendered = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        render::workflow_report(&report)
    };
    println!("{rendered}");

    if let Some(path) = output {
        let outcome = FileWriter.write(path, &rendered, WriteMode::Overwrite, true)?;
        match outcome.error {
            None => eprintln!("{} {}", "report written to".dimmed(), path.display()),
            Some(error) => return Err(eyre!("failed to write {}: {error}", path.display())),
        }
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(eyre!(
            "{} of {} steps did not succeed",
            report.failed() + report.skipped(),
            report.steps.len()
        ))
    }
}
