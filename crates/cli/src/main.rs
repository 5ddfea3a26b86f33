mod commands;
mod render;

use clap::{Parser, Subcommand};
use mk_protocol::coordination_models::Strategy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "maki", version, about = "Coordinate LLM-backed agents and run workflows")]
struct Cli {
    /// Project root containing the `.maki/` directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Log at debug level unless MAKI_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a `.maki/` directory from the built-in templates
    Init {
        /// Overwrite template files in an existing `.maki/`
        #[arg(long)]
        force: bool,
        /// Write one agent and one workflow only
        #[arg(long)]
        minimal: bool,
    },
    /// List configured agents
    Agents,
    /// Run a single task on one agent
    Ask {
        agent: String,
        #[arg(trailing_var_arg = true, required = true)]
        task: Vec<String>,
    },
    /// Run one task across several agents
    Coordinate {
        #[arg(long, default_value = "sequential")]
        strategy: Strategy,
        /// Comma-separated agent names, in order
        #[arg(long, value_delimiter = ',', required = true)]
        agents: Vec<String>,
        /// Hybrid group, comma-separated. Repeat for each group in order
        #[arg(long = "group")]
        groups: Vec<String>,
        #[arg(trailing_var_arg = true, required = true)]
        task: Vec<String>,
    },
    /// Gather contributions from several agents and synthesize them
    Collaborate {
        /// Comma-separated agent names, in order
        #[arg(long, value_delimiter = ',', required = true)]
        agents: Vec<String>,
        /// Agent that writes the synthesis (defaults to the first listed)
        #[arg(long)]
        synthesizer: Option<String>,
        #[arg(trailing_var_arg = true, required = true)]
        task: Vec<String>,
    },
    /// Run a workflow from `.maki/workflows/`
    Run {
        workflow: String,
        /// Stop at the first failed step
        #[arg(long)]
        fail_fast: bool,
        /// Also write the report to this file
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("MAKI_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    // Diagnostics go to stderr; stdout carries results.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { force, minimal } => commands::init(&cli.root, force, minimal).await,
        Commands::Agents => commands::list_agents(&cli.root).await,
        Commands::Ask { agent, task } => commands::ask(&cli.root, &agent, &task.join(" ")).await,
        Commands::Coordinate {
            strategy,
            agents,
            groups,
            task,
        } => {
            let groups = groups
                .iter()
                .map(|group| {
                    group
                        .split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .collect();
            commands::coordinate(&cli.root, strategy, agents, groups, &task.join(" ")).await
        }
        Commands::Collaborate {
            agents,
            synthesizer,
            task,
        } => commands::collaborate(&cli.root, &agents, synthesizer.as_deref(), &task.join(" ")).await,
        Commands::Run {
            workflow,
            fail_fast,
            output,
            json,
        } => commands::run_workflow(&cli.root, &workflow, fail_fast, output.as_deref(), json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_coordinate() {
        let cli = Cli::parse_from([
            "maki",
            "coordinate",
            "--strategy",
            "hybrid",
            "--agents",
            "a,b,c",
            "--group",
            "a",
            "--group",
            "b,c",
            "summarise",
            "the",
            "news",
        ]);

        match cli.command {
            Commands::Coordinate {
                strategy,
                agents,
                groups,
                task,
            } => {
                assert_eq!(strategy, Strategy::Hybrid);
                assert_eq!(agents, vec!["a", "b", "c"]);
                assert_eq!(groups, vec!["a", "b,c"]);
                assert_eq!(task.join(" "), "summarise the news");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_run_with_global_flags() {
        let cli = Cli::parse_from(["maki", "run", "daily", "--json", "--root", "/tmp/p", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.root, PathBuf::from("/tmp/p"));
        assert!(matches!(cli.command, Commands::Run { json: true, .. }));
    }
}
