//! Configuration file loader for the `.maki/` directory structure.
//!
//! - `config.toml`: global settings
//! - `agents/*.md`: agent definitions with YAML front matter
//! - `workflows/*.yaml`: workflow definitions

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use gray_matter::engine::YAML;
use gray_matter::Matter;
use mk_protocol::agent_models::AgentConfig;
use mk_protocol::config_models::GlobalConfig;
use mk_protocol::workflow_models::Workflow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the project configuration directory.
pub const CONFIG_DIR: &str = ".maki";

/// Loads all configuration from the `.maki/` directory under `root`.
///
/// # Arguments
///
/// * `root` - Directory containing the `.maki/` folder
///
/// # Returns
///
/// An `AppConfig` with everything that was found. Missing directories or
/// files yield defaults rather than errors.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid syntax (TOML, YAML, or Markdown front matter)
/// - An agent has a blank name or two agent files share a name
/// - The endpoint temperature lies outside `[0, 1]`
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let maki_dir = root.join(CONFIG_DIR);

    if !maki_dir.exists() {
        tracing::debug!(path = %maki_dir.display(), "no configuration directory, using defaults");
        return Ok(AppConfig::default());
    }

    let global = load_global_config(&maki_dir)?;
    let agents = load_agents(&maki_dir)?;
    let workflows = load_workflows(&maki_dir)?;

    tracing::debug!(
        agents = agents.len(),
        workflows = workflows.len(),
        "configuration loaded"
    );

    Ok(AppConfig {
        global,
        agents,
        workflows,
    })
}

fn load_global_config(maki_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = maki_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content = read(&config_path)?;
    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    if !(0.0..=1.0).contains(&config.endpoint.temperature) {
        return Err(ConfigError::InvalidConfig {
            path: config_path,
            reason: format!(
                "endpoint temperature {} is outside [0, 1]",
                config.endpoint.temperature
            ),
        });
    }

    Ok(config)
}

/// Files in `dir` (non-recursive) whose extension is one of `extensions`,
/// sorted by file name.
fn files_with_extension(dir: &Path, extensions: &[&str]) -> ConfigResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: dir.to_path_buf(),
            source,
        })?;

        let matches = entry
            .path()
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if matches && entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn read(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse one agent file: YAML front matter plus a Markdown body that becomes
/// the agent's instructions.
pub fn parse_agent(path: &Path, content: &str) -> ConfigResult<AgentConfig> {
    let matter = Matter::<YAML>::new();
    let result = matter.parse(content);

    let mut agent: AgentConfig = result
        .data
        .ok_or_else(|| ConfigError::MarkdownParse {
            path: path.to_path_buf(),
            reason: "Missing YAML front matter".to_string(),
        })?
        .deserialize()
        .map_err(|e| ConfigError::MarkdownParse {
            path: path.to_path_buf(),
            reason: format!("Failed to deserialize front matter: {e}"),
        })?;

    agent.name = agent.name.trim().to_string();
    if agent.name.is_empty() {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "agent name must not be blank".to_string(),
        });
    }
    agent.instructions = result.content.trim().to_string();

    Ok(agent)
}

fn load_agents(maki_dir: &Path) -> ConfigResult<Vec<AgentConfig>> {
    let mut agents = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for path in files_with_extension(&maki_dir.join("agents"), &["md"])? {
        let agent = parse_agent(&path, &read(&path)?)?;

        if let Some(first) = seen.get(&agent.name) {
            return Err(ConfigError::DuplicateAgent {
                name: agent.name,
                first: first.clone(),
                second: path,
            });
        }
        seen.insert(agent.name.clone(), path);
        agents.push(agent);
    }

    Ok(agents)
}

fn load_workflows(maki_dir: &Path) -> ConfigResult<Vec<Workflow>> {
    let mut workflows = Vec::new();

    for path in files_with_extension(&maki_dir.join("workflows"), &["yaml", "yml"])? {
        let content = read(&path)?;
        let mut workflow: Workflow =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
                path: path.clone(),
                source,
            })?;

        // Unnamed workflows take their file stem.
        if workflow.name.trim().is_empty() {
            workflow.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
        }
        workflows.push(workflow);
    }

    Ok(workflows)
}
