//! Embedded template files for `.maki` initialization.
//!
//! Files under the workspace `templates/` directory are embedded at compile
//! time, so `maki init` needs nothing on disk besides the binary.

use rust_embed::RustEmbed;

/// Embedded template files from the `templates/` directory.
///
/// The folder is resolved relative to this crate:
/// `CARGO_MANIFEST_DIR` is `crates/core`, so `../../templates` is the
/// workspace root `templates/`.
///
/// With the `debug-embed` feature, debug builds embed too, so tests see the
/// same files as release builds.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by path relative to the templates root.
///
/// # Example
/// ```
/// use mk_core::init::templates::get_template;
///
/// let config = get_template("config.toml").expect("config.toml should exist");
/// assert!(config.contains("[endpoint]"));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// All template paths starting with `prefix`, sorted.
pub fn list_templates(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_agent;
    use mk_protocol::config_models::GlobalConfig;
    use mk_protocol::workflow_models::Workflow;
    use std::path::Path;

    #[test]
    fn test_config_template_parses() {
        let content = get_template("config.toml").expect("config.toml should be embedded");
        let config: GlobalConfig = toml::from_str(&content).expect("template should parse");
        assert_eq!(config.endpoint.model, "llama3");
        assert_eq!(config.coordination.parallel_limit, 4);
    }

    #[test]
    fn test_agent_templates_parse() {
        let agents = list_templates("agents/");
        assert_eq!(
            agents,
            vec!["agents/researcher.md", "agents/reviewer.md", "agents/writer.md"]
        );

        for path in agents {
            let content = get_template(&path).expect("listed template should exist");
            let agent = parse_agent(Path::new(&path), &content).expect("agent should parse");
            assert!(path.ends_with(&format!("{}.md", agent.name)));
            assert!(!agent.instructions.is_empty());
        }
    }

    #[test]
    fn test_workflow_templates_parse() {
        let workflows = list_templates("workflows/");
        assert!(workflows.contains(&"workflows/quick-note.yaml".to_string()));
        assert!(workflows.contains(&"workflows/research-and-write.yaml".to_string()));

        for path in workflows {
            let content = get_template(&path).expect("listed template should exist");
            let workflow: Workflow = serde_yaml::from_str(&content).expect("workflow should parse");
            assert!(!workflow.steps.is_empty());
        }
    }

    #[test]
    fn test_get_nonexistent_template() {
        assert!(get_template("nonexistent.txt").is_none());
    }
}
