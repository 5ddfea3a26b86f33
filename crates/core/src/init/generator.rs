//! Directory structure and file generation for `.maki` initialization.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use crate::config::loader::CONFIG_DIR;
use std::fs;
use std::path::{Path, PathBuf};

const MINIMAL_AGENT: &str = "agents/writer.md";
const MINIMAL_WORKFLOW: &str = "workflows/quick-note.yaml";

/// Options for initializing a .maki directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Target directory where .maki will be created.
    pub target_dir: PathBuf,

    /// Overwrite existing template files if .maki already exists.
    pub force: bool,

    /// Create only one agent and one single-step workflow.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a `.maki` directory populated from the embedded templates.
///
/// ```text
/// .maki/
/// ├── config.toml
/// ├── agents/
/// │   ├── researcher.md   (unless minimal)
/// │   ├── reviewer.md     (unless minimal)
/// │   └── writer.md
/// └── workflows/
///     ├── quick-note.yaml
///     ├── research-and-write.yaml (unless minimal)
///     └── review-loop.yaml        (unless minimal)
/// ```
///
/// Returns the written files in the order they were created.
///
/// # Errors
/// - `DirectoryExists` when `.maki` exists and `force` is unset
/// - `TemplateNotFound` when an expected template is not embedded
/// - `DirectoryCreate` / `FileWrite` on file system failures
///
/// # Example
/// ```no_run
/// use mk_core::init::{generate_maki_structure, InitOptions};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let options = InitOptions {
///     target_dir: PathBuf::from("."),
///     force: false,
///     minimal: true,
/// };
///
/// let written = generate_maki_structure(options).await?;
/// println!("{} files written", written.len());
/// # Ok(())
/// # }
/// ```
pub async fn generate_maki_structure(options: InitOptions) -> InitResult<Vec<PathBuf>> {
    let maki_dir = options.target_dir.join(CONFIG_DIR);

    if maki_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(maki_dir));
    }

    for sub in ["agents", "workflows"] {
        let path = maki_dir.join(sub);
        fs::create_dir_all(&path).map_err(|source| InitError::DirectoryCreate { path, source })?;
    }

    let mut templates = vec!["config.toml".to_string()];
    if options.minimal {
        templates.push(MINIMAL_AGENT.to_string());
        templates.push(MINIMAL_WORKFLOW.to_string());
    } else {
        templates.extend(list_templates("agents/"));
        templates.extend(list_templates("workflows/"));
    }

    let mut written = Vec::with_capacity(templates.len());
    for template in &templates {
        written.push(write_template_file(&maki_dir, template)?);
    }

    tracing::info!(path = %maki_dir.display(), files = written.len(), "initialized project");
    Ok(written)
}

fn write_template_file(maki_dir: &Path, template_path: &str) -> InitResult<PathBuf> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = maki_dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path.clone(),
        source,
    })?;

    Ok(target_path)
}
