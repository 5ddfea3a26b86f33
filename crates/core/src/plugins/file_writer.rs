//! Text file writer.

use super::{require_path, PluginResult};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// How to treat an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Truncate and replace.
    #[default]
    Overwrite,
    Append,
    /// Fail if the file already exists.
    CreateNew,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    pub success: bool,
    pub path: PathBuf,
    pub bytes_written: usize,
    pub mode: WriteMode,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub path: PathBuf,
    pub exists: bool,
    pub is_file: bool,
    pub is_directory: bool,
    /// Size in bytes; zero unless `is_file`.
    pub size: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileWriter;

impl FileWriter {
    /// Write `content` to `path`.
    ///
    /// With `create_dirs`, missing parent directories are created first.
    pub fn write(
        &self,
        path: &Path,
        content: &str,
        mode: WriteMode,
        create_dirs: bool,
    ) -> PluginResult<WriteOutcome> {
        require_path(path)?;

        let result = write_inner(path, content.as_bytes(), mode, create_dirs);
        Ok(outcome(path, mode, result))
    }

    /// Write each line followed by a newline.
    pub fn write_lines<S: AsRef<str>>(
        &self,
        path: &Path,
        lines: &[S],
        mode: WriteMode,
        create_dirs: bool,
    ) -> PluginResult<WriteOutcome> {
        let content: String = lines
            .iter()
            .map(|line| format!("{}\n", line.as_ref()))
            .collect();
        self.write(path, &content, mode, create_dirs)
    }

    pub fn append(&self, path: &Path, content: &str) -> PluginResult<WriteOutcome> {
        self.write(path, content, WriteMode::Append, false)
    }

    pub fn info(&self, path: &Path) -> PluginResult<FileInfo> {
        require_path(path)?;

        let metadata = fs::metadata(path).ok();
        let is_file = metadata.as_ref().is_some_and(fs::Metadata::is_file);
        Ok(FileInfo {
            path: path.to_path_buf(),
            exists: metadata.is_some(),
            is_file,
            is_directory: metadata.as_ref().is_some_and(fs::Metadata::is_dir),
            size: if is_file {
                metadata.map_or(0, |m| m.len())
            } else {
                0
            },
        })
    }
}

fn write_inner(
    path: &Path,
    bytes: &[u8],
    mode: WriteMode,
    create_dirs: bool,
) -> std::io::Result<usize> {
    if create_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
    }

    let mut options = OpenOptions::new();
    match mode {
        WriteMode::Overwrite => options.write(true).create(true).truncate(true),
        WriteMode::Append => options.append(true).create(true),
        WriteMode::CreateNew => options.write(true).create_new(true),
    };

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    Ok(bytes.len())
}

fn outcome(path: &Path, mode: WriteMode, result: std::io::Result<usize>) -> WriteOutcome {
    match result {
        Ok(bytes_written) => {
            tracing::debug!(path = %path.display(), bytes_written, ?mode, "file written");
            WriteOutcome {
                success: true,
                path: path.to_path_buf(),
                bytes_written,
                mode,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "file write failed");
            WriteOutcome {
                success: false,
                path: path.to_path_buf(),
                bytes_written: 0,
                mode,
                error: Some(e.to_string()),
            }
        }
    }
}
