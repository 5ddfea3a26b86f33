//! Text file reader.

use super::{require_path, PluginResult};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadOutcome {
    pub success: bool,
    pub path: PathBuf,
    pub content: String,
    pub line_count: usize,
    pub error: Option<String>,
}

impl ReadOutcome {
    fn failed(path: &Path, error: String) -> Self {
        tracing::warn!(path = %path.display(), %error, "file read failed");
        Self {
            success: false,
            path: path.to_path_buf(),
            content: String::new(),
            line_count: 0,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileReader;

impl FileReader {
    /// Read a UTF-8 file, keeping at most `max_lines` lines when given.
    pub fn read(&self, path: &Path, max_lines: Option<usize>) -> PluginResult<ReadOutcome> {
        require_path(path)?;

        let content = match read_text(path) {
            Ok(content) => content,
            Err(error) => return Ok(ReadOutcome::failed(path, error)),
        };

        let content: String = match max_lines {
            Some(max) => content.split_inclusive('\n').take(max).collect(),
            None => content,
        };

        Ok(ReadOutcome {
            success: true,
            path: path.to_path_buf(),
            line_count: content.lines().count(),
            content,
            error: None,
        })
    }

    /// Read a UTF-8 file as lines without their terminators.
    pub fn read_lines(&self, path: &Path) -> PluginResult<Result<Vec<String>, String>> {
        require_path(path)?;
        Ok(read_text(path).map(|content| content.lines().map(str::to_string).collect()))
    }
}

fn read_text(path: &Path) -> Result<String, String> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }
    if !path.is_file() {
        return Err(format!("Path is not a file: {}", path.display()));
    }
    fs::read_to_string(path).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_whole_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, "a\nb\nc\n").unwrap();

        let outcome = FileReader.read(&path, None).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.content, "a\nb\nc\n");
        assert_eq!(outcome.line_count, 3);
    }

    #[test]
    fn test_read_max_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, "a\nb\nc").unwrap();

        let outcome = FileReader.read(&path, Some(2)).unwrap();
        assert_eq!(outcome.content, "a\nb\n");
        assert_eq!(outcome.line_count, 2);
    }

    #[test]
    fn test_missing_file_and_directory() {
        let dir = tempdir().unwrap();

        let missing = FileReader.read(&dir.path().join("nope.txt"), None).unwrap();
        assert!(!missing.success);
        assert!(missing.error.unwrap().starts_with("File not found"));

        let directory = FileReader.read(dir.path(), None).unwrap();
        assert!(directory.error.unwrap().starts_with("Path is not a file"));
    }

    #[test]
    fn test_read_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, "x\r\ny\n").unwrap();

        let lines = FileReader.read_lines(&path).unwrap().unwrap();
        assert_eq!(lines, vec!["x", "y"]);
    }
}
