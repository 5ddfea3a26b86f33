//! File sinks and sources used around agent runs.
//!
//! Both plugins report I/O failures inside their outcome values rather than
//! as errors, so a caller can serialize the outcome as-is. Only a blank path
//! is rejected up front.

pub mod file_reader;
pub mod file_writer;

pub use file_reader::{FileReader, ReadOutcome};
pub use file_writer::{FileInfo, FileWriter, WriteMode, WriteOutcome};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    #[error("file path must not be blank")]
    BlankPath,
}

pub type PluginResult<T> = Result<T, PluginError>;

pub(crate) fn require_path(path: &std::path::Path) -> PluginResult<()> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(PluginError::BlankPath);
    }
    Ok(())
}
