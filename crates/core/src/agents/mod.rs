//! Agents and their registry.
//!
//! An [`Agent`] pairs an identity (name, role, instructions) with an endpoint
//! binding and a private memory store. The [`AgentManager`] owns the set of
//! named agents and runs single tasks, coordinated tasks and workflows
//! across them.

pub mod base;
pub mod decompose;
pub mod manager;
pub mod memory;
pub mod prompt;

pub use base::{Agent, HistoryEntry, HistoryKind, DEFAULT_MAX_HISTORY_ENTRIES};
pub use decompose::Subtask;
pub use manager::{AgentManager, ConfigureError};
pub use memory::MemoryStore;
pub use prompt::{Decomposition, SelfCorrection, StepByStep, TaskShaper};
