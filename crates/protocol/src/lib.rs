//! # mk-protocol
//!
//! Shared data models for the maki orchestration workspace.
//!
//! This crate defines the plain data structures used for:
//! - Configuration file parsing (TOML config, Markdown agents, YAML workflows)
//! - Coordination requests and their reports
//! - Workflow definitions and per-step outcomes
//! - Progress events emitted while a workflow runs
//!
//! ## Modules
//!
//! - [`agent_models`]: Agent configuration structures
//! - [`config_models`]: Global configuration from config.toml
//! - [`context_models`]: Structured prompt context
//! - [`coordination_models`]: Coordination strategies, requests and reports
//! - [`workflow_models`]: Workflow definitions and step outcomes
//! - [`ipc`]: Events emitted by the workflow engine
//!
//! ## Design Principles
//!
//! - Minimal dependencies: only serde, uuid and chrono
//! - Independent compilation: no dependencies on other maki crates

pub mod agent_models;
pub mod config_models;
pub mod context_models;
pub mod coordination_models;
pub mod ipc;
pub mod workflow_models;

// Re-export all public types for convenience
pub use agent_models::*;
pub use config_models::*;
pub use context_models::*;
pub use coordination_models::*;
pub use ipc::*;
pub use workflow_models::*;
