//! # mk-core
//!
//! Agent orchestration for maki.
//!
//! This crate provides:
//! - Agents bound to LLM endpoints, with private memory and call history
//! - An agent registry with single-task assignment
//! - Sequential, parallel and hybrid coordination across agents
//! - A workflow engine that chains step results through shared context
//! - Configuration loading from the `.maki/` directory
//!
//! ## Modules
//!
//! - [`agents`]: `Agent`, memory, prompt shaping and the `AgentManager`
//! - [`config`]: Configuration loading and management
//! - [`coordination`]: Multi-agent coordination strategies
//! - [`endpoint`]: LLM endpoint trait, Ollama client and test double
//! - [`engine`]: Workflow execution engine
//! - [`error`]: Orchestration error type
//! - [`init`]: `.maki/` scaffolding from embedded templates
//! - [`plugins`]: File reader and writer

pub mod agents;
pub mod config;
pub mod coordination;
pub mod endpoint;
pub mod engine;
pub mod error;
pub mod init;
pub mod plugins;

pub use agents::{Agent, AgentManager};
pub use error::{OrchestrationError, OrchestrationResult};
