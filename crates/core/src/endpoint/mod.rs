//! LLM endpoint abstraction.
//!
//! An [`Endpoint`] turns a prompt (optionally with an image) into a text
//! completion. Agents hold an `Arc<dyn Endpoint>`, so distinct agents can
//! bind distinct servers, models or temperatures.

pub mod factory;
pub mod mock;
pub mod ollama;

pub use factory::EndpointFactory;
pub use mock::MockEndpoint;
pub use ollama::OllamaEndpoint;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    #[error("Invalid endpoint configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Endpoint returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl EndpointError {
    /// HTTP status code, when the failure came from a non-2xx response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[async_trait]
pub trait Endpoint: Send + Sync {
    async fn send(&self, prompt: &str, image: Option<&[u8]>) -> Result<String, EndpointError>;
    fn model_name(&self) -> &str;
}
