//! Ollama-compatible HTTP endpoint.

use crate::endpoint::{Endpoint, EndpointError};
use async_trait::async_trait;
use base64::Engine;
use mk_protocol::config_models::EndpointConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize, Debug)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
}

#[derive(Serialize, Debug)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct VersionResponse {
    version: String,
}

/// Sends prompts to `{url}:{port}/api/generate` with streaming disabled.
pub struct OllamaEndpoint {
    base_url: String,
    port: u16,
    model: String,
    temperature: f32,
    timeout_secs: u64,
    http_client: reqwest::Client,
}

impl OllamaEndpoint {
    /// Validate the configuration and build an HTTP client with the
    /// configured request timeout.
    pub fn new(config: &EndpointConfig) -> Result<Self, EndpointError> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(EndpointError::InvalidConfig(
                "URL must be a non-empty string".to_string(),
            ));
        }
        if config.port == 0 {
            return Err(EndpointError::InvalidConfig(
                "Port must be a valid port number".to_string(),
            ));
        }
        let model = config.model.trim().to_string();
        if model.is_empty() {
            return Err(EndpointError::InvalidConfig(
                "Model must be a non-empty string".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&config.temperature) {
            return Err(EndpointError::InvalidConfig(format!(
                "Temperature must be between 0 and 1, got {}",
                config.temperature
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EndpointError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            port: config.port,
            model,
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
            http_client,
        })
    }

    fn url(&self, action: &str) -> String {
        format!("{}:{}/api/{action}", self.base_url, self.port)
    }

    fn build_request_body(&self, prompt: &str, image: Option<&[u8]>) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.trim().to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
            images: image
                .map(|bytes| vec![base64::engine::general_purpose::STANDARD.encode(bytes)])
                .unwrap_or_default(),
        }
    }

    fn map_transport_error(&self, error: reqwest::Error) -> EndpointError {
        if error.is_timeout() {
            EndpointError::Timeout(self.timeout_secs)
        } else {
            EndpointError::Transport(error.to_string())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, EndpointError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(EndpointError::Status {
            code: status.as_u16(),
            body,
        })
    }

    /// Ask the server for its version string.
    pub async fn version(&self) -> Result<String, EndpointError> {
        let response = self
            .http_client
            .get(self.url("version"))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let response = Self::check_status(response).await?;

        let parsed: VersionResponse = response
            .json()
            .await
            .map_err(|e| EndpointError::MalformedResponse(e.to_string()))?;
        Ok(parsed.version)
    }
}

#[async_trait]
impl Endpoint for OllamaEndpoint {
    async fn send(&self, prompt: &str, image: Option<&[u8]>) -> Result<String, EndpointError> {
        if prompt.trim().is_empty() {
            return Err(EndpointError::InvalidRequest(
                "Prompt must be a non-empty string".to_string(),
            ));
        }

        let body = self.build_request_body(prompt, image);
        tracing::debug!(model = %self.model, url = %self.url("generate"), "sending generate request");

        let response = self
            .http_client
            .post(self.url("generate"))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let response = Self::check_status(response).await?;

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| EndpointError::MalformedResponse(e.to_string()))?;
        Ok(parsed.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
