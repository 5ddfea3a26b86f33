//! Mock endpoint implementation for testing and dry runs.

use crate::endpoint::{Endpoint, EndpointError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

type Responder = Arc<dyn Fn(&str) -> Result<String, EndpointError> + Send + Sync>;

/// An in-process endpoint driven by a closure.
///
/// Clones share the recorded prompt log, so a test can keep one clone for
/// inspection while an agent owns another.
#[derive(Clone)]
pub struct MockEndpoint {
    responder: Responder,
    delay: Option<Duration>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockEndpoint {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<String, EndpointError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            delay: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns every prompt back unchanged.
    pub fn echo() -> Self {
        Self::new(|prompt| Ok(prompt.to_string()))
    }

    /// Always answers with the same text.
    pub fn success(response: impl Into<String>) -> Self {
        let response = response.into();
        Self::new(move |_| Ok(response.clone()))
    }

    /// Always fails with the given error.
    pub fn failing(error: EndpointError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    /// Sleep before answering, to exercise concurrent scheduling.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Every prompt received so far, in arrival order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Endpoint for MockEndpoint {
    async fn send(&self, prompt: &str, _image: Option<&[u8]>) -> Result<String, EndpointError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        (self.responder)(prompt)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
