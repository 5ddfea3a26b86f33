//! Endpoint factory for creating endpoint instances from configurations.

use crate::endpoint::{Endpoint, EndpointError, MockEndpoint, OllamaEndpoint};
use mk_protocol::config_models::{EndpointConfig, EndpointProvider};
use std::sync::Arc;

/// Factory for creating endpoints based on configuration.
///
/// The factory picks the implementation from the configured provider:
/// - `ollama` → [`OllamaEndpoint`]
/// - `echo` → [`MockEndpoint::echo`]
pub struct EndpointFactory;

impl EndpointFactory {
    /// Create an endpoint from a configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use mk_core::endpoint::EndpointFactory;
    /// use mk_protocol::config_models::{EndpointConfig, EndpointProvider};
    ///
    /// let config = EndpointConfig {
    ///     provider: EndpointProvider::Echo,
    ///     ..EndpointConfig::default()
    /// };
    /// let endpoint = EndpointFactory::create(&config).unwrap();
    /// assert_eq!(endpoint.model_name(), "mock");
    /// ```
    pub fn create(config: &EndpointConfig) -> Result<Arc<dyn Endpoint>, EndpointError> {
        match config.provider {
            EndpointProvider::Ollama => Ok(Arc::new(OllamaEndpoint::new(config)?)),
            EndpointProvider::Echo => Ok(Arc::new(MockEndpoint::echo())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_create_ollama() {
        let config = EndpointConfig::default();
        let endpoint = EndpointFactory::create(&config).unwrap();
        assert_eq!(endpoint.model_name(), "llama3");
    }

    #[tokio::test]
    async fn test_factory_create_echo() {
        let config = EndpointConfig {
            provider: EndpointProvider::Echo,
            ..EndpointConfig::default()
        };
        let endpoint = EndpointFactory::create(&config).unwrap();
        assert_eq!(endpoint.send("ping", None).await.unwrap(), "ping");
    }

    #[test]
    fn test_factory_propagates_invalid_config() {
        let config = EndpointConfig {
            temperature: -0.1,
            ..EndpointConfig::default()
        };
        assert!(matches!(
            EndpointFactory::create(&config),
            Err(EndpointError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_factory_returns_arc() {
        let config = EndpointConfig::default();
        let endpoint1 = EndpointFactory::create(&config).unwrap();
        let endpoint2 = endpoint1.clone();

        assert_eq!(Arc::strong_count(&endpoint1), 2);
        assert_eq!(Arc::strong_count(&endpoint2), 2);
    }
}
