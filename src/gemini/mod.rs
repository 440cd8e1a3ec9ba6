pub mod image_client;
pub mod transport;

pub use image_client::ImageClient;
pub use transport::{GenerationTransport, HttpTransport};

use std::sync::Arc;
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::error::{GeminiError, Result};

/// Entry point for the crate. Builds the HTTP transport from a config
/// and hands out operation clients.
#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config.api_key.ok_or_else(|| {
            GeminiError::ConfigError(
                "Gemini API key is required (set GEMINI_API_KEY or use with_api_key)".to_string(),
            )
        })?;
        let base_url = config
            .base_url
            .unwrap_or_else(|| crate::config::DEFAULT_BASE_URL.to_string());
        let model = config
            .model
            .unwrap_or_else(|| crate::config::DEFAULT_IMAGE_MODEL.to_string());
        let timeout = config.timeout_secs.map(Duration::from_secs);

        let transport = Arc::new(HttpTransport::new(api_key, base_url, timeout)?);
        Ok(GeminiClient {
            image_client: ImageClient::new(transport, model),
        })
    }

    pub fn from_env() -> Result<Self> {
        GeminiClient::new(GeminiConfig::from_env())
    }

    /// Builds a client on top of a caller-supplied transport. Tests use
    /// this to avoid the network.
    pub fn with_transport(
        transport: Arc<dyn GenerationTransport>,
        default_model: impl Into<String>,
    ) -> Self {
        GeminiClient {
            image_client: ImageClient::new(transport, default_model),
        }
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requires_an_api_key() {
        match GeminiClient::new(GeminiConfig::new()) {
            Ok(_) => panic!("construction succeeded without an API key"),
            Err(GeminiError::ConfigError(message)) => assert!(message.contains("API key")),
            Err(other) => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn new_accepts_a_full_config() {
        let config = GeminiConfig::new()
            .with_api_key("test-key")
            .with_timeout(30);
        assert!(GeminiClient::new(config).is_ok());
    }
}
