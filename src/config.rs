use std::env;

/// Base URL of the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The image-capable Gemini model both operations use unless overridden.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    /// Optional request timeout in seconds. The operations define no
    /// timeout of their own; set this when bounded latency is needed.
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: None,
            model: None,
            timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .or_else(|| env::var("GOOGLE_API_KEY").ok());
        let base_url = env::var("GEMINI_BASE_URL").ok();
        let model = env::var("GEMINI_IMAGE_MODEL").ok();
        let timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        GeminiConfig {
            api_key,
            base_url,
            model,
            timeout_secs,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_chain() {
        let config = GeminiConfig::new()
            .with_api_key("key-123")
            .with_model("gemini-2.5-flash-image-preview")
            .with_timeout(30);

        assert_eq!(config.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.base_url, None);
        assert_eq!(config.model.as_deref(), Some("gemini-2.5-flash-image-preview"));
        assert_eq!(config.timeout_secs, Some(30));
    }

    #[test]
    fn default_is_empty() {
        let config = GeminiConfig::default();
        assert!(config.api_key.is_none());
        assert!(config.base_url.is_none());
        assert!(config.model.is_none());
        assert!(config.timeout_secs.is_none());
    }
}
