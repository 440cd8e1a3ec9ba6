use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    /// Client construction problems, such as a missing API key. Never
    /// produced by the generation operations themselves.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A request field is missing or malformed. Raised before any call
    /// to the provider is made, so no external resource was consumed.
    #[error("Validation error on `{field}`: {message}")]
    ValidationError {
        field: &'static str,
        message: String,
    },

    /// The provider call failed, or it completed without returning a
    /// usable image reference. An empty image payload is reported here
    /// rather than surfaced as an empty success value.
    #[error("Image generation failed: {0}")]
    GenerationFailed(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl GeminiError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        GeminiError::ValidationError {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeminiError>;
