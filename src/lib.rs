//! Gemini image generation client with a prompt studio on top.
//!
//! The crate exposes two operations against Google's image-capable
//! Gemini models: generating an image from a text prompt and
//! transforming an existing image with a text instruction. Results come
//! back as `data:` URIs ready for display or decoding. The optional
//! [`studio::Studio`] layer adds prompt composition, creativity levels,
//! style suggestions and a session gallery.
//!
//! ```no_run
//! use auroragen::{GeminiClient, GeminiConfig, TextToImageRequest};
//!
//! # async fn run() -> auroragen::Result<()> {
//! let client = GeminiClient::new(GeminiConfig::from_env())?;
//!
//! let image = client
//!     .image()
//!     .text_to_image(TextToImageRequest::new(
//!         "A stunning castle on a floating island, digital art",
//!     ))
//!     .await?;
//!
//! println!("{}", image.image_url);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod media;
pub mod models;
pub mod studio;

pub use config::GeminiConfig;
pub use error::{GeminiError, Result};
pub use gemini::{GeminiClient, GenerationTransport, HttpTransport, ImageClient};
pub use media::DataUri;
pub use models::{
    ImageToImageRequest, ImageToImageResponse, ModelInfo, TextToImageRequest, TextToImageResponse,
};
pub use studio::{Gallery, GeneratedImageRecord, ImagePrompt, Studio};
