use serde::{Deserialize, Serialize};

/// Describes an image generation model the client knows how to talk to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub description: String,
}
