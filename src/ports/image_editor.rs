//! Image editor port: restages a product photo according to a prompt.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::StudioError;
use crate::input::SourceImage;

/// A request to edit a product photo into a new scene.
#[derive(Debug, Clone)]
pub struct EditRequest {
    /// The resolved model identifier (e.g., `"gemini-2.5-flash-image"`).
    pub model: String,
    /// The assembled edit instruction.
    pub prompt: String,
    /// The product photo to restage.
    pub product: SourceImage,
    /// Aspect ratio value (e.g., `"1:1"`, `"16:9"`).
    pub aspect_ratio: String,
    /// Image size (`"1K"`, `"2K"`, `"4K"`).
    pub size: String,
}

impl EditRequest {
    /// A cassette-friendly view of the request that omits the image bytes.
    #[must_use]
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "prompt": self.prompt,
            "product": {
                "file_name": self.product.file_name,
                "mime_type": self.product.mime_type,
                "data_len": self.product.data.len(),
            },
            "aspect_ratio": self.aspect_ratio,
            "size": self.size,
        })
    }
}

/// A single generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Raw image bytes (decoded from base64).
    #[serde(with = "super::base64_bytes")]
    pub data: Vec<u8>,
    /// MIME type of the image (e.g., `"image/png"`).
    pub mime_type: String,
}

/// Response containing generated images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    /// The generated images.
    pub images: Vec<GeneratedImage>,
}

/// Boxed future type returned by [`ImageEditor::edit`].
pub type EditFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ImageResponse, StudioError>> + Send + 'a>>;

/// Edits images via an external generative-image API.
pub trait ImageEditor: Send + Sync {
    /// Produce new images of the request's product following its prompt.
    fn edit(&self, request: &EditRequest) -> EditFuture<'_>;
}
