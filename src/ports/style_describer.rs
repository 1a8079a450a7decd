//! Style describer port: turns a reference photo into a scene description.

use std::future::Future;
use std::pin::Pin;

use crate::error::StudioError;
use crate::input::SourceImage;

/// Boxed future type returned by [`StyleDescriber::describe`].
pub type DescribeFuture<'a> = Pin<Box<dyn Future<Output = Result<String, StudioError>> + Send + 'a>>;

/// Describes the visual style of an image via an external vision model.
pub trait StyleDescriber: Send + Sync {
    /// Describe the scene, palette and mood of `image` using `model`.
    fn describe(&self, image: &SourceImage, model: &str) -> DescribeFuture<'_>;
}

/// Cassette-friendly view of a describe call that omits the image bytes.
#[must_use]
pub fn describe_summary(image: &SourceImage, model: &str) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "image": {
            "file_name": image.file_name,
            "mime_type": image.mime_type,
            "data_len": image.data.len(),
        },
    })
}
