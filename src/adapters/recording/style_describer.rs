//! Recording adapter for the `StyleDescriber` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::input::SourceImage;
use crate::ports::style_describer::{describe_summary, DescribeFuture, StyleDescriber};

/// Records style descriptions while delegating to an inner implementation.
pub struct RecordingStyleDescriber {
    inner: Arc<dyn StyleDescriber>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingStyleDescriber {
    /// Creates a new recording describer wrapping the given implementation.
    pub fn new(inner: Arc<dyn StyleDescriber>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl StyleDescriber for RecordingStyleDescriber {
    fn describe(&self, image: &SourceImage, model: &str) -> DescribeFuture<'_> {
        let image = image.clone();
        let model = model.to_string();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.describe(&image, &model).await;
            let input = describe_summary(&image, &model);
            record_result(&recorder, "style_describer", "describe", input, &result);
            result
        })
    }
}
