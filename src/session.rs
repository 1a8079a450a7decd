//! The two-phase studio session: describe the style reference, then edit the
//! product photo.
//!
//! Each phase has its own loading flag. A failed style description is not
//! fatal: the session falls back to [`DEFAULT_STYLE_DESCRIPTION`] and records a
//! warning. A failed edit clears any previous result.

use std::sync::Arc;

use crate::error::StudioError;
use crate::input::SourceImage;
use crate::ports::{EditRequest, GeneratedImage, ImageEditor, StyleDescriber};
use crate::presets::{AspectRatio, CameraPerspective, LightingStyle};
use crate::prompt::{build_prompt, Selection, DEFAULT_STYLE_DESCRIPTION};

/// Shown when the style reference could not be described.
pub const STYLE_ANALYSIS_FAILED: &str = "Failed to analyze style image. Using default style.";

/// Shown when generation is requested without a product image or prompt.
pub const MISSING_INPUT: &str = "Please upload a product image and ensure a prompt is generated.";

/// Shown when the edit call fails.
pub const GENERATION_FAILED: &str =
    "An error occurred while generating the image. Please try again.";

/// Placeholder shown before anything has been generated.
pub const INITIAL_MESSAGE: &str = "Your generated image will appear here.";

/// Snapshot of the session's loading and error state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    /// The style reference is being described.
    pub describing: bool,
    /// The product image is being edited.
    pub generating: bool,
    /// User-facing error from the most recent phase.
    pub error: Option<String>,
}

impl Status {
    /// Either phase is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.describing || self.generating
    }
}

/// What the result panel should show.
#[derive(Debug, PartialEq, Eq)]
pub enum ResultView<'a> {
    /// Generation is in flight.
    Loading,
    /// A generated image is available.
    Image(&'a GeneratedImage),
    /// Nothing generated yet; carries the placeholder message.
    Empty(&'static str),
}

/// Models and output size used for the remote calls.
#[derive(Debug, Clone)]
pub struct StudioSettings {
    /// Model for the style description call.
    pub describe_model: String,
    /// Resolved model for the edit call.
    pub edit_model: String,
    /// Requested image size.
    pub size: String,
}

/// Callback invoked on every status transition.
pub type StatusObserver = Box<dyn Fn(&Status) + Send + Sync>;

/// Holds the inputs, the assembled prompt and the result of one studio run.
pub struct Session {
    describer: Arc<dyn StyleDescriber>,
    editor: Arc<dyn ImageEditor>,
    settings: StudioSettings,
    product: Option<SourceImage>,
    style: Option<SourceImage>,
    selection: Selection,
    generated_prompt: String,
    final_image: Option<GeneratedImage>,
    status: Status,
    observer: Option<StatusObserver>,
}

impl Session {
    /// Create an empty session with default presets.
    #[must_use]
    pub fn new(
        describer: Arc<dyn StyleDescriber>,
        editor: Arc<dyn ImageEditor>,
        settings: StudioSettings,
    ) -> Self {
        Self {
            describer,
            editor,
            settings,
            product: None,
            style: None,
            selection: Selection::default(),
            generated_prompt: String::new(),
            final_image: None,
            status: Status::default(),
            observer: None,
        }
    }

    /// Register a callback that sees every status transition.
    pub fn set_observer(&mut self, observer: StatusObserver) {
        self.observer = Some(observer);
    }

    /// Set or clear the product image.
    pub fn set_product_image(&mut self, image: Option<SourceImage>) {
        self.product = image;
        self.invalidate_prompt();
    }

    /// Set or clear the style reference image.
    pub fn set_style_image(&mut self, image: Option<SourceImage>) {
        self.style = image;
        self.invalidate_prompt();
    }

    /// Choose the output aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        self.selection.aspect_ratio = aspect_ratio;
        self.invalidate_prompt();
    }

    /// Choose the lighting style.
    pub fn set_lighting(&mut self, lighting: LightingStyle) {
        self.selection.lighting = lighting;
        self.invalidate_prompt();
    }

    /// Choose the camera perspective.
    pub fn set_perspective(&mut self, perspective: CameraPerspective) {
        self.selection.perspective = perspective;
        self.invalidate_prompt();
    }

    /// The prompt depends on every input, so any change discards it.
    fn invalidate_prompt(&mut self) {
        self.generated_prompt.clear();
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The assembled prompt, empty until [`Session::prepare_prompt`] has run.
    #[must_use]
    pub fn generated_prompt(&self) -> &str {
        &self.generated_prompt
    }

    /// Current loading and error state.
    #[must_use]
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Either phase is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Generation may be started: a product image is present and nothing is loading.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        !self.is_loading() && self.product.is_some()
    }

    /// What the result panel should show right now.
    #[must_use]
    pub fn result_view(&self) -> ResultView<'_> {
        if self.status.generating {
            ResultView::Loading
        } else if let Some(ref image) = self.final_image {
            ResultView::Image(image)
        } else {
            ResultView::Empty(INITIAL_MESSAGE)
        }
    }

    fn update(&mut self, change: impl FnOnce(&mut Status)) {
        change(&mut self.status);
        if let Some(ref observer) = self.observer {
            observer(&self.status);
        }
    }

    /// Phase one: describe the style reference (if any) and assemble the prompt.
    ///
    /// Returns `None` without doing anything when no product image is set.
    pub async fn prepare_prompt(&mut self) -> Option<&str> {
        self.product.as_ref()?;

        let mut style_description = DEFAULT_STYLE_DESCRIPTION.to_string();
        if let Some(style) = self.style.clone() {
            self.update(|s| {
                s.describing = true;
                s.error = None;
            });

            let describer = Arc::clone(&self.describer);
            match describer.describe(&style, &self.settings.describe_model).await {
                Ok(description) if !description.trim().is_empty() => {
                    tracing::info!(file = %style.file_name, "style reference described");
                    style_description = description;
                }
                Ok(_) => {
                    tracing::warn!(file = %style.file_name, "empty style description");
                    self.status.error = Some(STYLE_ANALYSIS_FAILED.to_string());
                }
                Err(e) => {
                    tracing::warn!(file = %style.file_name, error = %e, "style analysis failed");
                    self.status.error = Some(STYLE_ANALYSIS_FAILED.to_string());
                }
            }

            self.update(|s| s.describing = false);
        }

        self.generated_prompt = build_prompt(&self.selection, &style_description);
        Some(&self.generated_prompt)
    }

    /// Phase two: send the product image and prompt to the image editor.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::InvalidArgument`] if the product image or prompt
    /// is missing, or the editor's error if the call fails. Either way the
    /// user-facing message is also left in [`Session::status`].
    pub async fn generate(&mut self) -> Result<&GeneratedImage, StudioError> {
        let ready = self.can_generate() && !self.generated_prompt.is_empty();
        let Some(product) = self.product.clone().filter(|_| ready) else {
            self.update(|s| s.error = Some(MISSING_INPUT.to_string()));
            return Err(StudioError::InvalidArgument(MISSING_INPUT.to_string()));
        };

        self.final_image = None;
        self.update(|s| {
            s.generating = true;
            s.error = None;
        });

        let request = EditRequest {
            model: self.settings.edit_model.clone(),
            prompt: self.generated_prompt.clone(),
            product,
            aspect_ratio: self.selection.aspect_ratio.value.to_string(),
            size: self.settings.size.clone(),
        };

        let editor = Arc::clone(&self.editor);
        let outcome = editor.edit(&request).await.and_then(|response| {
            let count = response.images.len();
            let mut images = response.images.into_iter();
            let first = images.next().ok_or_else(|| StudioError::Api {
                status: 200,
                message: "Editor returned no images".to_string(),
            })?;
            if count > 1 {
                tracing::debug!(count, "keeping the first of several returned images");
            }
            Ok(first)
        });

        match outcome {
            Ok(image) => {
                tracing::info!(mime = %image.mime_type, bytes = image.data.len(), "image generated");
                self.update(|s| s.generating = false);
                Ok(self.final_image.insert(image))
            }
            Err(e) => {
                tracing::error!(error = %e, "image generation failed");
                self.update(|s| {
                    s.generating = false;
                    s.error = Some(GENERATION_FAILED.to_string());
                });
                Err(e)
            }
        }
    }
}
