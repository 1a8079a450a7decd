//! Unified error type for prodshot.

use thiserror::Error;

/// Errors that can occur while preparing or generating a product shot.
#[derive(Debug, Error)]
pub enum StudioError {
    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The supplied file is not an accepted image type.
    #[error("{path}: Please select an image file. Accepted: PNG, JPG, WEBP")]
    UnsupportedImage {
        /// Path of the rejected file.
        path: String,
    },

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// No API key configured.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },
}
