//! Validation of output parameters.

/// Validate the image size parameter.
///
/// # Errors
///
/// Returns an error if the size is not recognized.
pub fn validate_size(size: &str) -> Result<(), String> {
    match size {
        "1K" | "2K" | "4K" => Ok(()),
        _ => Err(format!("Unsupported size '{size}'. Valid: 1K, 2K, 4K")),
    }
}

/// Validate the output format parameter.
///
/// # Errors
///
/// Returns an error if the format is not recognized.
pub fn validate_format(format: &str) -> Result<(), String> {
    match format {
        "jpeg" | "png" | "webp" => Ok(()),
        _ => Err(format!("Unsupported format '{format}'. Valid: jpeg, png, webp")),
    }
}

/// Get the file extension for an output format.
#[must_use]
pub fn format_extension(format: &str) -> &'static str {
    match format {
        "jpeg" => "jpg",
        "webp" => "webp",
        // png and any unknown format
        _ => "png",
    }
}
