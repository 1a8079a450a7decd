//! File naming, image saving, and format conversion.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::StudioError;
use crate::params::format_extension;

/// Generate an output filename from the product file name and format.
///
/// Sanitizes the product file stem to kebab-case, then appends `-studio-`,
/// a unix timestamp, and the file extension for `format`.
#[must_use]
pub fn auto_filename(product_file_name: &str, format: &str) -> String {
    let stem = Path::new(product_file_name)
        .file_stem()
        .map_or_else(|| product_file_name.to_string(), |s| s.to_string_lossy().into_owned());
    let sanitized = sanitize_for_filename(&stem, 40);
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let ext = format_extension(format);
    format!("{sanitized}-studio-{timestamp}.{ext}")
}

/// Sanitize a string for use in a filename.
///
/// Converts to lowercase, replaces non-alphanumeric chars with hyphens,
/// collapses consecutive hyphens, and trims to max length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true; // Prevents leading hyphen

    for ch in input.chars().take(max_len * 2) {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    // Trim trailing hyphen
    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "image".to_string()
    } else {
        result
    }
}

/// Save raw image bytes to a file, converting format if necessary.
///
/// # Errors
///
/// Returns an error if the file cannot be written or format conversion fails.
pub fn save_image(
    data: &[u8],
    source_mime: &str,
    target_format: &str,
    output_path: &Path,
) -> Result<(), StudioError> {
    let needs_conversion = !mime_matches_format(source_mime, target_format);

    if needs_conversion {
        tracing::debug!(source_mime, target_format, "converting generated image");
        convert_and_save(data, target_format, output_path)
    } else {
        std::fs::write(output_path, data).map_err(StudioError::Io)
    }
}

/// Check if a MIME type matches the requested output format.
fn mime_matches_format(mime: &str, format: &str) -> bool {
    matches!((mime, format), ("image/jpeg", "jpeg") | ("image/png", "png") | ("image/webp", "webp"))
}

/// Convert image bytes to the target format and save.
fn convert_and_save(
    data: &[u8],
    target_format: &str,
    output_path: &Path,
) -> Result<(), StudioError> {
    let img = image::load_from_memory(data)
        .map_err(|e| StudioError::ImageConversion(format!("Failed to decode image: {e}")))?;

    let image_format = match target_format {
        "jpeg" => image::ImageFormat::Jpeg,
        "png" => image::ImageFormat::Png,
        "webp" => image::ImageFormat::WebP,
        other => {
            return Err(StudioError::ImageConversion(format!("Unsupported format: {other}")));
        }
    };

    img.save_with_format(output_path, image_format)
        .map_err(|e| StudioError::ImageConversion(format!("Failed to save as {target_format}: {e}")))
}

/// Resolve the output path: use explicit path or auto-generate.
#[must_use]
pub fn resolve_output_path(
    explicit: Option<&str>,
    product_file_name: &str,
    format: &str,
) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from(auto_filename(product_file_name, format)), PathBuf::from)
}
