//! Loading product and style images from disk.

use std::path::Path;

use base64::Engine;
use image::ImageFormat;

use crate::error::StudioError;

/// An image supplied by the user, with its sniffed MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// File name shown in status output and used for auto-naming results.
    pub file_name: String,
    /// Raw file bytes.
    pub data: Vec<u8>,
    /// MIME type (`image/png`, `image/jpeg` or `image/webp`).
    pub mime_type: String,
}

impl SourceImage {
    /// Base64 encoding of the image bytes, as sent in `inlineData` parts.
    #[must_use]
    pub fn base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// Read an image file and check that it is PNG, JPEG or WebP.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or
/// [`StudioError::UnsupportedImage`] if it is not an accepted image type.
pub fn load_image(path: &Path) -> Result<SourceImage, StudioError> {
    let data = std::fs::read(path)?;
    let mime_type = sniff_mime(&data, path)
        .ok_or_else(|| StudioError::UnsupportedImage { path: path.display().to_string() })?;

    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    tracing::debug!(file = %file_name, mime = mime_type, bytes = data.len(), "loaded image");

    Ok(SourceImage { file_name, data, mime_type: mime_type.to_string() })
}

/// Detect the MIME type from content, falling back to the file extension.
fn sniff_mime(data: &[u8], path: &Path) -> Option<&'static str> {
    let format = image::guess_format(data).ok().or_else(|| ImageFormat::from_path(path).ok())?;
    accepted_mime(format)
}

fn accepted_mime(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10];

    #[test]
    fn sniff_png_and_jpeg() {
        assert_eq!(sniff_mime(PNG_MAGIC, Path::new("x.bin")), Some("image/png"));
        assert_eq!(sniff_mime(JPEG_MAGIC, Path::new("x")), Some("image/jpeg"));
    }

    #[test]
    fn sniff_rejects_other_formats() {
        assert_eq!(sniff_mime(b"GIF89a....", Path::new("anim.gif")), None);
        assert_eq!(sniff_mime(b"just some text", Path::new("notes.txt")), None);
    }

    #[test]
    fn load_image_from_disk() {
        let dir = std::env::temp_dir().join("prodshot_input_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("mug.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!(image.file_name, "mug.png");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, PNG_MAGIC);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_non_image_fails() {
        let dir = std::env::temp_dir().join("prodshot_input_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("readme.txt");
        std::fs::write(&path, "hello").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, StudioError::UnsupportedImage { .. }));
        assert!(err.to_string().contains("Please select an image file."));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_image(Path::new("/nonexistent/product.png")).unwrap_err();
        assert!(matches!(err, StudioError::Io(_)));
    }

    #[test]
    fn base64_encoding() {
        let image = SourceImage {
            file_name: "a.png".into(),
            data: vec![1, 2, 3],
            mime_type: "image/png".into(),
        };
        assert_eq!(image.base64(), "AQID");
    }
}
