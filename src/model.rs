//! Model name resolution.

/// Default model for the style description call.
pub const DEFAULT_DESCRIBE_MODEL: &str = "gemini-2.5-flash";

/// Default image edit model alias.
pub const DEFAULT_EDIT_MODEL: &str = "nano-banana";

/// Short name aliases for Gemini image models.
const ALIASES: &[(&str, &str)] = &[
    ("nano-banana", "gemini-2.5-flash-image"),
    ("nano-banana-2", "gemini-3.1-flash-image-preview"),
    ("nano-banana-pro", "gemini-3-pro-image-preview"),
];

/// Resolve a model name (alias or exact) to the full model identifier.
#[must_use]
pub fn resolve_model(name: &str) -> String {
    ALIASES
        .iter()
        .find(|&&(alias, _)| alias == name)
        .map_or_else(|| name.to_string(), |&(_, full)| full.to_string())
}

/// Check that a resolved model is served by the Gemini API.
///
/// # Errors
///
/// Returns an error if the model name doesn't start with `gemini`.
pub fn ensure_gemini(model: &str) -> Result<(), String> {
    if model.starts_with("gemini") {
        Ok(())
    } else {
        Err(format!("Unknown provider for model '{model}'. Expected 'gemini-*' or an alias."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_nano_banana_aliases() {
        assert_eq!(resolve_model("nano-banana"), "gemini-2.5-flash-image");
        assert_eq!(resolve_model("nano-banana-2"), "gemini-3.1-flash-image-preview");
        assert_eq!(resolve_model("nano-banana-pro"), "gemini-3-pro-image-preview");
    }

    #[test]
    fn resolve_exact_name_passthrough() {
        assert_eq!(resolve_model("gemini-2.5-flash"), "gemini-2.5-flash");
    }

    #[test]
    fn default_models_are_gemini() {
        assert!(ensure_gemini(&resolve_model(DEFAULT_EDIT_MODEL)).is_ok());
        assert!(ensure_gemini(DEFAULT_DESCRIBE_MODEL).is_ok());
    }

    #[test]
    fn reject_non_gemini_models() {
        assert!(ensure_gemini("gpt-image-1").is_err());
        assert!(ensure_gemini("dall-e-3").is_err());
    }
}
