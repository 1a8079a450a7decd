//! Prompt assembly from the selected presets.

use crate::presets::{
    default_aspect_ratio, default_lighting, default_perspective, AspectRatio, CameraPerspective,
    LightingStyle,
};

/// Scene description used when no style reference is available.
pub const DEFAULT_STYLE_DESCRIPTION: &str = "A clean, minimalist studio background.";

/// Instruction sent alongside the style reference to get a scene description.
pub const STYLE_ANALYSIS_INSTRUCTION: &str = "Describe the visual style of this image so it can be \
recreated as the backdrop for a product photograph. Cover the setting and background, the color \
palette, the mood, the lighting, and notable textures or props. Answer with a single concise \
paragraph and do not describe any specific product shown.";

/// The presentation parameters picked for a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Output aspect ratio.
    pub aspect_ratio: AspectRatio,
    /// Lighting style.
    pub lighting: LightingStyle,
    /// Camera perspective.
    pub perspective: CameraPerspective,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            aspect_ratio: default_aspect_ratio(),
            lighting: default_lighting(),
            perspective: default_perspective(),
        }
    }
}

/// Build the edit instruction for the image model.
#[must_use]
pub fn build_prompt(selection: &Selection, style_description: &str) -> String {
    format!(
        "Create a professional, high-resolution product photograph of the subject from the provided image.

**Core Instructions:**
- Maintain the original product's identity, shape, and details exactly as shown. Do not alter the product itself.
- Place the product in a new, photorealistic scene based on the following style.
- The final image should be of commercial quality, suitable for an e-commerce website or advertising campaign.

**Styling Details:**
- **Overall Scene Description:** {style}
- **Lighting:** {lighting}
- **Camera Perspective:** {perspective}
- **Aspect Ratio:** The final image should be in a {ratio} aspect ratio.

Generate only the image without any text, watermarks, or annotations.",
        style = style_description.trim(),
        lighting = selection.lighting.description,
        perspective = selection.perspective.description,
        ratio = selection.aspect_ratio.label,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{find_aspect_ratio, find_lighting, find_perspective};

    #[test]
    fn default_prompt_contains_defaults() {
        let prompt = build_prompt(&Selection::default(), DEFAULT_STYLE_DESCRIPTION);
        assert!(prompt.starts_with("Create a professional, high-resolution product photograph"));
        assert!(prompt.contains(
            "- **Overall Scene Description:** A clean, minimalist studio background.\n"
        ));
        assert!(prompt.contains("- **Lighting:** Bright, soft, even studio lighting"));
        assert!(prompt.contains("- **Camera Perspective:** A direct, eye-level shot"));
        assert!(prompt.contains("in a 1:1 aspect ratio."));
        assert!(prompt.ends_with("without any text, watermarks, or annotations."));
    }

    #[test]
    fn prompt_reflects_selection() {
        let selection = Selection {
            aspect_ratio: find_aspect_ratio("9:16").unwrap(),
            lighting: find_lighting("dramatic").unwrap(),
            perspective: find_perspective("low_angle").unwrap(),
        };
        let prompt = build_prompt(&selection, "A marble countertop in a sunlit kitchen.");
        assert!(prompt.contains("A marble countertop in a sunlit kitchen."));
        assert!(prompt.contains("High-contrast lighting with deep shadows"));
        assert!(prompt.contains("Shot from below, looking up at the product"));
        assert!(prompt.contains("in a 9:16 aspect ratio."));
        assert!(!prompt.contains(DEFAULT_STYLE_DESCRIPTION));
    }

    #[test]
    fn style_description_is_trimmed() {
        let prompt = build_prompt(&Selection::default(), "\n  Neon alley at night.  \n");
        assert!(prompt.contains("**Overall Scene Description:** Neon alley at night.\n"));
    }

    #[test]
    fn sections_are_separated_by_blank_lines() {
        let prompt = build_prompt(&Selection::default(), DEFAULT_STYLE_DESCRIPTION);
        assert!(prompt.contains("provided image.\n\n**Core Instructions:**\n"));
        assert!(prompt.contains("campaign.\n\n**Styling Details:**\n"));
    }
}
