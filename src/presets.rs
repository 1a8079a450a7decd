//! Static catalog of selectable shot presets.

use std::fmt::Write as _;

/// An output aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    /// Stable identifier used on the command line.
    pub id: &'static str,
    /// Human-readable label, also used in the prompt.
    pub label: &'static str,
    /// Value passed to the image API.
    pub value: &'static str,
}

/// A lighting style for the generated scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightingStyle {
    /// Stable identifier used on the command line.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Sentence inserted into the prompt.
    pub description: &'static str,
}

/// A camera perspective for the generated scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraPerspective {
    /// Stable identifier used on the command line.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Sentence inserted into the prompt.
    pub description: &'static str,
}

/// Supported aspect ratios. The first entry is the default.
pub const ASPECT_RATIOS: &[AspectRatio] = &[
    AspectRatio { id: "1:1", label: "1:1", value: "1:1" },
    AspectRatio { id: "3:4", label: "3:4", value: "3:4" },
    AspectRatio { id: "4:3", label: "4:3", value: "4:3" },
    AspectRatio { id: "16:9", label: "16:9", value: "16:9" },
    AspectRatio { id: "9:16", label: "9:16", value: "9:16" },
];

/// Supported lighting styles. The first entry is the default.
pub const LIGHTING_STYLES: &[LightingStyle] = &[
    LightingStyle {
        id: "soft_studio",
        label: "Soft Studio",
        description: "Bright, soft, even studio lighting with minimal shadows, ideal for clear product showcases.",
    },
    LightingStyle {
        id: "dramatic",
        label: "Dramatic",
        description: "High-contrast lighting with deep shadows and bright highlights to create a moody, cinematic feel.",
    },
    LightingStyle {
        id: "natural_daylight",
        label: "Natural Daylight",
        description: "Warm, gentle light mimicking a sunny day, often with soft-focus backgrounds.",
    },
    LightingStyle {
        id: "vibrant_commercial",
        label: "Vibrant & Commercial",
        description: "Bold, colorful, and glossy lighting with sharp focus, as seen in high-end advertisements.",
    },
    LightingStyle {
        id: "backlit_glow",
        label: "Backlit Glow",
        description: "The primary light source is behind the product, creating a halo effect or silhouette that emphasizes its shape.",
    },
];

/// Supported camera perspectives. The first entry is the default.
pub const CAMERA_PERSPECTIVES: &[CameraPerspective] = &[
    CameraPerspective {
        id: "front_on",
        label: "Front-On",
        description: "A direct, eye-level shot straight on at the product.",
    },
    CameraPerspective {
        id: "high_angle",
        label: "High Angle",
        description: "Shot from above, looking down on the product, providing a top-down view.",
    },
    CameraPerspective {
        id: "low_angle",
        label: "Low Angle",
        description: "Shot from below, looking up at the product, making it appear larger and more imposing.",
    },
    CameraPerspective {
        id: "dutch_angle",
        label: "Dutch Angle",
        description: "The camera is tilted, creating a sense of unease, dynamism, or disorientation.",
    },
    CameraPerspective {
        id: "macro_close_up",
        label: "Macro Close-Up",
        description: "An extreme close-up shot that highlights small details and textures of the product.",
    },
];

/// The default aspect ratio (`1:1`).
#[must_use]
pub fn default_aspect_ratio() -> AspectRatio {
    ASPECT_RATIOS[0]
}

/// The default lighting style (soft studio).
#[must_use]
pub fn default_lighting() -> LightingStyle {
    LIGHTING_STYLES[0]
}

/// The default camera perspective (front-on).
#[must_use]
pub fn default_perspective() -> CameraPerspective {
    CAMERA_PERSPECTIVES[0]
}

/// Look up an aspect ratio by id.
///
/// # Errors
///
/// Returns an error listing the valid ids if `id` is unknown.
pub fn find_aspect_ratio(id: &str) -> Result<AspectRatio, String> {
    ASPECT_RATIOS
        .iter()
        .find(|ar| ar.id == id)
        .copied()
        .ok_or_else(|| unknown("aspect ratio", id, ASPECT_RATIOS.iter().map(|ar| ar.id)))
}

/// Look up a lighting style by id.
///
/// # Errors
///
/// Returns an error listing the valid ids if `id` is unknown.
pub fn find_lighting(id: &str) -> Result<LightingStyle, String> {
    LIGHTING_STYLES
        .iter()
        .find(|ls| ls.id == id)
        .copied()
        .ok_or_else(|| unknown("lighting style", id, LIGHTING_STYLES.iter().map(|ls| ls.id)))
}

/// Look up a camera perspective by id.
///
/// # Errors
///
/// Returns an error listing the valid ids if `id` is unknown.
pub fn find_perspective(id: &str) -> Result<CameraPerspective, String> {
    CAMERA_PERSPECTIVES
        .iter()
        .find(|cp| cp.id == id)
        .copied()
        .ok_or_else(|| {
            unknown("camera perspective", id, CAMERA_PERSPECTIVES.iter().map(|cp| cp.id))
        })
}

fn unknown<'a>(kind: &str, id: &str, valid: impl Iterator<Item = &'a str>) -> String {
    let valid: Vec<&str> = valid.collect();
    format!("Unsupported {kind} '{id}'. Valid: {}", valid.join(", "))
}

/// Render the full catalog as text for `--list-presets`.
#[must_use]
pub fn render_catalog() -> String {
    let mut out = String::new();

    out.push_str("Aspect ratios:\n");
    for ar in ASPECT_RATIOS {
        let _ = writeln!(out, "  {:<16} {}", ar.id, ar.label);
    }

    out.push_str("\nLighting styles:\n");
    for ls in LIGHTING_STYLES {
        let _ = writeln!(out, "  {:<20} {:<22} {}", ls.id, ls.label, ls.description);
    }

    out.push_str("\nCamera perspectives:\n");
    for cp in CAMERA_PERSPECTIVES {
        let _ = writeln!(out, "  {:<20} {:<22} {}", cp.id, cp.label, cp.description);
    }

    out
}
