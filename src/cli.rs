//! CLI argument parsing with clap.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::DefaultsConfig;

/// Restage a product photo as a professional studio shot with Gemini.
#[derive(Parser, Debug)]
#[command(name = "prodshot", version, about)]
pub struct Cli {
    /// Product photo (PNG, JPG or WEBP).
    pub product: Option<PathBuf>,

    /// Optional style reference photo whose scene is described and reused.
    #[arg(short = 'r', long)]
    pub style: Option<PathBuf>,

    /// Aspect ratio preset id (e.g., 1:1, 16:9, 9:16).
    #[arg(short, long)]
    pub aspect_ratio: Option<String>,

    /// Lighting preset id (e.g., `soft_studio`, dramatic).
    #[arg(short, long)]
    pub lighting: Option<String>,

    /// Camera perspective preset id (e.g., `front_on`, `low_angle`).
    #[arg(short = 'c', long)]
    pub perspective: Option<String>,

    /// Image edit model name or alias.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Model used to describe the style reference.
    #[arg(long)]
    pub describe_model: Option<String>,

    /// Image size: 1K, 2K, 4K.
    #[arg(short, long)]
    pub size: Option<String>,

    /// Output format: jpeg, png, webp.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output file path (auto-generated from the product name if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Print the assembled prompt and stop before generating.
    #[arg(long)]
    pub prompt_only: bool,

    /// List the available presets and exit.
    #[arg(long)]
    pub list_presets: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Shot settings after merging CLI flags over config defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotOptions {
    /// Image edit model name or alias.
    pub model: String,
    /// Style description model.
    pub describe_model: String,
    /// Aspect ratio preset id.
    pub aspect_ratio: String,
    /// Lighting preset id.
    pub lighting: String,
    /// Camera perspective preset id.
    pub perspective: String,
    /// Image size.
    pub size: String,
    /// Output format.
    pub format: String,
}

impl Cli {
    /// The product image path.
    ///
    /// # Errors
    ///
    /// Returns an error if no product image was given.
    pub fn product_path(&self) -> Result<&Path, std::io::Error> {
        self.product.as_deref().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Provide a product image path (see --help)",
            )
        })
    }

    /// Merge flags over the config defaults; flags win.
    #[must_use]
    pub fn shot_options(&self, defaults: &DefaultsConfig) -> ShotOptions {
        let pick = |flag: Option<&String>, fallback: &str| {
            flag.map_or_else(|| fallback.to_string(), Clone::clone)
        };
        ShotOptions {
            model: pick(self.model.as_ref(), &defaults.model),
            describe_model: pick(self.describe_model.as_ref(), &defaults.describe_model),
            aspect_ratio: pick(self.aspect_ratio.as_ref(), &defaults.aspect_ratio),
            lighting: pick(self.lighting.as_ref(), &defaults.lighting),
            perspective: pick(self.perspective.as_ref(), &defaults.perspective),
            size: pick(self.size.as_ref(), &defaults.size),
            format: pick(self.format.as_ref(), &defaults.format),
        }
    }
}
