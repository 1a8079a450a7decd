//! CLI argument parsing and validation tests — no network I/O.
//!
//! These tests verify that invalid arguments are rejected before any cassette
//! or live adapter is consulted.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("prodshot");
    cmd.env_remove("PRODSHOT_REPLAY")
        .env_remove("PRODSHOT_REC")
        .env_remove("RUST_LOG")
        .args(["--config", "/nonexistent/prodshot/config.toml"]);
    cmd
}

/// Write a small real PNG to a temp path and return it.
fn product_png(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    image::DynamicImage::new_rgb8(2, 2).save_with_format(&path, image::ImageFormat::Png).unwrap();
    path
}

#[test]
fn missing_product_exits_with_error() {
    cmd().assert().failure().stderr(predicate::str::contains("Provide a product image path"));
}

#[test]
fn list_presets_prints_catalog() {
    cmd()
        .arg("--list-presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("soft_studio"))
        .stdout(predicate::str::contains("macro_close_up"))
        .stdout(predicate::str::contains("9:16"));
}

#[test]
fn invalid_model_exits_with_error() {
    cmd()
        .args(["--model", "dall-e-3", "product.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown provider for model"));
}

#[test]
fn invalid_aspect_ratio_exits_with_error() {
    cmd()
        .args(["--aspect-ratio", "21:9", "product.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported aspect ratio '21:9'"));
}

#[test]
fn invalid_lighting_exits_with_error() {
    cmd()
        .args(["--lighting", "neon", "product.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported lighting style 'neon'"));
}

#[test]
fn invalid_perspective_exits_with_error() {
    cmd()
        .args(["--perspective", "worms_eye", "product.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported camera perspective"));
}

#[test]
fn invalid_format_exits_with_error() {
    cmd()
        .args(["--format", "gif", "product.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));
}

#[test]
fn invalid_size_exits_with_error() {
    cmd()
        .args(["--size", "8K", "product.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported size"));
}

#[test]
fn non_image_product_is_rejected() {
    let path = std::env::temp_dir().join("prodshot_cli_not_an_image.txt");
    std::fs::write(&path, "definitely not pixels").unwrap();

    cmd()
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select an image file."));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn prompt_only_without_style_needs_no_api_key() {
    let product = product_png("prodshot_cli_prompt_only.png");

    cmd()
        .env_remove("GEMINI_API_KEY")
        .args(["--prompt-only", "-l", "natural_daylight", "-a", "4:3"])
        .arg(product.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "**Overall Scene Description:** A clean, minimalist studio background.",
        ))
        .stdout(predicate::str::contains("Warm, gentle light mimicking a sunny day"))
        .stdout(predicate::str::contains("in a 4:3 aspect ratio."));

    let _ = std::fs::remove_file(&product);
}

#[test]
fn generate_without_api_key_exits_with_error() {
    let product = product_png("prodshot_cli_no_key.png");

    cmd()
        .env_remove("GEMINI_API_KEY")
        .arg(product.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key for Gemini"));

    let _ = std::fs::remove_file(&product);
}
