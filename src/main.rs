//! Prodshot - restage product photos as studio shots with Gemini.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod input;
mod model;
mod output;
mod params;
mod ports;
mod presets;
mod prompt;
mod session;

use std::path::Path;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, ShotOptions};
use crate::config::Config;
use crate::context::{RecordingSession, ServiceContext};
use crate::error::StudioError;
use crate::input::{load_image, SourceImage};
use crate::model::{ensure_gemini, resolve_model};
use crate::output::{resolve_output_path, save_image};
use crate::params::{validate_format, validate_size};
use crate::prompt::{build_prompt, Selection, DEFAULT_STYLE_DESCRIPTION};
use crate::session::{ResultView, Session, Status, StudioSettings, GENERATION_FAILED};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flag.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "prodshot=debug,warn" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), StudioError> {
    if cli.list_presets {
        print!("{}", presets::render_catalog());
        return Ok(());
    }

    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(StudioError::Config)?;
    let options = cli.shot_options(&config.defaults);

    // Validate everything before touching the network
    let selection = resolve_selection(&options)?;
    let edit_model = resolve_model(&options.model);
    ensure_gemini(&edit_model).map_err(StudioError::InvalidArgument)?;
    let describe_model = resolve_model(&options.describe_model);
    ensure_gemini(&describe_model).map_err(StudioError::InvalidArgument)?;
    validate_size(&options.size).map_err(StudioError::InvalidArgument)?;
    validate_format(&options.format).map_err(StudioError::InvalidArgument)?;

    tracing::info!(model = %edit_model, from = %options.model, "edit model");
    tracing::info!(model = %describe_model, "describe model");

    // Load images
    let product = load_image(cli.product_path()?)?;
    let style = cli.style.as_deref().map(load_image).transpose()?;

    // Nothing to ask the API for: assemble the prompt offline.
    if cli.prompt_only && style.is_none() {
        println!("{}", build_prompt(&selection, DEFAULT_STYLE_DESCRIPTION));
        return Ok(());
    }

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("PRODSHOT_REPLAY").ok();
    let is_recording = std::env::var("PRODSHOT_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::info!(cassette = %cassette_path, "replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::info!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    let settings = StudioSettings { describe_model, edit_model, size: options.size.clone() };
    let shot = Shot { product, style, selection, settings };
    let outcome = run_session(ctx, shot, &cli, &options.format).await;

    // The session has been dropped, so the recorder is free to finish.
    if let Some(session) = recording_session {
        finish_recording(session);
    }

    outcome
}

/// Everything a session needs besides its ports.
struct Shot {
    product: SourceImage,
    style: Option<SourceImage>,
    selection: Selection,
    settings: StudioSettings,
}

async fn run_session(
    ctx: ServiceContext,
    shot: Shot,
    cli: &Cli,
    format: &str,
) -> Result<(), StudioError> {
    let product_name = shot.product.file_name.clone();

    let mut session = Session::new(ctx.describer, ctx.editor, shot.settings);
    session.set_observer(Box::new(report_progress));
    session.set_product_image(Some(shot.product));
    session.set_style_image(shot.style);
    session.set_aspect_ratio(shot.selection.aspect_ratio);
    session.set_lighting(shot.selection.lighting);
    session.set_perspective(shot.selection.perspective);

    // Phase 1
    let prompt = session.prepare_prompt().await.map(str::to_string).unwrap_or_default();
    if let Some(ref warning) = session.status().error {
        eprintln!("Warning: {warning}");
    }
    tracing::debug!(selection = ?session.selection(), %prompt, "assembled prompt");

    if cli.prompt_only {
        println!("{prompt}");
        return Ok(());
    }

    // Phase 2
    let generated = session.generate().await.map(|_| ());
    if let Err(e) = generated {
        eprintln!("{}", session.status().error.as_deref().unwrap_or(GENERATION_FAILED));
        return Err(e);
    }

    match session.result_view() {
        ResultView::Image(image) => {
            let output_path = resolve_output_path(cli.output.as_deref(), &product_name, format);
            save_image(&image.data, &image.mime_type, format, &output_path)?;
            eprintln!("Saved: {}", output_path.display());
            Ok(())
        }
        ResultView::Loading | ResultView::Empty(_) => {
            Err(StudioError::InvalidArgument(GENERATION_FAILED.to_string()))
        }
    }
}

/// Print a status line whenever a phase starts.
fn report_progress(status: &Status) {
    if status.describing {
        eprintln!("Analyzing style...");
    } else if status.generating {
        eprintln!("Generating your masterpiece... This may take a moment.");
    }
}

fn resolve_selection(options: &ShotOptions) -> Result<Selection, StudioError> {
    Ok(Selection {
        aspect_ratio: presets::find_aspect_ratio(&options.aspect_ratio)
            .map_err(StudioError::InvalidArgument)?,
        lighting: presets::find_lighting(&options.lighting).map_err(StudioError::InvalidArgument)?,
        perspective: presets::find_perspective(&options.perspective)
            .map_err(StudioError::InvalidArgument)?,
    })
}

fn finish_recording(session: RecordingSession) {
    match session.finish() {
        Ok(path) => eprintln!("Cassette saved: {}", path.display()),
        Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
    }
}
