//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::gemini::GeminiClient;
use crate::adapters::recording::image_editor::RecordingImageEditor;
use crate::adapters::recording::style_describer::RecordingStyleDescriber;
use crate::adapters::replaying::image_editor::ReplayingImageEditor;
use crate::adapters::replaying::style_describer::ReplayingStyleDescriber;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::StudioError;
use crate::ports::{ImageEditor, StyleDescriber};

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Style describer port.
    pub describer: Arc<dyn StyleDescriber>,
    /// Image editor port.
    pub editor: Arc<dyn ImageEditor>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// Drop every adapter sharing the recorder before calling this.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapters still hold references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context backed by the Gemini API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not configured.
    pub fn live(config: &Config) -> Result<Self, StudioError> {
        let key = config.gemini_key().ok_or(StudioError::MissingApiKey {
            provider: "Gemini".into(),
            env_var: "GEMINI_API_KEY".into(),
        })?;
        let client = Arc::new(GeminiClient::new(key));
        Ok(Self { describer: Arc::clone(&client) as Arc<dyn StyleDescriber>, editor: client })
    }

    /// Create a recording context that wraps the live adapters with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), StudioError> {
        let live_ctx = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".prodshot/cassettes")
            .join(&timestamp)
            .join("studio.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-studio"),
            get_commit_hash(),
        )));

        let ctx = Self {
            describer: Arc::new(RecordingStyleDescriber::new(
                live_ctx.describer,
                Arc::clone(&recorder),
            )),
            editor: Arc::new(RecordingImageEditor::new(live_ctx.editor, Arc::clone(&recorder))),
        };

        Ok((ctx, RecordingSession { recorder }))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, StudioError> {
        let replayer = load_cassette(path)
            .map_err(|e| StudioError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        Ok(Self {
            describer: Arc::new(ReplayingStyleDescriber::new(Arc::clone(&replayer))),
            editor: Arc::new(ReplayingImageEditor::new(replayer)),
        })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
