//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_editor;
pub mod style_describer;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::StudioError;

/// Retrieve the next recorded output for a given port and method.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, StudioError> {
    let mut guard = replayer
        .lock()
        .map_err(|e| StudioError::Config(format!("Replayer lock poisoned: {e}")))?;
    guard
        .next_interaction(port, method)
        .map(|interaction| interaction.output.clone())
        .map_err(StudioError::Config)
}

/// Deserialize a replayed output as `Result<T, StudioError>`.
///
/// A recorded `Err` comes back as an API error carrying the recorded message.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, StudioError> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let message = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(StudioError::Api { status: 0, message });
    }
    let value = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(value)
        .map_err(|e| StudioError::Config(format!("Malformed cassette output: {e}")))
}
