//! Recording adapters that capture interactions to cassettes.

pub mod image_editor;
pub mod style_describer;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
pub(crate) fn record_result<T, E>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: serde_json::Value,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
{
    let output_json = match result {
        Ok(v) => match serde_json::to_value(v) {
            Ok(inner) => serde_json::json!({ "Ok": inner }),
            Err(e) => {
                tracing::warn!(port, method, error = %e, "skipping unserializable interaction");
                return;
            }
        },
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };

    match recorder.lock() {
        Ok(mut guard) => {
            guard.record(port, method, input, output_json);
        }
        Err(e) => tracing::warn!(port, method, error = %e, "recorder lock poisoned"),
    }
}
