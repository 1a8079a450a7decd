//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session: every port call made during one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Cassette name, usually `<timestamp>-studio`.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Git commit of the working tree at record time.
    pub commit: String,
    /// Recorded interactions in call order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Global sequence number within the cassette.
    pub seq: u64,
    /// Port name (`style_describer`, `image_editor`).
    pub port: String,
    /// Method name on the port.
    pub method: String,
    /// Summary of the call input.
    #[serde(default)]
    pub input: serde_json::Value,
    /// `{"Ok": ..}` or `{"Err": ".."}`.
    pub output: serde_json::Value,
}
