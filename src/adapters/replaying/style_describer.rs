//! Replaying adapter for the `StyleDescriber` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::input::SourceImage;
use crate::ports::style_describer::{DescribeFuture, StyleDescriber};

/// Serves recorded style descriptions from a cassette.
pub struct ReplayingStyleDescriber {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingStyleDescriber {
    /// Create a replaying describer backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl StyleDescriber for ReplayingStyleDescriber {
    fn describe(&self, _image: &SourceImage, _model: &str) -> DescribeFuture<'_> {
        let output = next_output(&self.replayer, "style_describer", "describe");
        Box::pin(async move { replay_result::<String>(output?) })
    }
}
