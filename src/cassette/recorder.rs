//! Records interactions into a cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Collects interactions from both ports and writes them as one YAML cassette.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), name: name.into(), commit: commit.into(), interactions: Vec::new() }
    }

    /// Record an interaction and return its sequence number.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) -> u64 {
        let seq = self.interactions.len() as u64;
        let interaction =
            Interaction { seq, port: port.into(), method: method.into(), input, output };
        tracing::debug!(seq, port = %interaction.port, method = %interaction.method, "recorded");
        self.interactions.push(interaction);
        seq
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::config::load_cassette;
    use serde_json::json;

    #[test]
    fn record_both_ports_and_replay() {
        let dir = std::env::temp_dir().join("prodshot_recorder_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("studio.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "test-recording", "deadbeef");
        let first = recorder.record(
            "style_describer",
            "describe",
            json!({"model": "gemini-2.5-flash"}),
            json!({"Ok": "Terracotta tiles under warm light."}),
        );
        let second = recorder.record(
            "image_editor",
            "edit",
            json!({"prompt": "restage the mug"}),
            json!({"Err": "API error (500): boom"}),
        );
        assert_eq!((first, second), (0, 1));

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("style_describer"));
        assert!(content.contains("restage the mug"));

        let mut replayer = load_cassette(&path).unwrap();
        let edit = replayer.next_interaction("image_editor", "edit").unwrap();
        assert_eq!(edit.seq, 1);
        assert_eq!(edit.output["Err"], "API error (500): boom");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
