//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        for queue in queues.values_mut() {
            queue.sort_by_key(|i| i.seq);
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette has no (more) interactions for the
    /// given port/method combination.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<&Interaction, String> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            return Err(format!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            ));
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        if *cursor >= queue.len() {
            return Err(format!(
                "Cassette exhausted: all {count} interactions for port={port:?} method={method:?} \
                 have been consumed.",
                count = queue.len(),
            ));
        }

        let interaction = &queue[*cursor];
        *cursor += 1;
        Ok(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str) -> Interaction {
        Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input: json!({}),
            output: json!({"Ok": null}),
        }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), commit: "abc".into(), interactions }
    }

    #[test]
    fn replay_in_order_per_port() {
        let cassette = make_cassette(vec![
            interaction(0, "style_describer", "describe"),
            interaction(1, "image_editor", "edit"),
            interaction(2, "image_editor", "edit"),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("image_editor", "edit").unwrap().seq, 1);
        assert_eq!(replayer.next_interaction("style_describer", "describe").unwrap().seq, 0);
        assert_eq!(replayer.next_interaction("image_editor", "edit").unwrap().seq, 2);
    }

    #[test]
    fn exhausted_replayer_errors() {
        let cassette = make_cassette(vec![interaction(0, "image_editor", "edit")]);

        let mut replayer = CassetteReplayer::new(&cassette);
        assert!(replayer.next_interaction("image_editor", "edit").is_ok());
        let err = replayer.next_interaction("image_editor", "edit").unwrap_err();
        assert!(err.contains("have been consumed"));
    }

    #[test]
    fn unknown_port_errors() {
        let cassette = make_cassette(vec![interaction(0, "image_editor", "edit")]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let err = replayer.next_interaction("style_describer", "describe").unwrap_err();
        assert!(err.contains("no interactions recorded"));
        assert!(err.contains("image_editor::edit"));
    }

    #[test]
    fn debug_output_names_queued_ports() {
        let cassette = make_cassette(vec![interaction(0, "image_editor", "edit")]);
        let replayer = CassetteReplayer::new(&cassette);
        let rendered = format!("{replayer:?}");
        assert!(rendered.contains("image_editor"));
        assert!(rendered.contains("cursors"));
    }
}
