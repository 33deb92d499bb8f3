#![warn(missing_docs)]
//! Deterministic testing surfaces: scene builders, region snapshots and the
//! JSONL event stream written by headless runs.

mod region;
mod scene;

use anyhow::{Context, Result};
use secretdoors_core::SimTick;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use region::*;
pub use scene::*;

/// Primary event record captured by headless runs.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Scene tick when the event occurred.
    pub tick: SimTick,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Structured payload (interaction, outcome, effects).
    pub payload: serde_json::Value,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create event log {}", path.display()))?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn jsonl_sink_writes_one_line_per_event() {
        let path = std::env::temp_dir().join(format!(
            "secretdoors-events-{}/events.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let mut sink = JsonlSink::create(&path).expect("sink create");
        for tick in 0..3 {
            sink.write(&EventRecord {
                tick: SimTick(tick),
                kind: "interaction",
                payload: serde_json::json!({ "step": tick }),
            })
            .expect("write succeeds");
        }
        drop(sink);
        let contents = fs::read_to_string(&path).expect("file readable");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("\"tick\":2"));
        assert!(lines[0].contains("\"kind\":\"interaction\""));
    }
}
