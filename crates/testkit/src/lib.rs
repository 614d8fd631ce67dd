#![warn(missing_docs)]
//! Deterministic testing surfaces: in-memory station hosts, a tick harness
//! and a JSONL event sink.

mod fakes;
mod harness;

use anyhow::Result;
use booklet_core::{PlacementRecord, SimTick, StationId};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use fakes::*;
pub use harness::*;

/// One placed booklet, as written to event logs.
#[derive(Debug, Serialize)]
pub struct PlacementEvent<'a> {
    /// Simulation tick when the booklet was placed.
    pub tick: SimTick,
    /// Station whose surface received the booklet.
    pub station: &'a StationId,
    /// The placement itself.
    pub record: &'a PlacementRecord,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
    written: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file, written: 0 })
    }

    /// Append an event to the log.
    pub fn write<T: Serialize>(&mut self, event: &T) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of events written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}
