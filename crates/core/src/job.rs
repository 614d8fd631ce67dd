//! Job documents, their raw type tags and the stations they belong to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stable identifier of a station (and of its booklet spawn surface).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub String);

impl StationId {
    /// FNV-1a over the id bytes; stable across runs and platforms.
    pub fn stable_hash(&self) -> u64 {
        self.0.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        })
    }
}

impl From<&str> for StationId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique, stable identifier of a job (e.g. `"FF-SL-03"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw job type tag as reported by the job registry.
///
/// This set is intentionally wider than [`JobCategory`]; the layout crate's
/// classifier folds it into the semantic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum JobType {
    /// Untyped or modded job.
    Other,
    /// Haul loaded cars to another station.
    Transport,
    /// Haul empty cars to another station.
    EmptyHaul,
    /// Assemble cars and load them at a warehouse.
    ShuntingLoad,
    /// Unload cars at a warehouse and distribute them.
    ShuntingUnload,
    /// Multi-leg transport chain.
    ComplexTransport,
}

impl JobType {
    /// Every raw tag, in declaration order.
    pub const ALL: [JobType; 6] = [
        JobType::Other,
        JobType::Transport,
        JobType::EmptyHaul,
        JobType::ShuntingLoad,
        JobType::ShuntingUnload,
        JobType::ComplexTransport,
    ];

    /// Canonical tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::Other => "Other",
            JobType::Transport => "Transport",
            JobType::EmptyHaul => "EmptyHaul",
            JobType::ShuntingLoad => "ShuntingLoad",
            JobType::ShuntingUnload => "ShuntingUnload",
            JobType::ComplexTransport => "ComplexTransport",
        }
    }
}

/// Error returned when a job type tag cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown job type tag `{0}`")]
pub struct ParseJobTypeError(pub String);

impl FromStr for JobType {
    type Err = ParseJobTypeError;

    /// Accepts canonical names plus snake_case and the short yard codes (`SL`, `SU`, `FH`, `LH`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "other" => Ok(JobType::Other),
            "transport" | "fh" => Ok(JobType::Transport),
            "emptyhaul" | "lh" => Ok(JobType::EmptyHaul),
            "shuntingload" | "sl" => Ok(JobType::ShuntingLoad),
            "shuntingunload" | "su" => Ok(JobType::ShuntingUnload),
            "complextransport" => Ok(JobType::ComplexTransport),
            _ => Err(ParseJobTypeError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for JobType {
    type Error = ParseJobTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse semantic grouping used for booklet layout.
///
/// Declaration order is the layout order: shunting first, unknown last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JobCategory {
    /// Yard work at the station itself.
    Shunting,
    /// Jobs that leave the station.
    Transport,
    /// Anything not mapped to the above.
    Unknown,
}

/// A job awaiting (or having received) a booklet on the spawn surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// Raw type tag.
    pub job_type: JobType,
    /// Destination yard id of the job chain; used for ordering.
    pub destination: String,
}

impl Job {
    /// Build a job from its parts.
    pub fn new(id: impl Into<String>, job_type: JobType, destination: impl Into<String>) -> Self {
        Self {
            id: JobId(id.into()),
            job_type,
            destination: destination.into(),
        }
    }
}
