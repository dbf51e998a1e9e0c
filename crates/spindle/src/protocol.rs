//! Requests and replies exchanged with the `rota` daemon, one JSON object per line.

use crate::error::WheelError;
use crate::options::Label;
use crate::resolve::Segment;
use serde::{Deserialize, Serialize};

pub const SOCKET_PATH: &str = "/tmp/rota.sock";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Request {
    Add { text: String },
    Remove { label: String },
    Edit { label: String, text: String },
    Clear,
    Reset,
    /// With `wait`, the reply is held back until the spin animation has finished.
    Spin { wait: bool },
    Show,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub segments: Vec<Segment>,
    /// Rotation currently on screen; mid-spin this is the interpolated value.
    pub rotation: f64,
    pub pointer_angle: f64,
    pub pointed: Option<Label>,
    pub spinning: bool,
    pub can_spin: bool,
    pub last_winner: Option<Label>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reply {
    Ok {
        snapshot: Snapshot,
    },
    Spinning {
        target: f64,
        duration_ms: u64,
        snapshot: Snapshot,
    },
    Winner {
        label: Label,
        rotation: f64,
    },
    Rejected {
        code: String,
        message: String,
    },
}

impl Reply {
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<WheelError> for Reply {
    fn from(err: WheelError) -> Self {
        Self::rejected(err.code(), err.to_string())
    }
}

pub fn encode<T: Serialize>(message: &T) -> serde_json::Result<String> {
    serde_json::to_string(message)
}

pub fn decode<'a, T: Deserialize<'a>>(line: &'a str) -> serde_json::Result<T> {
    serde_json::from_str(line.trim())
}
