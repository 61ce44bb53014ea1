use serde::{Deserialize, Serialize};
use stackbot_core::Snapshot;

/// Body of `GET {base}/status`.
///
/// Only `state` is interpreted. Anything else the server sends is kept for
/// debug logging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StatusReport {
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }
}

/// Body of `GET {base}/matrix`. A missing or `null` matrix decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixReport {
    #[serde(default)]
    pub matrix: Option<Snapshot>,
}

impl MatrixReport {
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        self.matrix.unwrap_or_default()
    }
}
