use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{TimeInterval, TimeUnit};

/// Serializable deterministic copy of selector state, used by regression
/// tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSnapshot {
    pub label: String,
    pub origin: DateTime<Utc>,
    pub unit: TimeUnit,
    pub before: u32,
    pub after: u32,
    pub max_before: u32,
    pub max_after: u32,
    pub offset_range: (i64, i64),
    pub offset_bounds: (i64, i64),
    pub interval: TimeInterval,
}

impl SelectorSnapshot {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
