use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{TimeInterval, TimeUnit};

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorContext {
    pub origin: DateTime<Utc>,
    pub unit: TimeUnit,
    pub before: u32,
    pub after: u32,
    pub max_before: u32,
    pub max_after: u32,
    pub interval: TimeInterval,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorEvent {
    UnitChanged {
        unit: TimeUnit,
        max_before: u32,
        max_after: u32,
    },
    OriginChanged {
        origin: DateTime<Utc>,
    },
    OffsetsChanged {
        before: u32,
        after: u32,
    },
    IntervalChanged {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    OriginRejected,
}

/// Hook interface for control surfaces that mirror selector state.
///
/// Observers see every applied update after the state is consistent again and
/// cannot mutate the selector from inside a hook.
pub trait SelectorObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: SelectorEvent, context: SelectorContext);
}
