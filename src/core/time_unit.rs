use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{SelectorError, SelectorResult};

const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Granularity used to scale before/after offsets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    #[default]
    Minute,
    Hour,
    Day,
    Week,
}

impl TimeUnit {
    /// All units, ordered from finest to coarsest.
    pub const ALL: [TimeUnit; 5] = [
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
    ];

    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => SECONDS_PER_HOUR,
            Self::Day => SECONDS_PER_DAY,
            Self::Week => 7 * SECONDS_PER_DAY,
        }
    }

    /// Signed offset of `count` units, or `None` past `TimeDelta`'s range.
    #[must_use]
    pub fn offset(self, count: i64) -> Option<TimeDelta> {
        count
            .checked_mul(self.seconds())
            .and_then(TimeDelta::try_seconds)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
        }
    }

    /// Capitalized name as shown in a unit picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Second => "Second",
            Self::Minute => "Minute",
            Self::Hour => "Hour",
            Self::Day => "Day",
            Self::Week => "Week",
        }
    }

    /// Offset count used for before/after when none is supplied.
    #[must_use]
    pub const fn default_offset(self) -> u32 {
        match self {
            Self::Second | Self::Minute => 60,
            Self::Hour => 6,
            Self::Day | Self::Week => 1,
        }
    }

    /// Lower bound for the maximum offset when none is supplied.
    #[must_use]
    pub const fn default_max_offset(self) -> u32 {
        match self {
            Self::Second => 300,
            Self::Minute => 240,
            Self::Hour => 48,
            Self::Day => 28,
            Self::Week => 20,
        }
    }

    /// Resolves a maximum offset that is never below `value`.
    ///
    /// An explicit maximum is kept unless it is smaller than `value`.
    /// Otherwise the bound is four times the current value (or one) and at
    /// least the unit's default maximum.
    #[must_use]
    pub fn resolve_max_offset(self, explicit: Option<u32>, value: u32) -> u32 {
        match explicit {
            Some(max) => max.max(value),
            None => {
                let magnitude = value.max(1).saturating_mul(4);
                magnitude.max(self.default_max_offset())
            }
        }
    }

    /// Parses a unit name or abbreviation, falling back to `Minute`.
    ///
    /// Matching is case-insensitive on any prefix of the unit name, with a
    /// trailing plural `s` ignored (`"m"`, `"min"`, `"Hours"`).
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        Self::match_prefix(raw).unwrap_or(Self::Minute)
    }

    /// Picks a unit that suits the length of `period`.
    #[must_use]
    pub fn infer_from_period(period: TimeDelta) -> Self {
        let seconds = period.num_seconds().unsigned_abs();
        if seconds > SECONDS_PER_DAY as u64 {
            Self::Day
        } else if seconds > SECONDS_PER_HOUR as u64 {
            Self::Hour
        } else {
            Self::Minute
        }
    }

    fn match_prefix(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_ascii_lowercase();
        if lowered.is_empty() {
            return None;
        }
        let candidate = match lowered.strip_suffix('s') {
            Some(stem) if !stem.is_empty() => stem,
            _ => lowered.as_str(),
        };
        Self::ALL
            .into_iter()
            .find(|unit| unit.name().starts_with(candidate))
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeUnit {
    type Err = SelectorError;

    fn from_str(raw: &str) -> SelectorResult<Self> {
        Self::match_prefix(raw)
            .ok_or_else(|| SelectorError::Validation(format!("unknown time unit `{raw}`")))
    }
}
