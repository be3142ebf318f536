use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{TimeInterval, TimeUnit, parse_timestamp};
use crate::error::{SelectorError, SelectorResult};

pub const DEFAULT_LABEL: &str = "Set query time boundaries";

const KNOWN_KEYS: [&str; 12] = [
    "origin_time",
    "start",
    "end",
    "interval",
    "before",
    "after",
    "max_before",
    "max_after",
    "unit",
    "units",
    "label",
    "description",
];

/// Construction options for [`super::TimeRangeSelector`].
///
/// Exactly one initialization mode may be set: `origin_time`, the
/// `start`/`end` pair, or `interval`. When none is set the origin is the
/// current time. The type is serializable so hosts can persist a picker setup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOptions")]
pub struct SelectorOptions {
    pub origin_time: Option<DateTime<Utc>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub interval: Option<TimeInterval>,
    pub before: Option<u32>,
    pub after: Option<u32>,
    pub max_before: Option<u32>,
    pub max_after: Option<u32>,
    pub unit: Option<TimeUnit>,
    pub label: Option<String>,
}

/// Wire shape of [`SelectorOptions`], with timestamps and units kept as text.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOptions {
    #[serde(default)]
    origin_time: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    interval: Option<RawInterval>,
    #[serde(default)]
    before: Option<u32>,
    #[serde(default)]
    after: Option<u32>,
    #[serde(default)]
    max_before: Option<u32>,
    #[serde(default)]
    max_after: Option<u32>,
    #[serde(default, alias = "units")]
    unit: Option<String>,
    #[serde(default, alias = "description")]
    label: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInterval {
    start: String,
    end: String,
}

impl TryFrom<RawOptions> for SelectorOptions {
    type Error = SelectorError;

    fn try_from(raw: RawOptions) -> SelectorResult<Self> {
        let timestamp = |value: Option<String>| value.as_deref().map(parse_timestamp).transpose();
        let interval = raw
            .interval
            .map(|interval| {
                TimeInterval::new(
                    parse_timestamp(&interval.start)?,
                    parse_timestamp(&interval.end)?,
                )
            })
            .transpose()?;

        Ok(Self {
            origin_time: timestamp(raw.origin_time)?,
            start: timestamp(raw.start)?,
            end: timestamp(raw.end)?,
            interval,
            before: raw.before,
            after: raw.after,
            max_before: raw.max_before,
            max_after: raw.max_after,
            unit: raw.unit.as_deref().map(TimeUnit::parse_lenient),
            label: raw.label,
        })
    }
}

impl SelectorOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_origin_time(mut self, origin: DateTime<Utc>) -> Self {
        self.origin_time = Some(origin);
        self
    }

    #[must_use]
    pub fn with_start_end(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: TimeInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    #[must_use]
    pub fn with_before(mut self, before: u32) -> Self {
        self.before = Some(before);
        self
    }

    #[must_use]
    pub fn with_after(mut self, after: u32) -> Self {
        self.after = Some(after);
        self
    }

    #[must_use]
    pub fn with_max_before(mut self, max_before: u32) -> Self {
        self.max_before = Some(max_before);
        self
    }

    #[must_use]
    pub fn with_max_after(mut self, max_after: u32) -> Self {
        self.max_after = Some(max_after);
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Sets the unit from free text; unrecognized names select `Minute`.
    #[must_use]
    pub fn with_unit_name(mut self, unit: &str) -> Self {
        self.unit = Some(TimeUnit::parse_lenient(unit));
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Parses options from a JSON object.
    ///
    /// Unknown, duplicate or mistyped keys are configuration errors; bad
    /// timestamps and reversed intervals are validation errors.
    pub fn from_json(raw: &str) -> SelectorResult<Self> {
        let raw: RawOptions = serde_json::from_str(raw)
            .map_err(|err| SelectorError::Configuration(err.to_string()))?;
        Self::try_from(raw)
    }

    /// Builds options from string key/value pairs, as handed over by a form
    /// or a notebook cell.
    ///
    /// `interval` takes `START/END`. Offsets accept signed integers and keep
    /// their magnitude.
    pub fn from_pairs<I, K, V>(pairs: I) -> SelectorResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        let mut seen = HashSet::new();

        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.as_ref();
            if !KNOWN_KEYS.contains(&key) {
                return Err(SelectorError::Configuration(format!(
                    "unknown option `{key}`; expected one of {}",
                    KNOWN_KEYS.join(", ")
                )));
            }
            if !seen.insert(canonical_key(key).to_owned()) {
                return Err(SelectorError::Configuration(format!(
                    "option `{key}` supplied more than once"
                )));
            }
            trace!(key, value, "applying selector option");

            match key {
                "origin_time" => options.origin_time = Some(parse_timestamp(value)?),
                "start" => options.start = Some(parse_timestamp(value)?),
                "end" => options.end = Some(parse_timestamp(value)?),
                "interval" => options.interval = Some(parse_interval(value)?),
                "before" => options.before = Some(parse_offset(key, value)?),
                "after" => options.after = Some(parse_offset(key, value)?),
                "max_before" => options.max_before = Some(parse_offset(key, value)?),
                "max_after" => options.max_after = Some(parse_offset(key, value)?),
                "unit" | "units" => options.unit = Some(TimeUnit::parse_lenient(value)),
                _ => options.label = Some(value.to_owned()),
            }
        }

        Ok(options)
    }
}

fn canonical_key(key: &str) -> &str {
    match key {
        "units" => "unit",
        "description" => "label",
        other => other,
    }
}

fn parse_offset(key: &str, value: &str) -> SelectorResult<u32> {
    let parsed: i64 = value.trim().parse().map_err(|_| {
        SelectorError::Validation(format!("option `{key}` must be an integer, got `{value}`"))
    })?;
    u32::try_from(parsed.unsigned_abs())
        .map_err(|_| SelectorError::Validation(format!("option `{key}` is out of range")))
}

fn parse_interval(value: &str) -> SelectorResult<TimeInterval> {
    let (start, end) = value.split_once('/').ok_or_else(|| {
        SelectorError::Validation(format!("interval must be `START/END`, got `{value}`"))
    })?;
    TimeInterval::new(parse_timestamp(start)?, parse_timestamp(end)?)
}
