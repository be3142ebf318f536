use std::fmt;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{TimeInterval, TimeUnit};
use crate::error::{SelectorError, SelectorResult};
use crate::extensions::SelectorObserver;

use super::selector_options::DEFAULT_LABEL;
use super::selector_validation::{InitMode, reachable_window, resolve_init_mode, whole_units};
use super::{SelectorOptions, SelectorSnapshot};

/// Query time-range picker state.
///
/// Holds an origin, a unit and before/after offsets counted in that unit, and
/// derives the query interval from them. A control surface drives it through
/// `set_unit`, `set_origin*` and `set_offsets`; each returns the new interval
/// and notifies registered observers.
pub struct TimeRangeSelector {
    pub(super) label: String,
    pub(super) origin: DateTime<Utc>,
    pub(super) unit: TimeUnit,
    pub(super) before: u32,
    pub(super) after: u32,
    pub(super) max_before: u32,
    pub(super) max_after: u32,
    pub(super) offset_range: (i64, i64),
    pub(super) interval: TimeInterval,
    pub(super) observers: Vec<Box<dyn SelectorObserver>>,
}

impl TimeRangeSelector {
    pub fn new(options: SelectorOptions) -> SelectorResult<Self> {
        let mode = resolve_init_mode(&options)?;
        let mut unit = options.unit.unwrap_or_default();

        let (origin, interval, before, after) = match mode {
            InitMode::Interval(interval) => {
                if options.unit.is_none() {
                    unit = TimeUnit::infer_from_period(interval.period());
                }
                let before = options
                    .before
                    .unwrap_or_else(|| whole_units(interval.period(), unit));
                let after = options.after.unwrap_or(0);
                (interval.end(), interval, before, after)
            }
            InitMode::Origin(origin) => {
                let origin = origin.unwrap_or_else(Utc::now);
                let before = options.before.unwrap_or(unit.default_offset());
                let after = options.after.unwrap_or(unit.default_offset());
                let interval =
                    derive_interval(origin, unit, -i64::from(before), i64::from(after))?;
                (origin, interval, before, after)
            }
        };

        let max_before = unit.resolve_max_offset(options.max_before, before);
        let max_after = unit.resolve_max_offset(options.max_after, after);
        reachable_window(origin, unit, max_before, max_after)?;

        debug!(
            origin = %origin,
            unit = unit.name(),
            before,
            after,
            max_before,
            max_after,
            "time range selector initialized"
        );

        Ok(Self {
            label: options.label.unwrap_or_else(|| DEFAULT_LABEL.to_owned()),
            origin,
            unit,
            before,
            after,
            max_before,
            max_after,
            offset_range: (-i64::from(before), i64::from(after)),
            interval,
            observers: Vec::new(),
        })
    }

    /// Selector centered on `origin` with explicit offsets.
    pub fn from_origin(
        origin: DateTime<Utc>,
        before: u32,
        after: u32,
        unit: TimeUnit,
    ) -> SelectorResult<Self> {
        Self::new(
            SelectorOptions::new()
                .with_origin_time(origin)
                .with_before(before)
                .with_after(after)
                .with_unit(unit),
        )
    }

    /// Selector covering exactly `interval`, with the unit inferred from its length.
    pub fn from_interval(interval: TimeInterval) -> SelectorResult<Self> {
        Self::new(SelectorOptions::new().with_interval(interval))
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.interval.start()
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.interval.end()
    }

    #[must_use]
    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    #[must_use]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Capitalized unit name, as shown next to the range control.
    #[must_use]
    pub fn units(&self) -> &'static str {
        self.unit.label()
    }

    #[must_use]
    pub fn origin(&self) -> DateTime<Utc> {
        self.origin
    }

    #[must_use]
    pub fn before(&self) -> u32 {
        self.before
    }

    #[must_use]
    pub fn after(&self) -> u32 {
        self.after
    }

    #[must_use]
    pub fn max_before(&self) -> u32 {
        self.max_before
    }

    #[must_use]
    pub fn max_after(&self) -> u32 {
        self.max_after
    }

    /// Current range value as `(-before, after)`.
    #[must_use]
    pub fn offset_range(&self) -> (i64, i64) {
        self.offset_range
    }

    /// Range control limits as `(-max_before, max_after)`.
    #[must_use]
    pub fn offset_bounds(&self) -> (i64, i64) {
        (-i64::from(self.max_before), i64::from(self.max_after))
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn snapshot(&self) -> SelectorSnapshot {
        SelectorSnapshot {
            label: self.label.clone(),
            origin: self.origin,
            unit: self.unit,
            before: self.before,
            after: self.after,
            max_before: self.max_before,
            max_after: self.max_after,
            offset_range: self.offset_range,
            offset_bounds: self.offset_bounds(),
            interval: self.interval,
        }
    }
}

impl fmt::Debug for TimeRangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeRangeSelector")
            .field("label", &self.label)
            .field("origin", &self.origin)
            .field("unit", &self.unit)
            .field("before", &self.before)
            .field("after", &self.after)
            .field("max_before", &self.max_before)
            .field("max_after", &self.max_after)
            .field("interval", &self.interval)
            .field("observers", &self.observers.len())
            .finish()
    }
}

pub(super) fn derive_interval(
    origin: DateTime<Utc>,
    unit: TimeUnit,
    lower: i64,
    upper: i64,
) -> SelectorResult<TimeInterval> {
    let scale = |count: i64| {
        unit.offset(count).ok_or_else(|| {
            SelectorError::Validation(format!("offset of {count} {}s is out of range", unit.name()))
        })
    };
    TimeInterval::around(origin, scale(lower)?, scale(upper)?)
}
