use chrono::{DateTime, TimeDelta, Utc};

use crate::core::{TimeInterval, TimeUnit};
use crate::error::{SelectorError, SelectorResult};

use super::SelectorOptions;
use super::selector::derive_interval;

/// Initialization mode resolved from [`SelectorOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum InitMode {
    Interval(TimeInterval),
    Origin(Option<DateTime<Utc>>),
}

pub(super) fn resolve_init_mode(options: &SelectorOptions) -> SelectorResult<InitMode> {
    let has_start_end = options.start.is_some() || options.end.is_some();

    if let Some(interval) = options.interval {
        if has_start_end || options.origin_time.is_some() {
            return Err(SelectorError::Configuration(
                "`interval` cannot be combined with `start`/`end` or `origin_time`".to_owned(),
            ));
        }
        return Ok(InitMode::Interval(interval));
    }

    if has_start_end {
        if options.origin_time.is_some() {
            return Err(SelectorError::Configuration(
                "`start`/`end` cannot be combined with `origin_time`".to_owned(),
            ));
        }
        let (Some(start), Some(end)) = (options.start, options.end) else {
            return Err(SelectorError::Configuration(
                "`start` and `end` must be supplied together".to_owned(),
            ));
        };
        return TimeInterval::new(start, end).map(InitMode::Interval);
    }

    Ok(InitMode::Origin(options.origin_time))
}

/// Clamps a control-surface offset range to `[-max_before, 0]` and
/// `[0, max_after]`.
pub(super) fn clamp_offset_range(
    lower: i64,
    upper: i64,
    max_before: u32,
    max_after: u32,
) -> (i64, i64) {
    (
        lower.clamp(-i64::from(max_before), 0),
        upper.clamp(0, i64::from(max_after)),
    )
}

/// Widest window the range control can reach from `origin`.
///
/// Every narrower offset range lies inside it, so once this succeeds no
/// `set_offsets` call can leave the supported date range.
pub(super) fn reachable_window(
    origin: DateTime<Utc>,
    unit: TimeUnit,
    max_before: u32,
    max_after: u32,
) -> SelectorResult<TimeInterval> {
    derive_interval(origin, unit, -i64::from(max_before), i64::from(max_after))
}

/// Whole units contained in `period`, saturating at `u32::MAX`.
pub(super) fn whole_units(period: TimeDelta, unit: TimeUnit) -> u32 {
    let count = period.num_seconds().unsigned_abs() / unit.seconds().unsigned_abs();
    u32::try_from(count).unwrap_or(u32::MAX)
}
