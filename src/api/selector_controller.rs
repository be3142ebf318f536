use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, trace, warn};

use crate::core::{
    TimeInterval, TimeUnit, combine_date_time, format_timestamp, parse_time_of_day,
    parse_timestamp,
};
use crate::error::{SelectorError, SelectorResult};

use super::selector::derive_interval;
use super::selector_validation::{clamp_offset_range, reachable_window};
use super::{SelectorEvent, TimeRangeSelector};

impl TimeRangeSelector {
    /// Switches the unit and resets offsets and their bounds to the unit's
    /// defaults.
    ///
    /// Fails without touching the selector when the new bounds would reach
    /// past the supported date range from the current origin.
    pub fn set_unit(&mut self, unit: TimeUnit) -> SelectorResult<TimeInterval> {
        let offset = unit.default_offset();
        let max_offset = unit.resolve_max_offset(None, offset);
        if let Err(err) = reachable_window(self.origin, unit, max_offset, max_offset) {
            warn!(
                unit = unit.name(),
                error = %err,
                "unit change rejected; keeping previous unit"
            );
            return Err(err);
        }

        self.unit = unit;
        self.max_before = max_offset;
        self.max_after = max_offset;
        self.apply_offset_range(-i64::from(offset), i64::from(offset));

        debug!(
            unit = unit.name(),
            max_before = self.max_before,
            max_after = self.max_after,
            "selector unit changed"
        );
        self.emit_observer_event(SelectorEvent::UnitChanged {
            unit,
            max_before: self.max_before,
            max_after: self.max_after,
        });
        self.emit_offsets_changed();
        self.emit_interval_changed();
        Ok(self.interval)
    }

    /// Same as [`Self::set_unit`] for a unit picked from free text.
    pub fn set_unit_name(&mut self, unit: &str) -> SelectorResult<TimeInterval> {
        self.set_unit(TimeUnit::parse_lenient(unit))
    }

    /// Moves the origin, keeping the current offsets.
    ///
    /// An origin whose offset bounds reach past the supported date range is
    /// rejected like unparsable text.
    pub fn set_origin(&mut self, origin: DateTime<Utc>) -> SelectorResult<TimeInterval> {
        let (lower, upper) = self.offset_range;
        let derived = reachable_window(origin, self.unit, self.max_before, self.max_after)
            .and_then(|_| derive_interval(origin, self.unit, lower, upper));
        let interval = match derived {
            Ok(interval) => interval,
            Err(err) => return Err(self.reject_origin(err)),
        };
        self.origin = origin;
        self.interval = interval;

        debug!(origin = %format_timestamp(origin), "selector origin changed");
        self.emit_observer_event(SelectorEvent::OriginChanged { origin });
        self.emit_interval_changed();
        Ok(self.interval)
    }

    /// Moves the origin to a parsed timestamp.
    ///
    /// Unparsable input leaves the selector untouched; the error is returned
    /// and observers receive [`SelectorEvent::OriginRejected`].
    pub fn set_origin_text(&mut self, raw: &str) -> SelectorResult<TimeInterval> {
        match parse_timestamp(raw) {
            Ok(origin) => self.set_origin(origin),
            Err(err) => Err(self.reject_origin(err)),
        }
    }

    /// Moves the origin to `date` at a 24h time-of-day such as `13:45:00`.
    ///
    /// Malformed time text leaves the selector untouched.
    pub fn set_origin_parts(
        &mut self,
        date: NaiveDate,
        time_of_day: &str,
    ) -> SelectorResult<TimeInterval> {
        match parse_time_of_day(time_of_day) {
            Ok(time) => self.set_origin(combine_date_time(date, time)),
            Err(err) => Err(self.reject_origin(err)),
        }
    }

    /// Applies a range value `(lower, upper)` from the control surface.
    ///
    /// `lower` is clamped to `[-max_before, 0]` and `upper` to
    /// `[0, max_after]`; before/after become their magnitudes.
    pub fn set_offsets(&mut self, lower: i64, upper: i64) -> TimeInterval {
        let (clamped_lower, clamped_upper) =
            clamp_offset_range(lower, upper, self.max_before, self.max_after);
        if (clamped_lower, clamped_upper) != (lower, upper) {
            trace!(
                lower,
                upper,
                clamped_lower,
                clamped_upper,
                "offset range clamped to bounds"
            );
        }
        self.apply_offset_range(clamped_lower, clamped_upper);

        debug!(
            before = self.before,
            after = self.after,
            "selector offsets changed"
        );
        self.emit_offsets_changed();
        self.emit_interval_changed();
        self.interval
    }

    fn apply_offset_range(&mut self, lower: i64, upper: i64) {
        match derive_interval(self.origin, self.unit, lower, upper) {
            Ok(interval) => {
                self.offset_range = (lower, upper);
                self.before = offset_magnitude(lower);
                self.after = offset_magnitude(upper);
                self.interval = interval;
            }
            Err(err) => warn!(error = %err, lower, upper, "offset range left unchanged"),
        }
    }

    fn reject_origin(&mut self, err: SelectorError) -> SelectorError {
        warn!(error = %err, "origin update rejected; keeping previous origin");
        self.emit_observer_event(SelectorEvent::OriginRejected);
        err
    }
}

fn offset_magnitude(offset: i64) -> u32 {
    u32::try_from(offset.unsigned_abs()).unwrap_or(u32::MAX)
}
