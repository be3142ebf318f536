use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::format_timestamp;
use crate::error::{SelectorError, SelectorResult};

/// Absolute query window with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = SelectorError;

    fn try_from(raw: RawInterval) -> SelectorResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> SelectorResult<Self> {
        if start > end {
            return Err(SelectorError::Validation(format!(
                "interval start {} is after end {}",
                format_timestamp(start),
                format_timestamp(end)
            )));
        }
        Ok(Self { start, end })
    }

    /// Builds the window `[origin + lower, origin + upper]`.
    ///
    /// Offsets are swapped when `lower > upper` so the invariant holds.
    /// Endpoints outside chrono's representable range are a validation error.
    pub fn around(
        origin: DateTime<Utc>,
        lower: TimeDelta,
        upper: TimeDelta,
    ) -> SelectorResult<Self> {
        let (lower, upper) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        match (
            origin.checked_add_signed(lower),
            origin.checked_add_signed(upper),
        ) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(SelectorError::Validation(format!(
                "window around {} exceeds the supported date range",
                format_timestamp(origin)
            ))),
        }
    }

    #[must_use]
    pub fn start(self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn period(self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, time: DateTime<Utc>) -> bool {
        self.start <= time && time <= self.end
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    use super::TimeInterval;
    use crate::error::SelectorError;

    #[test]
    fn reversed_bounds_are_rejected() {
        let start = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let err = TimeInterval::new(start, end).expect_err("start after end must fail");
        assert!(format!("{err}").contains("is after end"));
    }

    #[test]
    fn around_orders_offsets() {
        let origin = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();
        let interval = TimeInterval::around(origin, TimeDelta::hours(1), TimeDelta::hours(-2))
            .expect("in range");
        assert_eq!(interval.start(), origin - TimeDelta::hours(2));
        assert_eq!(interval.end(), origin + TimeDelta::hours(1));
        assert_eq!(interval.period(), TimeDelta::hours(3));
        assert!(interval.contains(origin));
    }

    #[test]
    fn around_rejects_unrepresentable_endpoints() {
        let origin = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();
        let err = TimeInterval::around(
            origin,
            -TimeDelta::weeks(i64::from(u32::MAX)),
            TimeDelta::zero(),
        )
        .expect_err("start before year -262143 must fail");
        assert!(matches!(err, SelectorError::Validation(_)));
        assert!(format!("{err}").contains("supported date range"));

        let late = TimeInterval::around(
            DateTime::<Utc>::MAX_UTC,
            TimeDelta::zero(),
            TimeDelta::seconds(1),
        );
        assert!(late.is_err());
    }

    #[test]
    fn deserialization_enforces_ordering() {
        let raw = r#"{"start":"2023-01-02T00:00:00Z","end":"2023-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<TimeInterval>(raw).is_err());
    }
}
