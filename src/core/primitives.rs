use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{SelectorError, SelectorResult};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const TIME_OF_DAY_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Parses an RFC 3339 timestamp or a naive `YYYY-MM-DD[ T]HH:MM[:SS[.f]]`
/// value interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> SelectorResult<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| SelectorError::Validation(format!("unparsable timestamp `{raw}`")))
}

/// Parses a 24h time-of-day such as `13:45`, `13:45:10` or `13:45:10.250000`.
pub fn parse_time_of_day(raw: &str) -> SelectorResult<NaiveTime> {
    let trimmed = raw.trim();
    TIME_OF_DAY_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| SelectorError::Validation(format!("malformed time of day `{raw}`")))
}

#[must_use]
pub fn combine_date_time(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS[.ffffff]` for display.
#[must_use]
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.naive_utc().format("%Y-%m-%d %H:%M:%S%.f").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    use super::{combine_date_time, format_timestamp, parse_time_of_day, parse_timestamp};

    #[test]
    fn naive_and_offset_timestamps_parse_to_utc() {
        let expected = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2023-01-01T12:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2023-01-01 12:00").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2023-01-01T14:00:00+02:00").unwrap(),
            expected
        );
    }

    #[test]
    fn garbage_timestamp_is_a_validation_error() {
        let err = parse_timestamp("yesterday-ish").expect_err("must fail");
        assert!(format!("{err}").contains("unparsable timestamp"));
    }

    #[test]
    fn time_of_day_accepts_fractional_seconds() {
        let parsed = parse_time_of_day("13:45:10.250000").unwrap();
        assert_eq!(
            parsed,
            NaiveTime::from_hms_micro_opt(13, 45, 10, 250_000).unwrap()
        );
        assert_eq!(
            parse_time_of_day("07:05").unwrap(),
            NaiveTime::from_hms_opt(7, 5, 0).unwrap()
        );
        assert!(parse_time_of_day("25:00:00").is_err());
        assert!(parse_time_of_day("noon").is_err());
    }

    #[test]
    fn display_format_uses_space_separator() {
        let date = NaiveDate::from_ymd_opt(2023, 3, 4).unwrap();
        let time = NaiveTime::from_hms_opt(5, 6, 7).unwrap();
        assert_eq!(
            format_timestamp(combine_date_time(date, time)),
            "2023-03-04 05:06:07"
        );
    }
}
